use crate::error::{Result, WsimError};
use serde::{Deserialize, Serialize};

/// Start and end readings of a cumulative meter.
#[derive(Debug, PartialEq, Clone, Copy, Serialize, Deserialize)]
pub struct MeterPair {
    pub start: f64,
    pub end: f64,
}

impl MeterPair {
    pub fn new(start: f64, end: f64) -> Self {
        MeterPair { start, end }
    }

    /// Total amount the meter advanced.
    pub fn delta(&self) -> f64 {
        self.end - self.start
    }

    /// Meters only count up: the end reading must exceed the start.
    pub fn validate(&self, name: &str) -> Result<()> {
        if !self.start.is_finite() || !self.end.is_finite() || self.start < 0.0 {
            return Err(WsimError::InvalidParameters(format!(
                "{name} readings must be finite and non-negative"
            )));
        }
        if self.end <= self.start {
            return Err(WsimError::InvalidParameters(format!(
                "{name} end reading {} must be greater than start reading {}",
                self.end, self.start
            )));
        }
        Ok(())
    }
}

/// Largest amount each meter may advance on a single day.
#[derive(Debug, PartialEq, Clone, Copy, Serialize, Deserialize)]
pub struct DailyCaps {
    pub max_time_per_day: f64,
    pub max_volume_per_day: f64,
}

impl DailyCaps {
    pub fn validate(&self) -> Result<()> {
        if self.max_time_per_day > 0.0 && self.max_volume_per_day > 0.0 {
            Ok(())
        } else {
            Err(WsimError::InvalidParameters(
                "daily maximums must be greater than zero".to_string(),
            ))
        }
    }
}
