//! Generated reports persisted between the generate and export steps.

use serde::{Deserialize, Serialize};
use std::path::Path;
use wsim_data::consumption::{ConsumptionParams, ConsumptionReport};
use wsim_data::well_test::{PumpingTestParams, RecoveryTestParams, TestReading};

/// A generated report together with the parameters that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Bundle {
    Consumption {
        params: ConsumptionParams,
        report: ConsumptionReport,
    },
    WellTest {
        pumping_params: PumpingTestParams,
        recovery_params: RecoveryTestParams,
        /// Recovery starts at the pumping final level and ends at its initial level.
        recovery_levels: (f64, f64),
        pumping: Vec<TestReading>,
        recovery: Vec<TestReading>,
    },
}

impl Bundle {
    pub fn write(&self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    pub fn read(path: impl AsRef<Path>) -> anyhow::Result<Bundle> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Failed to read bundle {}: {}", path.display(), e))?;
        Ok(serde_json::from_str(&json)?)
    }

    pub fn row_count(&self) -> usize {
        match self {
            Bundle::Consumption { report, .. } => report.rows.len(),
            Bundle::WellTest {
                pumping, recovery, ..
            } => pumping.len() + recovery.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Bundle;
    use chrono::{NaiveDate, NaiveTime};
    use wsim_data::well_test::{PumpingTestParams, RecoveryTestParams, TestReading};

    #[test]
    fn test_bundle_round_trips_through_file() {
        let start = NaiveDate::from_ymd_opt(2024, 5, 10)
            .unwrap()
            .and_hms_opt(7, 0, 0)
            .unwrap();
        let bundle = Bundle::WellTest {
            pumping_params: PumpingTestParams {
                start_date: start.date(),
                start_time: start.time(),
                initial_level: 12.0,
                final_level: 35.0,
                initial_flow: 20.0,
                final_flow: 14.0,
                stabilization_minutes: 90,
                total_hours: 4,
            },
            recovery_params: RecoveryTestParams {
                start_date: start.date(),
                start_time: NaiveTime::from_hms_opt(11, 0, 0).unwrap(),
                end_time: NaiveTime::from_hms_opt(12, 0, 0).unwrap(),
                stabilization_minutes: 30,
                reading_count: 3,
            },
            recovery_levels: (35.0, 12.0),
            pumping: vec![TestReading {
                elapsed_minutes: 0.0,
                timestamp: start,
                level: 12.0,
                flow: Some(0.0),
            }],
            recovery: vec![],
        };
        let path = std::env::temp_dir().join(format!("wsim-bundle-{}.json", std::process::id()));
        bundle.write(&path).unwrap();
        let json = std::fs::read_to_string(&path).unwrap();
        assert!(json.contains(r#""kind": "well_test""#));
        let back = Bundle::read(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(back, bundle);
        assert_eq!(back.row_count(), 1);
    }

    #[test]
    fn test_bundle_read_missing_file() {
        let path = std::env::temp_dir().join("wsim-bundle-does-not-exist.json");
        assert!(Bundle::read(path).is_err());
    }
}
