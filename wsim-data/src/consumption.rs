//! Daily consumption report: one row per selected date, with both meters
//! advancing by capped random increments from their start to end readings.

use crate::accumulation::{accumulate, month_to_date};
use chrono::{NaiveDate, NaiveTime};
use log::info;
use rand::Rng;
use serde::{Deserialize, Serialize};
use wsim_core::meter::{DailyCaps, MeterPair};
use wsim_core::partition::{distribute, PartitionAdvisory};
use wsim_core::selection::DateSource;
use wsim_core::{Result, WsimError};
use wsim_utils::numbers::round_to;

/// Unit of the flow rate column.
pub const FLOW_UNIT: &str = "m³/h";

/// Readings are taken in the 8 o'clock hour.
pub const READING_HOUR: u32 = 8;

/// Range of the reading minute, inclusive.
pub const READING_MINUTES: (u32, u32) = (10, 59);

/// Everything needed to generate a consumption report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsumptionParams {
    pub dates: DateSource,
    pub time_meter: MeterPair,
    pub volume_meter: MeterPair,
    pub caps: DailyCaps,
}

impl ConsumptionParams {
    pub fn validate(&self) -> Result<()> {
        self.time_meter.validate("time meter")?;
        self.volume_meter.validate("volume meter")?;
        self.caps.validate()
    }
}

/// One line of the consumption report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DateRow {
    pub date: NaiveDate,
    pub time_of_day: NaiveTime,
    /// Time meter reading after this date's increment.
    pub time_meter: f64,
    /// Volume meter reading after this date's increment.
    pub volume_meter: f64,
    pub time_increment: f64,
    pub volume_increment: f64,
    pub volume_month_to_date: f64,
    /// `volume_increment / time_increment`, 2 decimal places.
    pub flow_rate: f64,
    pub unit: String,
    pub annotation: String,
}

/// Generated rows plus the advisories raised while partitioning the meters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsumptionReport {
    pub rows: Vec<DateRow>,
    pub advisories: Vec<PartitionAdvisory>,
}

/// Build the consumption report for `params`.
///
/// Fails with [`WsimError::EmptySelection`] when no date is selected and with
/// [`WsimError::DegenerateRate`] when a date's time increment is not positive.
pub fn build<R: Rng + ?Sized>(
    params: &ConsumptionParams,
    rng: &mut R,
) -> Result<ConsumptionReport> {
    let dates = params.dates.dates();
    if dates.is_empty() {
        return Err(WsimError::EmptySelection);
    }
    let n = dates.len();
    info!(
        "Distributing meters over {} dates from {} to {}",
        n,
        dates[0],
        dates[n - 1]
    );

    let time = distribute(params.time_meter.delta(), n, params.caps.max_time_per_day, rng);
    let volume = distribute(
        params.volume_meter.delta(),
        n,
        params.caps.max_volume_per_day,
        rng,
    );
    let advisories: Vec<PartitionAdvisory> = [time.advisory.clone(), volume.advisory.clone()]
        .into_iter()
        .flatten()
        .collect();

    let time_readings = accumulate(params.time_meter.start, &time.values);
    let volume_readings = accumulate(params.volume_meter.start, &volume.values);
    let month_totals = month_to_date(&dates, &volume.values);

    let mut rows = Vec::with_capacity(n);
    for (i, date) in dates.into_iter().enumerate() {
        let time_increment = time.values[i];
        let volume_increment = volume.values[i];
        if time_increment <= 0.0 {
            return Err(WsimError::DegenerateRate { date });
        }
        rows.push(DateRow {
            date,
            time_of_day: reading_time(rng),
            time_meter: time_readings[i],
            volume_meter: volume_readings[i],
            time_increment,
            volume_increment,
            volume_month_to_date: month_totals[i],
            flow_rate: round_to(volume_increment / time_increment, 2),
            unit: FLOW_UNIT.to_string(),
            annotation: String::new(),
        });
    }

    Ok(ConsumptionReport { rows, advisories })
}

fn reading_time<R: Rng + ?Sized>(rng: &mut R) -> NaiveTime {
    let minute = rng.gen_range(READING_MINUTES.0..=READING_MINUTES.1);
    NaiveTime::from_hms_opt(READING_HOUR, minute, 0).unwrap_or_default()
}
