//! Report generation for synthetic well meter series.
//!
//! This crate turns the generators in `wsim-core` into the two reports the
//! toolkit produces: the daily consumption table and the pumping/recovery
//! well test.

pub mod consumption;

/// Running totals over per-date meter increments.
pub mod accumulation {
    use chrono::{Datelike, NaiveDate};
    use wsim_utils::numbers::round3;

    /// Running meter readings: `start` plus the prefix sums of `increments`,
    /// each rounded to 3 decimal places.
    pub fn accumulate(start: f64, increments: &[f64]) -> Vec<f64> {
        increments
            .iter()
            .scan(start, |reading, increment| {
                *reading += increment;
                Some(round3(*reading))
            })
            .collect()
    }

    /// Per-date cumulative increment within the date's calendar month.
    ///
    /// `dates` must be sorted; the running total restarts whenever the
    /// (year, month) changes. Values are rounded to 3 decimal places.
    pub fn month_to_date(dates: &[NaiveDate], increments: &[f64]) -> Vec<f64> {
        let mut current_month: Option<(i32, u32)> = None;
        let mut running = 0.0;
        dates
            .iter()
            .zip(increments)
            .map(|(date, increment)| {
                let key = (date.year(), date.month());
                if current_month != Some(key) {
                    current_month = Some(key);
                    running = 0.0;
                }
                running += increment;
                round3(running)
            })
            .collect()
    }

}
