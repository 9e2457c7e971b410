//! Shared utility functions for well simulation crates.

/// Date and time utility functions
pub mod dates {
    use chrono::{NaiveDate, NaiveTime};

    /// Format a NaiveDate as "DD/MM/YYYY", the layout used by report exports
    pub fn format_date(date: &NaiveDate) -> String {
        date.format("%d/%m/%Y").to_string()
    }

    /// Format a NaiveTime as "HH:MM:SS"
    pub fn format_time(time: &NaiveTime) -> String {
        time.format("%H:%M:%S").to_string()
    }

    /// Parse a date string in "YYYY-MM-DD" format, falling back to "DD/MM/YYYY"
    pub fn parse_date(s: &str) -> anyhow::Result<NaiveDate> {
        let s = s.trim();
        match NaiveDate::parse_from_str(s, "%Y-%m-%d") {
            Ok(date) => Ok(date),
            Err(_) => Ok(NaiveDate::parse_from_str(s, "%d/%m/%Y")?),
        }
    }

    /// Parse a time of day in "HH:MM:SS" or "HH:MM" format
    pub fn parse_time(s: &str) -> anyhow::Result<NaiveTime> {
        let s = s.trim();
        match NaiveTime::parse_from_str(s, "%H:%M:%S") {
            Ok(time) => Ok(time),
            Err(_) => Ok(NaiveTime::parse_from_str(s, "%H:%M")?),
        }
    }

    /// The last day of the given month, or None for an invalid year/month.
    pub fn last_day_of_month(year: i32, month: u32) -> Option<NaiveDate> {
        let (next_year, next_month) = if month == 12 {
            (year + 1, 1)
        } else {
            (year, month + 1)
        };
        NaiveDate::from_ymd_opt(next_year, next_month, 1)?.pred_opt()
    }

}

/// Numeric helpers
pub mod numbers {
    /// Round `value` to `places` decimal places.
    pub fn round_to(value: f64, places: i32) -> f64 {
        let factor = 10f64.powi(places);
        (value * factor).round() / factor
    }

    /// Round to 3 decimal places, the precision of meter readings.
    pub fn round3(value: f64) -> f64 {
        round_to(value, 3)
    }

}
