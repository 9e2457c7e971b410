/// Error types for the well simulation core
use chrono::NaiveDate;
use thiserror::Error;

/// Main error type for series generation
#[derive(Error, Debug, PartialEq)]
pub enum WsimError {
    /// No calendar date survived the month/weekday filters
    #[error("No dates match the selected period, months and weekdays")]
    EmptySelection,

    /// A time increment rounded to zero, so the flow rate is undefined
    #[error("Time increment on {date} is not positive; flow rate is undefined")]
    DegenerateRate { date: NaiveDate },

    /// Unknown month code
    #[error("Invalid month code: {0}")]
    InvalidMonthCode(String),

    /// Parameter record rejected before generation
    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),
}

/// Type alias for Results using WsimError
pub type Result<T> = std::result::Result<T, WsimError>;
