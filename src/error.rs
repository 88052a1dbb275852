//! Error type shared by the loader and the aggregators.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum BikeshareError {
    #[error("unknown city '{0}' (expected chicago, new york or washington)")]
    UnknownCity(String),

    #[error("unknown month '{0}'")]
    UnknownMonth(String),

    #[error("unknown day of week '{0}'")]
    UnknownDay(String),

    #[error("trip data unavailable at {location}: {reason}")]
    SourceUnavailable { location: String, reason: String },

    #[error("{location} has no 'Start Time' column")]
    MissingStartTime { location: String },

    #[error("line {line}: malformed start time '{value}'")]
    MalformedTimestamp { line: u64, value: String },

    #[error("line {line}: '{value}' is not a valid {column}")]
    InvalidValue {
        line: u64,
        column: &'static str,
        value: String,
    },

    #[error("birth year {0} cannot be represented as a year")]
    InvalidBirthYear(f64),
}

pub type Result<T> = std::result::Result<T, BikeshareError>;
