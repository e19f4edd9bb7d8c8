use chrono::NaiveDateTime;
use thiserror::Error;

/// Errors raised while generating a forecast.
#[derive(Debug, Error)]
pub enum ForecastError {
    #[error("horizon must be at least 1 day, got {0}")]
    HorizonTooShort(i64),

    #[error("horizon of {days} days exceeds the maximum of {max} days")]
    HorizonTooLong { days: i64, max: u32 },

    #[error(transparent)]
    Model(#[from] ModelError),
}

impl ForecastError {
    /// Whether the error was caused by the caller's input.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            ForecastError::HorizonTooShort(_) | ForecastError::HorizonTooLong { .. }
        )
    }
}

/// Errors from the underlying forecasting model.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("model requires regressor '{0}' but no value or default was supplied")]
    MissingRegressor(String),

    #[error("regressor '{name}' has {actual} values, expected {expected}")]
    RegressorLength {
        name: String,
        expected: usize,
        actual: usize,
    },

    #[error("model produced a non-finite prediction at row {0}")]
    NonFinite(usize),

    #[error("model returned {actual} predictions for {expected} rows")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("timestamp {hours} hours after {start} is out of range")]
    TimestampOverflow { start: NaiveDateTime, hours: i64 },

    #[error("invalid model artifact: {0}")]
    InvalidArtifact(String),

    #[error("failed to load model artifact: {0}")]
    Load(String),
}

/// Errors from summarizing a forecast.
#[derive(Debug, Error)]
pub enum SummaryError {
    #[error("cannot summarize an empty forecast")]
    EmptyForecast,
}

/// Errors from loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {message}")]
    Read { path: String, message: String },

    #[error("failed to parse config file {path}: {message}")]
    Parse { path: String, message: String },

    #[error("invalid value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}
