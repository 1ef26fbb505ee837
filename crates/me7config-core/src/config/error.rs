//! Error types for logger configuration files

use thiserror::Error;

use crate::measurement::MeasurementError;

/// Errors reading or writing a logger configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// A `Key = Value` line with nothing after the key
    #[error("Missing value for '{key}' at line {line}")]
    MissingValue { line: usize, key: String },

    #[error("Invalid SamplesPerSecond '{value}' at line {line}")]
    InvalidSampleRate { line: usize, value: String },

    #[error("Invalid log variable at line {line}: {source}")]
    InvalidMeasurement {
        line: usize,
        #[source]
        source: MeasurementError,
    },
}
