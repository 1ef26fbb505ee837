//! Error types for ECU description parsing

use thiserror::Error;

use crate::measurement::MeasurementError;

/// Errors that abort parsing of an ECU description file
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EcuFileError {
    #[error("I/O error: {0}")]
    IoError(String),

    /// A `[Version]` line that is not `Key = Value`
    #[error("Invalid line for [Version] at line {line}: '{content}'")]
    InvalidVersionLine { line: usize, content: String },

    #[error("Invalid measurement at line {line}: {source}")]
    InvalidMeasurement {
        line: usize,
        #[source]
        source: MeasurementError,
    },
}

impl From<std::io::Error> for EcuFileError {
    fn from(e: std::io::Error) -> Self {
        EcuFileError::IoError(e.to_string())
    }
}
