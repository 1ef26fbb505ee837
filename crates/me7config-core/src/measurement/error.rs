//! Error types for measurement rows

use thiserror::Error;

/// Errors that make a measurement row unusable
///
/// A malformed factor is not an error; it silently becomes zero.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MeasurementError {
    /// The size field is not a 16-bit integer
    #[error("Invalid size '{value}' for measurement '{name}'")]
    InvalidSize { name: String, value: String },

    /// The offset field is not a decimal number
    #[error("Invalid offset '{value}' for measurement '{name}'")]
    InvalidOffset { name: String, value: String },
}
