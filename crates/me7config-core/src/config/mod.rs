//! Logger Configuration Files
//!
//! A logger configuration names the ECU description it was built for and lists
//! the variables to record:
//!
//! ```text
//! [Configuration]
//! ECUCharacteristics = 8D0907551M.ecu
//! SamplesPerSecond = 20
//!
//! [LogVariables]
//! ;Name            [Alias]                             [; Comment]
//! nmot            ;EngineSpeed                          ; Engine speed
//! ```
//!
//! The writer emits `;`-separated rows while the reader parses rows with the
//! comma-separated measurement format, so reading a written file back only
//! recovers the variable names.

mod error;
mod reader;
mod writer;

pub use error::ConfigError;
pub use writer::{render_config, write_config, write_config_file};

use serde::{Deserialize, Serialize};
use std::io::{Read, Write};
use std::path::Path;

use crate::measurement::MeasurementTable;
use crate::source;

/// Sample rate written to every configuration
pub const SAMPLES_PER_SECOND: i16 = 20;

/// Column width of the variable name
pub const NAME_COLUMN_WIDTH: usize = 16;

/// Column width of the alias
pub const ALIAS_COLUMN_WIDTH: usize = 37;

/// Header of the settings section
pub const CONFIGURATION_HEADER: &str = "[Configuration]";

/// Header of the variable list
pub const LOG_VARIABLES_HEADER: &str = "[LogVariables]";

/// Column legend written under [`LOG_VARIABLES_HEADER`]
pub const LOG_VARIABLES_COMMENT: &str =
    ";Name            [Alias]                             [; Comment]";

/// A logger configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfigFile {
    ecu_characteristics: String,
    samples_per_second: i16,
    measurements: Option<MeasurementTable>,
}

impl ConfigFile {
    /// Create an empty configuration for an ECU characteristics identifier
    pub fn new(ecu_characteristics: impl Into<String>) -> Self {
        Self {
            ecu_characteristics: ecu_characteristics.into(),
            ..Default::default()
        }
    }

    /// Create a configuration that logs the given measurements
    pub fn with_measurements(
        ecu_characteristics: impl Into<String>,
        measurements: MeasurementTable,
    ) -> Self {
        Self {
            measurements: Some(measurements),
            ..Self::new(ecu_characteristics)
        }
    }

    /// ECU characteristics identifier
    pub fn ecu_characteristics(&self) -> &str {
        &self.ecu_characteristics
    }

    /// Sample rate read from a file (0 until one is read)
    pub fn samples_per_second(&self) -> i16 {
        self.samples_per_second
    }

    /// Variables to log, if a `[LogVariables]` section exists
    pub fn measurements(&self) -> Option<&MeasurementTable> {
        self.measurements.as_ref()
    }

    /// Read a configuration file, replacing the measurement table
    ///
    /// `ECUCharacteristics` and `SamplesPerSecond` are only overwritten when
    /// present in the file.
    pub fn read<P: AsRef<Path>>(&mut self, path: P) -> Result<(), ConfigError> {
        let content = source::read_text(path.as_ref())?;
        self.read_str(&content)?;
        tracing::info!(
            "Read log configuration {} ({} variables)",
            path.as_ref().display(),
            self.measurements.as_ref().map_or(0, |t| t.len())
        );
        Ok(())
    }

    /// Read configuration text from a reader
    pub fn read_from<R: Read>(&mut self, reader: R) -> Result<(), ConfigError> {
        let content = source::read_text_from(reader)?;
        self.read_str(&content)
    }

    /// Read configuration text
    pub fn read_str(&mut self, content: &str) -> Result<(), ConfigError> {
        reader::read_config(self, content)
    }

    /// Create or overwrite a configuration file
    pub fn write<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        write_config_file(self, path)?;
        Ok(())
    }

    /// Write the configuration to any writer
    pub fn write_to<W: Write>(&self, writer: W) -> Result<(), ConfigError> {
        write_config(self, writer)?;
        Ok(())
    }

    /// Export as pretty-printed JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
