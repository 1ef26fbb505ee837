//! ECU Description Files
//!
//! Parses the `.ecu` files exported for ME7 logging. These describe:
//! - File format version
//! - Communication settings (connect mode, baud rate)
//! - ECU identification (hardware/software numbers)
//! - The measurement catalogue (addresses, sizes, scaling)

mod error;
mod sections;
pub mod state;

pub use error::EcuFileError;
pub use sections::{
    CommunicationRecord, IdentificationRecord, KeyValueRecord, LineOutcome, VersionRecord,
};
pub use state::{Section, SectionMachine, SectionState};

use serde::Serialize;
use std::io::Read;
use std::path::{Path, PathBuf};

use crate::measurement::MeasurementTable;
use crate::source;

/// A parsed ECU description file
///
/// Each section is `None` unless its header was found. After a failed
/// [`open`](Self::open) the sections read before the failure are kept, so
/// check which ones are present before use.
#[derive(Debug, Clone, Default, Serialize)]
pub struct EcuFile {
    path: PathBuf,
    version_info: Option<VersionRecord>,
    communication_info: Option<CommunicationRecord>,
    identification_info: Option<IdentificationRecord>,
    measurements: Option<MeasurementTable>,
    #[serde(skip)]
    last_error: Option<EcuFileError>,
}

impl EcuFile {
    /// Create an unopened file handle for a path
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            ..Default::default()
        }
    }

    /// Open and parse the file, reporting only success or failure
    ///
    /// The cause of a failure is kept in [`last_error`](Self::last_error).
    pub fn open(&mut self) -> bool {
        match self.open_detailed() {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!("Failed to open ECU file {}: {}", self.path.display(), e);
                false
            }
        }
    }

    /// Open and parse the file, returning the cause of any failure
    ///
    /// Replaces any sections from an earlier open.
    pub fn open_detailed(&mut self) -> Result<(), EcuFileError> {
        let result = source::read_text(&self.path)
            .map_err(EcuFileError::from)
            .and_then(|content| self.parse_content(&content));
        self.last_error = result.as_ref().err().cloned();
        result
    }

    /// Parse ECU description text that did not come from a file
    pub fn parse(content: &str) -> Result<Self, EcuFileError> {
        let mut file = Self::default();
        file.parse_content(content)?;
        Ok(file)
    }

    /// Parse ECU description text from a reader
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, EcuFileError> {
        let content = source::read_text_from(reader)?;
        Self::parse(&content)
    }

    fn parse_content(&mut self, content: &str) -> Result<(), EcuFileError> {
        let mut machine = SectionMachine::new();
        let result = source::lines(content).try_for_each(|line| machine.process_line(line));
        machine.finish();

        let sections = machine.into_sections();
        self.version_info = sections.version;
        self.communication_info = sections.communication;
        self.identification_info = sections.identification;
        self.measurements = sections.measurements;

        if result.is_ok() {
            tracing::info!(
                "Parsed ECU file {}: version {:?}, {} measurements",
                self.file_name(),
                self.version(),
                self.measurements.as_ref().map_or(0, |m| m.len())
            );
        }
        result
    }

    /// Path the file was created with
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Final path component, or an empty string
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// `[Version]` section
    pub fn version_info(&self) -> Option<&VersionRecord> {
        self.version_info.as_ref()
    }

    /// Shortcut for the `Version` value
    pub fn version(&self) -> Option<&str> {
        self.version_info.as_ref().and_then(|v| v.version())
    }

    /// `[Communication]` section
    pub fn communication_info(&self) -> Option<&CommunicationRecord> {
        self.communication_info.as_ref()
    }

    /// `[Identification]` section
    pub fn identification_info(&self) -> Option<&IdentificationRecord> {
        self.identification_info.as_ref()
    }

    /// `[Measurements]` section
    pub fn measurements(&self) -> Option<&MeasurementTable> {
        self.measurements.as_ref()
    }

    /// Why the last [`open`](Self::open) failed
    pub fn last_error(&self) -> Option<&EcuFileError> {
        self.last_error.as_ref()
    }

    /// Export the parsed sections as pretty-printed JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_sections() {
        let content = "[Version]\r\nVersion = \"1.1\"\r\n\r\n[Communication]\r\nConnect = \"SLOW-0x11\"\r\n\r\n[Identification]\r\nSWNumber = \"1037368072\"\r\n\r\n[Measurements]\r\n; Name, Alias, ...\r\nnmot,EngineSpeed,0x380AA2,1,0x00,{1/min},0,0,40.0,0.0,{Engine speed}\r\n";
        let file = EcuFile::parse(content).unwrap();
        assert_eq!(file.version(), Some("1.1"));
        assert_eq!(
            file.communication_info().unwrap().get("Connect"),
            Some("SLOW-0x11")
        );
        assert_eq!(
            file.identification_info().unwrap().get("SWNumber"),
            Some("1037368072")
        );
        let nmot = file.measurements().unwrap().get("nmot").unwrap();
        assert_eq!(nmot.unit(), "1/min");
        assert_eq!(nmot.factor(), 40.0);
    }

    #[test]
    fn test_empty_input() {
        let file = EcuFile::parse("").unwrap();
        assert!(file.version_info().is_none());
        assert!(file.measurements().is_none());
    }

    #[test]
    fn test_file_name() {
        let file = EcuFile::new("/data/ecu/8D0907551M.ecu");
        assert_eq!(file.file_name(), "8D0907551M.ecu");
        assert_eq!(file.path(), Path::new("/data/ecu/8D0907551M.ecu"));
        assert_eq!(EcuFile::default().file_name(), "");
    }

    #[test]
    fn test_open_missing_file() {
        let mut file = EcuFile::new("/nonexistent/definitely/missing.ecu");
        assert!(!file.open());
        assert!(matches!(file.last_error(), Some(EcuFileError::IoError(_))));
        assert!(file.version_info().is_none());
    }
}
