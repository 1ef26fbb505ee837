//! Key/value sections of an ECU description
//!
//! `[Version]` holds a single `Version = "x.y"` entry. `[Communication]` and
//! `[Identification]` hold arbitrary `Key = Value` pairs that are carried
//! through without interpretation.

use serde::{Deserialize, Serialize};

/// Result of feeding one line to a section record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineOutcome {
    /// The line belonged to the section
    Consumed,
    /// The line ended the section and must be routed elsewhere
    Closed,
}

/// Split `Key = Value` on `=`, requiring exactly one separator
fn split_pair(line: &str) -> Option<(&str, &str)> {
    let mut parts = line.split('=');
    let key = parts.next()?;
    let value = parts.next()?;
    if parts.next().is_some() {
        return None;
    }
    Some((key.trim(), value.trim().trim_matches('"')))
}

fn is_section_header(line: &str) -> bool {
    let line = line.trim();
    line.len() >= 2 && line.starts_with('[') && line.ends_with(']')
}

/// The `[Version]` section
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VersionRecord {
    version: Option<String>,
}

impl VersionRecord {
    /// Key that completes the record
    pub const KEY: &'static str = "Version";

    /// Create an empty record
    pub fn new() -> Self {
        Self::default()
    }

    /// File format version, once read
    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    /// Complete once the `Version` key has been read
    pub fn is_complete(&self) -> bool {
        self.version.is_some()
    }

    /// Feed one line. Returns `None` for a line without exactly one `=`,
    /// including blank lines and headers.
    pub fn read_line(&mut self, line: &str) -> Option<()> {
        let (key, value) = split_pair(line)?;
        if key == Self::KEY {
            self.version = Some(value.to_string());
        }
        Some(())
    }
}

/// An open-ended `Key = Value` section
///
/// Pairs are kept in file order. The record ends at the next section header.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KeyValueRecord {
    entries: Vec<(String, String)>,
    #[serde(skip)]
    complete: bool,
}

/// The `[Communication]` section
pub type CommunicationRecord = KeyValueRecord;

/// The `[Identification]` section
pub type IdentificationRecord = KeyValueRecord;

impl KeyValueRecord {
    /// Create an empty record
    pub fn new() -> Self {
        Self::default()
    }

    /// Value for a key; the last occurrence wins
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// All pairs in file order
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of pairs read
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no pairs were read
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether a following section header has closed the record
    pub fn is_complete(&self) -> bool {
        self.complete
    }

    /// Feed one line
    ///
    /// A section header closes the record and is handed back to the caller.
    /// Blank lines, comments and lines that are not `Key = Value` are skipped.
    pub fn read_line(&mut self, line: &str) -> LineOutcome {
        if is_section_header(line) {
            self.complete = true;
            return LineOutcome::Closed;
        }

        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with(';') {
            return LineOutcome::Consumed;
        }

        match trimmed.split_once('=') {
            Some((key, value)) => {
                let value = value.trim().trim_matches('"');
                self.entries.push((key.trim().to_string(), value.to_string()));
            }
            None => tracing::debug!("Skipping line without '=': {}", trimmed),
        }
        LineOutcome::Consumed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_quoted_and_bare() {
        let mut rec = VersionRecord::new();
        assert_eq!(rec.read_line("Version = \"1.1\""), Some(()));
        assert!(rec.is_complete());
        assert_eq!(rec.version(), Some("1.1"));

        let mut rec = VersionRecord::new();
        rec.read_line("  Version=2.0  ").unwrap();
        assert_eq!(rec.version(), Some("2.0"));
    }

    #[test]
    fn test_version_other_key_stays_incomplete() {
        let mut rec = VersionRecord::new();
        assert_eq!(rec.read_line("Format = \"ME7\""), Some(()));
        assert!(!rec.is_complete());

        // Key comparison is case-sensitive
        rec.read_line("version = 1").unwrap();
        assert!(!rec.is_complete());
    }

    #[test]
    fn test_version_rejects_malformed_lines() {
        let mut rec = VersionRecord::new();
        assert_eq!(rec.read_line(""), None);
        assert_eq!(rec.read_line("[Communication]"), None);
        assert_eq!(rec.read_line("Version = a = b"), None);
        assert!(!rec.is_complete());
    }

    #[test]
    fn test_key_value_record() {
        let mut rec = KeyValueRecord::new();
        assert_eq!(rec.read_line("Connect = \"SLOW-0x11\""), LineOutcome::Consumed);
        assert_eq!(rec.read_line(""), LineOutcome::Consumed);
        assert_eq!(rec.read_line("; comment"), LineOutcome::Consumed);
        assert_eq!(rec.read_line("LogSpeed = 56000"), LineOutcome::Consumed);
        assert_eq!(rec.read_line("garbage"), LineOutcome::Consumed);
        assert!(!rec.is_complete());

        assert_eq!(rec.read_line("[Identification]"), LineOutcome::Closed);
        assert!(rec.is_complete());

        assert_eq!(rec.len(), 2);
        assert_eq!(rec.get("Connect"), Some("SLOW-0x11"));
        assert_eq!(rec.get("LogSpeed"), Some("56000"));
        assert_eq!(rec.get("Missing"), None);
    }

    #[test]
    fn test_key_value_keeps_text_after_first_equals() {
        let mut rec = KeyValueRecord::new();
        rec.read_line("Formula = a=b");
        assert_eq!(rec.get("Formula"), Some("a=b"));
    }
}
