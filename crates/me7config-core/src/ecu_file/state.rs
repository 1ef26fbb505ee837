//! Section state machine
//!
//! Every line is routed by a fixed priority list of rules, two per section:
//!
//! | Priority | Condition                                   | Action           |
//! |----------|---------------------------------------------|------------------|
//! | 1        | no Version record, line is `[Version]`      | open Version     |
//! | 2        | Version record open and incomplete          | feed Version     |
//! | 3        | no Communication record, `[Communication]`  | open Communication |
//! | 4        | Communication open and incomplete           | feed Communication |
//! | 5        | no Identification record, `[Identification]`| open Identification |
//! | 6        | Identification open and incomplete          | feed Identification |
//! | 7        | no Measurements table, `[Measurements]`     | open Measurements |
//! | 8        | Measurements open (never completes)         | feed Measurements |
//!
//! The first matching rule wins and lines matching no rule are dropped.
//! A `[Version]` section without a `Version` key swallows every later line.
//! `[Measurements]` never completes, so after it only headers of sections not
//! yet seen are recognized and every other line is a measurement row.

use super::sections::{KeyValueRecord, LineOutcome, VersionRecord};
use super::EcuFileError;
use crate::measurement::MeasurementTable;

/// A recognized section of an ECU description
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    /// `[Version]`
    Version,
    /// `[Communication]`
    Communication,
    /// `[Identification]`
    Identification,
    /// `[Measurements]`
    Measurements,
}

impl Section {
    /// All sections in routing priority order
    pub const ALL: [Section; 4] = [
        Section::Version,
        Section::Communication,
        Section::Identification,
        Section::Measurements,
    ];

    /// Exact header line that opens the section
    pub fn header(self) -> &'static str {
        match self {
            Section::Version => "[Version]",
            Section::Communication => "[Communication]",
            Section::Identification => "[Identification]",
            Section::Measurements => "[Measurements]",
        }
    }

    fn priority(self) -> usize {
        self as usize
    }
}

/// Where the machine currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionState {
    /// Not inside any open section
    Idle,
    /// Reading `[Version]`
    InVersion,
    /// Reading `[Communication]`
    InCommunication,
    /// Reading `[Identification]`
    InIdentification,
    /// Reading `[Measurements]`
    InMeasurements,
    /// Input exhausted
    Done,
}

impl From<Section> for SectionState {
    fn from(section: Section) -> Self {
        match section {
            Section::Version => SectionState::InVersion,
            Section::Communication => SectionState::InCommunication,
            Section::Identification => SectionState::InIdentification,
            Section::Measurements => SectionState::InMeasurements,
        }
    }
}

/// Routing decision for one line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Create the section's record; the header line is consumed
    Open(Section),
    /// Hand the line to the section's record parser
    Feed(Section),
    /// No rule matched
    Drop,
}

/// Sections collected by a [`SectionMachine`]
#[derive(Debug, Clone, Default)]
pub struct ParsedSections {
    /// `[Version]`, if its header was seen
    pub version: Option<VersionRecord>,
    /// `[Communication]`, if its header was seen
    pub communication: Option<KeyValueRecord>,
    /// `[Identification]`, if its header was seen
    pub identification: Option<KeyValueRecord>,
    /// `[Measurements]`, if its header was seen
    pub measurements: Option<MeasurementTable>,
}

/// Line-at-a-time parser for the ECU description format
#[derive(Debug, Default)]
pub struct SectionMachine {
    sections: ParsedSections,
    line_number: usize,
    finished: bool,
}

impl SectionMachine {
    /// Create a machine with no sections open
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state
    pub fn state(&self) -> SectionState {
        if self.finished {
            return SectionState::Done;
        }
        Section::ALL
            .into_iter()
            .find(|&s| self.is_present(s) && !self.is_complete(s))
            .map(SectionState::from)
            .unwrap_or(SectionState::Idle)
    }

    /// Evaluate the routing rules for a line, starting at a section's rules
    pub fn route(&self, line: &str, from: Section) -> Route {
        for section in Section::ALL.into_iter().skip(from.priority()) {
            let present = self.is_present(section);
            if !present && line == section.header() {
                return Route::Open(section);
            }
            if present && !self.is_complete(section) {
                return Route::Feed(section);
            }
        }
        Route::Drop
    }

    /// Process the next line of input
    pub fn process_line(&mut self, line: &str) -> Result<(), EcuFileError> {
        self.line_number += 1;
        let mut from = Section::Version;

        loop {
            match self.route(line, from) {
                Route::Open(section) => {
                    tracing::debug!("Line {}: opening {}", self.line_number, section.header());
                    self.open(section);
                    return Ok(());
                }
                Route::Feed(section) => match self.feed(section, line)? {
                    LineOutcome::Consumed => return Ok(()),
                    LineOutcome::Closed => {
                        tracing::debug!("Line {}: closed {}", self.line_number, section.header());
                        match Section::ALL.get(section.priority() + 1) {
                            Some(&next) => from = next,
                            None => return Ok(()),
                        }
                    }
                },
                Route::Drop => {
                    if !line.trim().is_empty() {
                        tracing::debug!("Line {}: dropped '{}'", self.line_number, line);
                    }
                    return Ok(());
                }
            }
        }
    }

    /// Mark end of input
    pub fn finish(&mut self) {
        self.finished = true;
    }

    /// Hand back whatever was collected
    pub fn into_sections(self) -> ParsedSections {
        self.sections
    }

    /// Sections collected so far
    pub fn sections(&self) -> &ParsedSections {
        &self.sections
    }

    fn is_present(&self, section: Section) -> bool {
        let s = &self.sections;
        match section {
            Section::Version => s.version.is_some(),
            Section::Communication => s.communication.is_some(),
            Section::Identification => s.identification.is_some(),
            Section::Measurements => s.measurements.is_some(),
        }
    }

    fn is_complete(&self, section: Section) -> bool {
        let s = &self.sections;
        match section {
            Section::Version => s.version.as_ref().is_some_and(|r| r.is_complete()),
            Section::Communication => s.communication.as_ref().is_some_and(|r| r.is_complete()),
            Section::Identification => s.identification.as_ref().is_some_and(|r| r.is_complete()),
            Section::Measurements => s.measurements.as_ref().is_some_and(|t| t.is_complete()),
        }
    }

    fn open(&mut self, section: Section) {
        let s = &mut self.sections;
        match section {
            Section::Version => s.version = Some(VersionRecord::new()),
            Section::Communication => s.communication = Some(KeyValueRecord::new()),
            Section::Identification => s.identification = Some(KeyValueRecord::new()),
            Section::Measurements => s.measurements = Some(MeasurementTable::new()),
        }
    }

    fn feed(&mut self, section: Section, line: &str) -> Result<LineOutcome, EcuFileError> {
        let line_number = self.line_number;
        let s = &mut self.sections;
        match section {
            Section::Version => {
                let record = s.version.get_or_insert_with(VersionRecord::new);
                record
                    .read_line(line)
                    .ok_or_else(|| EcuFileError::InvalidVersionLine {
                        line: line_number,
                        content: line.to_string(),
                    })?;
                Ok(LineOutcome::Consumed)
            }
            Section::Communication => Ok(s
                .communication
                .get_or_insert_with(KeyValueRecord::new)
                .read_line(line)),
            Section::Identification => Ok(s
                .identification
                .get_or_insert_with(KeyValueRecord::new)
                .read_line(line)),
            Section::Measurements => {
                s.measurements
                    .get_or_insert_with(MeasurementTable::new)
                    .read_line(line)
                    .map_err(|source| EcuFileError::InvalidMeasurement {
                        line: line_number,
                        source,
                    })?;
                Ok(LineOutcome::Consumed)
            }
        }
    }
}
