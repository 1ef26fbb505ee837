//! Measurement catalogue
//!
//! A measurement is one readable signal of the ECU: where it lives in memory,
//! how wide it is, and how to scale the raw value for display. The same table
//! type backs the `[Measurements]` section of an ECU description and the
//! `[LogVariables]` section of a logger configuration.

mod error;
mod parser;

pub use error::MeasurementError;
pub use parser::{parse_measurement_line, MIN_FIELDS};

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// One row of a device's measurement catalogue
///
/// Values are built in one step (by the row parser or [`MeasurementBuilder`])
/// and never change afterwards.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    name: String,
    alias: String,
    address: String,
    size: i16,
    bit_mask: String,
    unit: String,
    signed: bool,
    inverse: bool,
    factor: f64,
    offset: f64,
    comment: String,
}

impl Measurement {
    /// Start building a measurement with the given name
    pub fn builder(name: impl Into<String>) -> MeasurementBuilder {
        MeasurementBuilder {
            inner: Measurement {
                name: name.into(),
                ..Default::default()
            },
        }
    }

    /// Internal variable name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Display label
    pub fn alias(&self) -> &str {
        &self.alias
    }

    /// Raw address token, e.g. `0x380AA2`
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Word size
    pub fn size(&self) -> i16 {
        self.size
    }

    /// Raw bit mask token
    pub fn bit_mask(&self) -> &str {
        &self.bit_mask
    }

    /// Unit label
    pub fn unit(&self) -> &str {
        &self.unit
    }

    /// Whether the raw value is two's complement
    pub fn is_signed(&self) -> bool {
        self.signed
    }

    /// Whether the value is stored inverted
    pub fn is_inverse(&self) -> bool {
        self.inverse
    }

    /// Scale factor (zero when the source token was not a number)
    pub fn factor(&self) -> f64 {
        self.factor
    }

    /// Translation applied after scaling
    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// Free-text comment
    pub fn comment(&self) -> &str {
        &self.comment
    }
}

impl fmt::Display for Measurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.alias.is_empty() {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{} - ({})", self.alias, self.name)
        }
    }
}

/// Builder for [`Measurement`]
#[derive(Debug, Clone)]
pub struct MeasurementBuilder {
    inner: Measurement,
}

impl MeasurementBuilder {
    /// Set `alias`
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.inner.alias = alias.into();
        self
    }

    /// Set `address`
    pub fn address(mut self, address: impl Into<String>) -> Self {
        self.inner.address = address.into();
        self
    }

    /// Set `size`
    pub fn size(mut self, size: i16) -> Self {
        self.inner.size = size;
        self
    }

    /// Set `bit_mask`
    pub fn bit_mask(mut self, bit_mask: impl Into<String>) -> Self {
        self.inner.bit_mask = bit_mask.into();
        self
    }

    /// Set `unit`
    pub fn unit(mut self, unit: impl Into<String>) -> Self {
        self.inner.unit = unit.into();
        self
    }

    /// Set `signed`
    pub fn signed(mut self, signed: bool) -> Self {
        self.inner.signed = signed;
        self
    }

    /// Set `inverse`
    pub fn inverse(mut self, inverse: bool) -> Self {
        self.inner.inverse = inverse;
        self
    }

    /// Set `factor`
    pub fn factor(mut self, factor: f64) -> Self {
        self.inner.factor = factor;
        self
    }

    /// Set `offset`
    pub fn offset(mut self, offset: f64) -> Self {
        self.inner.offset = offset;
        self
    }

    /// Set `comment`
    pub fn comment(mut self, comment: impl Into<String>) -> Self {
        self.inner.comment = comment.into();
        self
    }

    /// Finish building
    pub fn build(self) -> Measurement {
        self.inner
    }
}

/// Ordered, name-indexed collection of measurements
///
/// Every insert appends to the ordered list and points the name index at the
/// new entry. Inserting a duplicate name therefore keeps both rows in
/// [`values`](Self::values) while [`get`](Self::get) returns the latest one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<Measurement>", into = "Vec<Measurement>")]
pub struct MeasurementTable {
    measurements: Vec<Measurement>,
    by_name: HashMap<String, usize>,
}

impl MeasurementTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one line of a measurement section
    ///
    /// Blank lines and `;` comments are skipped. Everything else becomes a
    /// measurement; see [`parse_measurement_line`].
    pub fn read_line(&mut self, line: &str) -> Result<(), MeasurementError> {
        if line.trim().is_empty() || line.trim_start().starts_with(';') {
            return Ok(());
        }

        let measurement = parse_measurement_line(line)?;
        self.add_measurement(measurement);
        Ok(())
    }

    /// Measurement sections have no end marker, so the table never reports
    /// itself complete.
    pub fn is_complete(&self) -> bool {
        false
    }

    /// Append a measurement, replacing any earlier index entry with the same name
    pub fn add_measurement(&mut self, measurement: Measurement) {
        self.by_name
            .insert(measurement.name.clone(), self.measurements.len());
        self.measurements.push(measurement);
    }

    /// Look up a measurement by name (last inserted wins)
    pub fn get(&self, name: &str) -> Option<&Measurement> {
        self.by_name.get(name).map(|&i| &self.measurements[i])
    }

    /// All measurements in insertion order, duplicates included
    pub fn values(&self) -> impl Iterator<Item = &Measurement> {
        self.measurements.iter()
    }

    /// Number of rows, duplicates included
    pub fn len(&self) -> usize {
        self.measurements.len()
    }

    /// Whether the table holds no rows
    pub fn is_empty(&self) -> bool {
        self.measurements.is_empty()
    }

    /// Number of distinct names
    pub fn unique_names(&self) -> usize {
        self.by_name.len()
    }
}

impl From<Vec<Measurement>> for MeasurementTable {
    fn from(measurements: Vec<Measurement>) -> Self {
        measurements.into_iter().collect()
    }
}

impl From<MeasurementTable> for Vec<Measurement> {
    fn from(table: MeasurementTable) -> Self {
        table.measurements
    }
}

impl FromIterator<Measurement> for MeasurementTable {
    fn from_iter<I: IntoIterator<Item = Measurement>>(iter: I) -> Self {
        let mut table = MeasurementTable::new();
        for m in iter {
            table.add_measurement(m);
        }
        table
    }
}
