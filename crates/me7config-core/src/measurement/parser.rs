//! Measurement row parser
//!
//! Rows are comma separated:
//!
//! ```text
//! ;Name, Alias, Address, Size, Bitmask, Unit, S, I, A, B, Comment
//! nmot, EngineSpeed, 0x380AA2, 1, 0x00, {1/min}, 0, 0, 40.0, 0.0, {Engine speed}
//! ```
//!
//! Lines with fewer than [`MIN_FIELDS`] fields are treated as a bare variable
//! name, which is how logger configurations list the variables to record.

use super::{Measurement, MeasurementError};

/// Number of comma-separated fields in a full measurement row
pub const MIN_FIELDS: usize = 11;

/// Token in the S column that marks a signed value
const SIGNED_TOKEN: &str = "1";

/// Token in the I column that marks an inverted value
const INVERSE_TOKEN: &str = "2";

/// Parse one measurement line
///
/// The caller is expected to have filtered blank and comment lines.
pub fn parse_measurement_line(line: &str) -> Result<Measurement, MeasurementError> {
    let parts: Vec<&str> = line.split(',').collect();

    if parts.len() < MIN_FIELDS {
        return Ok(parse_bare_name(line));
    }

    let name = parts[0].trim().to_string();

    let size_token = parts[3].trim();
    let size = size_token
        .parse::<i16>()
        .map_err(|_| MeasurementError::InvalidSize {
            name: name.clone(),
            value: size_token.to_string(),
        })?;

    let factor_token = parts[8].trim();
    let factor = parse_decimal(factor_token).unwrap_or_else(|| {
        tracing::warn!(
            "Measurement '{}' has non-numeric factor '{}', using 0",
            name,
            factor_token
        );
        0.0
    });

    let offset_token = parts[9].trim();
    let offset = parse_decimal(offset_token).ok_or_else(|| MeasurementError::InvalidOffset {
        name: name.clone(),
        value: offset_token.to_string(),
    })?;

    Ok(Measurement {
        name,
        alias: strip_braces(parts[1]),
        address: parts[2].trim().to_string(),
        size,
        bit_mask: parts[4].trim().to_string(),
        unit: strip_braces(parts[5]),
        signed: parts[6].trim() == SIGNED_TOKEN,
        inverse: parts[7].trim() == INVERSE_TOKEN,
        factor,
        offset,
        comment: strip_braces(parts[10]),
    })
}

/// The line itself up to the first space, without trimming
fn parse_bare_name(line: &str) -> Measurement {
    let name = match line.find(' ') {
        Some(pos) => &line[..pos],
        None => line,
    };
    Measurement::builder(name).build()
}

fn strip_braces(field: &str) -> String {
    field.trim().replace(['{', '}'], "")
}

/// Parse a plain decimal number
///
/// Exponent notation and non-finite values are rejected, as a fixed-point
/// decimal parser would.
fn parse_decimal(token: &str) -> Option<f64> {
    if token.contains(['e', 'E']) {
        return None;
    }
    token.parse::<f64>().ok().filter(|v| v.is_finite())
}
