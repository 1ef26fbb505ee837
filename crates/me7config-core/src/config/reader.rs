//! Logger configuration reader

use super::{ConfigError, ConfigFile, LOG_VARIABLES_HEADER};
use crate::measurement::MeasurementTable;
use crate::source;

const ECU_CHARACTERISTICS_KEY: &str = "ECUCharacteristics";
const SAMPLES_PER_SECOND_KEY: &str = "SamplesPerSecond";

/// Read configuration text into an existing [`ConfigFile`]
///
/// The measurement table is reset before reading. Once `[LogVariables]` has
/// been seen every following line is parsed as a measurement row, so the
/// `[Configuration]` keys are only picked up when they come first.
pub(super) fn read_config(config: &mut ConfigFile, content: &str) -> Result<(), ConfigError> {
    config.measurements = None;

    for (index, raw) in source::lines(content).enumerate() {
        let line_number = index + 1;
        let line = raw.trim();
        if line.is_empty() || line.starts_with(';') {
            continue;
        }

        if config.measurements.is_none() && line == LOG_VARIABLES_HEADER {
            config.measurements = Some(MeasurementTable::new());
        } else if let Some(table) = config
            .measurements
            .as_mut()
            .filter(|t| !t.is_complete())
        {
            table
                .read_line(line)
                .map_err(|source| ConfigError::InvalidMeasurement {
                    line: line_number,
                    source,
                })?;
        } else if line.starts_with(ECU_CHARACTERISTICS_KEY) {
            config.ecu_characteristics = value_of(line, line_number, ECU_CHARACTERISTICS_KEY)?;
        } else if line.starts_with(SAMPLES_PER_SECOND_KEY) {
            let value = value_of(line, line_number, SAMPLES_PER_SECOND_KEY)?;
            config.samples_per_second =
                value
                    .parse::<i16>()
                    .map_err(|_| ConfigError::InvalidSampleRate {
                        line: line_number,
                        value,
                    })?;
        } else {
            tracing::debug!("Line {}: ignoring '{}'", line_number, line);
        }
    }

    Ok(())
}

/// Text between the first and second `=`, trimmed
fn value_of(line: &str, line_number: usize, key: &str) -> Result<String, ConfigError> {
    line.split('=')
        .nth(1)
        .map(|v| v.trim().to_string())
        .ok_or_else(|| ConfigError::MissingValue {
            line: line_number,
            key: key.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_configuration_keys() {
        let mut config = ConfigFile::new("initial");
        config
            .read_str("[Configuration]\nECUCharacteristics = 8D0907551M.ecu\nSamplesPerSecond = 10\n")
            .unwrap();
        assert_eq!(config.ecu_characteristics(), "8D0907551M.ecu");
        assert_eq!(config.samples_per_second(), 10);
        assert!(config.measurements().is_none());
    }

    #[test]
    fn test_read_log_variables() {
        let mut config = ConfigFile::new("");
        config
            .read_str(
                "[LogVariables]\n\
                 ;Name  [Alias]  [; Comment]\n\
                 \n\
                 nmot\n\
                 \x20\x20rl_w  ; relative load\n\
                 wped,PedalPos,0x380C1A,2,0x00,%,0,0,0.0015,0,{Pedal}\n",
            )
            .unwrap();

        let table = config.measurements().unwrap();
        let names: Vec<&str> = table.values().map(|m| m.name()).collect();
        assert_eq!(names, vec!["nmot", "rl_w", "wped"]);
        assert_eq!(table.get("wped").unwrap().alias(), "PedalPos");
    }

    #[test]
    fn test_keys_after_log_variables_become_rows() {
        let mut config = ConfigFile::new("orig");
        config
            .read_str("[LogVariables]\nnmot\nECUCharacteristics = other\n")
            .unwrap();
        assert_eq!(config.ecu_characteristics(), "orig");
        assert_eq!(config.measurements().unwrap().len(), 2);
        assert!(config.measurements().unwrap().get("ECUCharacteristics").is_some());
    }

    #[test]
    fn test_value_takes_second_part_only() {
        let mut config = ConfigFile::new("");
        config.read_str("ECUCharacteristics = a = b").unwrap();
        assert_eq!(config.ecu_characteristics(), "a");
    }

    #[test]
    fn test_missing_value() {
        let mut config = ConfigFile::new("");
        let err = config.read_str("\nECUCharacteristics").unwrap_err();
        assert!(matches!(err, ConfigError::MissingValue { line: 2, .. }));
    }

    #[test]
    fn test_invalid_sample_rate() {
        let mut config = ConfigFile::new("");
        let err = config.read_str("SamplesPerSecond = fast").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidSampleRate { line: 1, ref value } if value == "fast"
        ));

        let err = config.read_str("SamplesPerSecond = 70000").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidSampleRate { .. }));
    }

    #[test]
    fn test_read_resets_previous_table() {
        let mut config = ConfigFile::new("");
        config.read_str("[LogVariables]\nnmot\n").unwrap();
        assert!(config.measurements().is_some());
        config.read_str("SamplesPerSecond = 20\n").unwrap();
        assert!(config.measurements().is_none());
    }
}
