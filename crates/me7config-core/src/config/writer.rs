//! Logger configuration writer

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use super::{
    ConfigFile, ALIAS_COLUMN_WIDTH, CONFIGURATION_HEADER, LOG_VARIABLES_COMMENT,
    LOG_VARIABLES_HEADER, NAME_COLUMN_WIDTH, SAMPLES_PER_SECOND,
};

const NEWLINE: &str = "\r\n";

/// Render a configuration to text
///
/// The sample rate is always written as [`SAMPLES_PER_SECOND`]. Rows are
/// `;`-separated and padded to fixed columns; longer values are not cut.
pub fn render_config(config: &ConfigFile) -> String {
    let mut out = String::new();
    let mut line = |text: &str| {
        out.push_str(text);
        out.push_str(NEWLINE);
    };

    line(CONFIGURATION_HEADER);
    line(&format!("ECUCharacteristics = {}", config.ecu_characteristics()));
    line(&format!("SamplesPerSecond = {}", SAMPLES_PER_SECOND));
    line("");
    line(LOG_VARIABLES_HEADER);
    line(LOG_VARIABLES_COMMENT);

    for m in config.measurements().into_iter().flat_map(|t| t.values()) {
        line(&format!(
            "{:<name_w$};{:<alias_w$}; {}",
            m.name(),
            m.alias(),
            m.comment(),
            name_w = NAME_COLUMN_WIDTH,
            alias_w = ALIAS_COLUMN_WIDTH,
        ));
    }

    out
}

/// Write a configuration to any writer
pub fn write_config<W: Write>(config: &ConfigFile, mut writer: W) -> io::Result<()> {
    writer.write_all(render_config(config).as_bytes())?;
    writer.flush()
}

/// Create or overwrite a configuration file
///
/// The whole file is rendered before the target is touched.
pub fn write_config_file<P: AsRef<Path>>(config: &ConfigFile, path: P) -> io::Result<()> {
    let content = render_config(config);
    fs::write(path.as_ref(), content)?;
    tracing::info!(
        "Wrote log configuration {} ({} variables)",
        path.as_ref().display(),
        config.measurements().map_or(0, |t| t.len())
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::measurement::{Measurement, MeasurementTable};

    #[test]
    fn test_render_layout() {
        let table: MeasurementTable = vec![
            Measurement::builder("nmot").alias("EngineSpeed").comment("Engine speed").build(),
            Measurement::builder("tmot").build(),
        ]
        .into_iter()
        .collect();
        let config = ConfigFile::with_measurements("8D0907551M", table);

        let text = render_config(&config);
        let lines: Vec<&str> = text.split("\r\n").collect();
        assert_eq!(lines[0], "[Configuration]");
        assert_eq!(lines[1], "ECUCharacteristics = 8D0907551M");
        assert_eq!(lines[2], "SamplesPerSecond = 20");
        assert_eq!(lines[3], "");
        assert_eq!(lines[4], "[LogVariables]");
        assert_eq!(
            lines[5],
            ";Name            [Alias]                             [; Comment]"
        );
        assert_eq!(
            lines[6],
            "nmot            ;EngineSpeed                          ; Engine speed"
        );
        assert_eq!(lines[7], format!("tmot{};{}; ", " ".repeat(12), " ".repeat(37)));
        assert_eq!(lines[8], "");
        assert_eq!(lines.len(), 9);
    }

    #[test]
    fn test_long_values_are_not_truncated() {
        let long_name = "a_very_long_variable_name";
        let table: MeasurementTable = vec![Measurement::builder(long_name).alias("A").build()]
            .into_iter()
            .collect();
        let text = render_config(&ConfigFile::with_measurements("x", table));
        assert!(text.contains(&format!("{};A{}; ", long_name, " ".repeat(36))));
    }

    #[test]
    fn test_fixed_sample_rate() {
        let mut config = ConfigFile::new("x");
        config.read_str("SamplesPerSecond = 50").unwrap();
        assert_eq!(config.samples_per_second(), 50);
        assert!(render_config(&config).contains("SamplesPerSecond = 20\r\n"));
    }

    #[test]
    fn test_absent_table_writes_headers_only() {
        let text = render_config(&ConfigFile::new("x"));
        assert!(text.ends_with("[LogVariables]\r\n;Name            [Alias]                             [; Comment]\r\n"));
    }
}
