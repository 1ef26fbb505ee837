use anyhow::{bail, Context};
use me7config_core::prelude::*;
use std::env;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        println!("Usage: inspect_ecu <ecu_file> [variable ...] [--write <cfg_file>]");
        return Ok(());
    }

    let mut ecu = EcuFile::new(&args[1]);
    if !ecu.open() {
        bail!(
            "Failed to parse {}: {}",
            ecu.file_name(),
            ecu.last_error()
                .map(|e| e.to_string())
                .unwrap_or_default()
        );
    }

    println!("File: {}", ecu.file_name());
    println!("Version: {}", ecu.version().unwrap_or("-"));
    if let Some(ident) = ecu.identification_info() {
        for (key, value) in ident.entries() {
            println!("  {} = {}", key, value);
        }
    }

    let catalogue = ecu
        .measurements()
        .context("file has no [Measurements] section")?;
    println!("Measurements: {}", catalogue.len());

    let mut rest = args[2..].iter();
    let mut selected = Vec::new();
    let mut output = None;
    while let Some(arg) = rest.next() {
        if arg == "--write" {
            output = rest.next();
        } else {
            selected.push(arg.as_str());
        }
    }

    if selected.is_empty() {
        for m in catalogue.values().take(10) {
            println!("  - {}: address={}, unit={}", m, m.address(), m.unit());
        }
        return Ok(());
    }

    let mut table = MeasurementTable::new();
    for name in selected {
        let m = catalogue
            .get(name)
            .with_context(|| format!("unknown variable '{}'", name))?;
        table.add_measurement(m.clone());
    }

    let config = ConfigFile::with_measurements(ecu.file_name(), table);
    match output {
        Some(path) => config.write(path)?,
        None => config.write_to(std::io::stdout().lock())?,
    }
    Ok(())
}
