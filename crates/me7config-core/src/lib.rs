//! # ME7Config Core Library
//!
//! Readers and writers for the text files used to set up ME7 ECU logging.

#![warn(missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

//!
//! This library provides:
//! - ECU description (`.ecu`) parsing: version, communication,
//!   identification and measurement sections
//! - A shared, name-indexed measurement catalogue
//! - Logger configuration reading and writing
//!
//! ## Example
//!
//! ```rust,ignore
//! use me7config_core::prelude::*;
//!
//! // Load the ECU description
//! let mut ecu = EcuFile::new("8D0907551M.ecu");
//! if !ecu.open() {
//!     eprintln!("failed: {:?}", ecu.last_error());
//! }
//!
//! // Pick variables to log and write a logger configuration
//! let catalogue = ecu.measurements().unwrap();
//! let selected: MeasurementTable = ["nmot", "rl_w"]
//!     .iter()
//!     .filter_map(|name| catalogue.get(name).cloned())
//!     .collect();
//! ConfigFile::with_measurements(ecu.file_name(), selected).write("log.cfg")?;
//! ```

pub mod config;
pub mod ecu_file;
pub mod measurement;
pub mod source;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::{ConfigError, ConfigFile};
    pub use crate::ecu_file::{
        CommunicationRecord, EcuFile, EcuFileError, IdentificationRecord, VersionRecord,
    };
    pub use crate::measurement::{Measurement, MeasurementError, MeasurementTable};
}

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
