//! svg2dxf Settings Crate
//!
//! Loads, validates and saves the configuration file that steers a
//! conversion run.

pub mod config;
pub mod error;

pub use config::{
    BatchSettings, Config, ConversionSettings, DEFAULT_INPUT_DIR, DEFAULT_OUTPUT_DIR,
};
pub use error::{SettingsError, SettingsResult};
