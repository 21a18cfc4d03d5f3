//! Error types for the core crate.
//!
//! Length values are the only thing parsed at this layer, so the error
//! surface is small. Higher layers wrap these errors with the name of the
//! attribute that carried the bad value.

use thiserror::Error;

/// Errors raised while parsing a declared length such as `21.6mm`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum UnitError {
    /// The value was empty or only whitespace.
    #[error("Empty length value")]
    Empty,

    /// The numeric part of the value could not be parsed.
    #[error("Invalid length '{value}': expected a number optionally followed by one of [{supported}]")]
    InvalidNumber {
        /// The full value as it appeared in the document.
        value: String,
        /// Comma-separated list of recognized unit suffixes.
        supported: String,
    },
}

/// Result type alias for core operations.
pub type Result<T> = std::result::Result<T, UnitError>;
