//! Shared policy and default types.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Declared width used when a document has none.
pub const DEFAULT_WIDTH: &str = "21.6mm";
/// Declared height used when a document has none.
pub const DEFAULT_HEIGHT: &str = "37.8mm";
/// ViewBox used when a document has none.
pub const DEFAULT_VIEW_BOX: &str = "-40 -30 12 21";

/// Fallback document metadata, stored as raw attribute strings so it goes
/// through exactly the same parsing as values read from a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetadataDefaults {
    pub width: String,
    pub height: String,
    pub view_box: String,
}

impl Default for MetadataDefaults {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH.to_string(),
            height: DEFAULT_HEIGHT.to_string(),
            view_box: DEFAULT_VIEW_BOX.to_string(),
        }
    }
}

/// What a batch run does when one file fails to convert
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    /// Stop at the first failing file
    Abort,
    /// Record the failure and move on to the next file
    Continue,
}

impl Default for FailurePolicy {
    fn default() -> Self {
        Self::Abort
    }
}

impl fmt::Display for FailurePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Abort => write!(f, "abort"),
            Self::Continue => write!(f, "continue"),
        }
    }
}

impl FromStr for FailurePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "abort" | "stop" => Ok(Self::Abort),
            "continue" | "keep-going" => Ok(Self::Continue),
            _ => Err(format!("Unknown failure policy: {}", s)),
        }
    }
}
