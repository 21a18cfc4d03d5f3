//! Length unit handling
//!
//! Declared document dimensions arrive as strings like `21.6mm` or `21.6`.
//! Recognized suffixes live in [`UNIT_SUFFIXES`]; adding a unit means adding
//! a row there and a variant to [`LengthUnit`].

use crate::error::{Result, UnitError};
use std::fmt;
use std::str::FromStr;

/// Unit attached to a declared length
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LengthUnit {
    /// Millimeters (`mm` suffix)
    Millimeter,
    /// Bare number, read as millimeters
    Unitless,
}

impl Default for LengthUnit {
    fn default() -> Self {
        Self::Unitless
    }
}

/// Suffix dispatch table, checked in order.
pub const UNIT_SUFFIXES: &[(&str, LengthUnit)] = &[("mm", LengthUnit::Millimeter)];

impl LengthUnit {
    /// Multiplier converting a value in this unit to millimeters.
    pub fn to_mm_factor(self) -> f64 {
        match self {
            Self::Millimeter => 1.0,
            Self::Unitless => 1.0,
        }
    }

    /// Suffix written after the number, empty for unitless values.
    pub fn suffix(self) -> &'static str {
        UNIT_SUFFIXES
            .iter()
            .find(|(_, unit)| *unit == self)
            .map(|(suffix, _)| *suffix)
            .unwrap_or("")
    }
}

impl fmt::Display for LengthUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Millimeter => write!(f, "mm"),
            Self::Unitless => write!(f, "unitless"),
        }
    }
}

/// A declared length with its unit
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Length {
    pub value: f64,
    pub unit: LengthUnit,
}

impl Length {
    pub fn new(value: f64, unit: LengthUnit) -> Self {
        Self { value, unit }
    }

    pub fn mm(value: f64) -> Self {
        Self::new(value, LengthUnit::Millimeter)
    }

    /// Value converted to millimeters
    pub fn to_mm(&self) -> f64 {
        self.value * self.unit.to_mm_factor()
    }
}

impl FromStr for Length {
    type Err = UnitError;

    fn from_str(s: &str) -> Result<Self> {
        let input = s.trim();
        if input.is_empty() {
            return Err(UnitError::Empty);
        }

        let (number, unit) = UNIT_SUFFIXES
            .iter()
            .find_map(|(suffix, unit)| input.strip_suffix(suffix).map(|rest| (rest, *unit)))
            .unwrap_or((input, LengthUnit::Unitless));

        let value = number
            .trim()
            .parse::<f64>()
            .map_err(|_| UnitError::InvalidNumber {
                value: input.to_string(),
                supported: supported_suffixes(),
            })?;

        Ok(Self { value, unit })
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.value, self.unit.suffix())
    }
}

fn supported_suffixes() -> String {
    UNIT_SUFFIXES
        .iter()
        .map(|(suffix, _)| *suffix)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Format a millimeter value for display with one decimal place
pub fn format_mm(value_mm: f64) -> String {
    format!("{:.1}", value_mm)
}
