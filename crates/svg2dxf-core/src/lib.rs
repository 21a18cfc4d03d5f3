//! # svg2dxf Core
//!
//! Core types and utilities shared by the svg2dxf crates.
//! Provides the coordinate record used for sampled points, the length unit
//! table used when reading declared document dimensions, and the policies
//! that steer a batch conversion.

pub mod error;
pub mod geometry;
pub mod types;
pub mod units;

pub use error::{Result, UnitError};
pub use geometry::Point2;
pub use types::{FailurePolicy, MetadataDefaults};
pub use units::{Length, LengthUnit};
