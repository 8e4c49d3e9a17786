//! Last-digit multiplication circle.
//!
//! The last digits of a factor's multiples trace a path around the digits
//! 0–9 placed on a circle. This crate generates those sequences, lays out
//! the circle, turns user drawings into digit-pair segments, and grades
//! them against the expected path.

#[cfg_attr(not(test), allow(unused_imports))]
#[macro_use]
extern crate approx;

// Organized modules
pub mod geometry;
pub mod math;

pub use geometry::distance;
pub use geometry::layout;
pub use geometry::r2;

pub mod canvas;
pub mod classify;
pub mod config;
pub mod digit;
pub mod error;
pub mod grade;
pub mod path;
pub mod render;
pub mod segment;
pub mod sequence;
pub mod session;

// Re-export key types for external use
pub use canvas::{CanvasData, CanvasInput, CanvasObject, PathCommand, Raster, Stroke};
pub use config::BoardConfig;
pub use digit::{Digit, Factor};
pub use grade::{Grade, Report};
pub use layout::Layout;
pub use path::LoopPolicy;
pub use r2::R2;
pub use render::{BoardSvg, GradeSvg, Palette};
pub use segment::Segment;
pub use session::Session;

use error::LogLevelError;

/// Parse a log level string into LevelFilter.
pub fn parse_log_level(level: Option<&str>) -> Result<log::LevelFilter, LogLevelError> {
    match level {
        Some("off") => Ok(log::LevelFilter::Off),
        Some("error") => Ok(log::LevelFilter::Error),
        Some("warn") => Ok(log::LevelFilter::Warn),
        Some("info") | Some("") | None => Ok(log::LevelFilter::Info),
        Some("debug") => Ok(log::LevelFilter::Debug),
        Some("trace") => Ok(log::LevelFilter::Trace),
        Some(level) => Err(LogLevelError::Unknown(level.to_string())),
    }
}
