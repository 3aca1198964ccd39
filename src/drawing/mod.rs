//! Drawing-tool integrations driven by the drawing macro
//!
//! A tool receives the resolved factor mapping and creates (or opens) the
//! figure asset the rendered fragment refers to. Calls are synchronous.

mod inkscape;

pub use inkscape::{blank_canvas, Inkscape};

use crate::blueprint::Factors;
use crate::error::DrawingError;

/// Factor naming the figure file, without extension
pub const FILE_NAME_FACTOR: &str = "fileName";

/// An external drawing tool
pub trait DrawingTool {
    /// Short name used in log output
    fn name(&self) -> &str;

    /// Create the figure described by `factors`, blocking until done
    fn create(&self, factors: &Factors) -> Result<(), DrawingError>;
}

/// Look up the figure file name in a factor mapping
pub fn file_name(factors: &Factors) -> Result<&str, DrawingError> {
    factors
        .get(FILE_NAME_FACTOR)
        .map(String::as_str)
        .ok_or(DrawingError::MissingFactor(FILE_NAME_FACTOR))
}
