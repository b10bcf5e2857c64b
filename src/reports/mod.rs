//! Report generation modules for different output formats
//!
//! This module contains report generators for various output formats:
//! - human: Human-readable console output
//! - json: JSON format for programmatic use
//! - tsv: Tab separated values for spreadsheets
//!
//! Each generator renders the three report subjects: detected cycles, import
//! usage and the package lineup.

pub mod human;
pub mod json;
pub mod tsv;

use crate::error::CarouselError;
use crate::usage::{UsageEntry, UsageKey};

/// Aggregated import usage, most used first
pub type UsageRows = [(UsageKey, UsageEntry)];

/// Common trait for all report generators
pub trait ReportGenerator<T: ?Sized> {
    /// Render `subject` in this generator's format
    fn generate_report(&self, subject: &T) -> Result<String, CarouselError>;
}

// Re-export for convenience
pub use human::HumanReportGenerator;
pub use json::JsonReportGenerator;
pub use tsv::TsvReportGenerator;
