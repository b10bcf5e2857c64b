//! # Configuration Module
//!
//! This module provides configuration structures for all pkg-carousel
//! commands. Each command has its own config module with builder patterns for
//! easy construction.
//!
//! ## Command Configurations
//!
//! - **CyclesConfig**: Configuration for the `cycles` command
//! - **UsageConfig**: Configuration for the `usage` command, including the
//!   import cache flags
//! - **LineupConfig**: Configuration for the `lineup` command
//!
//! ## Example
//!
//! ```
//! use pkg_carousel::cli::OutputFormat;
//! use pkg_carousel::common::ConfigBuilder;
//! use pkg_carousel::config::UsageConfig;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // The builders are generated with the impl_builder! macro
//! // and provide with_* methods for each field
//! let config = UsageConfig::builder()
//!     .with_root(".".into())
//!     .with_format(OutputFormat::Tsv)
//!     .with_read_cache(true)
//!     .with_write_cache(true)
//!     .with_cache_dir(None)
//!     .with_top(Some(20))
//!     .with_verbosity(Default::default())
//!     .build()?;
//!
//! assert!(config.read_cache);
//! # Ok(())
//! # }
//! ```

pub mod cycles;
pub mod lineup;
pub mod usage;

pub use cycles::CyclesConfig;
pub use lineup::LineupConfig;
pub use usage::UsageConfig;
