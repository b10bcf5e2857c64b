//! Cycles command configuration

use std::path::PathBuf;

use crate::cli::OutputFormat;
use crate::dependency_filter::DependencyFilter;
use crate::impl_builder;
use crate::progress::Verbosity;

/// Configuration for the cycles command
///
/// This struct contains all options for detecting and reporting dependency
/// cycles between workspace packages.
#[derive(Debug, Clone)]
pub struct CyclesConfig {
    /// Workspace root holding the top-level package.json
    pub root: PathBuf,
    /// Output format for the report
    pub format: OutputFormat,
    /// Whether to exit with error code if cycles are found
    pub error_on_cycles: bool,
    /// Manifest sections left out of the graph
    pub filter: DependencyFilter,
    /// Maximum number of cycles to report (None = all)
    pub max_cycles: Option<usize>,
    /// Only report cycles through this package
    pub package: Option<String>,
    pub verbosity: Verbosity,
}

impl CyclesConfig {
    pub fn builder() -> CyclesConfigBuilder {
        CyclesConfigBuilder::new()
    }
}

impl_builder! {
    CyclesConfigBuilder => CyclesConfig {
        root: PathBuf => with_root,
        format: OutputFormat => with_format,
        error_on_cycles: bool => with_error_on_cycles,
        filter: DependencyFilter => with_filter,
        max_cycles: Option<usize> => with_max_cycles,
        package: Option<String> => with_package,
        verbosity: Verbosity => with_verbosity,
    }
}
