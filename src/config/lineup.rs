//! Lineup command configuration

use std::path::PathBuf;

use crate::cli::OutputFormat;
use crate::dependency_filter::DependencyFilter;
use crate::impl_builder;
use crate::progress::Verbosity;

#[derive(Debug, Clone)]
pub struct LineupConfig {
    pub root: PathBuf,
    pub format: OutputFormat,
    pub filter: DependencyFilter,
    pub package: Option<String>,
    pub reverse: bool,
    pub verbosity: Verbosity,
}

impl LineupConfig {
    pub fn builder() -> LineupConfigBuilder {
        LineupConfigBuilder::new()
    }
}

impl_builder! {
    LineupConfigBuilder => LineupConfig {
        root: PathBuf => with_root,
        format: OutputFormat => with_format,
        filter: DependencyFilter => with_filter,
        package: Option<String> => with_package,
        reverse: bool => with_reverse,
        verbosity: Verbosity => with_verbosity,
    }
}
