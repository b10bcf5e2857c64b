//! Usage command configuration

use std::path::PathBuf;

use crate::cli::OutputFormat;
use crate::impl_builder;
use crate::progress::Verbosity;

/// Configuration for the usage command
#[derive(Debug, Clone)]
pub struct UsageConfig {
    pub root: PathBuf,
    pub format: OutputFormat,
    /// Reuse existing cache entries
    pub read_cache: bool,
    /// Persist freshly extracted records
    pub write_cache: bool,
    /// Cache root override; relative paths resolve against `root`
    pub cache_dir: Option<PathBuf>,
    /// Only report the N most imported symbols
    pub top: Option<usize>,
    pub verbosity: Verbosity,
}

impl UsageConfig {
    pub fn builder() -> UsageConfigBuilder {
        UsageConfigBuilder::new()
    }

    /// Cache root for a canonical workspace root
    pub fn cache_root(&self, workspace_root: &std::path::Path) -> PathBuf {
        match &self.cache_dir {
            Some(dir) if dir.is_absolute() => dir.clone(),
            Some(dir) => workspace_root.join(dir),
            None => workspace_root.join(crate::constants::cache::DEFAULT_CACHE_DIR),
        }
    }
}

impl_builder! {
    UsageConfigBuilder => UsageConfig {
        root: PathBuf => with_root,
        format: OutputFormat => with_format,
        read_cache: bool => with_read_cache,
        write_cache: bool => with_write_cache,
        cache_dir: Option<PathBuf> => with_cache_dir,
        top: Option<usize> => with_top,
        verbosity: Verbosity => with_verbosity,
    }
}
