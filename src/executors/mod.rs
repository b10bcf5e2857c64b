//! Command executors that handle the actual logic for each command

pub mod cycles;
pub mod lineup;
pub mod usage;

use miette::Result;

use crate::progress::{ProgressReporter, Verbosity};

/// Trait for command executors
pub trait CommandExecutor {
    type Config;

    /// Execute the command with the given configuration
    fn execute(config: Self::Config) -> Result<()>;
}

/// Reporter for the pipeline stages; quiet runs get none
fn reporter(verbosity: Verbosity) -> Option<ProgressReporter> {
    (verbosity != Verbosity::Quiet).then(|| ProgressReporter::new(verbosity))
}
