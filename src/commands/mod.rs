//! Command implementations for the pkg-carousel CLI
//!
//! This module contains the implementations for each CLI command:
//! - cycles: Find every dependency cycle between workspace packages
//! - usage: Aggregate which symbols packages import from each other
//! - lineup: See the full lineup of packages and their internal dependencies

pub mod cycles;
pub mod lineup;
pub mod usage;

use miette::Result;

use crate::cli::Commands;

/// Execute a command based on CLI input
pub fn execute_command(command: Commands) -> Result<()> {
    match &command {
        Commands::Cycles { .. } => cycles::execute_cycles_command(command),
        Commands::Usage { .. } => usage::execute_usage_command(command),
        Commands::Lineup { .. } => lineup::execute_lineup_command(command),
    }
}
