//! Lineup command implementation

use miette::{Result, WrapErr};

use crate::cli::Commands;
use crate::common::{ConfigBuilder, FromCommand};
use crate::config::LineupConfig;
use crate::dependency_filter::DependencyFilter;
use crate::error::CarouselError;

impl FromCommand for LineupConfig {
    fn from_command(command: Commands) -> Result<Self, CarouselError> {
        match command {
            Commands::Lineup {
                common,
                filter,
                format,
                package,
                reverse,
            } => LineupConfig::builder()
                .with_root(common.get_root())
                .with_format(format.format)
                .with_filter(DependencyFilter::from(&filter))
                .with_package(package)
                .with_reverse(reverse)
                .with_verbosity(common.verbosity())
                .build(),
            _ => Err(CarouselError::ConfigurationError {
                message: "Invalid command type for LineupConfig".to_string(),
            }),
        }
    }
}

crate::impl_try_from_command!(LineupConfig);

/// Execute the lineup command for listing package relationships
pub fn execute_lineup_command(command: Commands) -> Result<()> {
    let config = LineupConfig::from_command(command)
        .wrap_err("Failed to parse lineup command configuration")?;

    use crate::executors::CommandExecutor;
    use crate::executors::lineup::LineupExecutor;
    LineupExecutor::execute(config)
}
