//! Cycles command implementation

use miette::{Result, WrapErr};

use crate::cli::Commands;
use crate::common::{ConfigBuilder, FromCommand};
use crate::config::CyclesConfig;
use crate::dependency_filter::DependencyFilter;
use crate::error::CarouselError;

impl FromCommand for CyclesConfig {
    fn from_command(command: Commands) -> Result<Self, CarouselError> {
        match command {
            Commands::Cycles {
                common,
                filter,
                format,
                cycle_display,
                package,
                error_on_cycles,
            } => CyclesConfig::builder()
                .with_root(common.get_root())
                .with_format(format.format)
                .with_error_on_cycles(error_on_cycles)
                .with_filter(DependencyFilter::from(&filter))
                .with_max_cycles(cycle_display.max_cycles)
                .with_package(package)
                .with_verbosity(common.verbosity())
                .build(),
            _ => Err(CarouselError::ConfigurationError {
                message: "Invalid command type for CyclesConfig".to_string(),
            }),
        }
    }
}

crate::impl_try_from_command!(CyclesConfig);

/// Execute the cycles command for detecting package dependency cycles
pub fn execute_cycles_command(command: Commands) -> Result<()> {
    let config = CyclesConfig::from_command(command)
        .wrap_err("Failed to parse cycles command configuration")?;

    use crate::executors::CommandExecutor;
    use crate::executors::cycles::CyclesExecutor;
    CyclesExecutor::execute(config)
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;
    use crate::cli::{Cli, OutputFormat};
    use crate::progress::Verbosity;

    #[test]
    fn test_config_from_cycles_command() {
        let cli = Cli::try_parse_from([
            "pkg-carousel",
            "cycles",
            "/repo",
            "--exclude-peer",
            "--package",
            "@org/core",
            "--error-on-cycles",
            "-q",
        ])
        .unwrap();

        let config = CyclesConfig::try_from(cli.command).unwrap();

        assert_eq!(config.root, std::path::PathBuf::from("/repo"));
        assert_eq!(config.format, OutputFormat::Human);
        assert!(config.error_on_cycles);
        assert!(!config.filter.include_peer());
        assert!(config.filter.include_dev());
        assert_eq!(config.package.as_deref(), Some("@org/core"));
        assert_eq!(config.verbosity, Verbosity::Quiet);
    }

    #[test]
    fn test_wrong_command_is_rejected() {
        let cli = Cli::try_parse_from(["pkg-carousel", "lineup"]).unwrap();
        assert!(matches!(
            CyclesConfig::from_command(cli.command),
            Err(CarouselError::ConfigurationError { .. })
        ));
    }
}
