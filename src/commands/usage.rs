//! Usage command implementation

use miette::{Result, WrapErr};

use crate::cli::Commands;
use crate::common::{ConfigBuilder, FromCommand};
use crate::config::UsageConfig;
use crate::error::CarouselError;

impl FromCommand for UsageConfig {
    fn from_command(command: Commands) -> Result<Self, CarouselError> {
        match command {
            Commands::Usage {
                common,
                format,
                cache,
                top,
            } => UsageConfig::builder()
                .with_root(common.get_root())
                .with_format(format.format)
                .with_read_cache(cache.read_cache)
                .with_write_cache(cache.write_cache)
                .with_cache_dir(cache.cache_dir)
                .with_top(top)
                .with_verbosity(common.verbosity())
                .build(),
            _ => Err(CarouselError::ConfigurationError {
                message: "Invalid command type for UsageConfig".to_string(),
            }),
        }
    }
}

crate::impl_try_from_command!(UsageConfig);

/// Execute the usage command for aggregating internal imports
pub fn execute_usage_command(command: Commands) -> Result<()> {
    let config = UsageConfig::from_command(command)
        .wrap_err("Failed to parse usage command configuration")?;

    use crate::executors::CommandExecutor;
    use crate::executors::usage::UsageExecutor;
    UsageExecutor::execute(config)
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use clap::Parser;

    use super::*;
    use crate::cli::Cli;

    #[test]
    fn test_config_from_usage_command() {
        let cli = Cli::try_parse_from([
            "pkg-carousel",
            "usage",
            "/repo",
            "--write-cache",
            "--cache-dir",
            ".imports",
        ])
        .unwrap();

        let config = UsageConfig::try_from(cli.command).unwrap();

        assert!(config.write_cache);
        assert!(!config.read_cache);
        assert_eq!(config.cache_dir, Some(PathBuf::from(".imports")));
        assert_eq!(config.top, None);
    }
}
