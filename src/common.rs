//! Common functionality shared across commands

use std::path::PathBuf;

use clap::Args;

use crate::progress::Verbosity;

/// Common arguments shared by every command
#[derive(Args, Debug, Clone)]
pub struct CommonArgs {
    /// Workspace root to analyze (defaults to current directory)
    #[arg(value_name = "ROOT")]
    pub root: Option<PathBuf>,

    /// Show debug output
    #[arg(short, long, env = "PKG_CAROUSEL_VERBOSE", conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only print the report
    #[arg(short, long, env = "PKG_CAROUSEL_QUIET")]
    pub quiet: bool,
}

/// Manifest sections to leave out of the dependency graph
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Exclude devDependencies from analysis
    #[arg(long, env = "PKG_CAROUSEL_EXCLUDE_DEV")]
    pub exclude_dev: bool,

    /// Exclude peerDependencies from analysis
    #[arg(long, env = "PKG_CAROUSEL_EXCLUDE_PEER")]
    pub exclude_peer: bool,

    /// Exclude optionalDependencies from analysis
    #[arg(long, env = "PKG_CAROUSEL_EXCLUDE_OPTIONAL")]
    pub exclude_optional: bool,
}

/// Common output format arguments
#[derive(Args, Debug, Clone)]
pub struct FormatArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value = crate::constants::output::DEFAULT_FORMAT, env = "PKG_CAROUSEL_FORMAT")]
    pub format: crate::cli::OutputFormat,
}

/// Common cycle display arguments
#[derive(Args, Debug, Clone)]
pub struct CycleDisplayArgs {
    /// Maximum number of cycles to display (shows all by default)
    #[arg(long, env = "PKG_CAROUSEL_MAX_CYCLES")]
    pub max_cycles: Option<usize>,
}

/// Import cache arguments
#[derive(Args, Debug, Clone)]
pub struct CacheArgs {
    /// Reuse cached import lists when present
    #[arg(long, env = "PKG_CAROUSEL_READ_CACHE")]
    pub read_cache: bool,

    /// Store freshly extracted import lists
    #[arg(long, env = "PKG_CAROUSEL_WRITE_CACHE")]
    pub write_cache: bool,

    /// Cache directory (defaults to node_modules/.cache/pkg-carousel/imports
    /// under the root)
    #[arg(long, value_name = "DIR", env = "PKG_CAROUSEL_CACHE_DIR")]
    pub cache_dir: Option<PathBuf>,
}

impl CommonArgs {
    /// Get the root, using current directory if none provided
    pub fn get_root(&self) -> PathBuf {
        self.root
            .clone()
            .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
    }

    pub fn verbosity(&self) -> Verbosity {
        if self.quiet {
            Verbosity::Quiet
        } else if self.verbose {
            Verbosity::Verbose
        } else {
            Verbosity::Normal
        }
    }
}

/// Generic builder trait for configuration objects
pub trait ConfigBuilder: Sized {
    type Config;

    /// Build the configuration, returning an error if validation fails
    fn build(self) -> Result<Self::Config, crate::error::CarouselError>;
}

/// Trait for configurations that can be created from CLI commands
/// This trait simplifies command-to-config conversions
pub trait FromCommand: Sized {
    /// The command variant that this config can be created from
    fn from_command(command: crate::cli::Commands) -> Result<Self, crate::error::CarouselError>;
}

/// Macro to implement `TryFrom<Commands>` using [`FromCommand`] trait
#[macro_export]
macro_rules! impl_try_from_command {
    ($config:ty) => {
        impl std::convert::TryFrom<$crate::cli::Commands> for $config {
            type Error = $crate::error::CarouselError;

            fn try_from(command: $crate::cli::Commands) -> Result<Self, Self::Error> {
                <$config as $crate::common::FromCommand>::from_command(command)
            }
        }
    };
}

/// Macro generating a config builder with one `with_*` setter per field.
///
/// Every field is required; [`ConfigBuilder::build`] reports the first one
/// left unset as a configuration error.
#[macro_export]
macro_rules! impl_builder {
    ($builder:ident => $config:ident { $($field:ident: $ty:ty => $setter:ident),* $(,)? }) => {
        #[derive(Default)]
        pub struct $builder {
            $($field: Option<$ty>,)*
        }

        impl $builder {
            pub fn new() -> Self {
                Self::default()
            }

            $(
                pub fn $setter(mut self, $field: $ty) -> Self {
                    self.$field = Some($field);
                    self
                }
            )*
        }

        impl $crate::common::ConfigBuilder for $builder {
            type Config = $config;

            fn build(self) -> Result<Self::Config, $crate::error::CarouselError> {
                Ok($config {
                    $(
                        $field: self.$field.ok_or_else(|| {
                            $crate::error::CarouselError::ConfigurationError {
                                message: concat!("Missing required field: ", stringify!($field))
                                    .to_string(),
                            }
                        })?,
                    )*
                })
            }
        }
    };
}
