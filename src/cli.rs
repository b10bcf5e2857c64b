use clap::{Parser, Subcommand};

use crate::common::{CacheArgs, CommonArgs, CycleDisplayArgs, FilterArgs, FormatArgs};

#[derive(Parser)]
#[command(
    name = "pkg-carousel",
    about = "🎠 Detect package dependency cycles and import usage in JavaScript monorepos",
    long_about = "pkg-carousel discovers every package under a package.json workspace root, \
                  builds the internal dependency graph from declared dependencies and finds \
                  every circular dependency between packages. It can also extract which \
                  symbols packages import from each other and aggregate that usage.",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Find every dependency cycle between workspace packages
    ///
    /// Builds the package dependency graph from dependencies,
    /// devDependencies, peerDependencies and optionalDependencies and lists
    /// every elementary cycle, each starting from its smallest package name.
    #[command(
        long_about = "Discover all packages below the workspace root, build the internal \
                      dependency graph and enumerate every elementary cycle. Strongly connected \
                      components are found with Tarjan's algorithm and the cycles inside them \
                      with Johnson's algorithm. Use --package to focus on the cycles that pass \
                      through one package."
    )]
    Cycles {
        #[command(flatten)]
        common: CommonArgs,

        #[command(flatten)]
        filter: FilterArgs,

        #[command(flatten)]
        format: FormatArgs,

        #[command(flatten)]
        cycle_display: CycleDisplayArgs,

        /// Only report cycles that include this package
        #[arg(long, value_name = "NAME", env = "PKG_CAROUSEL_PACKAGE")]
        package: Option<String>,

        /// Exit with error code if cycles found
        #[arg(long, env = "PKG_CAROUSEL_ERROR_ON_CYCLES")]
        error_on_cycles: bool,
    },

    /// Aggregate which symbols packages import from each other
    ///
    /// Parses the sources of every package that has a tsconfig.json and
    /// counts imports of internal packages by module and symbol.
    #[command(
        long_about = "Extract the import declarations of every TypeScript project package and \
                      keep those that import another workspace package. Imports are grouped by \
                      module and imported symbol, counted overall and per consuming package, \
                      and ordered by descending count. Extraction results can be cached per \
                      package with --write-cache and reused with --read-cache."
    )]
    Usage {
        #[command(flatten)]
        common: CommonArgs,

        #[command(flatten)]
        format: FormatArgs,

        #[command(flatten)]
        cache: CacheArgs,

        /// Only report the N most imported symbols
        #[arg(long, value_name = "N", env = "PKG_CAROUSEL_TOP")]
        top: Option<usize>,
    },

    /// See the full lineup of packages and their internal dependencies
    ///
    /// Lists each package with the workspace packages it depends on, or with
    /// --reverse, the packages that depend on it.
    #[command(
        long_about = "Display package dependency relationships in your monorepo. Shows which \
                      packages each package depends on, and with --reverse, which packages \
                      depend on it. Only dependencies on other workspace packages are listed."
    )]
    Lineup {
        #[command(flatten)]
        common: CommonArgs,

        #[command(flatten)]
        filter: FilterArgs,

        #[command(flatten)]
        format: FormatArgs,

        /// Specific package to show (shows all packages if not specified)
        #[arg(long, value_name = "NAME", env = "PKG_CAROUSEL_PACKAGE")]
        package: Option<String>,

        /// Show dependants instead of dependencies
        #[arg(long, env = "PKG_CAROUSEL_REVERSE")]
        reverse: bool,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, clap::ValueEnum)]
pub enum OutputFormat {
    Human,
    Json,
    Tsv,
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_cycles_command() {
        let cli = Cli::try_parse_from([
            "pkg-carousel",
            "cycles",
            "repo",
            "--exclude-dev",
            "--max-cycles",
            "3",
            "--format",
            "json",
            "-v",
        ])
        .unwrap();

        match cli.command {
            Commands::Cycles {
                common,
                filter,
                format,
                cycle_display,
                package,
                error_on_cycles,
            } => {
                assert_eq!(common.root, Some(PathBuf::from("repo")));
                assert!(common.verbose);
                assert!(filter.exclude_dev);
                assert!(!filter.exclude_peer);
                assert_eq!(format.format, OutputFormat::Json);
                assert_eq!(cycle_display.max_cycles, Some(3));
                assert_eq!(package, None);
                assert!(!error_on_cycles);
            }
            _ => panic!("Expected cycles command"),
        }
    }

    #[test]
    fn test_parse_usage_command() {
        let cli = Cli::try_parse_from([
            "pkg-carousel",
            "usage",
            "--read-cache",
            "--write-cache",
            "--top",
            "10",
            "--format",
            "tsv",
        ])
        .unwrap();

        match cli.command {
            Commands::Usage {
                cache, top, format, ..
            } => {
                assert!(cache.read_cache);
                assert!(cache.write_cache);
                assert_eq!(cache.cache_dir, None);
                assert_eq!(top, Some(10));
                assert_eq!(format.format, OutputFormat::Tsv);
            }
            _ => panic!("Expected usage command"),
        }
    }

    #[test]
    fn test_verbose_and_quiet_conflict() {
        assert!(Cli::try_parse_from(["pkg-carousel", "lineup", "-v", "-q"]).is_err());
    }
}
