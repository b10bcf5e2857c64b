//! Lineup command executor

use console::style;
use miette::{IntoDiagnostic, Result, WrapErr};

use crate::cli::OutputFormat;
use crate::config::LineupConfig;
use crate::executors::{CommandExecutor, reporter};
use crate::progress::Verbosity;
use crate::registry::{LineupDirection, PackageRegistry};
use crate::reports::{
    HumanReportGenerator, JsonReportGenerator, ReportGenerator, TsvReportGenerator,
};

pub struct LineupExecutor;

impl CommandExecutor for LineupExecutor {
    type Config = LineupConfig;

    fn execute(config: Self::Config) -> Result<()> {
        if config.verbosity != Verbosity::Quiet {
            eprintln!(
                "{} Lining up package dependencies...\n",
                style("🔍").cyan()
            );
        }

        let progress = reporter(config.verbosity);

        let registry = PackageRegistry::discover(&config.root, config.filter, progress.as_ref())
            .wrap_err("Failed to discover workspace packages")?;

        let direction = if config.reverse {
            LineupDirection::Dependants
        } else {
            LineupDirection::Dependencies
        };

        let lineup = registry
            .lineup(direction, config.package.as_deref())?;

        let report_result = match config.format {
            OutputFormat::Human => HumanReportGenerator::new(None).generate_report(&lineup),
            OutputFormat::Json => JsonReportGenerator::default().generate_report(&lineup),
            OutputFormat::Tsv => TsvReportGenerator::default().generate_report(&lineup),
        };

        let report = report_result
            .into_diagnostic()
            .wrap_err("Failed to generate report")?;
        print!("{report}");

        Ok(())
    }
}
