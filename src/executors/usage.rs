//! Usage command executor

use console::style;
use miette::{IntoDiagnostic, Result, WrapErr};

use crate::cli::OutputFormat;
use crate::config::UsageConfig;
use crate::executors::{CommandExecutor, reporter};
use crate::imports::{ImportCache, ImportExtractor, OxcSourceParser};
use crate::progress::Verbosity;
use crate::registry::PackageRegistry;
use crate::reports::{
    HumanReportGenerator, JsonReportGenerator, ReportGenerator, TsvReportGenerator,
};
use crate::usage::aggregate;

pub struct UsageExecutor;

impl CommandExecutor for UsageExecutor {
    type Config = UsageConfig;

    fn execute(config: Self::Config) -> Result<()> {
        if config.verbosity != Verbosity::Quiet {
            eprintln!(
                "{} Collecting internal package imports...\n",
                style("📦").cyan()
            );
        }

        let progress = reporter(config.verbosity);

        // Import usage follows every declared section
        let registry =
            PackageRegistry::discover(&config.root, Default::default(), progress.as_ref())
                .wrap_err("Failed to discover workspace packages")?;

        let parser = OxcSourceParser::new().with_progress(progress.as_ref());
        let cache = ImportCache::new(config.cache_root(registry.root()));
        let extractor = ImportExtractor::new(registry.root(), &parser)
            .with_cache(cache)
            .with_progress(progress.as_ref());

        let records = extractor
            .find_all_internal_package_imports(
                registry.packages(),
                config.write_cache,
                config.read_cache,
            )
            .wrap_err("Failed to extract package imports")?;

        let rows = aggregate(&records);

        let report_result = match config.format {
            OutputFormat::Human => {
                HumanReportGenerator::new(config.top).generate_report(rows.as_slice())
            }
            OutputFormat::Json => {
                JsonReportGenerator::new(config.top).generate_report(rows.as_slice())
            }
            OutputFormat::Tsv => {
                TsvReportGenerator::new(config.top).generate_report(rows.as_slice())
            }
        };

        let report = report_result
            .into_diagnostic()
            .wrap_err("Failed to generate report")?;
        print!("{report}");

        Ok(())
    }
}
