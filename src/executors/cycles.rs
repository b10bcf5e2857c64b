//! Cycles command executor

use console::style;
use miette::{IntoDiagnostic, Result, WrapErr};

use crate::cli::OutputFormat;
use crate::config::CyclesConfig;
use crate::detector::CycleDetector;
use crate::error::CarouselError;
use crate::executors::{CommandExecutor, reporter};
use crate::graph::DependencyGraphBuilder;
use crate::progress::Verbosity;
use crate::registry::PackageRegistry;
use crate::reports::{
    HumanReportGenerator, JsonReportGenerator, ReportGenerator, TsvReportGenerator,
};

pub struct CyclesExecutor;

impl CommandExecutor for CyclesExecutor {
    type Config = CyclesConfig;

    fn execute(config: Self::Config) -> Result<()> {
        if config.verbosity != Verbosity::Quiet {
            eprintln!(
                "{} Checking for package dependency cycles...\n",
                style("🎠").cyan()
            );
        }

        let progress = reporter(config.verbosity);

        let registry = PackageRegistry::discover(&config.root, config.filter, progress.as_ref())
            .wrap_err("Failed to discover workspace packages")?;

        if registry.is_empty() {
            if let Some(p) = progress.as_ref() {
                p.info("No packages found to analyze");
            }
        }

        if let Some(name) = config.package.as_deref() {
            if !registry.contains(name) {
                return Err(CarouselError::PackageNotFound {
                    name: name.to_string(),
                }
                .into());
            }
        }

        let graph = DependencyGraphBuilder::new()
            .add_packages(registry.packages(), progress.as_ref())
            .build();

        let mut detector = CycleDetector::new();
        detector.detect_cycles(&graph, progress.as_ref());

        // Narrow the report to cycles through the requested package
        if let Some(name) = config.package.as_deref() {
            let mut focused = CycleDetector::new();
            for cycle in detector.cycles_involving(name) {
                focused.add_cycle(cycle.clone());
            }
            detector = focused;
        }

        let report_result = match config.format {
            OutputFormat::Human => {
                HumanReportGenerator::new(config.max_cycles).generate_report(&detector)
            }
            OutputFormat::Json => {
                JsonReportGenerator::new(config.max_cycles).generate_report(&detector)
            }
            OutputFormat::Tsv => {
                TsvReportGenerator::new(config.max_cycles).generate_report(&detector)
            }
        };

        let report = report_result
            .into_diagnostic()
            .wrap_err("Failed to generate report")?;
        print!("{report}");

        // Exit with error code if cycles found and requested
        if config.error_on_cycles && detector.has_cycles() {
            std::process::exit(1);
        }

        Ok(())
    }
}
