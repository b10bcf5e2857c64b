//! # pkg-carousel - Detect Dependency Cycles in JavaScript Monorepos
//!
//! pkg-carousel discovers every package below a `package.json` workspace
//! root, builds the graph of dependencies between those packages and lists
//! every circular dependency. It can also extract the import declarations of
//! TypeScript packages and aggregate which symbols packages use from each
//! other.
//!
//! ## Main Components
//!
//! - **Registry**: Discovers packages through nested workspace declarations
//!   and resolves their internal dependencies
//! - **Graph**: Builds the package dependency graph
//! - **Detector**: Enumerates elementary cycles (Tarjan's SCC + Johnson)
//! - **Imports**: Parses sources and classifies import bindings, with a
//!   per-package cache
//! - **Usage**: Aggregates internal imports by module and symbol
//! - **Reports**: Generates human, JSON and TSV reports
//!
//! ## Usage
//!
//! ### Finding cycles in a monorepo
//!
//! ```no_run
//! use std::path::Path;
//!
//! use pkg_carousel::detector::CycleDetector;
//! use pkg_carousel::graph::DependencyGraph;
//! use pkg_carousel::registry::PackageRegistry;
//! use pkg_carousel::reports::{HumanReportGenerator, ReportGenerator};
//!
//! # fn main() -> miette::Result<()> {
//! // Step 1: Discover all packages below the workspace root
//! let registry = PackageRegistry::discover(Path::new("/path/to/monorepo"), Default::default(), None)?;
//! println!("Found {} packages", registry.len());
//!
//! // Step 2: Build the dependency graph
//! let graph = DependencyGraph::from_packages(registry.packages());
//!
//! // Step 3: Detect circular dependencies
//! let mut detector = CycleDetector::new();
//! detector.detect_cycles(&graph, None);
//!
//! // Step 4: Report them
//! if detector.has_cycles() {
//!     let report = HumanReportGenerator::new(Some(5)); // show max 5 cycles
//!     println!("{}", report.generate_report(&detector)?);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ### Aggregating import usage
//!
//! ```no_run
//! use std::path::Path;
//!
//! use pkg_carousel::imports::find_all_internal_package_imports;
//! use pkg_carousel::registry::PackageRegistry;
//! use pkg_carousel::usage::aggregate;
//!
//! # fn main() -> miette::Result<()> {
//! let registry = PackageRegistry::discover(Path::new("."), Default::default(), None)?;
//!
//! // Write fresh cache entries, ignore existing ones
//! let records = find_all_internal_package_imports(registry.root(), registry.packages(), true, false)?;
//!
//! for (key, entry) in aggregate(&records).iter().take(10) {
//!     println!("{} {} used {} times", key.import_module, key.import_name, entry.overall_count);
//! }
//! # Ok(())
//! # }
//! ```

// Private modules
mod constants;
mod progress;
mod utils;
mod workspace_discovery;

// Public modules
pub mod cli;
pub mod commands;
pub mod common;
pub mod config;
pub mod dependency_filter;
pub mod detector;
pub mod error;
pub mod executors;
pub mod graph;
pub mod imports;
pub mod manifest;
pub mod registry;
pub mod reports;
pub mod usage;

// Main entry point for the library
pub fn run() -> miette::Result<()> {
    use clap::Parser;

    use crate::cli::Cli;
    use crate::commands::execute_command;

    let cli = Cli::parse();
    execute_command(cli.command)
}
