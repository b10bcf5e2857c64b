//! # Package Registry Module
//!
//! This module turns the leaf manifests found by workspace discovery into the
//! canonical package set of a run: one entry per package directory, each with
//! a unique name and its internal dependencies resolved.
//!
//! ## Key Components
//!
//! - **PackageRegistry**: Discovers packages and indexes them by name
//! - **Package**: A named package with its directory and internal
//!   dependencies
//! - **DependencyClassifier**: Classifies declared dependencies by manifest
//!   section (normal, dev, peer, optional)
//!
//! ## Example
//!
//! ```
//! use pkg_carousel::registry::{Package, PackageRegistry};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let app = Package::builder()
//!     .with_name("app")
//!     .with_dir("packages/app")
//!     .add_dep("core")
//!     .build()?;
//! let core = Package::builder()
//!     .with_name("core")
//!     .with_dir("packages/core")
//!     .build()?;
//!
//! let registry = PackageRegistry::from_packages("/repo", vec![app, core])?;
//!
//! assert_eq!(registry.len(), 2);
//! assert_eq!(registry.dependants_of("core").len(), 1);
//! # Ok(())
//! # }
//! ```

mod dependency_classifier;

pub use dependency_classifier::DependencyClassifier;

mod registry_impl;
pub use registry_impl::*;
