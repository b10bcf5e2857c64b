//! Dependency classification for discovered packages
//!
//! Splits the names declared in a `package.json` into manifest sections and
//! narrows them down to the packages that live in the same workspace tree.

use std::collections::{BTreeMap, BTreeSet};

use crate::dependency_filter::DependencyFilter;
use crate::manifest::{DependencyType, PackageJson};

/// Classifies declared dependencies of one manifest by section
#[derive(Debug, Default)]
pub struct DependencyClassifier {
    by_type: BTreeMap<DependencyType, BTreeSet<String>>,
}

impl DependencyClassifier {
    /// Create a new empty classifier
    pub fn new() -> Self {
        Self::default()
    }

    /// Classify the dependencies of a manifest, keeping the sections the
    /// filter allows
    pub fn classify(manifest: &PackageJson, filter: &DependencyFilter) -> Self {
        let mut classifier = Self::new();

        for (name, dep_type) in manifest.get_all_dependencies() {
            if filter.should_include(dep_type) {
                classifier.add_dependency(name, dep_type);
            }
        }

        classifier
    }

    fn add_dependency(&mut self, name: &str, dep_type: DependencyType) {
        self.by_type
            .entry(dep_type)
            .or_default()
            .insert(name.to_string());
    }

    /// Union of every classified section
    pub fn all_names(&self) -> BTreeSet<&str> {
        self.by_type
            .values()
            .flat_map(|names| names.iter().map(String::as_str))
            .collect()
    }

    /// Intersect the union with the internal package names; everything else
    /// is an external dependency and is dropped
    pub fn internal_dependencies(&self, internal_names: &BTreeSet<String>) -> BTreeSet<String> {
        self.all_names()
            .into_iter()
            .filter(|name| internal_names.contains(*name))
            .map(str::to_string)
            .collect()
    }
}
