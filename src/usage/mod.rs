//! # Usage Aggregation Module
//!
//! Groups internal import records by `(module, symbol)` and counts them
//! overall and per consuming package.
//!
//! ## Example
//!
//! ```
//! use pkg_carousel::imports::{ImportKind, ImportRecord};
//! use pkg_carousel::usage::aggregate;
//!
//! let record = |package: &str, name: &str| ImportRecord {
//!     package_name: package.to_string(),
//!     source_file: format!("{package}/index.ts"),
//!     import_module: "@org/dep".to_string(),
//!     import_kind: ImportKind::Named,
//!     import_name: name.to_string(),
//!     import_type: None,
//! };
//!
//! let usage = aggregate(&[record("a", "foo"), record("b", "foo"), record("a", "bar")]);
//!
//! assert_eq!(usage[0].0.import_name, "foo");
//! assert_eq!(usage[0].1.overall_count, 2);
//! assert_eq!(usage[1].1.dependants["a"], 1);
//! ```

use std::collections::HashMap;

use indexmap::IndexMap;
use serde::Serialize;

use crate::imports::ImportRecord;

/// Imported symbol of an internal module
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct UsageKey {
    pub import_module: String,
    pub import_name: String,
}

/// How often a symbol is imported, overall and per consuming package.
///
/// Dependants are listed in the order their first import was seen.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UsageEntry {
    pub overall_count: usize,
    pub dependants: IndexMap<String, usize>,
}

impl UsageEntry {
    fn record(&mut self, package_name: &str) {
        self.overall_count += 1;
        *self.dependants.entry(package_name.to_string()).or_default() += 1;
    }

    pub fn dependants_count(&self) -> usize {
        self.dependants.len()
    }
}

/// Aggregate records into usage entries ordered by descending overall count.
///
/// Entries with equal counts keep the order in which their key was first
/// seen.
pub fn aggregate(records: &[ImportRecord]) -> Vec<(UsageKey, UsageEntry)> {
    let mut positions: HashMap<UsageKey, usize> = HashMap::new();
    let mut entries: Vec<(UsageKey, UsageEntry)> = Vec::new();

    for record in records {
        let key = UsageKey {
            import_module: record.import_module.clone(),
            import_name: record.import_name.clone(),
        };

        let idx = *positions.entry(key.clone()).or_insert_with(|| {
            entries.push((key, UsageEntry::default()));
            entries.len() - 1
        });
        entries[idx].1.record(&record.package_name);
    }

    entries.sort_by(|a, b| b.1.overall_count.cmp(&a.1.overall_count));
    entries
}
