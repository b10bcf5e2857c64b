//! Import record types
//!
//! Records are stored verbatim in the cache, so the serialized field names
//! are part of the on-disk format.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Syntactic shape of an import binding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ImportKind {
    Named,
    Namespace,
    Default,
    SideEffect,
}

impl fmt::Display for ImportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ImportKind::Named => "named",
            ImportKind::Namespace => "namespace",
            ImportKind::Default => "default",
            ImportKind::SideEffect => "side-effect",
        };
        f.write_str(label)
    }
}

/// Whether the binding survives type erasure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImportType {
    Value,
    Type,
}

/// One import binding found in a package's source file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportRecord {
    /// Name of the importing package
    pub package_name: String,
    /// Source file relative to the workspace root, `/` separated
    pub source_file: String,
    /// Module specifier without quotes
    pub import_module: String,
    pub import_kind: ImportKind,
    /// Exported name for named imports, local binding for default and
    /// namespace imports, empty for side-effect imports
    pub import_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub import_type: Option<ImportType>,
}

impl ImportRecord {
    pub fn is_type_only(&self) -> bool {
        self.import_type == Some(ImportType::Type)
    }
}
