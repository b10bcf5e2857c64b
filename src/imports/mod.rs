//! # Import Extraction Module
//!
//! Extracts fine-grained cross-package import usage from package sources.
//!
//! ## Key Components
//!
//! - **SourceParser**: Capability that lists the import declarations of a
//!   file; **OxcSourceParser** is the default implementation
//! - **ImportExtractor**: Classifies declarations into **ImportRecord**s per
//!   package, fanning out over packages with rayon
//! - **ImportCache**: One JSON entry per package directory under the cache
//!   root
//!
//! ## Example
//!
//! ```
//! use pkg_carousel::imports::{ImportBinding, ImportDeclaration, ImportKind, classify};
//!
//! let declaration = ImportDeclaration::new("\"@org/dep\"").with_binding(ImportBinding::Named {
//!     imported: "foo".to_string(),
//!     local: "bar".to_string(),
//!     type_only: false,
//! });
//!
//! let records = classify("@org/app", "packages/app/src/index.ts", &declaration);
//!
//! assert_eq!(records[0].import_module, "@org/dep");
//! assert_eq!(records[0].import_kind, ImportKind::Named);
//! assert_eq!(records[0].import_name, "foo");
//! ```

mod cache;
mod extractor;
mod parser;
mod project;
mod types;

pub use cache::ImportCache;
pub use extractor::{
    ImportExtractor, classify, find_all_internal_package_imports, get_imports, strip_quotes,
};
pub use parser::{ImportBinding, ImportDeclaration, OxcSourceParser, SourceParser};
pub use project::{is_project, source_files};
pub use types::{ImportKind, ImportRecord, ImportType};
