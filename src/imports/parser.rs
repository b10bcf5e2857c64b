//! Source parsing capability
//!
//! The extractor only needs the import declarations of a file. Anything that
//! can produce them implements [`SourceParser`]; [`OxcSourceParser`] is the
//! default, backed by the oxc JavaScript/TypeScript parser.

use std::path::Path;

use oxc_allocator::Allocator;
use oxc_ast::ast::{ImportDeclarationSpecifier, ModuleDeclaration, ModuleExportName};
use oxc_parser::Parser;
use oxc_span::SourceType;

use crate::error::CarouselError;
use crate::progress::ProgressReporter;
use crate::utils::string::pluralize;

/// A binding introduced by an import clause
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportBinding {
    /// `import * as local from "..."`
    Namespace { local: String },
    /// `import local from "..."`
    Default { local: String },
    /// `import { imported as local } from "..."`
    Named {
        imported: String,
        local: String,
        type_only: bool,
    },
}

/// One import statement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportDeclaration {
    /// Module specifier exactly as written, quotes included
    pub specifier: String,
    /// `import type ...`
    pub type_only: bool,
    /// Empty for side-effect imports
    pub bindings: Vec<ImportBinding>,
}

impl ImportDeclaration {
    pub fn new(specifier: impl Into<String>) -> Self {
        Self {
            specifier: specifier.into(),
            type_only: false,
            bindings: Vec::new(),
        }
    }

    pub fn with_binding(mut self, binding: ImportBinding) -> Self {
        self.bindings.push(binding);
        self
    }

    pub fn with_type_only(mut self, type_only: bool) -> Self {
        self.type_only = type_only;
        self
    }
}

/// Turns a source file into its import declarations
pub trait SourceParser: Send + Sync {
    fn parse_imports(&self, path: &Path) -> Result<Vec<ImportDeclaration>, CarouselError>;
}

/// [`SourceParser`] backed by oxc.
///
/// Syntax errors the parser recovers from are logged and the imports of the
/// recovered program are kept. Only files oxc cannot parse at all fail.
#[derive(Default, Clone, Copy)]
pub struct OxcSourceParser<'a> {
    progress: Option<&'a ProgressReporter>,
}

impl<'a> OxcSourceParser<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_progress(mut self, progress: Option<&'a ProgressReporter>) -> Self {
        self.progress = progress;
        self
    }

    /// Parse source text that was read from `path`
    pub fn parse_source(
        &self,
        path: &Path,
        source: &str,
    ) -> Result<Vec<ImportDeclaration>, CarouselError> {
        let allocator = Allocator::default();
        let source_type = SourceType::from_path(path).unwrap_or_default();
        let ret = Parser::new(&allocator, source, source_type).parse();

        if ret.panicked {
            let message = ret
                .errors
                .first()
                .map(ToString::to_string)
                .unwrap_or_else(|| "unrecoverable syntax error".to_string());
            return Err(CarouselError::SourceParseError {
                path: path.to_path_buf(),
                message,
            });
        }

        if let (Some(p), Some(first)) = (self.progress, ret.errors.first()) {
            p.warn(&format!(
                "{} has {} {}, keeping recovered imports: {first}",
                path.display(),
                ret.errors.len(),
                pluralize("syntax error", ret.errors.len())
            ));
        }

        let mut declarations = Vec::new();
        for stmt in &ret.program.body {
            let Some(ModuleDeclaration::ImportDeclaration(decl)) = stmt.as_module_declaration()
            else {
                continue;
            };

            // `import {} from "..."` binds nothing and is not a side-effect import
            if decl.specifiers.as_ref().is_some_and(|specs| specs.is_empty()) {
                continue;
            }

            let span = decl.source.span;
            let specifier = source
                .get(span.start as usize..span.end as usize)
                .map(str::to_string)
                .unwrap_or_else(|| format!("\"{}\"", decl.source.value));

            let bindings = decl
                .specifiers
                .iter()
                .flat_map(|specs| specs.iter())
                .map(|spec| match spec {
                    ImportDeclarationSpecifier::ImportDefaultSpecifier(default) => {
                        ImportBinding::Default {
                            local: default.local.name.to_string(),
                        }
                    }
                    ImportDeclarationSpecifier::ImportNamespaceSpecifier(namespace) => {
                        ImportBinding::Namespace {
                            local: namespace.local.name.to_string(),
                        }
                    }
                    ImportDeclarationSpecifier::ImportSpecifier(named) => ImportBinding::Named {
                        imported: export_name(&named.imported),
                        local: named.local.name.to_string(),
                        type_only: named.import_kind.is_type(),
                    },
                })
                .collect();

            declarations.push(ImportDeclaration {
                specifier,
                type_only: decl.import_kind.is_type(),
                bindings,
            });
        }

        Ok(declarations)
    }
}

fn export_name(name: &ModuleExportName<'_>) -> String {
    match name {
        ModuleExportName::IdentifierName(ident) => ident.name.to_string(),
        ModuleExportName::IdentifierReference(ident) => ident.name.to_string(),
        ModuleExportName::StringLiteral(lit) => lit.value.to_string(),
    }
}

impl SourceParser for OxcSourceParser<'_> {
    fn parse_imports(&self, path: &Path) -> Result<Vec<ImportDeclaration>, CarouselError> {
        let source = std::fs::read_to_string(path).map_err(|e| CarouselError::FileReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        self.parse_source(path, &source)
    }
}
