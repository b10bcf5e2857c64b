use std::collections::HashSet;
use std::path::{Path, PathBuf};

use rayon::prelude::*;

use super::cache::ImportCache;
use super::parser::{ImportBinding, ImportDeclaration, OxcSourceParser, SourceParser};
use super::project;
use super::types::{ImportKind, ImportRecord, ImportType};
use crate::error::CarouselError;
use crate::manifest::{PackageJson, manifest_path};
use crate::progress::ProgressReporter;
use crate::registry::Package;

/// Extracts and classifies the imports of packages below a workspace root
pub struct ImportExtractor<'a> {
    root: PathBuf,
    parser: &'a dyn SourceParser,
    cache: ImportCache,
    progress: Option<&'a ProgressReporter>,
}

impl<'a> ImportExtractor<'a> {
    /// Extractor using the default cache location under `root`
    pub fn new(root: &Path, parser: &'a dyn SourceParser) -> Self {
        Self {
            root: root.to_path_buf(),
            parser,
            cache: ImportCache::for_workspace(root),
            progress: None,
        }
    }

    pub fn with_cache(mut self, cache: ImportCache) -> Self {
        self.cache = cache;
        self
    }

    pub fn with_progress(mut self, progress: Option<&'a ProgressReporter>) -> Self {
        self.progress = progress;
        self
    }

    pub fn cache(&self) -> &ImportCache {
        &self.cache
    }

    /// Imports of the package at the workspace-relative `package_dir`.
    ///
    /// With `cache_read` an existing entry is returned untouched. With
    /// `cache_write` freshly extracted records are stored before returning.
    /// A package without a `tsconfig.json` has no imports.
    pub fn get_imports(
        &self,
        package_dir: &Path,
        cache_write: bool,
        cache_read: bool,
    ) -> Result<Vec<ImportRecord>, CarouselError> {
        if cache_read {
            if let Some(records) = self.cache.read(package_dir)? {
                if let Some(p) = self.progress {
                    p.cache_hit(package_dir);
                }
                return Ok(records);
            }
        }

        let absolute_dir = self.root.join(package_dir);
        let manifest = PackageJson::load(&absolute_dir)?;
        let package_name = manifest.require_name(&manifest_path(&absolute_dir))?;

        if !project::is_project(&absolute_dir) {
            if let Some(p) = self.progress {
                p.debug(&format!(
                    "Skipping {package_name}: no {} found",
                    crate::constants::workspace::PROJECT_MARKER
                ));
            }
            return Ok(Vec::new());
        }

        let mut records = Vec::new();
        for file in project::source_files(&absolute_dir)? {
            let declarations = self.parser.parse_imports(&file)?;
            let source_file = self.relative_source_path(&file);
            for declaration in &declarations {
                records.extend(classify(package_name, &source_file, declaration));
            }
        }

        if cache_write {
            self.cache.write(package_dir, &records)?;
        }

        Ok(records)
    }

    /// Imports of every package that target another registered package.
    ///
    /// Packages are processed in parallel and any failure aborts the whole
    /// extraction. Cache entries hold the unfiltered records.
    pub fn find_all_internal_package_imports(
        &self,
        packages: &[Package],
        cache_write: bool,
        cache_read: bool,
    ) -> Result<Vec<ImportRecord>, CarouselError> {
        if let Some(p) = self.progress {
            p.start_extraction(packages.len());
        }

        let internal: HashSet<&str> = packages.iter().map(Package::name).collect();

        let per_package = packages
            .par_iter()
            .map(|package| {
                if let Some(p) = self.progress {
                    p.extracting_package(package.name());
                }
                self.get_imports(package.dir(), cache_write, cache_read)
            })
            .collect::<Result<Vec<_>, _>>()?;

        let records: Vec<ImportRecord> = per_package
            .into_iter()
            .flatten()
            .filter(|record| internal.contains(record.import_module.as_str()))
            .collect();

        if let Some(p) = self.progress {
            p.finish_extraction(records.len());
        }

        Ok(records)
    }

    fn relative_source_path(&self, file: &Path) -> String {
        file.strip_prefix(&self.root)
            .unwrap_or(file)
            .to_string_lossy()
            .replace('\\', "/")
    }
}

/// Turn one import declaration into records, one per binding
pub fn classify(
    package_name: &str,
    source_file: &str,
    declaration: &ImportDeclaration,
) -> Vec<ImportRecord> {
    let import_module = strip_quotes(&declaration.specifier).to_string();
    let record = |import_kind, import_name: &str, type_only: bool| ImportRecord {
        package_name: package_name.to_string(),
        source_file: source_file.to_string(),
        import_module: import_module.clone(),
        import_kind,
        import_name: import_name.to_string(),
        import_type: Some(if declaration.type_only || type_only {
            ImportType::Type
        } else {
            ImportType::Value
        }),
    };

    if declaration.bindings.is_empty() {
        return vec![record(ImportKind::SideEffect, "", false)];
    }

    declaration
        .bindings
        .iter()
        .map(|binding| match binding {
            ImportBinding::Namespace { local } => record(ImportKind::Namespace, local, false),
            ImportBinding::Default { local } => record(ImportKind::Default, local, false),
            ImportBinding::Named {
                imported,
                type_only,
                ..
            } => record(ImportKind::Named, imported, *type_only),
        })
        .collect()
}

/// Remove one pair of enclosing quotes from a module specifier
pub fn strip_quotes(specifier: &str) -> &str {
    let trimmed = specifier.trim();
    for quote in ['"', '\'', '`'] {
        if let Some(inner) = trimmed
            .strip_prefix(quote)
            .and_then(|rest| rest.strip_suffix(quote))
        {
            return inner;
        }
    }
    trimmed
}

/// [`ImportExtractor::get_imports`] with the oxc parser and default cache
pub fn get_imports(
    root: &Path,
    package_dir: &Path,
    cache_write: bool,
    cache_read: bool,
) -> Result<Vec<ImportRecord>, CarouselError> {
    let parser = OxcSourceParser::new();
    ImportExtractor::new(root, &parser).get_imports(package_dir, cache_write, cache_read)
}

/// [`ImportExtractor::find_all_internal_package_imports`] with the oxc parser
/// and default cache
pub fn find_all_internal_package_imports(
    root: &Path,
    packages: &[Package],
    cache_write: bool,
    cache_read: bool,
) -> Result<Vec<ImportRecord>, CarouselError> {
    let parser = OxcSourceParser::new();
    ImportExtractor::new(root, &parser).find_all_internal_package_imports(
        packages,
        cache_write,
        cache_read,
    )
}

#[cfg(test)]
mod tests {
    use std::fs;

    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    use super::*;

    fn write(path: &Path, content: &str) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn package(name: &str, dir: &str) -> Package {
        Package::builder()
            .with_name(name)
            .with_dir(dir)
            .build()
            .unwrap()
    }

    fn create_workspace() -> TempDir {
        let temp = TempDir::new().unwrap();
        let root = temp.path();

        write(
            &root.join("package.json"),
            r#"{ "workspaces": ["packages/*"] }"#,
        );
        write(
            &root.join("packages/app/package.json"),
            r#"{ "name": "@org/app" }"#,
        );
        write(&root.join("packages/app/tsconfig.json"), "{}");
        write(
            &root.join("packages/app/src/index.ts"),
            r#"
            import "./styles.css";
            import { foo as bar, baz } from "@org/dep";
            import * as React from "react";
            export const x = bar + baz;
            "#,
        );
        write(
            &root.join("packages/dep/package.json"),
            r#"{ "name": "@org/dep" }"#,
        );
        write(&root.join("packages/dep/src/index.ts"), "export const foo = 1;");

        temp
    }

    #[test]
    fn test_strip_quotes() {
        assert_eq!(strip_quotes("\"@org/dep\""), "@org/dep");
        assert_eq!(strip_quotes("'react'"), "react");
        assert_eq!(strip_quotes("bare"), "bare");
        assert_eq!(strip_quotes("\"unbalanced'"), "\"unbalanced'");
    }

    #[test]
    fn test_classify_each_shape() {
        let declaration = ImportDeclaration::new("'@org/dep'")
            .with_binding(ImportBinding::Default {
                local: "dep".to_string(),
            })
            .with_binding(ImportBinding::Named {
                imported: "foo".to_string(),
                local: "bar".to_string(),
                type_only: true,
            });

        let records = classify("@org/app", "packages/app/src/index.ts", &declaration);
        let summary: Vec<(ImportKind, &str, Option<ImportType>)> = records
            .iter()
            .map(|r| (r.import_kind, r.import_name.as_str(), r.import_type))
            .collect();

        assert_eq!(
            summary,
            vec![
                (ImportKind::Default, "dep", Some(ImportType::Value)),
                (ImportKind::Named, "foo", Some(ImportType::Type)),
            ]
        );
        assert!(records.iter().all(|r| r.import_module == "@org/dep"));
    }

    #[test]
    fn test_classify_side_effect_and_type_only_declaration() {
        let side_effect = classify("a", "a/index.ts", &ImportDeclaration::new("\"polyfill\""));
        assert_eq!(side_effect.len(), 1);
        assert_eq!(side_effect[0].import_kind, ImportKind::SideEffect);
        assert_eq!(side_effect[0].import_name, "");

        let type_only = ImportDeclaration::new("\"b\"")
            .with_type_only(true)
            .with_binding(ImportBinding::Namespace {
                local: "types".to_string(),
            });
        let records = classify("a", "a/index.ts", &type_only);
        assert_eq!(records[0].import_kind, ImportKind::Namespace);
        assert_eq!(records[0].import_name, "types");
        assert!(records[0].is_type_only());
    }

    #[test]
    fn test_aliased_named_import_keeps_exported_name() {
        let temp = create_workspace();
        let parser = OxcSourceParser::new();
        let extractor = ImportExtractor::new(temp.path(), &parser);

        let records = extractor
            .get_imports(Path::new("packages/app"), false, false)
            .unwrap();

        let dep_names: Vec<&str> = records
            .iter()
            .filter(|r| r.import_module == "@org/dep")
            .map(|r| r.import_name.as_str())
            .collect();
        assert_eq!(dep_names, vec!["foo", "baz"]);
        assert!(records
            .iter()
            .all(|r| r.source_file == "packages/app/src/index.ts"));
        assert!(records.iter().all(|r| r.package_name == "@org/app"));
    }

    #[test]
    fn test_package_without_tsconfig_has_no_imports() {
        let temp = create_workspace();
        let parser = OxcSourceParser::new();
        let extractor = ImportExtractor::new(temp.path(), &parser);

        let records = extractor
            .get_imports(Path::new("packages/dep"), true, false)
            .unwrap();

        assert!(records.is_empty());
        assert_eq!(
            extractor.cache().read(Path::new("packages/dep")).unwrap(),
            None
        );
    }

    #[test]
    fn test_cache_write_then_read_returns_same_records() {
        let temp = create_workspace();
        let parser = OxcSourceParser::new();
        let extractor = ImportExtractor::new(temp.path(), &parser);

        let written = extractor
            .get_imports(Path::new("packages/app"), true, false)
            .unwrap();

        // Sources changed after caching are not seen on a cache read
        fs::remove_file(temp.path().join("packages/app/src/index.ts")).unwrap();

        let cached = extractor
            .get_imports(Path::new("packages/app"), false, true)
            .unwrap();
        assert_eq!(cached, written);

        let fresh = extractor
            .get_imports(Path::new("packages/app"), false, false)
            .unwrap();
        assert!(fresh.is_empty());
    }

    #[test]
    fn test_one_broken_package_fails_the_whole_extraction() {
        let temp = create_workspace();
        let root = temp.path();
        write(
            &root.join("packages/broken/package.json"),
            r#"{ "name": "@org/broken" }"#,
        );
        write(&root.join("packages/broken/tsconfig.json"), "{}");
        write(
            &root.join("packages/broken/src/index.ts"),
            "import { from from from",
        );

        let parser = OxcSourceParser::new();
        let extractor = ImportExtractor::new(root, &parser);
        let packages = vec![
            package("@org/app", "packages/app"),
            package("@org/broken", "packages/broken"),
            package("@org/dep", "packages/dep"),
        ];

        let err = extractor
            .find_all_internal_package_imports(&packages, false, false)
            .unwrap_err();

        match err {
            CarouselError::SourceParseError { path, .. } => {
                assert!(path.ends_with("packages/broken/src/index.ts"))
            }
            other => panic!("Expected SourceParseError, got {other:?}"),
        }
    }

    #[test]
    fn test_corrupt_cache_entry_fails_the_whole_extraction() {
        let temp = create_workspace();
        let parser = OxcSourceParser::new();
        let cache = ImportCache::new(temp.path().join("cache"));
        let entry = cache.entry_path(Path::new("packages/dep")).unwrap();
        write(&entry, "{ not an import list");

        let extractor = ImportExtractor::new(temp.path(), &parser).with_cache(cache);
        let packages = vec![
            package("@org/app", "packages/app"),
            package("@org/dep", "packages/dep"),
        ];

        let result = extractor.find_all_internal_package_imports(&packages, false, true);

        assert!(matches!(result, Err(CarouselError::CacheDecodeError { .. })));
    }

    #[test]
    fn test_find_all_keeps_internal_modules_only() {
        let temp = create_workspace();
        let parser = OxcSourceParser::new();
        let cache = ImportCache::new(temp.path().join("cache"));
        let extractor = ImportExtractor::new(temp.path(), &parser).with_cache(cache);
        let packages = vec![
            package("@org/app", "packages/app"),
            package("@org/dep", "packages/dep"),
        ];

        let records = extractor
            .find_all_internal_package_imports(&packages, true, false)
            .unwrap();

        assert_eq!(records.len(), 2);
        assert!(records.iter().all(|r| r.import_module == "@org/dep"));

        // The cache keeps everything that was extracted
        let cached = extractor
            .cache()
            .read(Path::new("packages/app"))
            .unwrap()
            .unwrap();
        assert_eq!(cached.len(), 4);
    }

    #[test]
    fn test_missing_package_manifest_fails() {
        let temp = TempDir::new().unwrap();
        let parser = OxcSourceParser::new();
        let extractor = ImportExtractor::new(temp.path(), &parser);

        let err = extractor
            .get_imports(Path::new("packages/ghost"), false, false)
            .unwrap_err();
        assert!(matches!(err, CarouselError::FileReadError { .. }));
    }
}
