//! Source file enumeration for TypeScript projects
//!
//! A package takes part in import extraction only when it carries a
//! `tsconfig.json` at its root. When that file is plain JSON its `files`,
//! `include` and `exclude` entries select the sources; otherwise every file
//! with a known source extension is walked.

use std::collections::BTreeSet;
use std::path::{Component, Path, PathBuf};

use serde::Deserialize;
use walkdir::WalkDir;

use crate::constants::workspace::{IGNORED_DIRS, PROJECT_MARKER, SOURCE_EXTENSIONS};
use crate::error::CarouselError;

#[derive(Debug, Default, Deserialize)]
struct TsConfig {
    files: Option<Vec<String>>,
    include: Option<Vec<String>>,
    #[serde(default)]
    exclude: Vec<String>,
}

/// Path of the project marker for a package directory
pub fn project_marker(package_dir: &Path) -> PathBuf {
    package_dir.join(PROJECT_MARKER)
}

pub fn is_project(package_dir: &Path) -> bool {
    project_marker(package_dir).is_file()
}

/// Source files of the project rooted at `package_dir`, sorted.
///
/// Every returned file lies under `package_dir`.
pub fn source_files(package_dir: &Path) -> Result<Vec<PathBuf>, CarouselError> {
    let marker = project_marker(package_dir);
    let content = std::fs::read_to_string(&marker).map_err(|e| CarouselError::FileReadError {
        path: marker.clone(),
        source: e,
    })?;

    // tsconfig allows comments and trailing commas; anything serde_json
    // rejects falls back to the directory walk
    let config: TsConfig = serde_json::from_str(&content).unwrap_or_default();

    let mut files = BTreeSet::new();

    if config.files.is_none() && config.include.is_none() {
        files.extend(walk_sources(package_dir, package_dir));
    } else {
        for file in config.files.iter().flatten() {
            let path = package_dir.join(file);
            if path.is_file() {
                files.insert(path);
            }
        }

        for pattern in config.include.iter().flatten() {
            files.extend(expand_include(package_dir, pattern)?);
        }
    }

    let excludes = config
        .exclude
        .iter()
        .map(|pattern| compile_exclude(package_dir, pattern))
        .collect::<Result<Vec<_>, _>>()?;

    let canonical_dir = package_dir
        .canonicalize()
        .unwrap_or_else(|_| package_dir.to_path_buf());

    Ok(files
        .into_iter()
        .filter(|file| !excludes.iter().any(|exclude| exclude.matches(package_dir, file)))
        .filter(|file| lies_under(&canonical_dir, file))
        .collect())
}

fn expand_include(package_dir: &Path, pattern: &str) -> Result<Vec<PathBuf>, CarouselError> {
    let pattern = pattern.trim_start_matches("./").trim_end_matches('/');

    if !has_wildcard(pattern) {
        let path = package_dir.join(pattern);
        if path.is_dir() {
            return Ok(walk_sources(package_dir, &path));
        }
        return Ok(if is_source_file(&path) {
            vec![path]
        } else {
            Vec::new()
        });
    }

    let full_pattern = package_dir.join(pattern).to_string_lossy().to_string();
    let paths = glob::glob(&full_pattern).map_err(|e| CarouselError::InvalidGlobPattern {
        pattern: pattern.to_string(),
        source: e,
    })?;

    let mut files = Vec::new();
    for path in paths.flatten() {
        if is_ignored(package_dir, &path) {
            continue;
        }
        if path.is_dir() {
            files.extend(walk_sources(package_dir, &path));
        } else if is_source_file(&path) {
            files.push(path);
        }
    }
    Ok(files)
}

/// Walk `dir` for source files, skipping ignored and hidden directories
fn walk_sources(package_dir: &Path, dir: &Path) -> Vec<PathBuf> {
    WalkDir::new(dir)
        .follow_links(false)
        .into_iter()
        .filter_entry(|entry| {
            entry.depth() == 0
                || !entry.file_type().is_dir()
                || !is_skipped_dir_name(&entry.file_name().to_string_lossy())
        })
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| is_source_file(path) && !is_ignored(package_dir, path))
        .collect()
}

fn is_skipped_dir_name(name: &str) -> bool {
    name.starts_with('.') || IGNORED_DIRS.contains(&name)
}

fn is_source_file(path: &Path) -> bool {
    let is_declaration = path
        .file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.ends_with(".d.ts"));

    !is_declaration
        && path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| SOURCE_EXTENSIONS.contains(&ext))
}

fn is_ignored(package_dir: &Path, path: &Path) -> bool {
    path.strip_prefix(package_dir)
        .unwrap_or(path)
        .components()
        .any(|component| match component {
            Component::Normal(name) => name
                .to_str()
                .is_some_and(|name| IGNORED_DIRS.contains(&name)),
            _ => false,
        })
}

fn has_wildcard(pattern: &str) -> bool {
    pattern.contains(['*', '?', '['])
}

fn lies_under(canonical_dir: &Path, file: &Path) -> bool {
    file.canonicalize()
        .map(|canonical| canonical.starts_with(canonical_dir))
        .unwrap_or(false)
}

/// An `exclude` entry: either a glob or a directory prefix
enum Exclude {
    Pattern(glob::Pattern),
    Prefix(PathBuf),
}

impl Exclude {
    fn matches(&self, package_dir: &Path, file: &Path) -> bool {
        match self {
            Exclude::Pattern(pattern) => {
                pattern.matches_path(file)
                    || file
                        .ancestors()
                        .take_while(|dir| dir.starts_with(package_dir))
                        .any(|dir| pattern.matches_path(dir))
            }
            Exclude::Prefix(prefix) => file.starts_with(prefix),
        }
    }
}

fn compile_exclude(package_dir: &Path, pattern: &str) -> Result<Exclude, CarouselError> {
    let trimmed = pattern.trim_start_matches("./").trim_end_matches('/');
    let full = package_dir.join(trimmed);

    if !has_wildcard(trimmed) {
        return Ok(Exclude::Prefix(full));
    }

    glob::Pattern::new(&full.to_string_lossy())
        .map(Exclude::Pattern)
        .map_err(|e| CarouselError::InvalidGlobPattern {
            pattern: pattern.to_string(),
            source: e,
        })
}
