use std::collections::HashSet;
use std::path::{Component, Path, PathBuf};

use rayon::prelude::*;

use crate::constants::workspace::IGNORED_DIRS;
use crate::error::CarouselError;
use crate::manifest::{PackageJson, manifest_path};
use crate::progress::ProgressReporter;
use crate::utils::string::pluralize;

/// A manifest that declares no workspaces, i.e. a package
#[derive(Debug, Clone)]
pub struct LeafManifest {
    /// Directory as matched below the workspace root, symlinks unresolved
    pub dir: PathBuf,
    /// Resolved directory, only used to recognise the same package twice
    pub canonical_dir: PathBuf,
    pub manifest: PackageJson,
}

/// A directory matched by a workspace pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberDir {
    pub dir: PathBuf,
    pub canonical_dir: PathBuf,
}

/// Resolves workspace roots into the leaf manifests beneath them
pub struct WorkspaceDiscovery<'a> {
    progress: Option<&'a ProgressReporter>,
}

impl<'a> WorkspaceDiscovery<'a> {
    pub fn new(progress: Option<&'a ProgressReporter>) -> Self {
        Self { progress }
    }

    /// Discover every leaf manifest reachable from `root`.
    ///
    /// A missing or malformed root manifest is an error, as is any malformed
    /// manifest matched by a workspace pattern.
    pub fn discover_all(&self, root: &Path) -> Result<Vec<LeafManifest>, CarouselError> {
        let root = root
            .canonicalize()
            .map_err(|e| CarouselError::FileReadError {
                path: manifest_path(root),
                source: e,
            })?;

        let member = MemberDir {
            dir: root.clone(),
            canonical_dir: root,
        };
        self.discover_in_dir(member, &[])
    }

    fn discover_in_dir(
        &self,
        member: MemberDir,
        ancestors: &[PathBuf],
    ) -> Result<Vec<LeafManifest>, CarouselError> {
        let path = manifest_path(&member.dir);
        if let Some(p) = self.progress {
            p.checking_manifest(&path);
        }

        let manifest = PackageJson::parse_file(&path)?;
        if !manifest.is_workspace_root() {
            return Ok(vec![LeafManifest {
                dir: member.dir,
                canonical_dir: member.canonical_dir,
                manifest,
            }]);
        }

        // Resolved ancestors stop a pattern that matches its own workspace
        // (or a symlink back to it) from recursing forever
        let mut lineage = ancestors.to_vec();
        lineage.push(member.canonical_dir.clone());

        let children: Vec<MemberDir> =
            expand_workspace_patterns(&member.dir, manifest.workspace_patterns())?
                .into_iter()
                .filter(|child| !lineage.contains(&child.canonical_dir))
                .collect();

        if let Some(p) = self.progress {
            p.debug(&format!(
                "Workspace {} matched {} member {}",
                member.dir.display(),
                children.len(),
                pluralize("directory", children.len())
            ));
        }

        let nested = children
            .into_par_iter()
            .map(|child| self.discover_in_dir(child, &lineage))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(nested.into_iter().flatten().collect())
    }
}

/// Expand workspace patterns relative to `base` into member directories.
///
/// Only directories holding a manifest are returned, in first-match order.
/// Members keep the path the pattern matched and are deduplicated by their
/// resolved directory. Patterns prefixed with `!` remove directories matched
/// by earlier patterns.
pub fn expand_workspace_patterns(
    base: &Path,
    patterns: &[String],
) -> Result<Vec<MemberDir>, CarouselError> {
    let mut seen = HashSet::new();
    let mut members = Vec::new();
    let mut excludes = Vec::new();

    for raw in patterns {
        let (negated, pattern) = match raw.strip_prefix('!') {
            Some(rest) => (true, rest),
            None => (false, raw.as_str()),
        };
        let pattern = normalize_pattern(pattern);
        let full_pattern = base.join(pattern).to_string_lossy().to_string();

        if negated {
            let compiled =
                glob::Pattern::new(&full_pattern).map_err(|e| CarouselError::InvalidGlobPattern {
                    pattern: raw.clone(),
                    source: e,
                })?;
            excludes.push(compiled);
            continue;
        }

        let paths = glob::glob(&full_pattern).map_err(|e| CarouselError::InvalidGlobPattern {
            pattern: raw.clone(),
            source: e,
        })?;

        for path in paths.flatten() {
            if !path.is_dir() || is_ignored(base, &path) || !manifest_path(&path).is_file() {
                continue;
            }
            let canonical_dir = path.canonicalize().unwrap_or_else(|_| path.clone());
            if seen.insert(canonical_dir.clone()) {
                members.push(MemberDir {
                    dir: path,
                    canonical_dir,
                });
            }
        }
    }

    members.retain(|member| !excludes.iter().any(|pattern| pattern.matches_path(&member.dir)));

    Ok(members)
}

fn normalize_pattern(pattern: &str) -> &str {
    let pattern = pattern.trim();
    let pattern = pattern.strip_prefix("./").unwrap_or(pattern);
    pattern.trim_end_matches('/')
}

fn is_ignored(base: &Path, path: &Path) -> bool {
    path.strip_prefix(base)
        .unwrap_or(path)
        .components()
        .any(|component| match component {
            Component::Normal(name) => name
                .to_str()
                .is_some_and(|name| IGNORED_DIRS.contains(&name)),
            _ => false,
        })
}
