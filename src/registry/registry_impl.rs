use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::path::{Path, PathBuf};

use miette::Diagnostic;
use serde::Serialize;
use thiserror::Error;

use super::DependencyClassifier;
use crate::dependency_filter::DependencyFilter;
use crate::error::CarouselError;
use crate::manifest::manifest_path;
use crate::progress::ProgressReporter;
use crate::workspace_discovery::{LeafManifest, WorkspaceDiscovery};

#[derive(Error, Debug, Diagnostic)]
pub enum PackageBuilderError {
    #[error("Package name is required")]
    #[diagnostic(
        code(pkg_carousel::registry::missing_package_name),
        help("Provide a name for the package using with_name()")
    )]
    MissingName,
}

/// A package discovered under the workspace root
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Package {
    name: String,
    dir: PathBuf,
    deps: BTreeSet<String>,
}

impl Package {
    pub fn builder() -> PackageBuilder {
        PackageBuilder::default()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Directory relative to the workspace root, empty for the root itself
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Names of internal packages this package depends on
    pub fn deps(&self) -> &BTreeSet<String> {
        &self.deps
    }

    pub fn depends_on(&self, name: &str) -> bool {
        self.deps.contains(name)
    }

    /// Directory for display purposes, `.` for the root package
    pub fn display_dir(&self) -> String {
        if self.dir.as_os_str().is_empty() {
            ".".to_string()
        } else {
            self.dir.to_string_lossy().replace('\\', "/")
        }
    }
}

#[derive(Default)]
pub struct PackageBuilder {
    name: Option<String>,
    dir: PathBuf,
    deps: BTreeSet<String>,
}

impl PackageBuilder {
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.dir = dir.into();
        self
    }

    pub fn with_deps<I, S>(mut self, deps: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.deps = deps.into_iter().map(Into::into).collect();
        self
    }

    pub fn add_dep(mut self, dep: impl Into<String>) -> Self {
        self.deps.insert(dep.into());
        self
    }

    pub fn build(self) -> Result<Package, PackageBuilderError> {
        Ok(Package {
            name: self.name.ok_or(PackageBuilderError::MissingName)?,
            dir: self.dir,
            deps: self.deps,
        })
    }
}

/// The canonical package set of one analysis run
#[derive(Debug, Clone)]
pub struct PackageRegistry {
    root: PathBuf,
    packages: Vec<Package>,
    by_name: HashMap<String, usize>,
}

impl PackageRegistry {
    /// Discover every package under `root` and resolve internal dependencies
    pub fn discover(
        root: &Path,
        filter: DependencyFilter,
        progress: Option<&ProgressReporter>,
    ) -> Result<Self, CarouselError> {
        if let Some(p) = progress {
            p.start_discovery(root);
        }

        let canonical_root = root
            .canonicalize()
            .map_err(|e| CarouselError::FileReadError {
                path: manifest_path(root),
                source: e,
            })?;

        let leaves = WorkspaceDiscovery::new(progress).discover_all(&canonical_root)?;
        let packages = resolve_packages(&canonical_root, leaves, &filter)?;
        let registry = Self::from_packages(canonical_root, packages)?;

        if let Some(p) = progress {
            p.finish_discovery(registry.len());
        }

        Ok(registry)
    }

    /// Build a registry from already constructed packages, enforcing name
    /// uniqueness
    pub fn from_packages(
        root: impl Into<PathBuf>,
        packages: Vec<Package>,
    ) -> Result<Self, CarouselError> {
        let mut by_name = HashMap::with_capacity(packages.len());

        for (idx, package) in packages.iter().enumerate() {
            if let Some(&existing) = by_name.get(package.name()) {
                let first: &Package = &packages[existing];
                return Err(CarouselError::DuplicateNameError {
                    name: package.name().to_string(),
                    first_dir: first.dir().to_path_buf(),
                    second_dir: package.dir().to_path_buf(),
                });
            }
            by_name.insert(package.name().to_string(), idx);
        }

        Ok(Self {
            root: root.into(),
            packages,
            by_name,
        })
    }

    /// Canonical workspace root
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn packages(&self) -> &[Package] {
        &self.packages
    }

    pub fn get(&self, name: &str) -> Option<&Package> {
        self.by_name.get(name).map(|&idx| &self.packages[idx])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    pub fn names(&self) -> BTreeSet<&str> {
        self.packages.iter().map(Package::name).collect()
    }

    /// Packages that declare an internal dependency on `name`
    pub fn dependants_of(&self, name: &str) -> Vec<&Package> {
        self.packages
            .iter()
            .filter(|package| package.depends_on(name))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.packages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }
}

/// Which side of the dependency relation a lineup lists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LineupDirection {
    Dependencies,
    Dependants,
}

impl LineupDirection {
    pub fn label(&self) -> &'static str {
        match self {
            LineupDirection::Dependencies => "dependencies",
            LineupDirection::Dependants => "dependants",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineupEntry {
    pub name: String,
    pub dir: String,
    pub related: Vec<String>,
}

/// Packages listed with their internal dependencies or dependants
#[derive(Debug, Clone, Serialize)]
pub struct Lineup {
    pub direction: LineupDirection,
    pub packages: Vec<LineupEntry>,
}

impl PackageRegistry {
    /// Lineup of every package, or only of `focus` when given
    pub fn lineup(
        &self,
        direction: LineupDirection,
        focus: Option<&str>,
    ) -> Result<Lineup, CarouselError> {
        let selected: Vec<&Package> = match focus {
            Some(name) => vec![self.get(name).ok_or_else(|| CarouselError::PackageNotFound {
                name: name.to_string(),
            })?],
            None => self.packages.iter().collect(),
        };

        let packages = selected
            .into_iter()
            .map(|package| {
                let related = match direction {
                    LineupDirection::Dependencies => package.deps().iter().cloned().collect(),
                    LineupDirection::Dependants => {
                        let mut names: Vec<String> = self
                            .dependants_of(package.name())
                            .into_iter()
                            .map(|dependant| dependant.name().to_string())
                            .collect();
                        names.sort();
                        names
                    }
                };

                LineupEntry {
                    name: package.name().to_string(),
                    dir: package.display_dir(),
                    related,
                }
            })
            .collect();

        Ok(Lineup {
            direction,
            packages,
        })
    }
}

/// Turn leaf manifests into packages.
///
/// Leaves are deduplicated by resolved directory, checked for duplicate names
/// and returned sorted by their directory relative to `root`.
fn resolve_packages(
    root: &Path,
    leaves: Vec<LeafManifest>,
    filter: &DependencyFilter,
) -> Result<Vec<Package>, CarouselError> {
    let mut seen_dirs = HashSet::new();
    let mut unique: Vec<LeafManifest> = leaves
        .into_iter()
        .filter(|leaf| seen_dirs.insert(leaf.canonical_dir.clone()))
        .collect();
    unique.sort_by(|a, b| a.dir.cmp(&b.dir));

    let mut names: BTreeMap<String, PathBuf> = BTreeMap::new();
    for leaf in &unique {
        let name = leaf.manifest.require_name(&manifest_path(&leaf.dir))?;
        let dir = relative_dir(root, &leaf.dir);
        if let Some(first_dir) = names.get(name) {
            return Err(CarouselError::DuplicateNameError {
                name: name.to_string(),
                first_dir: first_dir.clone(),
                second_dir: dir,
            });
        }
        names.insert(name.to_string(), dir);
    }

    let internal_names: BTreeSet<String> = names.keys().cloned().collect();

    unique
        .iter()
        .map(|leaf| {
            let name = leaf.manifest.require_name(&manifest_path(&leaf.dir))?;
            let deps = DependencyClassifier::classify(&leaf.manifest, filter)
                .internal_dependencies(&internal_names);

            Ok(Package {
                name: name.to_string(),
                dir: relative_dir(root, &leaf.dir),
                deps,
            })
        })
        .collect()
}

/// Member paths are built by joining patterns onto `root`, so they always
/// start with it even when a member is a symlink leading elsewhere
fn relative_dir(root: &Path, dir: &Path) -> PathBuf {
    dir.strip_prefix(root)
        .map(Path::to_path_buf)
        .unwrap_or_else(|_| dir.to_path_buf())
}
