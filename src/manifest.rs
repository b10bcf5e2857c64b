use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::constants::workspace::MANIFEST_FILE;
use crate::error::CarouselError;

/// The subset of `package.json` the analysis needs
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageJson {
    pub name: Option<String>,
    pub workspaces: Option<WorkspaceSpec>,
    #[serde(default)]
    pub dependencies: BTreeMap<String, serde_json::Value>,
    #[serde(default)]
    pub dev_dependencies: BTreeMap<String, serde_json::Value>,
    #[serde(default)]
    pub peer_dependencies: BTreeMap<String, serde_json::Value>,
    #[serde(default)]
    pub optional_dependencies: BTreeMap<String, serde_json::Value>,
}

/// `workspaces` is either a bare pattern list or `{ "packages": [...] }`
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum WorkspaceSpec {
    Patterns(Vec<String>),
    Object {
        #[serde(default)]
        packages: Vec<String>,
    },
}

impl WorkspaceSpec {
    pub fn patterns(&self) -> &[String] {
        match self {
            WorkspaceSpec::Patterns(patterns) => patterns,
            WorkspaceSpec::Object { packages } => packages,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DependencyType {
    Normal,
    Dev,
    Peer,
    Optional,
}

impl PackageJson {
    /// Load the manifest that lives in `dir`
    pub fn load(dir: &Path) -> Result<Self, CarouselError> {
        Self::parse_file(&manifest_path(dir))
    }

    pub fn parse_file(path: &Path) -> Result<Self, CarouselError> {
        let content = std::fs::read_to_string(path).map_err(|e| CarouselError::FileReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::parse_str(path, &content)
    }

    pub fn parse_str(path: &Path, content: &str) -> Result<Self, CarouselError> {
        serde_json::from_str(content).map_err(|e| CarouselError::manifest_parse(path, content, e))
    }

    pub fn is_workspace_root(&self) -> bool {
        self.workspaces.is_some()
    }

    pub fn workspace_patterns(&self) -> &[String] {
        self.workspaces
            .as_ref()
            .map(WorkspaceSpec::patterns)
            .unwrap_or_default()
    }

    /// Package name, required for anything that becomes a graph node
    pub fn require_name(&self, path: &Path) -> Result<&str, CarouselError> {
        self.name
            .as_deref()
            .filter(|name| !name.is_empty())
            .ok_or_else(|| CarouselError::MissingPackageName {
                path: path.to_path_buf(),
            })
    }

    /// Every declared dependency name with the section it came from
    pub fn get_all_dependencies(&self) -> Vec<(&str, DependencyType)> {
        let sections = [
            (&self.dependencies, DependencyType::Normal),
            (&self.dev_dependencies, DependencyType::Dev),
            (&self.peer_dependencies, DependencyType::Peer),
            (&self.optional_dependencies, DependencyType::Optional),
        ];

        sections
            .into_iter()
            .flat_map(|(deps, dep_type)| deps.keys().map(move |name| (name.as_str(), dep_type)))
            .collect()
    }
}

pub fn manifest_path(dir: &Path) -> PathBuf {
    dir.join(MANIFEST_FILE)
}
