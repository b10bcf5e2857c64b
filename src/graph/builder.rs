use std::collections::BTreeSet;

use super::types::{DependencyGraph, Edge};
use crate::progress::ProgressReporter;
use crate::registry::Package;
use crate::utils::string::pluralize;

/// Builder for constructing dependency graphs
///
/// Every package becomes a node, and every internal dependency it declares
/// becomes one edge. Self dependencies are kept as self-loops.
#[derive(Debug, Default)]
pub struct DependencyGraphBuilder {
    nodes: BTreeSet<String>,
    edges: BTreeSet<Edge>,
}

impl DependencyGraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add packages and the edges they declare
    pub fn add_packages(mut self, packages: &[Package], progress: Option<&ProgressReporter>) -> Self {
        for package in packages {
            self.nodes.insert(package.name().to_string());
            for dep in package.deps() {
                self.edges.insert(Edge::new(package.name(), dep.as_str()));
            }

            if let Some(p) = progress {
                p.debug(&format!(
                    "{} declares {} internal {}",
                    package.name(),
                    package.deps().len(),
                    pluralize("dependency", package.deps().len())
                ));
            }
        }
        self
    }

    /// Add an edge; both endpoints become nodes
    pub fn add_edge(mut self, edge: Edge) -> Self {
        self.nodes.insert(edge.source.clone());
        self.nodes.insert(edge.target.clone());
        self.edges.insert(edge);
        self
    }

    pub fn build(self) -> DependencyGraph {
        DependencyGraph::new(self.nodes, self.edges)
    }
}

impl DependencyGraph {
    pub fn from_packages(packages: &[Package]) -> Self {
        DependencyGraphBuilder::new()
            .add_packages(packages, None)
            .build()
    }

    pub fn from_edges(edges: impl IntoIterator<Item = Edge>) -> Self {
        edges
            .into_iter()
            .fold(DependencyGraphBuilder::new(), DependencyGraphBuilder::add_edge)
            .build()
    }
}

/// One edge per `(package, internal dependency)` pair
pub fn build_graph(packages: &[Package]) -> BTreeSet<Edge> {
    packages
        .iter()
        .flat_map(|package| {
            package
                .deps()
                .iter()
                .map(move |dep| Edge::new(package.name(), dep.as_str()))
        })
        .collect()
}
