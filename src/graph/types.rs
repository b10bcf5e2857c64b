//! Core graph types
//!
//! This module contains the fundamental data structures used in the dependency
//! graph.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt;

use petgraph::graph::{DiGraph, NodeIndex};
use serde::Serialize;

/// A declared dependency of `source` on the internal package `target`
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Edge {
    pub source: String,
    pub target: String,
}

impl Edge {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }

    pub fn is_self_loop(&self) -> bool {
        self.source == self.target
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} → {}", self.source, self.target)
    }
}

/// Directed package dependency graph.
///
/// Nodes are inserted in lexicographic name order, so node indices follow name
/// order. The sorted adjacency list mirrors the petgraph edges.
#[derive(Debug, Clone, Default)]
pub struct DependencyGraph {
    graph: DiGraph<String, ()>,
    indices: HashMap<String, NodeIndex>,
    adjacency: BTreeMap<String, BTreeSet<String>>,
    edges: BTreeSet<Edge>,
}

impl DependencyGraph {
    pub(super) fn new(nodes: BTreeSet<String>, edges: BTreeSet<Edge>) -> Self {
        let mut graph = DiGraph::with_capacity(nodes.len(), edges.len());
        let mut indices = HashMap::with_capacity(nodes.len());
        let mut adjacency: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();

        for name in nodes {
            let idx = graph.add_node(name.clone());
            indices.insert(name.clone(), idx);
            adjacency.insert(name, BTreeSet::new());
        }

        for edge in &edges {
            if let (Some(&from), Some(&to)) = (indices.get(&edge.source), indices.get(&edge.target))
            {
                graph.add_edge(from, to, ());
                adjacency
                    .entry(edge.source.clone())
                    .or_default()
                    .insert(edge.target.clone());
            }
        }

        Self {
            graph,
            indices,
            adjacency,
            edges,
        }
    }

    /// The underlying petgraph graph
    pub fn graph(&self) -> &DiGraph<String, ()> {
        &self.graph
    }

    pub fn edges(&self) -> &BTreeSet<Edge> {
        &self.edges
    }

    pub fn adjacency(&self) -> &BTreeMap<String, BTreeSet<String>> {
        &self.adjacency
    }

    /// Direct dependencies of `name` in lexicographic order
    pub fn successors(&self, name: &str) -> impl Iterator<Item = &str> {
        self.adjacency
            .get(name)
            .into_iter()
            .flat_map(|targets| targets.iter().map(String::as_str))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.indices.contains_key(name)
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }
}
