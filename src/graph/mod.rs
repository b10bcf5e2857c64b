//! # Graph Construction Module
//!
//! This module builds the package dependency graph: one node per package and
//! one edge per declared internal dependency.
//!
//! ## Components
//!
//! - **DependencyGraphBuilder**: Collects nodes and edges from packages
//! - **DependencyGraph**: `petgraph` graph plus a sorted adjacency list and
//!   the edge set, with nodes indexed in name order
//! - **Edge**: A `(source, target)` dependency, ordered by both names
//!
//! ## Example
//!
//! ```
//! use pkg_carousel::graph::{DependencyGraph, Edge};
//!
//! let graph = DependencyGraph::from_edges([Edge::new("app", "core"), Edge::new("app", "ui")]);
//!
//! assert_eq!(graph.node_count(), 3);
//! assert_eq!(graph.successors("app").collect::<Vec<_>>(), vec!["core", "ui"]);
//! ```

mod builder;
mod types;

pub use builder::{DependencyGraphBuilder, build_graph};
pub use types::{DependencyGraph, Edge};
