//! # Cycle Detection Module
//!
//! This module enumerates circular dependencies in the package dependency
//! graph.
//!
//! ## Algorithm
//!
//! Tarjan's Strongly Connected Components algorithm partitions the graph in
//! O(V + E). Every elementary cycle lives inside one component, and Johnson's
//! algorithm enumerates them per start node in O((V + E)(C + 1)) where C is
//! the number of cycles. Components of a single node without a self-loop are
//! skipped, so acyclic graphs cost one Tarjan pass.
//!
//! ## Key Components
//!
//! - **CycleDetector**: Runs the enumeration and holds the results
//! - **Cycle**: One simple cycle, starting at its smallest package name
//!
//! ## Example
//!
//! ```
//! use pkg_carousel::detector::CycleDetector;
//! use pkg_carousel::graph::{DependencyGraph, Edge};
//!
//! let graph = DependencyGraph::from_edges([
//!     Edge::new("web", "api"),
//!     Edge::new("api", "models"),
//!     Edge::new("models", "web"),
//! ]);
//!
//! let mut detector = CycleDetector::new();
//! detector.detect_cycles(&graph, None);
//!
//! assert!(detector.has_cycles());
//! assert_eq!(detector.cycle_count(), 1);
//! assert_eq!(detector.cycles()[0].to_string(), "api → models → web → api");
//! ```

mod detector_impl;

pub use detector_impl::*;
