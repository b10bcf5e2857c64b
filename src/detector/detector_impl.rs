use std::collections::BTreeSet;
use std::fmt;

use petgraph::algo::tarjan_scc;
use petgraph::graph::NodeIndex;
use serde::Serialize;

use crate::graph::{DependencyGraph, Edge};
use crate::progress::ProgressReporter;

/// Detector for finding every elementary cycle in a package graph
///
/// Strongly connected components come from Tarjan's algorithm; the cycles in
/// each component are then enumerated with Johnson's algorithm.
#[derive(Debug, Default)]
pub struct CycleDetector {
    cycles: Vec<Cycle>,
}

/// A simple cycle `[p0, .., pn-1]` with the implied closing edge `pn-1 → p0`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Cycle {
    packages: Vec<String>,
}

impl Cycle {
    pub fn new(packages: Vec<String>) -> Self {
        Self { packages }
    }

    pub fn packages(&self) -> &[String] {
        &self.packages
    }

    pub fn len(&self) -> usize {
        self.packages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.packages.iter().any(|package| package == name)
    }

    /// Edges along the cycle, including the closing edge
    pub fn edges(&self) -> Vec<Edge> {
        let n = self.packages.len();
        (0..n)
            .map(|i| Edge::new(self.packages[i].as_str(), self.packages[(i + 1) % n].as_str()))
            .collect()
    }
}

impl fmt::Display for Cycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for package in &self.packages {
            write!(f, "{package} → ")?;
        }
        match self.packages.first() {
            Some(first) => write!(f, "{first}"),
            None => Ok(()),
        }
    }
}

/// Per start-node search state for Johnson's circuit enumeration
struct CircuitSearch<'a> {
    successors: &'a [Vec<usize>],
    component: &'a [usize],
    start: usize,
    blocked: Vec<bool>,
    block_map: Vec<BTreeSet<usize>>,
    stack: Vec<usize>,
    found: Vec<Vec<usize>>,
}

impl<'a> CircuitSearch<'a> {
    fn new(successors: &'a [Vec<usize>], component: &'a [usize], start: usize) -> Self {
        let n = successors.len();
        Self {
            successors,
            component,
            start,
            blocked: vec![false; n],
            block_map: vec![BTreeSet::new(); n],
            stack: Vec::new(),
            found: Vec::new(),
        }
    }

    /// Only nodes of the start's component that sort at or after it
    fn allowed(&self, node: usize) -> bool {
        node >= self.start && self.component[node] == self.component[self.start]
    }

    fn circuit(&mut self, v: usize) -> bool {
        let mut closed = false;
        self.stack.push(v);
        self.blocked[v] = true;

        let successors = self.successors;
        for &w in &successors[v] {
            if !self.allowed(w) {
                continue;
            }
            if w == self.start {
                self.found.push(self.stack.clone());
                closed = true;
            } else if !self.blocked[w] && self.circuit(w) {
                closed = true;
            }
        }

        if closed {
            self.unblock(v);
        } else {
            for &w in &successors[v] {
                if self.allowed(w) {
                    self.block_map[w].insert(v);
                }
            }
        }

        self.stack.pop();
        closed
    }

    fn unblock(&mut self, u: usize) {
        self.blocked[u] = false;
        let waiting = std::mem::take(&mut self.block_map[u]);
        for w in waiting {
            if self.blocked[w] {
                self.unblock(w);
            }
        }
    }
}

impl CycleDetector {
    /// Create a new cycle detector
    pub fn new() -> Self {
        Self::default()
    }

    /// Detect all elementary cycles in the dependency graph.
    ///
    /// Each cycle starts at its lexicographically smallest package and
    /// successors are explored in name order, so repeated runs over the same
    /// graph yield the same list. Results of an earlier run are replaced.
    pub fn detect_cycles(&mut self, graph: &DependencyGraph, progress: Option<&ProgressReporter>) {
        self.cycles.clear();

        if let Some(p) = progress {
            p.start_cycle_detection();
        }

        let inner = graph.graph();
        let n = inner.node_count();

        let mut component = vec![0usize; n];
        let sccs = tarjan_scc(inner);
        for (id, scc) in sccs.iter().enumerate() {
            for node in scc {
                component[node.index()] = id;
            }
        }

        let mut successors: Vec<Vec<usize>> = vec![Vec::new(); n];
        for node in inner.node_indices() {
            let mut targets: Vec<usize> = inner.neighbors(node).map(|t| t.index()).collect();
            targets.sort_unstable();
            targets.dedup();
            successors[node.index()] = targets;
        }

        for start in 0..n {
            let has_self_loop = successors[start].contains(&start);
            if sccs[component[start]].len() == 1 && !has_self_loop {
                continue;
            }

            let mut search = CircuitSearch::new(&successors, &component, start);
            search.circuit(start);

            for path in search.found {
                let names = path
                    .into_iter()
                    .map(|idx| inner[NodeIndex::new(idx)].clone())
                    .collect();
                self.cycles.push(Cycle::new(names));
            }
        }

        if let Some(p) = progress {
            p.finish_cycle_detection(self.cycles.len());
        }
    }

    /// Get all detected cycles
    pub fn cycles(&self) -> &[Cycle] {
        &self.cycles
    }

    /// Cycles that pass through the named package
    pub fn cycles_involving(&self, name: &str) -> Vec<&Cycle> {
        self.cycles.iter().filter(|cycle| cycle.contains(name)).collect()
    }

    /// Check if any cycles were detected
    pub fn has_cycles(&self) -> bool {
        !self.cycles.is_empty()
    }

    /// Get the number of detected cycles
    pub fn cycle_count(&self) -> usize {
        self.cycles.len()
    }

    /// Add a cycle to the detector (used for filtered results)
    pub fn add_cycle(&mut self, cycle: Cycle) {
        self.cycles.push(cycle);
    }
}

/// Enumerate every elementary cycle of the graph formed by `edges`
pub fn find_cycles(edges: &BTreeSet<Edge>) -> Vec<Cycle> {
    let graph = DependencyGraph::from_edges(edges.iter().cloned());
    let mut detector = CycleDetector::new();
    detector.detect_cycles(&graph, None);
    detector.cycles
}
