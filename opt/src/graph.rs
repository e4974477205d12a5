//! Stage dependency graph.
//!
//! A derived, disposable view over one stencil's stages: passes rebuild it
//! whenever they need it, nothing persists it.

use std::collections::BTreeSet;

use smallvec::SmallVec;

use crate::error::{DependencyCycleSnafu, Result};
use crate::stencil::Stencil;

/// Directed dependency graph over the stages of one stencil.
///
/// Nodes are stage positions in the stencil's current program order. Edges:
///
/// - *flow*: writer -> reader for every field written by one stage and read
///   by another, independent of program order. Mutually-reading stages
///   therefore show up as a cycle instead of being silently ordered.
/// - *output*: earlier writer -> later writer when two stages write the
///   same field.
#[derive(Debug, Clone)]
pub struct StageGraph {
    node_count: usize,
    edges: BTreeSet<(usize, usize)>,
    successors: Vec<SmallVec<[usize; 4]>>,
    predecessors: Vec<SmallVec<[usize; 4]>>,
}

impl StageGraph {
    /// Build the graph from the stencil's current stage footprints.
    pub fn build(stencil: &Stencil) -> Self {
        let stages: Vec<_> = stencil.stages().collect();
        let n = stages.len();
        let mut graph = Self {
            node_count: n,
            edges: BTreeSet::new(),
            successors: vec![SmallVec::new(); n],
            predecessors: vec![SmallVec::new(); n],
        };

        for (writer, writer_stage) in stages.iter().enumerate() {
            for (other, other_stage) in stages.iter().enumerate() {
                if writer == other {
                    continue;
                }
                // Flow dependency: the reader must see the writer's value.
                let raw = writer_stage
                    .writes()
                    .iter()
                    .any(|(field, extent)| other_stage.reads().get(field).is_some_and(|r| r.overlaps(extent)));
                // Output dependency: keep the final value the later write's.
                let waw = other > writer
                    && writer_stage.writes().keys().any(|field| other_stage.writes().contains_key(field));
                if raw || waw {
                    graph.add_edge(writer, other);
                }
            }
        }

        graph
    }

    fn add_edge(&mut self, from: usize, to: usize) {
        if self.edges.insert((from, to)) {
            self.successors[from].push(to);
            self.predecessors[to].push(from);
        }
    }

    pub fn node_count(&self) -> usize {
        self.node_count
    }

    pub fn has_edge(&self, from: usize, to: usize) -> bool {
        self.edges.contains(&(from, to))
    }

    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.edges.iter().copied()
    }

    pub fn predecessors(&self, node: usize) -> &[usize] {
        &self.predecessors[node]
    }

    pub fn successors(&self, node: usize) -> &[usize] {
        &self.successors[node]
    }

    /// Stable topological order: among ready nodes, lowest program position
    /// first. Fails on a dependency cycle, naming one involved stage.
    pub fn topological_order(&self, stencil_name: &str) -> Result<Vec<usize>> {
        let mut in_degree: Vec<usize> = (0..self.node_count).map(|n| self.predecessors[n].len()).collect();
        let mut ready: BTreeSet<usize> = (0..self.node_count).filter(|&n| in_degree[n] == 0).collect();
        let mut order = Vec::with_capacity(self.node_count);

        while let Some(&node) = ready.iter().next() {
            ready.remove(&node);
            order.push(node);
            for &succ in &self.successors[node] {
                in_degree[succ] -= 1;
                if in_degree[succ] == 0 {
                    ready.insert(succ);
                }
            }
        }

        if order.len() != self.node_count {
            let stuck = (0..self.node_count)
                .find(|&n| in_degree[n] > 0)
                .unwrap_or_default();
            return DependencyCycleSnafu { stencil: stencil_name.to_owned(), stage: stuck }.fail();
        }
        Ok(order)
    }
}
