//! Greedy reorder strategy.

use std::collections::BTreeSet;

use crate::error::{DependencyCycleSnafu, Result};
use crate::graph::StageGraph;
use crate::stencil::{Stage, Stencil};

use super::{ReorderStrategy, regroup};

/// Dependency-driven greedy scheduling.
///
/// Repeatedly picks, among the stages whose predecessors are all scheduled,
/// the one with the largest fusable overlap with the previously scheduled
/// stage; ties (including the first pick) go to the lowest program
/// position, so the result is deterministic and an already-optimal order is
/// reproduced unchanged.
#[derive(Debug, Default)]
pub struct GreedyReordering;

impl ReorderStrategy for GreedyReordering {
    fn reorder(&self, stencil: &Stencil) -> Result<Stencil> {
        let graph = StageGraph::build(stencil);
        let stages: Vec<&Stage> = stencil.stages().collect();
        let loop_orders = stencil.stage_loop_orders();
        let n = stages.len();

        let mut in_degree: Vec<usize> = (0..n).map(|v| graph.predecessors(v).len()).collect();
        let mut ready: BTreeSet<usize> = (0..n).filter(|&v| in_degree[v] == 0).collect();
        let mut order = Vec::with_capacity(n);
        let mut previous: Option<usize> = None;

        while !ready.is_empty() {
            // Ascending iteration plus strict `>` makes the program-order
            // tie-break structural.
            let mut best = usize::MAX;
            let mut best_score = 0usize;
            for &candidate in &ready {
                let score = match previous {
                    Some(prev) => fusable_overlap(stages[prev], stages[candidate]),
                    None => 0,
                };
                if best == usize::MAX || score > best_score {
                    best = candidate;
                    best_score = score;
                }
            }

            ready.remove(&best);
            order.push(best);
            previous = Some(best);
            for &succ in graph.successors(best) {
                in_degree[succ] -= 1;
                if in_degree[succ] == 0 {
                    ready.insert(succ);
                }
            }
        }

        if order.len() != n {
            let stuck = (0..n).find(|&v| in_degree[v] > 0).unwrap_or_default();
            return DependencyCycleSnafu { stencil: stencil.name.clone(), stage: stuck }.fail();
        }

        Ok(regroup(&stencil.name, &order, &stages, &loop_orders))
    }
}

/// Number of fields both stages touch at overlapping extents. Fusing two
/// stages with high overlap lets the backend keep those fields in fast
/// storage between them.
fn fusable_overlap(a: &Stage, b: &Stage) -> usize {
    let b_fields = b.touched_fields();
    a.touched_fields()
        .iter()
        .filter(|(name, extent)| b_fields.get(*name).is_some_and(|other| other.overlaps(extent)))
        .count()
}
