//! Partitioning reorder strategy.

use itertools::Itertools;

use crate::error::Result;
use crate::graph::StageGraph;
use crate::stencil::{Stage, Stencil};

use super::{ReorderStrategy, regroup};

/// Layered partitioning.
///
/// Assigns every stage to the earliest partition after all of its
/// predecessors' partitions (longest-path layering), so all dependency
/// edges point from an earlier partition to a later one and stages within a
/// partition are mutually independent, maximizing what the backend may run
/// in parallel. Partition membership is a pure function of the graph;
/// within a partition the original program order is kept.
#[derive(Debug, Default)]
pub struct PartitioningReordering;

impl ReorderStrategy for PartitioningReordering {
    fn reorder(&self, stencil: &Stencil) -> Result<Stencil> {
        let graph = StageGraph::build(stencil);
        let stages: Vec<&Stage> = stencil.stages().collect();
        let loop_orders = stencil.stage_loop_orders();

        // Topological order doubles as the cycle check.
        let topo = graph.topological_order(&stencil.name)?;

        let mut partition = vec![0usize; stages.len()];
        for &node in &topo {
            partition[node] = graph
                .predecessors(node)
                .iter()
                .map(|&p| partition[p] + 1)
                .max()
                .unwrap_or(0);
        }

        // (partition, program position) is a total order consistent with
        // the graph's partial order.
        let order: Vec<usize> = (0..stages.len()).sorted_by_key(|&v| (partition[v], v)).collect();

        // Partition boundaries become multi-stage boundaries: stages of one
        // partition are independent, merging across partitions would hide
        // the parallelism this strategy exists to expose.
        let mut result = Stencil::new(&stencil.name);
        for (_, members) in &order.iter().chunk_by(|&&v| partition[v]) {
            let members: Vec<usize> = members.copied().collect();
            let grouped = regroup(&stencil.name, &members, &stages, &loop_orders);
            result.multi_stages.extend(grouped.multi_stages);
        }
        Ok(result)
    }
}
