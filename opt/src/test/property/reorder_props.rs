//! Property tests: any successful reorder preserves the dependency graph.

use proptest::prelude::*;

use crate::graph::StageGraph;
use crate::reorder::{GreedyReordering, PartitioningReordering, ReorderStrategy};
use crate::stencil::Stencil;
use crate::test::helpers::{stage, stencil_of};

const FIELDS: [&str; 5] = ["a", "b", "c", "d", "e"];

fn field_subset() -> impl Strategy<Value = Vec<&'static str>> {
    prop::collection::vec(0..FIELDS.len(), 0..3).prop_map(|idx| {
        let mut fields: Vec<_> = idx.into_iter().map(|i| FIELDS[i]).collect();
        fields.sort_unstable();
        fields.dedup();
        fields
    })
}

/// Random stencil: 2..=7 stages with random read/write sets over a small
/// field pool. May or may not contain dependency cycles.
fn random_stencil() -> impl Strategy<Value = Stencil> {
    prop::collection::vec((field_subset(), field_subset()), 2..=7).prop_map(|footprints| {
        let stages = footprints
            .into_iter()
            .enumerate()
            .map(|(id, (reads, writes))| stage(id, &reads, &writes))
            .collect();
        stencil_of("random", stages)
    })
}

fn check_preserves(strategy: &dyn ReorderStrategy, stencil: &Stencil) -> Result<(), TestCaseError> {
    let graph = StageGraph::build(stencil);
    let acyclic = graph.topological_order("random").is_ok();
    let result = strategy.reorder(stencil);

    if !acyclic {
        prop_assert!(result.is_err(), "cyclic stencil must be rejected");
        return Ok(());
    }

    let reordered = result.map_err(|e| TestCaseError::fail(e.to_string()))?;

    // Same stage multiset.
    let before = stencil.stage_order();
    let mut sorted_before = before.clone();
    sorted_before.sort();
    let mut sorted_after = reordered.stage_order();
    sorted_after.sort();
    prop_assert_eq!(sorted_before, sorted_after);

    // Every dependency edge still points forward.
    let after = reordered.stage_order();
    for (from, to) in graph.edges() {
        let pos = |node: usize| after.iter().position(|s| *s == before[node]).unwrap();
        prop_assert!(pos(from) < pos(to), "edge {} -> {} violated", from, to);
    }
    Ok(())
}

proptest! {
    #[test]
    fn greedy_preserves_dependencies(stencil in random_stencil()) {
        check_preserves(&GreedyReordering, &stencil)?;
    }

    #[test]
    fn partitioning_preserves_dependencies(stencil in random_stencil()) {
        check_preserves(&PartitioningReordering, &stencil)?;
    }

    /// Both strategies are deterministic: reordering twice gives the same
    /// result.
    #[test]
    fn reordering_is_deterministic(stencil in random_stencil()) {
        if let (Ok(a), Ok(b)) = (GreedyReordering.reorder(&stencil), GreedyReordering.reorder(&stencil)) {
            prop_assert_eq!(a.stage_order(), b.stage_order());
        }
        if let (Ok(a), Ok(b)) =
            (PartitioningReordering.reorder(&stencil), PartitioningReordering.reorder(&stencil))
        {
            prop_assert_eq!(a.stage_order(), b.stage_order());
        }
    }
}
