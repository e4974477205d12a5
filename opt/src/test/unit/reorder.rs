//! Reorder strategy and stage reordering pass tests.

use crate::context::{Options, OptimizerContext};
use crate::error::OptError;
use crate::graph::StageGraph;
use crate::instantiation::StencilInstantiation;
use crate::pass::Pass;
use crate::reorder::{
    GreedyReordering, PartitioningReordering, PassStageReordering, ReorderStrategy, ReorderStrategyKind,
};
use crate::stencil::{LoopOrder, Stencil};
use crate::test::helpers::*;

fn context() -> OptimizerContext {
    OptimizerContext::new(Options::default(), "input.cpp")
}

fn instantiation_of(stencil: Stencil) -> StencilInstantiation {
    let mut inst = StencilInstantiation::new("unit");
    inst.push_stencil(stencil);
    inst
}

fn assert_dependencies_preserved(strategy: &dyn ReorderStrategy, stencil: &Stencil) {
    let graph = StageGraph::build(stencil);
    let before: Vec<_> = stencil.stages().map(|s| s.id()).collect();
    let reordered = strategy.reorder(stencil).unwrap();
    let after = reordered.stage_order();

    // Same stages, only permuted.
    let mut sorted_before = before.clone();
    let mut sorted_after = after.clone();
    sorted_before.sort();
    sorted_after.sort();
    assert_eq!(sorted_before, sorted_after);

    // Every edge still points forward.
    for (from, to) in graph.edges() {
        let pos = |id| after.iter().position(|s| *s == before[id]).unwrap();
        assert!(
            pos(from) < pos(to),
            "edge {from} -> {to} violated in {after:?}"
        );
    }
}

#[test]
fn greedy_preserves_chain_order() {
    let stencil = chain_with_independent();
    assert_dependencies_preserved(&GreedyReordering, &stencil);

    let reordered = GreedyReordering.reorder(&stencil).unwrap();
    assert_precedes(&reordered, 0, 1);
    assert_precedes(&reordered, 1, 2);
}

#[test]
fn partitioning_preserves_chain_order() {
    let stencil = chain_with_independent();
    assert_dependencies_preserved(&PartitioningReordering, &stencil);

    let reordered = PartitioningReordering.reorder(&stencil).unwrap();
    assert_precedes(&reordered, 0, 1);
    assert_precedes(&reordered, 1, 2);
}

#[test]
fn greedy_prefers_fusable_follower() {
    // After s0 (writes f), s1 shares field f while s3 shares nothing;
    // greedy must schedule s1 right after s0 even though s3 is also ready.
    let stencil = stencil_of(
        "s",
        vec![
            stage(0, &[], &["f"]),
            stage(1, &["f"], &["g"]),
            stage(2, &["g"], &[]),
            stage(3, &["h"], &["h"]),
        ],
    );
    let reordered = GreedyReordering.reorder(&stencil).unwrap();
    let order = reordered.stage_order();
    assert_eq!(order[0].0, 0);
    assert_eq!(order[1].0, 1);
}

#[test]
fn greedy_ties_break_by_program_order() {
    // Four mutually independent stages: no overlap anywhere, so every pick
    // is a tie and the program order must be reproduced.
    let stencil = stencil_of(
        "s",
        vec![
            stage(0, &[], &["a"]),
            stage(1, &[], &["b"]),
            stage(2, &[], &["c"]),
            stage(3, &[], &["d"]),
        ],
    );
    let reordered = GreedyReordering.reorder(&stencil).unwrap();
    assert_eq!(reordered.stage_order(), stencil.stage_order());
}

#[test]
fn partitioning_layers_independent_stages_together() {
    // s0 and s3 have no predecessors: same partition. s1 depends on s0,
    // s2 on s1.
    let stencil = chain_with_independent();
    let reordered = PartitioningReordering.reorder(&stencil).unwrap();

    let order = reordered.stage_order();
    // First partition in program order: s0 then s3.
    assert_eq!(order[0].0, 0);
    assert_eq!(order[1].0, 3);
    // One multi-stage per partition: three partitions here.
    assert_eq!(reordered.multi_stages.len(), 3);
}

#[test]
fn strategies_fail_on_cycle() {
    let stencil = cyclic_stencil();
    assert!(matches!(GreedyReordering.reorder(&stencil), Err(OptError::DependencyCycle { .. })));
    assert!(matches!(PartitioningReordering.reorder(&stencil), Err(OptError::DependencyCycle { .. })));
}

#[test]
fn reorder_preserves_loop_orders() {
    let stencil = stencil_with_orders(
        "s",
        vec![
            (LoopOrder::Forward, vec![stage(0, &[], &["f"])]),
            (LoopOrder::Backward, vec![stage(1, &["f"], &["g"])]),
        ],
    );
    let reordered = GreedyReordering.reorder(&stencil).unwrap();
    assert_eq!(reordered.stage_loop_orders(), vec![LoopOrder::Forward, LoopOrder::Backward]);
}

#[test]
fn none_strategy_is_identity_without_graph_construction() {
    // Even a cyclic stencil passes untouched: the pass never builds the
    // graph when the strategy is none.
    let mut inst = instantiation_of(cyclic_stencil());
    let before = inst.stencils().to_vec();

    let pass = PassStageReordering::new(ReorderStrategyKind::None);
    pass.run(&mut inst, &context()).unwrap();
    assert_eq!(inst.stencils(), &before[..]);
}

#[test]
fn pass_reorders_every_stencil() {
    let mut inst = StencilInstantiation::new("unit");
    inst.push_stencil(chain_with_independent());
    inst.push_stencil(stencil_of("second", vec![stage(4, &[], &["x"]), stage(5, &["x"], &[])]));

    let pass = PassStageReordering::new(ReorderStrategyKind::Greedy);
    pass.run(&mut inst, &context()).unwrap();

    assert_precedes(&inst.stencils()[0], 0, 1);
    assert_precedes(&inst.stencils()[1], 4, 5);
}

#[test]
fn pass_fails_on_first_cyclic_stencil() {
    let mut inst = StencilInstantiation::new("unit");
    inst.push_stencil(cyclic_stencil());
    inst.push_stencil(chain_with_independent());

    let pass = PassStageReordering::new(ReorderStrategyKind::Partitioning);
    let err = pass.run(&mut inst, &context()).unwrap_err();
    assert!(matches!(err, OptError::DependencyCycle { .. }));

    // The untouched stencil keeps its original order.
    assert_eq!(inst.stencils()[1].stage_order(), chain_with_independent().stage_order());
}

#[test]
fn strategy_kind_parses_and_rejects() {
    assert_eq!("none".parse::<ReorderStrategyKind>().unwrap(), ReorderStrategyKind::None);
    assert_eq!("greedy".parse::<ReorderStrategyKind>().unwrap(), ReorderStrategyKind::Greedy);
    assert_eq!(
        "partitioning".parse::<ReorderStrategyKind>().unwrap(),
        ReorderStrategyKind::Partitioning
    );
    assert!(matches!(
        "fastest".parse::<ReorderStrategyKind>(),
        Err(OptError::UnknownReorderStrategy { .. })
    ));
}
