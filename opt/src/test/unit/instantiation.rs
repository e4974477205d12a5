//! Instantiation construction, full-pipeline integration and dump tests.

use std::sync::Arc;

use stratus_ir::{Ast, Expr, Field, Interval, LoopOrder, Sir, SourceLocation, Stencil as SirStencil, Stmt, VerticalRegion};

use crate::context::{Options, OptimizerContext};
use crate::instantiation::StencilInstantiation;
use crate::pass::PassManager;
use crate::reorder::{PassStageReordering, ReorderStrategyKind};
use crate::test::helpers::assert_precedes;
use crate::PassComputeStageAccesses;

fn loc() -> SourceLocation {
    SourceLocation::UNKNOWN
}

fn assign(lhs: &str, rhs: &str) -> Stmt {
    Stmt::expr(
        Expr::assignment(
            Expr::field_access(lhs, [0, 0, 0], loc()),
            "=",
            Expr::field_access(rhs, [0, 0, 0], loc()),
            loc(),
        ),
        loc(),
    )
}

fn region(statements: Vec<Stmt>, loop_order: LoopOrder) -> Stmt {
    let region = Arc::new(VerticalRegion::new(
        Ast::from_statements(statements),
        Interval::new(Interval::START, Interval::END),
        loop_order,
    ));
    Stmt::vertical_region_decl(region, loc())
}

/// SIR with one stencil of three vertical regions forming a chain
/// `f -> g -> out`.
fn chain_sir() -> Sir {
    let mut sir = Sir::new("diffusion.cpp");
    let ast = Ast::from_statements(vec![
        region(vec![assign("f", "in")], LoopOrder::Forward),
        region(vec![assign("g", "f")], LoopOrder::Forward),
        region(vec![assign("out", "g")], LoopOrder::Backward),
    ]);
    let mut stencil = SirStencil::new("diffusion", ast);
    stencil.fields.push(Arc::new(Field::new("in")));
    stencil.fields.push(Arc::new(Field::temporary("f")));
    stencil.fields.push(Arc::new(Field::temporary("g")));
    stencil.fields.push(Arc::new(Field::new("out")));
    sir.stencils.push(Arc::new(stencil));
    sir
}

#[test]
fn from_sir_builds_one_stage_per_region() {
    let inst = StencilInstantiation::from_sir(&chain_sir());

    assert_eq!(inst.stencils().len(), 1);
    let stencil = &inst.stencils()[0];
    assert_eq!(stencil.stage_count(), 3);
    assert_eq!(
        stencil.stage_loop_orders(),
        vec![LoopOrder::Forward, LoopOrder::Forward, LoopOrder::Backward]
    );

    assert!(inst.metadata().temporary_fields.contains("f"));
    assert!(inst.metadata().field_names.contains("out"));
}

#[test]
fn full_pipeline_reorders_from_sir() {
    let mut inst = StencilInstantiation::from_sir(&chain_sir());
    let cx = OptimizerContext::new(Options::default(), "diffusion.cpp");

    let manager = PassManager::new(vec![
        Box::new(PassStageReordering::new(ReorderStrategyKind::Greedy)),
        Box::new(PassComputeStageAccesses),
    ])
    .unwrap();
    // Declared dependencies put access computation first.
    assert_eq!(manager.pass_names(), vec!["compute-stage-accesses", "stage-reordering"]);

    manager.run_all(&mut inst, &cx).unwrap();
    let stencil = &inst.stencils()[0];
    assert_precedes(stencil, 0, 1);
    assert_precedes(stencil, 1, 2);
}

#[test]
fn stencil_name_map_accumulates() {
    let mut inst = StencilInstantiation::new("unit");
    inst.register_stencil_name(0, "stencil_0");
    inst.register_stencil_name(0, "stencil_0_k_flat");
    inst.register_stencil_name(1, "stencil_1");

    assert_eq!(inst.stencil_names()[&0], vec!["stencil_0", "stencil_0_k_flat"]);
    assert_eq!(inst.stencil_names()[&1], vec!["stencil_1"]);
}

#[test]
fn dump_failure_is_swallowed() {
    let inst = StencilInstantiation::new("unit");
    // Unwritable target: parent directory does not exist.
    let path = std::path::Path::new("/nonexistent-stratus-dir/dump.json");
    inst.dump_as_json(path, "stage-reordering");
}

#[test]
fn dump_writes_labelled_snapshot() {
    let dir = std::env::temp_dir().join("stratus-dump-test");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("inst.json");

    let inst = StencilInstantiation::from_sir(&chain_sir());
    inst.dump_as_json(&path, "stage-reordering");

    let text = std::fs::read_to_string(&path).unwrap();
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(value["label"], "stage-reordering");
    assert_eq!(value["stencils"][0]["name"], "diffusion");
    std::fs::remove_file(&path).ok();
}

#[test]
fn report_option_derives_dump_names_from_input() {
    let options = Options::builder().report_pass_stage_reordering(true).build();
    let cx = OptimizerContext::new(options, "/work/models/diffusion.cpp");
    assert_eq!(cx.filename_stem(), "diffusion");
    assert_eq!(cx.dump_path("_before.json"), std::path::Path::new("/work/models/diffusion_before.json"));
}
