//! Field read/write footprint analysis.
//!
//! Walks stage statements with the IR visitor and derives, per stage, the
//! map `field -> extent` of reads and writes. Assignment left sides are
//! writes, compound assignments (`+=` …) read the left side as well,
//! everything else is a read. Variables are not tracked: only field
//! accesses order stages against each other.

use std::collections::BTreeMap;

use stratus_ir::{AssignmentExpr, AstVisitor, Expr, FieldAccessExpr, Stmt};

use crate::context::OptimizerContext;
use crate::error::Result;
use crate::extent::Extent;
use crate::instantiation::StencilInstantiation;
use crate::pass::Pass;
use crate::stencil::Stage;

#[derive(Default)]
struct AccessCollector {
    reads: BTreeMap<String, Extent>,
    writes: BTreeMap<String, Extent>,
}

impl AccessCollector {
    fn record(map: &mut BTreeMap<String, Extent>, access: &FieldAccessExpr) {
        let extent = Extent::from_offset(access.offset);
        map.entry(access.name.clone())
            .and_modify(|e| *e = e.merge(&extent))
            .or_insert(extent);
    }
}

impl AstVisitor for AccessCollector {
    fn visit_assignment_expr(&mut self, expr: &AssignmentExpr) {
        expr.right.accept(self);
        match expr.left.as_ref() {
            Expr::FieldAccess(access) => {
                Self::record(&mut self.writes, access);
                if expr.is_compound() {
                    Self::record(&mut self.reads, access);
                }
            }
            // Non-field left sides (variables, indexed variables) still get
            // their sub-expressions visited as reads.
            other => other.accept(self),
        }
    }

    fn visit_field_access_expr(&mut self, expr: &FieldAccessExpr) {
        Self::record(&mut self.reads, expr);
    }
}

/// Compute the read/write footprint of a statement list.
pub fn compute_accesses(statements: &[Stmt]) -> (BTreeMap<String, Extent>, BTreeMap<String, Extent>) {
    let mut collector = AccessCollector::default();
    for stmt in statements {
        stmt.accept(&mut collector);
    }
    (collector.reads, collector.writes)
}

/// Derive and attach the footprint of every stage.
pub fn compute_stage_accesses(stage: &mut Stage) {
    let (reads, writes) = compute_accesses(stage.statements());
    stage.set_accesses(reads, writes);
}

/// Pass attaching read/write footprints to all stages of the instantiation.
///
/// Must run before any pass that derives the stage dependency graph.
#[derive(Debug, Default)]
pub struct PassComputeStageAccesses;

impl Pass for PassComputeStageAccesses {
    fn name(&self) -> &'static str {
        "compute-stage-accesses"
    }

    fn run(&self, inst: &mut StencilInstantiation, _cx: &OptimizerContext) -> Result<()> {
        for stencil in inst.stencils_mut() {
            for stage in stencil.stages_mut() {
                compute_stage_accesses(stage);
            }
        }
        Ok(())
    }
}
