//! The stage reordering pass.

use crate::context::OptimizerContext;
use crate::error::Result;
use crate::instantiation::StencilInstantiation;
use crate::pass::Pass;

use super::ReorderStrategyKind;

/// Replaces every stencil's stage order with one chosen by the configured
/// strategy.
///
/// With [`ReorderStrategyKind::None`] the pass is a no-op: it skips graph
/// construction and dumping entirely. Otherwise it reorders stencils one at
/// a time in program order; the first failing stencil fails the whole pass.
/// Stencils already reordered stay replaced (each replacement alone is
/// semantics-preserving), the remaining ones stay untouched, and the
/// failure is the pass result, never a silent partial success.
#[derive(Debug)]
pub struct PassStageReordering {
    strategy: ReorderStrategyKind,
}

impl PassStageReordering {
    pub fn new(strategy: ReorderStrategyKind) -> Self {
        Self { strategy }
    }
}

impl Pass for PassStageReordering {
    fn name(&self) -> &'static str {
        "stage-reordering"
    }

    fn dependencies(&self) -> &[&'static str] {
        &["compute-stage-accesses"]
    }

    fn run(&self, inst: &mut StencilInstantiation, cx: &OptimizerContext) -> Result<()> {
        let Some(strategy) = self.strategy.strategy() else {
            tracing::debug!(pass = self.name(), "reorder strategy is none, skipping");
            return Ok(());
        };

        let report = cx.options().report_pass_stage_reordering;
        if report {
            inst.dump_as_json(&cx.dump_path("_before.json"), self.name());
        }

        for stencil in inst.stencils_mut() {
            let reordered = strategy.reorder(stencil)?;
            tracing::debug!(
                stencil = %stencil.name,
                strategy = %self.strategy,
                multi_stages = reordered.multi_stages.len(),
                "stencil reordered"
            );
            *stencil = reordered;
        }

        if report {
            inst.dump_as_json(&cx.dump_path("_after.json"), self.name());
        }
        Ok(())
    }
}
