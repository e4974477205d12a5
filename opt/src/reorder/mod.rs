//! Stage reordering subsystem.
//!
//! A pluggable strategy consumes one stencil's dependency graph and
//! produces a new stage order that preserves every dependency edge; the
//! owning pass applies the configured strategy to all stencils of the
//! instantiation.

mod greedy;
mod partitioning;
mod pass;

pub use greedy::GreedyReordering;
pub use partitioning::PartitioningReordering;
pub use pass::PassStageReordering;

use std::str::FromStr;

use crate::error::{OptError, Result, UnknownReorderStrategySnafu};
use crate::stencil::{LoopOrder, MultiStage, Stage, Stencil};

/// Which reorder strategy the stage reordering pass applies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReorderStrategyKind {
    /// Keep the program order untouched.
    None,
    /// Dependency-driven greedy scheduling maximizing fusable overlap.
    #[default]
    Greedy,
    /// Layered partitioning maximizing intra-partition parallelism.
    Partitioning,
}

impl ReorderStrategyKind {
    /// Strategy from the `STRATUS_REORDER` environment variable, defaulting
    /// to greedy. An unparsable value falls back to the default rather than
    /// erroring: environment configuration is advisory, explicit
    /// configuration goes through [`FromStr`].
    pub fn from_env() -> Self {
        std::env::var("STRATUS_REORDER")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or_default()
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    /// Strategy object for this kind; `None` for the identity kind, which
    /// the pass short-circuits without building any graph.
    pub fn strategy(&self) -> Option<Box<dyn ReorderStrategy>> {
        match self {
            Self::None => None,
            Self::Greedy => Some(Box::new(GreedyReordering)),
            Self::Partitioning => Some(Box::new(PartitioningReordering)),
        }
    }
}

impl FromStr for ReorderStrategyKind {
    type Err = OptError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "none" => Ok(Self::None),
            "greedy" => Ok(Self::Greedy),
            "partitioning" => Ok(Self::Partitioning),
            other => UnknownReorderStrategySnafu { name: other.to_owned() }.fail(),
        }
    }
}

impl std::fmt::Display for ReorderStrategyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::None => "none",
            Self::Greedy => "greedy",
            Self::Partitioning => "partitioning",
        };
        f.write_str(s)
    }
}

/// A reordering algorithm over one stencil.
///
/// On success the result is a structurally valid replacement: same stages,
/// same footprints, only the order permuted, consistent with the stage
/// dependency graph. An error signals an unrecoverable condition (e.g. a
/// dependency cycle) and the owning pass must fail, not treat it as "no
/// change".
pub trait ReorderStrategy {
    fn reorder(&self, stencil: &Stencil) -> Result<Stencil>;
}

/// Rebuild multi-stages for a scheduled stage order: consecutive stages
/// whose source multi-stages agree on loop order share one multi-stage.
pub(crate) fn regroup(
    name: &str,
    order: &[usize],
    stages: &[&Stage],
    loop_orders: &[LoopOrder],
) -> Stencil {
    let mut result = Stencil::new(name);
    for &position in order {
        let loop_order = loop_orders[position];
        match result.multi_stages.last_mut() {
            Some(ms) if ms.loop_order == loop_order => ms.stages.push(stages[position].clone()),
            _ => result
                .multi_stages
                .push(MultiStage::with_stages(loop_order, vec![stages[position].clone()])),
        }
    }
    result
}
