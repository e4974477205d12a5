//! Optimizer for the Stratus compiler.
//!
//! Consumes the SIR produced by the front-end, builds the mid-level IR
//! ([`StencilInstantiation`]) and transforms it in place through an ordered
//! pipeline of passes before the code emitters take over.
//!
//! # Module Organization
//!
//! - [`instantiation`] - Mid-level IR: stencils, multi-stages, stages
//! - [`accesses`] - Field read/write footprint analysis per stage
//! - [`graph`] - Stage dependency graph derived from footprints
//! - [`pass`] - Pass trait and the dependency-ordered pass manager
//! - [`reorder`] - Stage reordering pass and its strategies
//! - [`context`] - Compilation-wide options and the optimizer context
//! - [`error`] - Error types and result handling

pub mod accesses;
pub mod context;
pub mod error;
pub mod extent;
pub mod graph;
pub mod instantiation;
pub mod pass;
pub mod reorder;
pub mod stencil;

#[cfg(test)]
pub mod test;

pub use accesses::PassComputeStageAccesses;
pub use context::{Options, OptimizerContext};
pub use error::{OptError, Result};
pub use extent::Extent;
pub use graph::StageGraph;
pub use instantiation::StencilInstantiation;
pub use pass::{Pass, PassManager};
pub use reorder::{GreedyReordering, PartitioningReordering, PassStageReordering, ReorderStrategy, ReorderStrategyKind};
pub use stencil::{LoopOrder, MultiStage, Stage, StageId, Stencil};
