//! Mid-level IR: stencils decomposed into multi-stages and stages.

use std::collections::BTreeMap;

use stratus_ir::Stmt;

use crate::extent::Extent;

pub use stratus_ir::LoopOrder;

/// Identity of a stage, stable across reordering.
///
/// Assigned when the instantiation is built and never reused; program order
/// at any point in time is positional, not id-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize)]
pub struct StageId(pub usize);

impl std::fmt::Display for StageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "stage#{}", self.0)
    }
}

/// A unit of computation with a known field read/write footprint.
///
/// The footprint (`reads`/`writes`, extents included) is derived from the
/// statements by [`crate::accesses`] and is the sole input to dependency
/// analysis.
#[derive(Debug, Clone, PartialEq)]
pub struct Stage {
    id: StageId,
    statements: Vec<Stmt>,
    reads: BTreeMap<String, Extent>,
    writes: BTreeMap<String, Extent>,
}

impl Stage {
    pub fn new(id: StageId, statements: Vec<Stmt>) -> Self {
        Self { id, statements, reads: BTreeMap::new(), writes: BTreeMap::new() }
    }

    pub fn id(&self) -> StageId {
        self.id
    }

    pub fn statements(&self) -> &[Stmt] {
        &self.statements
    }

    pub fn reads(&self) -> &BTreeMap<String, Extent> {
        &self.reads
    }

    pub fn writes(&self) -> &BTreeMap<String, Extent> {
        &self.writes
    }

    /// Replace the derived footprint.
    pub fn set_accesses(&mut self, reads: BTreeMap<String, Extent>, writes: BTreeMap<String, Extent>) {
        self.reads = reads;
        self.writes = writes;
    }

    /// All fields the stage touches, with the union extent per field.
    pub fn touched_fields(&self) -> BTreeMap<&str, Extent> {
        let mut fields: BTreeMap<&str, Extent> = BTreeMap::new();
        for (name, extent) in self.reads.iter().chain(self.writes.iter()) {
            fields
                .entry(name.as_str())
                .and_modify(|e| *e = e.merge(extent))
                .or_insert(*extent);
        }
        fields
    }
}

/// An ordered group of stages sharing a vertical execution direction.
#[derive(Debug, Clone, PartialEq)]
pub struct MultiStage {
    pub loop_order: LoopOrder,
    pub stages: Vec<Stage>,
}

impl MultiStage {
    pub fn new(loop_order: LoopOrder) -> Self {
        Self { loop_order, stages: Vec::new() }
    }

    pub fn with_stages(loop_order: LoopOrder, stages: Vec<Stage>) -> Self {
        Self { loop_order, stages }
    }
}

/// A stencil of the mid-level IR: an ordered sequence of multi-stages.
///
/// Stage order within the stencil is the program order; reordering passes
/// permute it but never move a stage across a dependency edge.
#[derive(Debug, Clone, PartialEq)]
pub struct Stencil {
    pub name: String,
    pub multi_stages: Vec<MultiStage>,
}

impl Stencil {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), multi_stages: Vec::new() }
    }

    /// Stages in program order, across multi-stage boundaries.
    pub fn stages(&self) -> impl Iterator<Item = &Stage> {
        self.multi_stages.iter().flat_map(|ms| ms.stages.iter())
    }

    pub fn stages_mut(&mut self) -> impl Iterator<Item = &mut Stage> {
        self.multi_stages.iter_mut().flat_map(|ms| ms.stages.iter_mut())
    }

    pub fn stage_count(&self) -> usize {
        self.multi_stages.iter().map(|ms| ms.stages.len()).sum()
    }

    /// Stage ids in program order.
    pub fn stage_order(&self) -> Vec<StageId> {
        self.stages().map(Stage::id).collect()
    }

    /// The loop order of the multi-stage each stage belongs to, in program
    /// order.
    pub fn stage_loop_orders(&self) -> Vec<LoopOrder> {
        self.multi_stages
            .iter()
            .flat_map(|ms| std::iter::repeat_n(ms.loop_order, ms.stages.len()))
            .collect()
    }
}
