//! Stencil instantiation: the mid-level IR mutated by the pass pipeline.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use serde::Serialize;
use stratus_ir::{Sir, Stmt};

use crate::extent::Extent;
use crate::stencil::{MultiStage, Stage, StageId, Stencil};

/// Instantiation-wide metadata carried next to the stencils.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Metadata {
    pub field_names: BTreeSet<String>,
    pub temporary_fields: BTreeSet<String>,
    pub stencil_function_instances: Vec<String>,
}

/// The mid-level IR of one compilation unit.
///
/// Created once per unit from the SIR, then mutated in place by every pass
/// in the pipeline; the code emitters consume it read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct StencilInstantiation {
    name: String,
    stencils: Vec<Stencil>,
    metadata: Metadata,
    /// Emitter boundary: generated stencil ID to the names generated for it.
    stencil_names: BTreeMap<i64, Vec<String>>,
    next_stage_id: usize,
}

impl StencilInstantiation {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), ..Default::default() }
    }

    /// Build the instantiation from a SIR unit.
    ///
    /// Each vertical region declaration in a stencil's description AST
    /// becomes one stage in its own multi-stage carrying the region's loop
    /// order. Later passes merge and reorder these.
    pub fn from_sir(sir: &Sir) -> Self {
        let mut inst = Self::new(&sir.filename);

        for sir_stencil in &sir.stencils {
            let mut stencil = Stencil::new(&sir_stencil.name);
            for stmt in &sir_stencil.ast.root().statements {
                if let Stmt::VerticalRegionDecl(decl) = stmt {
                    let region = &decl.vertical_region;
                    let statements = region.ast.root().statements.clone();
                    let stage = Stage::new(inst.fresh_stage_id(), statements);
                    stencil.multi_stages.push(MultiStage::with_stages(region.loop_order, vec![stage]));
                }
            }
            for field in &sir_stencil.fields {
                if field.is_temporary {
                    inst.metadata.temporary_fields.insert(field.name.clone());
                }
                inst.metadata.field_names.insert(field.name.clone());
            }
            inst.stencils.push(stencil);
        }
        for function in &sir.stencil_functions {
            inst.metadata.stencil_function_instances.push(function.name.clone());
        }

        inst
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn stencils(&self) -> &[Stencil] {
        &self.stencils
    }

    pub fn stencils_mut(&mut self) -> &mut [Stencil] {
        &mut self.stencils
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    pub fn metadata_mut(&mut self) -> &mut Metadata {
        &mut self.metadata
    }

    pub fn push_stencil(&mut self, stencil: Stencil) {
        self.stencils.push(stencil);
    }

    /// Next unused stage id. Ids are never reused within an instantiation.
    pub fn fresh_stage_id(&mut self) -> StageId {
        let id = StageId(self.next_stage_id);
        self.next_stage_id += 1;
        id
    }

    /// Record a generated stencil name for a numeric stencil ID (consumed by
    /// the code emitters).
    pub fn register_stencil_name(&mut self, id: i64, name: impl Into<String>) {
        self.stencil_names.entry(id).or_default().push(name.into());
    }

    pub fn stencil_names(&self) -> &BTreeMap<i64, Vec<String>> {
        &self.stencil_names
    }

    /// Write a structured snapshot of the instantiation to `path`.
    ///
    /// Best effort: serialization or I/O failures are logged and ignored,
    /// a dump must never turn a healthy pass into a failing one.
    pub fn dump_as_json(&self, path: &Path, label: &str) {
        let snapshot = InstantiationSnapshot::of(self, label);
        let result = std::fs::File::create(path)
            .map_err(|e| e.to_string())
            .and_then(|file| serde_json::to_writer_pretty(file, &snapshot).map_err(|e| e.to_string()));
        match result {
            Ok(()) => tracing::debug!(path = %path.display(), label, "instantiation dumped"),
            Err(error) => {
                tracing::warn!(path = %path.display(), label, %error, "failed to dump instantiation, continuing");
            }
        }
    }
}

#[derive(Serialize)]
struct InstantiationSnapshot<'a> {
    label: &'a str,
    name: &'a str,
    metadata: &'a Metadata,
    stencils: Vec<StencilSnapshot<'a>>,
}

#[derive(Serialize)]
struct StencilSnapshot<'a> {
    name: &'a str,
    multi_stages: Vec<MultiStageSnapshot<'a>>,
}

#[derive(Serialize)]
struct MultiStageSnapshot<'a> {
    loop_order: String,
    stages: Vec<StageSnapshot<'a>>,
}

#[derive(Serialize)]
struct StageSnapshot<'a> {
    id: StageId,
    statement_count: usize,
    reads: &'a BTreeMap<String, Extent>,
    writes: &'a BTreeMap<String, Extent>,
}

impl<'a> InstantiationSnapshot<'a> {
    fn of(inst: &'a StencilInstantiation, label: &'a str) -> Self {
        let stencils = inst
            .stencils
            .iter()
            .map(|stencil| StencilSnapshot {
                name: &stencil.name,
                multi_stages: stencil
                    .multi_stages
                    .iter()
                    .map(|ms| MultiStageSnapshot {
                        loop_order: ms.loop_order.to_string(),
                        stages: ms
                            .stages
                            .iter()
                            .map(|stage| StageSnapshot {
                                id: stage.id(),
                                statement_count: stage.statements().len(),
                                reads: stage.reads(),
                                writes: stage.writes(),
                            })
                            .collect(),
                    })
                    .collect(),
            })
            .collect();
        Self { label, name: &inst.name, metadata: &inst.metadata, stencils }
    }
}
