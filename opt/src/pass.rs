//! Pass trait and the dependency-ordered pass manager.

use std::collections::BTreeMap;

use crate::context::OptimizerContext;
use crate::error::{
    DuplicatePassSnafu, OptError, PassDependencyCycleSnafu, Result, UnknownPassDependencySnafu,
};
use crate::instantiation::StencilInstantiation;

/// A named, dependency-declaring transformation over a stencil
/// instantiation.
///
/// Passes mutate the instantiation in place and must be internally atomic:
/// the manager never rolls anything back, a failing pass halts the
/// pipeline. Configuration is supplied at construction; `run` itself keeps
/// no state between invocations.
pub trait Pass {
    /// Unique name within a pipeline.
    fn name(&self) -> &'static str;

    /// Names of passes that must have completed before this one runs.
    fn dependencies(&self) -> &[&'static str] {
        &[]
    }

    fn run(&self, inst: &mut StencilInstantiation, cx: &OptimizerContext) -> Result<()>;
}

/// Executes passes in an order satisfying their declared dependencies.
///
/// The pipeline is validated once at construction: unknown dependency
/// names, duplicate registrations and dependency cycles are configuration
/// errors reported before any pass runs. Registration order is preserved
/// wherever dependencies allow.
pub struct PassManager {
    passes: Vec<Box<dyn Pass>>,
}

impl std::fmt::Debug for PassManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PassManager").field("passes", &self.pass_names()).finish()
    }
}

impl PassManager {
    pub fn new(passes: Vec<Box<dyn Pass>>) -> Result<Self> {
        let ordered = Self::schedule(passes)?;
        Ok(Self { passes: ordered })
    }

    /// Pass names in execution order.
    pub fn pass_names(&self) -> Vec<&'static str> {
        self.passes.iter().map(|p| p.name()).collect()
    }

    /// Run every pass in order, stopping at the first failure.
    pub fn run_all(&self, inst: &mut StencilInstantiation, cx: &OptimizerContext) -> Result<()> {
        for pass in &self.passes {
            tracing::debug!(pass = pass.name(), "running pass");
            pass.run(inst, cx).map_err(|source| OptError::PassFailed {
                pass: pass.name(),
                source: Box::new(source),
            })?;
        }
        Ok(())
    }

    /// Stable topological sort of the pipeline by declared dependencies.
    fn schedule(passes: Vec<Box<dyn Pass>>) -> Result<Vec<Box<dyn Pass>>> {
        let mut index_of: BTreeMap<&'static str, usize> = BTreeMap::new();
        for (i, pass) in passes.iter().enumerate() {
            if index_of.insert(pass.name(), i).is_some() {
                return DuplicatePassSnafu { pass: pass.name() }.fail();
            }
        }
        for pass in &passes {
            for &dep in pass.dependencies() {
                if !index_of.contains_key(dep) {
                    return UnknownPassDependencySnafu { pass: pass.name(), dependency: dep }.fail();
                }
            }
        }

        // Kahn over pass indices; among ready passes pick the one registered
        // first, so a pipeline that is already in dependency order keeps its
        // order.
        let n = passes.len();
        let mut in_degree = vec![0usize; n];
        let mut dependents: Vec<Vec<usize>> = vec![Vec::new(); n];
        for (i, pass) in passes.iter().enumerate() {
            for &dep in pass.dependencies() {
                let d = index_of[dep];
                dependents[d].push(i);
                in_degree[i] += 1;
            }
        }

        let mut ready: std::collections::BTreeSet<usize> =
            (0..n).filter(|&i| in_degree[i] == 0).collect();
        let mut order = Vec::with_capacity(n);
        while let Some(&i) = ready.iter().next() {
            ready.remove(&i);
            order.push(i);
            for &dependent in &dependents[i] {
                in_degree[dependent] -= 1;
                if in_degree[dependent] == 0 {
                    ready.insert(dependent);
                }
            }
        }

        if order.len() != n {
            let stuck = (0..n).find(|&i| in_degree[i] > 0).unwrap_or_default();
            return PassDependencyCycleSnafu { pass: passes[stuck].name() }.fail();
        }

        // Reorder the owned passes without cloning: take them out by index.
        let mut slots: Vec<Option<Box<dyn Pass>>> = passes.into_iter().map(Some).collect();
        Ok(order.into_iter().filter_map(|i| slots[i].take()).collect())
    }
}
