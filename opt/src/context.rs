//! Compilation-wide options and the optimizer context handed to passes.

use std::path::{Path, PathBuf};

use bon::bon;

use crate::reorder::ReorderStrategyKind;

/// Optimizer feature flags and knobs.
#[derive(Debug, Clone, Default)]
pub struct Options {
    /// Dump the instantiation before and after stage reordering.
    pub report_pass_stage_reordering: bool,
    /// Strategy used by the stage reordering pass.
    pub reorder_strategy: ReorderStrategyKind,
    /// Directory for diagnostic dumps; next to the input file when unset.
    pub dump_directory: Option<PathBuf>,
}

#[bon]
impl Options {
    /// Create options with builder pattern.
    #[builder]
    pub fn new(
        #[builder(default = false)] report_pass_stage_reordering: bool,
        #[builder(default)] reorder_strategy: ReorderStrategyKind,
        dump_directory: Option<PathBuf>,
    ) -> Self {
        Self { report_pass_stage_reordering, reorder_strategy, dump_directory }
    }

    /// Create options from environment variables.
    ///
    /// # Environment Variables
    ///
    /// * `STRATUS_REORDER` - Reorder strategy: `none`, `greedy`, `partitioning`
    /// * `STRATUS_REPORT_REORDER` - Dump before/after stage reordering if set
    /// * `STRATUS_DUMP_DIR` - Directory for diagnostic dumps
    pub fn from_env() -> Self {
        Self {
            report_pass_stage_reordering: std::env::var("STRATUS_REPORT_REORDER").is_ok(),
            reorder_strategy: ReorderStrategyKind::from_env(),
            dump_directory: std::env::var_os("STRATUS_DUMP_DIR").map(PathBuf::from),
        }
    }
}

/// Access to compilation-wide state for the duration of a pipeline run.
#[derive(Debug, Clone)]
pub struct OptimizerContext {
    options: Options,
    /// Originating DSL source file, from the SIR.
    input_filename: PathBuf,
}

impl OptimizerContext {
    pub fn new(options: Options, input_filename: impl Into<PathBuf>) -> Self {
        Self { options, input_filename: input_filename.into() }
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn input_filename(&self) -> &Path {
        &self.input_filename
    }

    /// Input file name with the extension stripped, used only to derive
    /// diagnostic output file names.
    pub fn filename_stem(&self) -> String {
        self.input_filename
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "stratus".to_owned())
    }

    /// Path for a diagnostic dump file with the given suffix, e.g.
    /// `"_before.json"`.
    pub fn dump_path(&self, suffix: &str) -> PathBuf {
        let file = format!("{}{}", self.filename_stem(), suffix);
        match &self.options.dump_directory {
            Some(dir) => dir.join(file),
            None => self.input_filename.parent().unwrap_or_else(|| Path::new(".")).join(file),
        }
    }
}
