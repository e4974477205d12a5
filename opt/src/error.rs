use snafu::Snafu;

pub type Result<T, E = OptError> = std::result::Result<T, E>;

/// Errors raised by the optimizer.
///
/// Configuration errors (unknown strategy, bad pipeline) are detected before
/// any transformation work begins; structural violations (dependency cycles)
/// abort the owning pass. Diagnostic dump failures are not errors at all,
/// they are logged and swallowed at the dump site.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum OptError {
    #[snafu(display("unknown reorder strategy: {name:?} (expected none, greedy or partitioning)"))]
    UnknownReorderStrategy { name: String },

    #[snafu(display("pass {pass:?} depends on {dependency:?} which is not part of the pipeline"))]
    UnknownPassDependency { pass: &'static str, dependency: &'static str },

    #[snafu(display("pass {pass:?} is registered more than once"))]
    DuplicatePass { pass: &'static str },

    #[snafu(display("pass dependency cycle involving {pass:?}"))]
    PassDependencyCycle { pass: &'static str },

    #[snafu(display("dependency cycle in stencil {stencil:?} involving stage {stage}"))]
    DependencyCycle { stencil: String, stage: usize },

    #[snafu(display("pass {pass:?} failed: {source}"))]
    PassFailed { pass: &'static str, source: Box<OptError> },
}
