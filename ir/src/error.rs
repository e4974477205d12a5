use snafu::Snafu;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors raised by SIR-level consistency checks.
///
/// Node construction itself never validates cross-references; resolving a
/// field or stencil name is the job of later semantic passes.
#[derive(Debug, Clone, PartialEq, Eq, Snafu)]
#[snafu(visibility(pub))]
pub enum Error {
    #[snafu(display("duplicate stencil name: {name}"))]
    DuplicateStencilName { name: String },

    #[snafu(display("duplicate stencil function name: {name}"))]
    DuplicateStencilFunctionName { name: String },

    #[snafu(display("interval is empty: [{lower}, {upper}]"))]
    EmptyInterval { lower: i64, upper: i64 },
}
