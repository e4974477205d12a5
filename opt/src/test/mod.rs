//! Test suites for the optimizer crate.
