//! Round-trip conformance harness.
//!
//! A golden canonical graph is encoded into a destination format, decoded
//! back with the same adapter and compared with the
//! [`DiffEngine`](crate::diff::DiffEngine). An empty diff means the format
//! preserved the graph. The [`ConformanceMatrix`] schedules many such round
//! trips and the [`MatrixRunner`] executes them as independent units.

mod fixtures;
mod matrix;
mod roundtrip;

pub use fixtures::{Fixture, FixtureLoader, DEFAULT_FIXTURE_SUFFIX};
pub use matrix::{
    ConformanceCase, ConformanceMatrix, ConformanceUnit, MatrixReport, MatrixRunner,
    MatrixSummary, UnitError, UnitReport, Verdict,
};
pub use roundtrip::{test_name, RoundTrip, RoundTripHarness, RoundTripOutcome};
