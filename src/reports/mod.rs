//! Report generation for conformance runs and diffs.
//!
//! Two output formats are provided:
//! - Summary: compact shell-friendly text
//! - JSON: structured data for CI dashboards and scripts

mod json;
mod output;
mod summary;
mod types;

pub use json::JsonReporter;
pub use output::{should_use_color, write_output, OutputTarget};
pub use summary::SummaryReporter;
pub use types::ReportFormat;

use crate::diff::DiffResult;
use crate::harness::{MatrixReport, MatrixSummary};
use thiserror::Error;

/// Errors that can occur during report generation
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Format error: {0}")]
    FormatError(#[from] std::fmt::Error),
}

/// Trait for report generators
pub trait ReportGenerator {
    /// Render the result of a conformance run
    fn generate_matrix_report(&self, report: &MatrixReport) -> Result<String, ReportError>;

    /// Render a single graph diff
    fn generate_diff_report(&self, diff: &DiffResult) -> Result<String, ReportError>;

    /// Get the format this generator produces
    fn format(&self) -> ReportFormat;
}

/// Create a reporter for `format`.
#[must_use]
pub fn create_reporter(format: ReportFormat, colored: bool) -> Box<dyn ReportGenerator> {
    match format {
        ReportFormat::Summary => {
            let reporter = SummaryReporter::new();
            Box::new(if colored { reporter } else { reporter.no_color() })
        }
        ReportFormat::Json => Box::new(JsonReporter::new()),
    }
}

/// Exit codes for CI/CD integration
pub mod exit_codes {
    /// Every unit passed, or the diff was empty
    pub const SUCCESS: i32 = 0;
    /// At least one round trip changed the graph
    pub const CONFORMANCE_FAILURES: i32 = 1;
    /// An error occurred
    pub const ERROR: i32 = 3;
}

/// Exit code for a finished run. Errors take precedence over failures.
#[must_use]
pub const fn exit_code_for(summary: &MatrixSummary) -> i32 {
    if summary.errored > 0 {
        exit_codes::ERROR
    } else if summary.failed > 0 {
        exit_codes::CONFORMANCE_FAILURES
    } else {
        exit_codes::SUCCESS
    }
}
