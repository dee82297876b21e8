//! JSON report generator.

use super::{ReportError, ReportFormat, ReportGenerator};
use crate::diff::{DiffResult, DiffSummary};
use crate::harness::MatrixReport;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// JSON report generator
pub struct JsonReporter {
    /// Pretty print output
    pretty: bool,
}

impl JsonReporter {
    /// Create a new JSON reporter
    #[must_use]
    pub const fn new() -> Self {
        Self { pretty: true }
    }

    /// Set pretty printing
    #[must_use]
    pub const fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    fn render<T: Serialize>(&self, value: &T) -> Result<String, ReportError> {
        let json = if self.pretty {
            serde_json::to_string_pretty(value)?
        } else {
            serde_json::to_string(value)?
        };
        Ok(json)
    }
}

impl Default for JsonReporter {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonDiffReport<'a> {
    generated_at: DateTime<Utc>,
    equivalent: bool,
    summary: DiffSummary,
    diff: &'a DiffResult,
}

impl ReportGenerator for JsonReporter {
    fn generate_matrix_report(&self, report: &MatrixReport) -> Result<String, ReportError> {
        self.render(report)
    }

    fn generate_diff_report(&self, diff: &DiffResult) -> Result<String, ReportError> {
        self.render(&JsonDiffReport {
            generated_at: Utc::now(),
            equivalent: diff.is_empty(),
            summary: diff.summary(),
            diff,
        })
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Json
    }
}
