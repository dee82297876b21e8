//! Summary report generator for shell output.
//!
//! Provides a compact, human-readable summary for terminal usage.

use super::{ReportError, ReportFormat, ReportGenerator};
use crate::diff::DiffResult;
use crate::harness::{MatrixReport, UnitReport, Verdict};

/// Apply ANSI color formatting if colored output is enabled.
fn ansi_color(text: &str, color: &str, colored: bool) -> String {
    if colored {
        match color {
            "red" => format!("\x1b[31m{text}\x1b[0m"),
            "green" => format!("\x1b[32m{text}\x1b[0m"),
            "yellow" => format!("\x1b[33m{text}\x1b[0m"),
            "cyan" => format!("\x1b[36m{text}\x1b[0m"),
            "bold" => format!("\x1b[1m{text}\x1b[0m"),
            "dim" => format!("\x1b[2m{text}\x1b[0m"),
            _ => text.to_string(),
        }
    } else {
        text.to_string()
    }
}

/// Summary reporter for shell output
pub struct SummaryReporter {
    /// Use colored output
    colored: bool,
}

impl SummaryReporter {
    /// Create a new summary reporter
    #[must_use]
    pub const fn new() -> Self {
        Self { colored: true }
    }

    /// Disable colored output
    #[must_use]
    pub const fn no_color(mut self) -> Self {
        self.colored = false;
        self
    }

    fn color(&self, text: &str, color: &str) -> String {
        ansi_color(text, color, self.colored)
    }

    fn push_unit(&self, lines: &mut Vec<String>, unit: &UnitReport, marker: &str, color: &str) {
        lines.push(format!(
            "  {} {}  {}",
            self.color(marker, color),
            unit.name,
            self.color(&unit.fixture.display().to_string(), "dim")
        ));
        if unit.case != unit.name {
            lines.push(format!("      case: {}", unit.case));
        }
        if let Some(diff) = &unit.diff {
            lines.push(format!("      {}", diff.summary()));
        }
        if let Some(evidence) = &unit.evidence {
            lines.push(format!("      evidence: {}", evidence.display()));
        }
        if let Some(error) = &unit.error {
            lines.push(format!("      {}: {}", error.category, error.message));
        }
    }
}

impl Default for SummaryReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for SummaryReporter {
    fn generate_matrix_report(&self, report: &MatrixReport) -> Result<String, ReportError> {
        let mut lines = Vec::new();
        let summary = &report.summary;

        lines.push(self.color("Conformance Summary", "bold"));
        lines.push(self.color("─".repeat(40).as_str(), "dim"));
        lines.push(format!(
            "{}  {} total, {} passed, {} failed, {} errored",
            self.color("Units:", "cyan"),
            summary.total,
            self.color(&summary.passed.to_string(), "green"),
            self.color(&summary.failed.to_string(), "red"),
            self.color(&summary.errored.to_string(), "yellow"),
        ));
        lines.push(format!(
            "{}   {} ms",
            self.color("Time:", "cyan"),
            report.duration_ms
        ));

        if summary.failed > 0 {
            lines.push(String::new());
            lines.push(self.color("Failed:", "bold"));
            for unit in report.with_verdict(Verdict::Failed) {
                self.push_unit(&mut lines, unit, "✗", "red");
            }
        }

        if summary.errored > 0 {
            lines.push(String::new());
            lines.push(self.color("Errored:", "bold"));
            for unit in report.with_verdict(Verdict::Errored) {
                self.push_unit(&mut lines, unit, "!", "yellow");
            }
        }

        if summary.total == 0 {
            lines.push(String::new());
            lines.push(format!("  {}", self.color("No units to run", "dim")));
        } else if summary.all_passed() {
            lines.push(String::new());
            lines.push(format!(
                "  {}",
                self.color("All round trips preserved the graph", "green")
            ));
        }

        Ok(lines.join("\n"))
    }

    fn generate_diff_report(&self, diff: &DiffResult) -> Result<String, ReportError> {
        let mut lines = Vec::new();
        lines.push(self.color("Graph Diff", "bold"));
        lines.push(self.color("─".repeat(40).as_str(), "dim"));

        if diff.is_empty() {
            lines.push(format!("  {}", self.color("Graphs are equivalent", "green")));
            return Ok(lines.join("\n"));
        }

        lines.push(format!(
            "{}  {}",
            self.color("Changes:", "cyan"),
            diff.summary()
        ));
        lines.push(String::new());
        for line in diff.to_string().lines() {
            let colored = match line.trim_start().chars().next() {
                Some('+') => self.color(line, "green"),
                Some('-') => self.color(line, "red"),
                _ => line.to_string(),
            };
            lines.push(colored);
        }

        Ok(lines.join("\n"))
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formats::FormatDescriptor;
    use crate::harness::{MatrixSummary, UnitError};
    use crate::model::Node;
    use chrono::{TimeZone, Utc};
    use std::path::PathBuf;

    fn unit(name: &str, verdict: Verdict) -> UnitReport {
        UnitReport {
            case: name.to_string(),
            name: name.to_string(),
            fixture: PathBuf::from("testdata/bom-1.5.json"),
            source: FormatDescriptor::cyclonedx_json("1.5"),
            destination: FormatDescriptor::spdx_json("2.3"),
            verdict,
            diff: None,
            evidence: None,
            error: None,
        }
    }

    fn report() -> MatrixReport {
        let passed = unit("diff-cyclonedx-1.5-json->cyclonedx-1.5-json", Verdict::Passed);

        let mut failed = unit("diff-cyclonedx-1.5-json->spdx-2.3-json", Verdict::Failed);
        let mut diff = DiffResult::new();
        diff.nodes.removed.push(Node::new("B"));
        failed.diff = Some(diff);
        failed.evidence = Some(PathBuf::from(
            ".tmp/diff/cyclonedx-1.5/spdx-2.3/bom-1.5.json",
        ));

        let mut errored = unit("cdx-to-graph", Verdict::Errored);
        errored.name = "diff-cyclonedx-1.5-json->graph-1-yaml".to_string();
        errored.error = Some(UnitError {
            category: "fixture".to_string(),
            message: "golden graph missing".to_string(),
        });

        MatrixReport {
            started_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            duration_ms: 12,
            summary: MatrixSummary {
                total: 3,
                passed: 1,
                failed: 1,
                errored: 1,
            },
            units: vec![passed, failed, errored],
        }
    }

    #[test]
    fn test_matrix_summary_text() {
        let text = SummaryReporter::new()
            .no_color()
            .generate_matrix_report(&report())
            .unwrap();
        insta::assert_snapshot!(text, @r"
        Conformance Summary
        ────────────────────────────────────────
        Units:  3 total, 1 passed, 1 failed, 1 errored
        Time:   12 ms

        Failed:
          ✗ diff-cyclonedx-1.5-json->spdx-2.3-json  testdata/bom-1.5.json
              nodes +0/-1, edges +0/-0, roots +0/-0
              evidence: .tmp/diff/cyclonedx-1.5/spdx-2.3/bom-1.5.json

        Errored:
          ! diff-cyclonedx-1.5-json->graph-1-yaml  testdata/bom-1.5.json
              case: cdx-to-graph
              fixture: golden graph missing
        ");
    }

    #[test]
    fn test_all_passed_message() {
        let report = MatrixReport {
            started_at: Utc::now(),
            duration_ms: 0,
            summary: MatrixSummary {
                total: 1,
                passed: 1,
                failed: 0,
                errored: 0,
            },
            units: vec![unit("x", Verdict::Passed)],
        };
        let text = SummaryReporter::new()
            .no_color()
            .generate_matrix_report(&report)
            .unwrap();
        assert!(text.ends_with("All round trips preserved the graph"));
    }

    #[test]
    fn test_diff_report() {
        let reporter = SummaryReporter::new().no_color();
        let empty = reporter.generate_diff_report(&DiffResult::new()).unwrap();
        assert!(empty.contains("Graphs are equivalent"));

        let mut diff = DiffResult::new();
        diff.nodes.added.push(Node::new("C"));
        let text = reporter.generate_diff_report(&diff).unwrap();
        assert!(text.contains("Changes:  nodes +1/-0"));
        assert!(text.contains("  + C"));
    }

    #[test]
    fn test_colored_output_has_ansi() {
        let text = SummaryReporter::new().generate_matrix_report(&report()).unwrap();
        assert!(text.contains("\x1b[1mConformance Summary\x1b[0m"));
    }
}
