//! Conformance matrix: named (source, destination, fixtures) cases run as
//! independent units.

use super::roundtrip::{test_name, RoundTripHarness};
use crate::diff::DiffResult;
use crate::formats::{FormatDescriptor, FormatRegistry};
use chrono::{DateTime, Utc};
use rayon::prelude::*;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Instant;

// ============================================================================
// Cases
// ============================================================================

/// One named conversion pair and the fixtures it is verified against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConformanceCase {
    /// Case name, used for filtering and in reports
    pub name: String,
    /// Format the fixtures are nominally written in
    pub source: FormatDescriptor,
    /// Format the golden graph is round-tripped through
    pub destination: FormatDescriptor,
    /// Fixture paths; goldens are found by appending the fixture suffix
    pub fixtures: Vec<PathBuf>,
}

impl ConformanceCase {
    /// Create a case named after its format pair.
    pub fn new(
        source: FormatDescriptor,
        destination: FormatDescriptor,
        fixtures: impl IntoIterator<Item = PathBuf>,
    ) -> Self {
        Self {
            name: test_name(&source, &destination),
            source,
            destination,
            fixtures: fixtures.into_iter().collect(),
        }
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

/// A single (case, fixture) pair, the unit of parallel work.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConformanceUnit<'a> {
    pub case: &'a ConformanceCase,
    pub fixture: &'a PathBuf,
}

/// The set of cases a run executes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConformanceMatrix {
    pub cases: Vec<ConformanceCase>,
}

impl ConformanceMatrix {
    #[must_use]
    pub fn new(cases: Vec<ConformanceCase>) -> Self {
        Self { cases }
    }

    #[must_use]
    pub fn with_case(mut self, case: ConformanceCase) -> Self {
        self.cases.push(case);
        self
    }

    /// Every registered format against every registered format, including
    /// same-format round trips, all sharing `fixtures`.
    #[must_use]
    pub fn full(registry: &FormatRegistry, fixtures: &[PathBuf]) -> Self {
        let cases = registry
            .list()
            .flat_map(|source| {
                registry.list().map(move |destination| {
                    ConformanceCase::new(
                        source.clone(),
                        destination.clone(),
                        fixtures.iter().cloned(),
                    )
                })
            })
            .collect();
        Self { cases }
    }

    /// Keep only the cases whose name is in `names`. An empty filter keeps all.
    #[must_use]
    pub fn filter_cases(mut self, names: &[String]) -> Self {
        if !names.is_empty() {
            self.cases.retain(|case| names.contains(&case.name));
        }
        self
    }

    /// Flatten the matrix into units, in case then fixture order.
    pub fn units(&self) -> impl Iterator<Item = ConformanceUnit<'_>> + '_ {
        self.cases.iter().flat_map(|case| {
            case.fixtures
                .iter()
                .map(move |fixture| ConformanceUnit { case, fixture })
        })
    }

    /// Number of cases.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cases.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }

    /// Number of units across all cases.
    #[must_use]
    pub fn unit_count(&self) -> usize {
        self.cases.iter().map(|c| c.fixtures.len()).sum()
    }
}

// ============================================================================
// Reports
// ============================================================================

/// Outcome class of a unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    /// The round trip preserved the graph
    Passed,
    /// The round trip produced a non-empty diff
    Failed,
    /// The unit could not complete (fixture, encode or decode error)
    Errored,
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Passed => write!(f, "passed"),
            Self::Failed => write!(f, "failed"),
            Self::Errored => write!(f, "errored"),
        }
    }
}

/// Report for one unit.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnitReport {
    pub case: String,
    pub name: String,
    pub fixture: PathBuf,
    pub source: FormatDescriptor,
    pub destination: FormatDescriptor,
    pub verdict: Verdict,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diff: Option<DiffResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evidence: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<UnitError>,
}

/// A captured unit error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitError {
    pub category: String,
    pub message: String,
}

/// Verdict counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatrixSummary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub errored: usize,
}

impl MatrixSummary {
    fn from_units(units: &[UnitReport]) -> Self {
        let mut summary = Self {
            total: units.len(),
            ..Self::default()
        };
        for unit in units {
            match unit.verdict {
                Verdict::Passed => summary.passed += 1,
                Verdict::Failed => summary.failed += 1,
                Verdict::Errored => summary.errored += 1,
            }
        }
        summary
    }

    /// Whether every unit passed.
    #[must_use]
    pub fn all_passed(&self) -> bool {
        self.passed == self.total
    }
}

/// Result of running a [`ConformanceMatrix`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatrixReport {
    pub started_at: DateTime<Utc>,
    pub duration_ms: u64,
    pub summary: MatrixSummary,
    pub units: Vec<UnitReport>,
}

impl MatrixReport {
    /// Units with the given verdict.
    pub fn with_verdict(&self, verdict: Verdict) -> impl Iterator<Item = &UnitReport> + '_ {
        self.units.iter().filter(move |u| u.verdict == verdict)
    }
}

// ============================================================================
// Runner
// ============================================================================

/// Executes matrix units, in parallel by default.
#[derive(Debug, Clone)]
pub struct MatrixRunner {
    parallel: bool,
    threads: usize,
}

impl Default for MatrixRunner {
    fn default() -> Self {
        Self {
            parallel: true,
            threads: 0,
        }
    }
}

impl MatrixRunner {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Size of a dedicated worker pool. 0 uses the global rayon pool.
    #[must_use]
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }

    /// Run every unit of `matrix`.
    ///
    /// Unit errors are captured in the report; they never abort the run.
    /// Reports keep the matrix's case then fixture order.
    pub fn run(&self, harness: &RoundTripHarness, matrix: &ConformanceMatrix) -> MatrixReport {
        let started_at = Utc::now();
        let start = Instant::now();
        let units: Vec<ConformanceUnit<'_>> = matrix.units().collect();
        tracing::info!(
            cases = matrix.len(),
            units = units.len(),
            parallel = self.parallel,
            "running conformance matrix"
        );

        let reports = if !self.parallel {
            units.iter().map(|u| run_unit(harness, u)).collect()
        } else if self.threads > 0 {
            match rayon::ThreadPoolBuilder::new()
                .num_threads(self.threads)
                .build()
            {
                Ok(pool) => pool.install(|| run_parallel(harness, &units)),
                Err(e) => {
                    tracing::warn!("failed to build worker pool, using global pool: {e}");
                    run_parallel(harness, &units)
                }
            }
        } else {
            run_parallel(harness, &units)
        };

        let summary = MatrixSummary::from_units(&reports);
        tracing::info!(
            total = summary.total,
            passed = summary.passed,
            failed = summary.failed,
            errored = summary.errored,
            "conformance matrix finished"
        );
        MatrixReport {
            started_at,
            duration_ms: u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX),
            summary,
            units: reports,
        }
    }
}

fn run_parallel(harness: &RoundTripHarness, units: &[ConformanceUnit<'_>]) -> Vec<UnitReport> {
    units.par_iter().map(|u| run_unit(harness, u)).collect()
}

fn run_unit(harness: &RoundTripHarness, unit: &ConformanceUnit<'_>) -> UnitReport {
    let case = unit.case;
    let mut report = UnitReport {
        case: case.name.clone(),
        name: test_name(&case.source, &case.destination),
        fixture: unit.fixture.clone(),
        source: case.source.clone(),
        destination: case.destination.clone(),
        verdict: Verdict::Errored,
        diff: None,
        evidence: None,
        error: None,
    };

    match harness.run_fixture(unit.fixture, &case.source, &case.destination) {
        Ok(outcome) => {
            if outcome.passed() {
                report.verdict = Verdict::Passed;
            } else {
                report.verdict = Verdict::Failed;
                report.diff = Some(outcome.diff);
                report.evidence = outcome.evidence;
            }
        }
        Err(e) => {
            tracing::error!(
                case = %case.name,
                fixture = %unit.fixture.display(),
                "{}",
                e.chain_message()
            );
            report.error = Some(UnitError {
                category: e.category().to_string(),
                message: e.chain_message(),
            });
        }
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_matrix_is_cross_product() {
        let registry = FormatRegistry::with_builtin();
        let fixtures = vec![PathBuf::from("a.json"), PathBuf::from("b.json")];
        let matrix = ConformanceMatrix::full(&registry, &fixtures);
        assert_eq!(matrix.len(), 49);
        assert_eq!(matrix.unit_count(), 98);
        assert_eq!(matrix.cases[0].source, matrix.cases[0].destination);
        assert_eq!(matrix.cases[0].name, "diff-cyclonedx-1.4-json->cyclonedx-1.4-json");
    }

    #[test]
    fn test_filter_cases() {
        let registry = FormatRegistry::with_builtin();
        let matrix = ConformanceMatrix::full(&registry, &[PathBuf::from("a.json")]);
        let filtered = matrix
            .clone()
            .filter_cases(&["diff-spdx-2.3-json->graph-1-yaml".to_string()]);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered.cases[0].destination, FormatDescriptor::graph_yaml());
        assert_eq!(matrix.clone().filter_cases(&[]).len(), matrix.len());
    }

    #[test]
    fn test_units_keep_order() {
        let matrix = ConformanceMatrix::default()
            .with_case(
                ConformanceCase::new(
                    FormatDescriptor::graph_json(),
                    FormatDescriptor::graph_yaml(),
                    vec![PathBuf::from("x"), PathBuf::from("y")],
                )
                .with_name("first"),
            )
            .with_case(
                ConformanceCase::new(
                    FormatDescriptor::graph_yaml(),
                    FormatDescriptor::graph_json(),
                    vec![PathBuf::from("z")],
                )
                .with_name("second"),
            );
        let units: Vec<(&str, &str)> = matrix
            .units()
            .map(|u| (u.case.name.as_str(), u.fixture.to_str().unwrap()))
            .collect();
        assert_eq!(units, vec![("first", "x"), ("first", "y"), ("second", "z")]);
    }

    #[test]
    fn test_missing_fixture_is_captured() {
        let harness = RoundTripHarness::new(FormatRegistry::with_builtin());
        let matrix = ConformanceMatrix::default().with_case(ConformanceCase::new(
            FormatDescriptor::graph_json(),
            FormatDescriptor::graph_yaml(),
            vec![PathBuf::from("/nonexistent/fixture.json")],
        ));

        let report = MatrixRunner::new().with_parallel(false).run(&harness, &matrix);
        assert_eq!(report.summary.errored, 1);
        assert!(!report.summary.all_passed());
        let error = report.units[0].error.as_ref().unwrap();
        assert_eq!(error.category, "fixture");
    }

    #[test]
    fn test_case_yaml() {
        let yaml = r"
name: cdx-to-spdx
source: application/vnd.cyclonedx+json;version=1.5
destination: spdx-2.3
fixtures:
  - testdata/cyclonedx/1.5/json/bom-1.5.json
";
        let case: ConformanceCase = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(case.source, FormatDescriptor::cyclonedx_json("1.5"));
        assert_eq!(case.destination, FormatDescriptor::spdx_json("2.3"));
        assert_eq!(case.fixtures.len(), 1);
    }

    #[test]
    fn test_verdict_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Verdict::Errored).unwrap(), "\"errored\"");
    }
}
