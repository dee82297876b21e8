//! Conformance matrix runs over the golden fixtures.

use sbom_conformance::{
    cli,
    config::AppConfig,
    harness::{FixtureLoader, MatrixSummary},
    reports::{create_reporter, exit_code_for, exit_codes, ReportFormat},
    ConformanceCase, ConformanceMatrix, EvidenceSink, FormatDescriptor, FormatFamily,
    FormatRegistry, MatrixRunner, RoundTripHarness, Verdict,
};
use std::path::PathBuf;
use tempfile::TempDir;

const FIXTURES_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures");

fn fixtures() -> Vec<PathBuf> {
    vec![
        PathBuf::from("cyclonedx/1.5/json/bom-1.5.json"),
        PathBuf::from("spdx/2.3/json/curl.spdx.json"),
        PathBuf::from("graph/1/json/multi-root.json"),
    ]
}

fn harness(evidence: &TempDir) -> RoundTripHarness {
    RoundTripHarness::new(FormatRegistry::with_builtin())
        .with_fixture_loader(FixtureLoader::new().with_base_dir(FIXTURES_DIR))
        .with_evidence(EvidenceSink::new(evidence.path()))
}

#[test]
fn full_matrix_over_golden_fixtures() {
    let temp = TempDir::new().unwrap();
    let registry = FormatRegistry::with_builtin();
    let matrix = ConformanceMatrix::full(&registry, &fixtures());
    assert_eq!(matrix.len(), 49);
    assert_eq!(matrix.unit_count(), 147);

    let report = MatrixRunner::new().run(&harness(&temp), &matrix);

    // Only the multi-root fixture into CycloneDX (3 versions, 7 sources) is lossy
    assert_eq!(
        report.summary,
        MatrixSummary {
            total: 147,
            passed: 126,
            failed: 21,
            errored: 0,
        }
    );
    for unit in report.with_verdict(Verdict::Failed) {
        assert_eq!(unit.destination.family(), FormatFamily::CycloneDx);
        assert!(unit.fixture.ends_with("multi-root.json"));
        assert!(unit.evidence.as_ref().is_some_and(|dir| dir.is_dir()));
    }
    assert_eq!(exit_code_for(&report.summary), exit_codes::CONFORMANCE_FAILURES);
}

#[test]
fn sequential_and_parallel_reports_agree() {
    let temp = TempDir::new().unwrap();
    let harness = harness(&temp);
    let matrix = ConformanceMatrix::full(&FormatRegistry::with_builtin(), &fixtures()[..1]);

    let parallel = MatrixRunner::new().with_threads(2).run(&harness, &matrix);
    let sequential = MatrixRunner::new().with_parallel(false).run(&harness, &matrix);

    assert_eq!(parallel.summary, sequential.summary);
    let names = |r: &sbom_conformance::MatrixReport| -> Vec<String> {
        r.units.iter().map(|u| u.name.clone()).collect()
    };
    assert_eq!(names(&parallel), names(&sequential));
    assert!(parallel.summary.all_passed());
}

#[test]
fn missing_fixture_errors_only_its_unit() {
    let temp = TempDir::new().unwrap();
    let matrix = ConformanceMatrix::default().with_case(
        ConformanceCase::new(
            FormatDescriptor::spdx_json("2.3"),
            FormatDescriptor::cyclonedx_json("1.6"),
            [
                PathBuf::from("spdx/2.3/json/curl.spdx.json"),
                PathBuf::from("spdx/2.3/json/missing.spdx.json"),
            ],
        )
        .with_name("spdx-to-cyclonedx"),
    );

    let report = MatrixRunner::new().run(&harness(&temp), &matrix);
    assert_eq!(report.summary.passed, 1);
    assert_eq!(report.summary.errored, 1);
    assert_eq!(exit_code_for(&report.summary), exit_codes::ERROR);

    let errored = report.with_verdict(Verdict::Errored).next().unwrap();
    assert_eq!(errored.case, "spdx-to-cyclonedx");
    assert_eq!(errored.name, "diff-spdx-2.3-json->cyclonedx-1.6-json");
    let error = errored.error.as_ref().unwrap();
    assert!(error.message.contains("missing.spdx.json"));
}

#[test]
fn json_report_lists_failures_with_evidence() {
    let temp = TempDir::new().unwrap();
    let matrix = ConformanceMatrix::default().with_case(ConformanceCase::new(
        FormatDescriptor::graph_json(),
        FormatDescriptor::cyclonedx_json("1.5"),
        [PathBuf::from("graph/1/json/multi-root.json")],
    ));
    let report = MatrixRunner::new().run(&harness(&temp), &matrix);

    let json = create_reporter(ReportFormat::Json, false)
        .generate_matrix_report(&report)
        .unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(value["summary"]["failed"], 1);
    let unit = &value["units"][0];
    assert_eq!(unit["verdict"], "failed");
    assert_eq!(unit["name"], "diff-graph-1-json->cyclonedx-1.5-json");
    assert_eq!(unit["diff"]["rootElements"]["removed"][0], "SPDXRef-tool");
    assert!(unit["evidence"]
        .as_str()
        .unwrap()
        .ends_with("multi-root.json"));
}

#[test]
fn configured_run_writes_report() {
    let temp = TempDir::new().unwrap();
    let report_path = temp.path().join("report.json");
    let config = AppConfig::builder()
        .fixture_dir(Some(PathBuf::from(FIXTURES_DIR)))
        .evidence_dir(temp.path().join("evidence"))
        .output_format(ReportFormat::Json)
        .output_file(Some(report_path.clone()))
        .case(ConformanceCase::new(
            FormatDescriptor::spdx_json("2.3"),
            FormatDescriptor::spdx_json("2.2"),
            [PathBuf::from("spdx/2.3/json/curl.spdx.json")],
        ))
        .build();

    let code = cli::run_conformance(&config, FormatRegistry::with_builtin(), &[]).unwrap();
    assert_eq!(code, exit_codes::SUCCESS);

    let value: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&report_path).unwrap()).unwrap();
    assert_eq!(value["summary"]["total"], 1);
    assert_eq!(value["summary"]["passed"], 1);
}

#[test]
fn unknown_case_filter_is_an_error() {
    let config = AppConfig::builder()
        .fixture_dir(Some(PathBuf::from(FIXTURES_DIR)))
        .case(ConformanceCase::new(
            FormatDescriptor::graph_json(),
            FormatDescriptor::graph_yaml(),
            [PathBuf::from("graph/1/json/multi-root.json")],
        ))
        .build();

    let err = cli::run_conformance(
        &config,
        FormatRegistry::with_builtin(),
        &["diff-nope->nope".to_string()],
    )
    .unwrap_err();
    assert!(err.to_string().contains("no configured case matches"));
}
