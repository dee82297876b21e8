//! Run command handler.
//!
//! Implements the `run` subcommand, which executes the configured
//! conformance matrix.

use crate::config::{AppConfig, Validatable};
use crate::formats::FormatRegistry;
use crate::harness::MatrixReport;
use crate::reports::{
    create_reporter, exit_code_for, should_use_color, write_output, OutputTarget,
};
use anyhow::{bail, Context, Result};

/// Run the conformance matrix, returning the desired exit code.
///
/// `case_filter` restricts the run to the named cases when non-empty. The
/// caller is responsible for calling `std::process::exit()` with the
/// returned code when it is non-zero.
pub fn run_conformance(
    config: &AppConfig,
    registry: FormatRegistry,
    case_filter: &[String],
) -> Result<i32> {
    ensure_valid(config)?;

    let matrix = config.matrix(&registry).filter_cases(case_filter);
    if matrix.is_empty() {
        if case_filter.is_empty() {
            bail!("no conformance cases configured; add `cases` to the config file or pass --full-matrix");
        }
        bail!("no configured case matches {}", case_filter.join(", "));
    }

    let harness = config.harness(registry);
    let report = config.runner.runner().run(&harness, &matrix);
    output_matrix_report(config, &report)?;

    Ok(exit_code_for(&report.summary))
}

/// Fail with every validation problem of `config`.
pub(crate) fn ensure_valid(config: &AppConfig) -> Result<()> {
    let errors = config.validate();
    if errors.is_empty() {
        return Ok(());
    }
    let details: Vec<String> = errors.iter().map(|e| format!("  {e}")).collect();
    bail!("invalid configuration:\n{}", details.join("\n"))
}

fn output_matrix_report(config: &AppConfig, report: &MatrixReport) -> Result<()> {
    let target = OutputTarget::from_option(config.output.file.clone());
    let colored = should_use_color(config.output.no_color, &target);
    let rendered = create_reporter(config.output.format, colored)
        .generate_matrix_report(report)
        .context("failed to render conformance report")?;
    write_output(&rendered, &target, config.output.quiet)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formats::FormatDescriptor;
    use crate::harness::ConformanceCase;
    use crate::reports::{exit_codes, ReportFormat};
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn test_empty_matrix_is_an_error() {
        let err = run_conformance(&AppConfig::default(), FormatRegistry::with_builtin(), &[])
            .unwrap_err();
        assert!(err.to_string().contains("no conformance cases"));
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let mut config = AppConfig::default();
        config.fixtures.suffix.clear();
        let err = ensure_valid(&config).unwrap_err();
        assert!(err.to_string().contains("fixtures.suffix"));
    }

    #[test]
    fn test_run_writes_json_report() {
        let temp = TempDir::new().unwrap();
        std::fs::write(
            temp.path().join("one.json.graph.json"),
            r#"{"nodes":[{"id":"a","properties":{"name":"a"}}],"rootElements":["a"]}"#,
        )
        .unwrap();
        let report_path = temp.path().join("report.json");

        let config = AppConfig::builder()
            .fixture_dir(Some(temp.path().to_path_buf()))
            .evidence_dir(temp.path().join("evidence"))
            .output_format(ReportFormat::Json)
            .output_file(Some(report_path.clone()))
            .case(ConformanceCase::new(
                FormatDescriptor::graph_json(),
                FormatDescriptor::cyclonedx_json("1.5"),
                vec![PathBuf::from("one.json")],
            ))
            .build();

        let code = run_conformance(&config, FormatRegistry::with_builtin(), &[]).unwrap();
        assert_eq!(code, exit_codes::SUCCESS);

        let report: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(report_path).unwrap()).unwrap();
        assert_eq!(report["summary"]["passed"], 1);
    }
}
