//! Roundtrip command handler.
//!
//! Runs a single conformance unit: one fixture through one format pair.

use super::run::ensure_valid;
use crate::config::AppConfig;
use crate::formats::{FormatDescriptor, FormatRegistry};
use crate::reports::{create_reporter, exit_codes, should_use_color, write_output, OutputTarget};
use anyhow::{Context, Result};
use std::path::Path;

/// Round-trip `fixture` from `source` through `destination`, returning the exit code.
pub fn run_roundtrip(
    config: &AppConfig,
    registry: FormatRegistry,
    fixture: &Path,
    source: &FormatDescriptor,
    destination: &FormatDescriptor,
) -> Result<i32> {
    ensure_valid(config)?;

    let harness = config.harness(registry);
    let outcome = harness
        .run_fixture(fixture, source, destination)
        .with_context(|| format!("round trip of {} failed", fixture.display()))?;

    let target = OutputTarget::from_option(config.output.file.clone());
    let colored = should_use_color(config.output.no_color, &target);
    let rendered = create_reporter(config.output.format, colored)
        .generate_diff_report(&outcome.diff)
        .context("failed to render diff")?;
    write_output(&rendered, &target, config.output.quiet)?;

    if let Some(dir) = &outcome.evidence {
        if !config.output.quiet {
            tracing::info!("Evidence written to {}", dir.display());
        }
    }

    Ok(if outcome.passed() {
        exit_codes::SUCCESS
    } else {
        exit_codes::CONFORMANCE_FAILURES
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_fixture_is_an_error() {
        let temp = TempDir::new().unwrap();
        let err = run_roundtrip(
            &AppConfig::default(),
            FormatRegistry::with_builtin(),
            &temp.path().join("absent.json"),
            &FormatDescriptor::graph_json(),
            &FormatDescriptor::spdx_json("2.3"),
        )
        .unwrap_err();
        assert!(format!("{err:#}").contains("Failed to load fixture"));
    }
}
