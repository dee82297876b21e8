//! Diff command handler.
//!
//! Implements the `diff` subcommand for comparing a golden canonical graph
//! with any document a registered adapter can decode.

use crate::config::AppConfig;
use crate::formats::{FormatDescriptor, FormatRegistry};
use crate::model::NodeList;
use crate::reports::{create_reporter, exit_codes, should_use_color, write_output, OutputTarget};
use anyhow::{Context, Result};
use std::path::Path;

/// Run the diff command, returning the desired exit code.
///
/// `format` forces the candidate's format; otherwise both documents are
/// detected from their content.
pub fn run_diff(
    config: &AppConfig,
    registry: &FormatRegistry,
    golden: &Path,
    candidate: &Path,
    format: Option<&FormatDescriptor>,
) -> Result<i32> {
    let (golden_graph, golden_format) = decode_document(registry, golden, None)?;
    let (candidate_graph, candidate_format) = decode_document(registry, candidate, format)?;

    if !config.output.quiet {
        tracing::info!(
            "Comparing {} ({}) with {} ({})",
            golden.display(),
            golden_format.short_name(),
            candidate.display(),
            candidate_format.short_name()
        );
    }

    let result = config.diff.engine().diff(&golden_graph, &candidate_graph);

    let target = OutputTarget::from_option(config.output.file.clone());
    let colored = should_use_color(config.output.no_color, &target);
    let rendered = create_reporter(config.output.format, colored)
        .generate_diff_report(&result)
        .context("failed to render diff")?;
    write_output(&rendered, &target, config.output.quiet)?;

    Ok(if result.is_empty() {
        exit_codes::SUCCESS
    } else {
        exit_codes::CONFORMANCE_FAILURES
    })
}

/// Read and decode `path`, detecting its format unless one is given.
pub fn decode_document(
    registry: &FormatRegistry,
    path: &Path,
    format: Option<&FormatDescriptor>,
) -> Result<(NodeList, FormatDescriptor)> {
    let bytes =
        std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;

    let format = match format {
        Some(format) => format.clone(),
        None => registry.detect(&bytes).with_context(|| {
            format!(
                "cannot detect the format of {}; pass --format",
                path.display()
            )
        })?,
    };

    let graph = registry
        .adapter(&format)?
        .decode(&bytes, &format)
        .with_context(|| format!("failed to decode {} as {}", path.display(), format))?;
    Ok((graph, format))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::RootOrderPolicy;
    use tempfile::TempDir;

    const GOLDEN: &str = r#"{"nodes":[{"id":"a"},{"id":"b"}],"rootElements":["a","b"]}"#;
    const SWAPPED: &str = "nodes:\n  - id: a\n  - id: b\nrootElements: [b, a]\n";

    #[test]
    fn test_decode_document_detects_format() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("golden.json");
        std::fs::write(&path, GOLDEN).unwrap();

        let (graph, format) =
            decode_document(&FormatRegistry::with_builtin(), &path, None).unwrap();
        assert_eq!(format, FormatDescriptor::graph_json());
        assert_eq!(graph.node_count(), 2);
    }

    #[test]
    fn test_undetectable_document() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("other.json");
        std::fs::write(&path, "[1, 2, 3]").unwrap();

        let err = decode_document(&FormatRegistry::with_builtin(), &path, None).unwrap_err();
        assert!(err.to_string().contains("cannot detect"));
    }

    #[test]
    fn test_root_order_policy_changes_exit_code() {
        let temp = TempDir::new().unwrap();
        let golden = temp.path().join("golden.json");
        let candidate = temp.path().join("candidate.yaml");
        std::fs::write(&golden, GOLDEN).unwrap();
        std::fs::write(&candidate, SWAPPED).unwrap();
        let registry = FormatRegistry::with_builtin();

        let mut config = AppConfig::default();
        config.output.quiet = true;
        config.output.file = Some(temp.path().join("out.txt"));
        assert_eq!(
            run_diff(&config, &registry, &golden, &candidate, None).unwrap(),
            exit_codes::SUCCESS
        );

        config.diff.root_order = RootOrderPolicy::Ordered;
        assert_eq!(
            run_diff(&config, &registry, &golden, &candidate, None).unwrap(),
            exit_codes::CONFORMANCE_FAILURES
        );
    }
}
