//! Formats command handler.

use crate::formats::FormatRegistry;
use crate::reports::ReportFormat;
use anyhow::Result;
use serde::Serialize;

#[derive(Serialize)]
struct FormatEntry {
    name: String,
    mime: String,
    adapter: String,
}

/// Render the registered formats.
pub fn run_formats(registry: &FormatRegistry, format: ReportFormat) -> Result<String> {
    let entries: Vec<FormatEntry> = registry
        .entries()
        .map(|(descriptor, adapter)| FormatEntry {
            name: descriptor.short_name(),
            mime: descriptor.mime(),
            adapter: adapter.to_string(),
        })
        .collect();

    match format {
        ReportFormat::Json => Ok(serde_json::to_string_pretty(&entries)?),
        ReportFormat::Summary => {
            let width = entries.iter().map(|e| e.name.len()).max().unwrap_or(0);
            let lines: Vec<String> = entries
                .iter()
                .map(|e| format!("{:<width$}  {:<10}  {}", e.name, e.adapter, e.mime))
                .collect();
            Ok(lines.join("\n"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_listing() {
        let text = run_formats(&FormatRegistry::with_builtin(), ReportFormat::Summary).unwrap();
        let first = text.lines().next().unwrap();
        assert!(first.starts_with("cyclonedx-1.4-json"));
        assert!(first.ends_with("application/vnd.cyclonedx+json;version=1.4"));
        assert_eq!(text.lines().count(), 7);
    }

    #[test]
    fn test_json_listing() {
        let json = run_formats(&FormatRegistry::with_builtin(), ReportFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value[3]["name"], "spdx-2.2-json");
        assert_eq!(value[3]["mime"], "text/spdx+json;version=2.2");
    }
}
