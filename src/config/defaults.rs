//! Default configurations and presets.

use super::types::{AppConfig, DiffConfig, OutputConfig, RunnerConfig};
use crate::diff::RootOrderPolicy;
use crate::reports::ReportFormat;

// ============================================================================
// Configuration Presets
// ============================================================================

/// Named configuration presets for common use cases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigPreset {
    /// Unordered roots, configured cases only, summary output
    Default,
    /// Ordered roots over the full format cross product
    Strict,
    /// Machine-readable output for CI pipelines
    Ci,
}

impl ConfigPreset {
    /// Get the preset name as a string.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Strict => "strict",
            Self::Ci => "ci",
        }
    }

    /// Parse a preset from a string name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "default" => Some(Self::Default),
            "strict" | "ordered" => Some(Self::Strict),
            "ci" | "ci-cd" | "pipeline" => Some(Self::Ci),
            _ => None,
        }
    }

    /// Get a description of this preset.
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::Default => "Set-equivalence over the configured cases",
            Self::Strict => "Root order is significant and every format pair is verified",
            Self::Ci => "JSON report without colors, sequential and quiet",
        }
    }

    /// Get all available presets.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Default, Self::Strict, Self::Ci]
    }
}

impl std::fmt::Display for ConfigPreset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

// ============================================================================
// Preset Implementations
// ============================================================================

impl AppConfig {
    /// Create an `AppConfig` from a named preset.
    #[must_use]
    pub fn from_preset(preset: ConfigPreset) -> Self {
        match preset {
            ConfigPreset::Default => Self::default(),
            ConfigPreset::Strict => Self::strict_preset(),
            ConfigPreset::Ci => Self::ci_preset(),
        }
    }

    /// Strict preset.
    ///
    /// - Root elements compared positionally
    /// - Full format cross product
    #[must_use]
    pub fn strict_preset() -> Self {
        Self {
            runner: RunnerConfig {
                full_matrix: true,
                ..RunnerConfig::default()
            },
            diff: DiffConfig {
                root_order: RootOrderPolicy::Ordered,
                ignored_properties: Vec::new(),
            },
            ..Self::default()
        }
    }

    /// CI preset.
    ///
    /// - JSON output without colors
    /// - Sequential execution for stable logs
    #[must_use]
    pub fn ci_preset() -> Self {
        Self {
            runner: RunnerConfig {
                parallel: false,
                ..RunnerConfig::default()
            },
            output: OutputConfig {
                format: ReportFormat::Json,
                file: None,
                no_color: true,
                quiet: true,
            },
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preset_names() {
        for preset in ConfigPreset::all() {
            assert_eq!(ConfigPreset::from_name(preset.name()), Some(*preset));
            assert!(!preset.description().is_empty());
        }
        assert_eq!(ConfigPreset::from_name("CI-CD"), Some(ConfigPreset::Ci));
        assert_eq!(ConfigPreset::from_name("unknown"), None);
    }

    #[test]
    fn test_strict_preset() {
        let config = AppConfig::from_preset(ConfigPreset::Strict);
        assert_eq!(config.diff.root_order, RootOrderPolicy::Ordered);
        assert!(config.runner.full_matrix);
    }

    #[test]
    fn test_ci_preset() {
        let config = AppConfig::from_preset(ConfigPreset::Ci);
        assert_eq!(config.output.format, ReportFormat::Json);
        assert!(config.output.no_color);
        assert!(!config.runner.parallel);
    }
}
