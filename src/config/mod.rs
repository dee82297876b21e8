//! Configuration module for sbom-conformance.
//!
//! This module provides a unified configuration system with:
//! - Type-safe configuration structures
//! - Validation for all configuration values
//! - Named presets for common use cases
//! - YAML config file loading and discovery
//! - CLI argument merging
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use sbom_conformance::config::{AppConfig, ConfigPreset};
//!
//! let config = AppConfig::from_preset(ConfigPreset::Strict);
//!
//! let config = AppConfig::builder()
//!     .ignore_property("hash:*")
//!     .sequential(true)
//!     .build();
//!
//! use sbom_conformance::config::file::load_or_default;
//! let (config, loaded_from) = load_or_default(None);
//! ```
//!
//! # Configuration File
//!
//! Place a `.sbom-conformance.yaml` file in your project root or
//! `~/.config/sbom-conformance/`:
//!
//! ```yaml
//! diff:
//!   root_order: ordered
//! cases:
//!   - name: cdx-to-spdx
//!     source: cyclonedx-1.5
//!     destination: spdx-2.3
//!     fixtures: [testdata/cyclonedx/1.5/json/bom-1.5.json]
//! ```

mod defaults;
pub mod file;
mod types;
mod validation;

pub use defaults::ConfigPreset;
pub use types::{
    AppConfig, AppConfigBuilder, DiffConfig, EvidenceConfig, FixtureConfig, OutputConfig,
    RunnerConfig,
};
pub use validation::{ConfigError, Validatable};

pub use file::{
    discover_config_file, generate_example_config, generate_full_example_config, load_config_file,
    load_or_default, ConfigFileError,
};

/// Generate a JSON Schema for the `AppConfig` configuration format.
///
/// Editors can use it to validate and complete `.sbom-conformance.yaml` files.
#[must_use]
pub fn generate_json_schema() -> String {
    let schema = schemars::schema_for!(AppConfig);
    serde_json::to_string_pretty(&schema).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_schema_lists_sections() {
        let schema: serde_json::Value = serde_json::from_str(&generate_json_schema()).unwrap();
        let properties = &schema["properties"];
        for section in ["runner", "diff", "fixtures", "evidence", "output", "cases"] {
            assert!(properties.get(section).is_some(), "missing {section}");
        }
    }
}
