//! Configuration validation.
//!
//! Problems are collected rather than returned on the first failure, so a
//! single run reports everything wrong with a config file.

use super::types::{AppConfig, DiffConfig, EvidenceConfig, FixtureConfig, OutputConfig};
use crate::evidence::EvidenceKey;
use crate::harness::ConformanceCase;
use std::collections::HashSet;
use std::path::PathBuf;

// ============================================================================
// Configuration Error
// ============================================================================

/// Error type for configuration validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    /// The field that failed validation
    pub field: String,
    /// Description of the validation error
    pub message: String,
}

impl ConfigError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Validation Trait
// ============================================================================

/// Trait for validatable configuration types.
pub trait Validatable {
    /// Validate the configuration, returning any errors found.
    fn validate(&self) -> Vec<ConfigError>;

    /// Check if the configuration is valid.
    fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}

// ============================================================================
// Validation Implementations
// ============================================================================

impl Validatable for AppConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        errors.extend(self.diff.validate());
        errors.extend(self.fixtures.validate());
        errors.extend(self.evidence.validate());
        errors.extend(self.output.validate());

        let mut names = HashSet::new();
        let mut evidence_dirs = HashSet::new();
        for (i, case) in self.cases.iter().enumerate() {
            errors.extend(validate_case(i, case));
            if !names.insert(case.name.as_str()) {
                errors.push(ConfigError::new(
                    format!("cases[{i}].name"),
                    format!("Duplicate case name '{}'", case.name),
                ));
            }
            errors.extend(validate_evidence_dirs(i, case, &mut evidence_dirs));
        }

        errors
    }
}

/// Evidence directories are keyed by fixture base name, so two fixtures of
/// one format pair sharing a base name would overwrite each other's evidence.
fn validate_evidence_dirs(
    index: usize,
    case: &ConformanceCase,
    seen: &mut HashSet<PathBuf>,
) -> Vec<ConfigError> {
    let mut errors = Vec::new();
    for (j, fixture) in case.fixtures.iter().enumerate() {
        let Some(name) = fixture.file_name() else {
            continue;
        };
        let key = EvidenceKey::new(
            case.source.clone(),
            case.destination.clone(),
            name.to_string_lossy(),
        );
        if !seen.insert(key.relative_dir()) {
            errors.push(ConfigError::new(
                format!("cases[{index}].fixtures[{j}]"),
                format!(
                    "Fixture base name '{}' is already used for {} -> {}; evidence directories would collide",
                    name.to_string_lossy(),
                    case.source,
                    case.destination
                ),
            ));
        }
    }
    errors
}

fn validate_case(index: usize, case: &ConformanceCase) -> Vec<ConfigError> {
    let mut errors = Vec::new();
    if case.name.trim().is_empty() {
        errors.push(ConfigError::new(
            format!("cases[{index}].name"),
            "Case name must not be empty",
        ));
    }
    if case.fixtures.is_empty() {
        errors.push(ConfigError::new(
            format!("cases[{index}].fixtures"),
            format!("Case '{}' has no fixtures", case.name),
        ));
    }
    errors
}

impl Validatable for DiffConfig {
    fn validate(&self) -> Vec<ConfigError> {
        self.ignored_properties
            .iter()
            .enumerate()
            .filter(|(_, pattern)| pattern.trim().is_empty())
            .map(|(i, _)| {
                ConfigError::new(
                    format!("diff.ignored_properties[{i}]"),
                    "Pattern must not be empty",
                )
            })
            .collect()
    }
}

impl Validatable for FixtureConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        if self.suffix.is_empty() {
            errors.push(ConfigError::new(
                "fixtures.suffix",
                "Suffix must not be empty; the golden would overwrite the fixture path",
            ));
        }
        if let Some(dir) = &self.base_dir {
            if !dir.is_dir() {
                errors.push(ConfigError::new(
                    "fixtures.base_dir",
                    format!("Not a directory: {}", dir.display()),
                ));
            }
        }
        let mut names = HashSet::new();
        for (i, path) in self.paths.iter().enumerate() {
            if let Some(name) = path.file_name() {
                if !names.insert(name) {
                    errors.push(ConfigError::new(
                        format!("fixtures.paths[{i}]"),
                        format!(
                            "Fixture base name '{}' is used twice; evidence directories would collide",
                            name.to_string_lossy()
                        ),
                    ));
                }
            }
        }
        errors
    }
}

impl Validatable for EvidenceConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        if self.enabled && self.dir.as_os_str().is_empty() {
            errors.push(ConfigError::new(
                "evidence.dir",
                "Evidence directory must not be empty when evidence is enabled",
            ));
        }
        errors
    }
}

impl Validatable for OutputConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if let Some(ref file_path) = self.file {
            if file_path.is_dir() {
                errors.push(ConfigError::new(
                    "output.file",
                    format!("Output path is a directory: {}", file_path.display()),
                ));
            }
        }

        errors
    }
}
