//! Configuration file loading and discovery.
//!
//! Supports loading configuration from YAML files with automatic discovery.

use super::types::AppConfig;
use std::path::{Path, PathBuf};

// ============================================================================
// Configuration File Discovery
// ============================================================================

/// Standard config file names to search for.
const CONFIG_FILE_NAMES: &[&str] = &[
    ".sbom-conformance.yaml",
    ".sbom-conformance.yml",
    "sbom-conformance.yaml",
    "sbom-conformance.yml",
];

/// Discover a config file by searching standard locations.
///
/// Search order:
/// 1. Explicit path if provided
/// 2. Current directory
/// 3. Git repository root (if in a repo)
/// 4. User config directory (~/.config/sbom-conformance/)
/// 5. Home directory
#[must_use]
pub fn discover_config_file(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        if path.exists() {
            return Some(path.to_path_buf());
        }
    }

    if let Some(path) = std::env::current_dir()
        .ok()
        .and_then(|cwd| find_config_in_dir(&cwd))
    {
        return Some(path);
    }

    if let Some(path) = find_git_root().and_then(|root| find_config_in_dir(&root)) {
        return Some(path);
    }

    if let Some(config_dir) = dirs::config_dir() {
        if let Some(path) = find_config_in_dir(&config_dir.join("sbom-conformance")) {
            return Some(path);
        }
    }

    dirs::home_dir().and_then(|home| find_config_in_dir(&home))
}

/// Find a config file in a specific directory.
fn find_config_in_dir(dir: &Path) -> Option<PathBuf> {
    CONFIG_FILE_NAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.exists())
}

/// Find the git repository root by walking up the directory tree.
fn find_git_root() -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    cwd.ancestors()
        .find(|dir| dir.join(".git").exists())
        .map(Path::to_path_buf)
}

// ============================================================================
// Configuration File Loading
// ============================================================================

/// Error type for config file operations.
#[derive(Debug)]
pub enum ConfigFileError {
    /// File not found
    NotFound(PathBuf),
    /// IO error reading file
    Io(std::io::Error),
    /// YAML parsing error
    Parse(serde_yaml::Error),
}

impl std::fmt::Display for ConfigFileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(path) => {
                write!(f, "Config file not found: {}", path.display())
            }
            Self::Io(e) => write!(f, "Failed to read config file: {e}"),
            Self::Parse(e) => write!(f, "Failed to parse config file: {e}"),
        }
    }
}

impl std::error::Error for ConfigFileError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::NotFound(_) => None,
            Self::Io(e) => Some(e),
            Self::Parse(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for ConfigFileError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_yaml::Error> for ConfigFileError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Parse(err)
    }
}

/// Load an `AppConfig` from a YAML file.
///
/// Relative `fixtures.base_dir` values are resolved against the directory
/// holding the config file, so a checked-in config works from any cwd.
pub fn load_config_file(path: &Path) -> Result<AppConfig, ConfigFileError> {
    if !path.exists() {
        return Err(ConfigFileError::NotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path)?;
    let mut config: AppConfig = serde_yaml::from_str(&content)?;
    if let (Some(parent), Some(base)) = (path.parent(), config.fixtures.base_dir.as_mut()) {
        if base.is_relative() {
            *base = parent.join(&*base);
        }
    }
    Ok(config)
}

/// Load config from discovered file, or return default.
#[must_use]
pub fn load_or_default(explicit_path: Option<&Path>) -> (AppConfig, Option<PathBuf>) {
    discover_config_file(explicit_path).map_or_else(
        || (AppConfig::default(), None),
        |path| match load_config_file(&path) {
            Ok(config) => (config, Some(path)),
            Err(e) => {
                tracing::warn!("Failed to load config from {}: {}", path.display(), e);
                (AppConfig::default(), None)
            }
        },
    )
}

// ============================================================================
// Configuration Merging
// ============================================================================

impl AppConfig {
    /// Merge another config into this one, with `other` taking precedence.
    ///
    /// Only values that differ from the defaults override, so CLI args that
    /// were not given leave file settings alone.
    pub fn merge(&mut self, other: &Self) {
        let defaults = Self::default();

        if !other.runner.parallel {
            self.runner.parallel = false;
        }
        if other.runner.threads != defaults.runner.threads {
            self.runner.threads = other.runner.threads;
        }
        if other.runner.full_matrix {
            self.runner.full_matrix = true;
        }

        if other.diff.root_order != defaults.diff.root_order {
            self.diff.root_order = other.diff.root_order;
        }
        for pattern in &other.diff.ignored_properties {
            if !self.diff.ignored_properties.contains(pattern) {
                self.diff.ignored_properties.push(pattern.clone());
            }
        }

        if other.fixtures.base_dir.is_some() {
            self.fixtures.base_dir.clone_from(&other.fixtures.base_dir);
        }
        if other.fixtures.suffix != defaults.fixtures.suffix {
            self.fixtures.suffix.clone_from(&other.fixtures.suffix);
        }
        if !other.fixtures.paths.is_empty() {
            self.fixtures.paths.clone_from(&other.fixtures.paths);
        }

        if !other.evidence.enabled {
            self.evidence.enabled = false;
        }
        if other.evidence.dir != defaults.evidence.dir {
            self.evidence.dir.clone_from(&other.evidence.dir);
        }

        if other.output.format != defaults.output.format {
            self.output.format = other.output.format;
        }
        if other.output.file.is_some() {
            self.output.file.clone_from(&other.output.file);
        }
        if other.output.no_color {
            self.output.no_color = true;
        }
        if other.output.quiet {
            self.output.quiet = true;
        }

        self.cases.extend(other.cases.iter().cloned());
    }

    /// Load from file and merge with CLI overrides.
    #[must_use]
    pub fn from_file_with_overrides(
        config_path: Option<&Path>,
        cli_overrides: &Self,
    ) -> (Self, Option<PathBuf>) {
        let (mut config, loaded_from) = load_or_default(config_path);
        config.merge(cli_overrides);
        (config, loaded_from)
    }
}

// ============================================================================
// Example Config Generation
// ============================================================================

/// Generate an example config file content.
#[must_use]
pub fn generate_example_config() -> String {
    let example = AppConfig::default();
    format!(
        r"# SBOM Conformance Configuration
# Place this file at .sbom-conformance.yaml in your project root or ~/.config/sbom-conformance/

{}",
        serde_yaml::to_string(&example).unwrap_or_default()
    )
}

/// Generate a commented example config with all options.
#[must_use]
pub fn generate_full_example_config() -> String {
    r"# SBOM Conformance Configuration File
# ====================================
#
# Place it at:
#   - .sbom-conformance.yaml in your project root
#   - ~/.config/sbom-conformance/sbom-conformance.yaml for global config
#
# CLI arguments always override file settings.

# Matrix execution
runner:
  # Run units on a rayon pool
  parallel: true
  # Dedicated worker threads (0 = rayon default)
  threads: 0
  # Verify every registered format against every registered format
  full_matrix: false

# Diff engine
diff:
  # Root element comparison: unordered, ordered
  root_order: unordered
  # Property keys masked before comparison; a trailing * matches a prefix
  # ignored_properties:
  #   - description
  #   - hash:*

# Golden fixtures
fixtures:
  # Directory relative fixture paths are resolved against
  # base_dir: testdata
  # Suffix appended to a fixture path to find its golden graph
  suffix: .graph.json
  # Fixtures used by the full matrix
  # paths:
  #   - cyclonedx/1.5/json/bom-1.5.json

# Evidence for failing round trips
evidence:
  enabled: true
  dir: .tmp/diff

# Report output
output:
  # Format: summary, json
  format: summary
  # file: conformance.json
  no_color: false
  quiet: false

# Named conformance cases
# cases:
#   - name: cdx-1.5-to-spdx-2.3
#     source: cyclonedx-1.5
#     destination: spdx-2.3
#     fixtures:
#       - cyclonedx/1.5/json/bom-1.5.json
"
    .to_string()
}

// ============================================================================
// Tests
// ============================================================================
