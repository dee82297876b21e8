//! Configuration types for conformance runs.
//!
//! Each section maps onto one runtime object: [`DiffConfig`] builds the
//! [`DiffEngine`], [`FixtureConfig`] the [`FixtureLoader`], [`EvidenceConfig`]
//! the optional [`EvidenceSink`] and [`RunnerConfig`] the [`MatrixRunner`].

use crate::diff::{DiffEngine, PropertyFilter, RootOrderPolicy};
use crate::evidence::{EvidenceSink, DEFAULT_EVIDENCE_DIR};
use crate::formats::FormatRegistry;
use crate::harness::{
    ConformanceCase, ConformanceMatrix, FixtureLoader, MatrixRunner, RoundTripHarness,
    DEFAULT_FIXTURE_SUFFIX,
};
use crate::reports::ReportFormat;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

// ============================================================================
// Unified Application Configuration
// ============================================================================

/// Unified application configuration that can be loaded from CLI args or config files.
///
/// CLI arguments are layered over file settings with [`AppConfig::merge`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppConfig {
    /// Matrix execution settings
    pub runner: RunnerConfig,
    /// Diff engine settings
    pub diff: DiffConfig,
    /// Golden fixture lookup
    pub fixtures: FixtureConfig,
    /// Evidence persistence
    pub evidence: EvidenceConfig,
    /// Report output
    pub output: OutputConfig,
    /// Named conformance cases
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub cases: Vec<ConformanceCase>,
}

impl AppConfig {
    /// Create a new `AppConfig` with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an `AppConfig` builder.
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }

    /// Build a round-trip harness over `registry` from this configuration.
    #[must_use]
    pub fn harness(&self, registry: FormatRegistry) -> RoundTripHarness {
        let harness = RoundTripHarness::new(registry)
            .with_engine(self.diff.engine())
            .with_fixture_loader(self.fixtures.loader());
        match self.evidence.sink() {
            Some(sink) => harness.with_evidence(sink),
            None => harness,
        }
    }

    /// The matrix this configuration describes.
    ///
    /// With `runner.full_matrix` the configured cases are preceded by the
    /// full cross product over `registry` and `fixtures.paths`.
    #[must_use]
    pub fn matrix(&self, registry: &FormatRegistry) -> ConformanceMatrix {
        let mut matrix = if self.runner.full_matrix {
            ConformanceMatrix::full(registry, &self.fixtures.paths)
        } else {
            ConformanceMatrix::default()
        };
        matrix.cases.extend(self.cases.iter().cloned());
        matrix
    }
}

// ============================================================================
// Builder for AppConfig
// ============================================================================

/// Builder for constructing `AppConfig` with fluent API.
#[derive(Debug, Default)]
#[must_use]
pub struct AppConfigBuilder {
    config: AppConfig,
}

impl AppConfigBuilder {
    /// Run units one at a time.
    pub const fn sequential(mut self, sequential: bool) -> Self {
        self.config.runner.parallel = !sequential;
        self
    }

    /// Set the worker pool size.
    pub const fn threads(mut self, threads: usize) -> Self {
        self.config.runner.threads = threads;
        self
    }

    /// Run the full format cross product.
    pub const fn full_matrix(mut self, full: bool) -> Self {
        self.config.runner.full_matrix = full;
        self
    }

    /// Set the root order policy.
    pub const fn root_order(mut self, policy: RootOrderPolicy) -> Self {
        self.config.diff.root_order = policy;
        self
    }

    /// Add an ignored property pattern.
    pub fn ignore_property(mut self, pattern: impl Into<String>) -> Self {
        self.config.diff.ignored_properties.push(pattern.into());
        self
    }

    /// Set the fixture base directory.
    pub fn fixture_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.config.fixtures.base_dir = dir;
        self
    }

    /// Set the evidence root.
    pub fn evidence_dir(mut self, dir: PathBuf) -> Self {
        self.config.evidence.dir = dir;
        self
    }

    /// Enable or disable evidence persistence.
    pub const fn evidence_enabled(mut self, enabled: bool) -> Self {
        self.config.evidence.enabled = enabled;
        self
    }

    /// Set the output format.
    pub const fn output_format(mut self, format: ReportFormat) -> Self {
        self.config.output.format = format;
        self
    }

    /// Set the output file.
    pub fn output_file(mut self, file: Option<PathBuf>) -> Self {
        self.config.output.file = file;
        self
    }

    /// Add a conformance case.
    pub fn case(mut self, case: ConformanceCase) -> Self {
        self.config.cases.push(case);
        self
    }

    /// Build the `AppConfig`.
    #[must_use]
    pub fn build(self) -> AppConfig {
        self.config
    }
}

// ============================================================================
// Section Configurations
// ============================================================================

/// Matrix execution settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct RunnerConfig {
    /// Run units in parallel
    pub parallel: bool,
    /// Worker threads; 0 uses the global rayon pool
    pub threads: usize,
    /// Run every registered format against every registered format
    pub full_matrix: bool,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            parallel: true,
            threads: 0,
            full_matrix: false,
        }
    }
}

impl RunnerConfig {
    #[must_use]
    pub fn runner(&self) -> MatrixRunner {
        MatrixRunner::new()
            .with_parallel(self.parallel)
            .with_threads(self.threads)
    }
}

/// Diff engine settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct DiffConfig {
    /// How root element order is compared
    pub root_order: RootOrderPolicy,
    /// Property keys masked before comparison; a trailing `*` matches a prefix
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub ignored_properties: Vec<String>,
}

impl DiffConfig {
    #[must_use]
    pub fn engine(&self) -> DiffEngine {
        DiffEngine::new()
            .with_root_order(self.root_order)
            .with_ignored_properties(PropertyFilter::from_patterns(&self.ignored_properties))
    }
}

/// Golden fixture lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct FixtureConfig {
    /// Directory relative fixture paths are resolved against
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_dir: Option<PathBuf>,
    /// Suffix appended to a fixture path to find its golden graph
    pub suffix: String,
    /// Fixtures used by the full matrix
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub paths: Vec<PathBuf>,
}

impl Default for FixtureConfig {
    fn default() -> Self {
        Self {
            base_dir: None,
            suffix: DEFAULT_FIXTURE_SUFFIX.to_string(),
            paths: Vec::new(),
        }
    }
}

impl FixtureConfig {
    #[must_use]
    pub fn loader(&self) -> FixtureLoader {
        let loader = FixtureLoader::new().with_suffix(self.suffix.clone());
        match &self.base_dir {
            Some(dir) => loader.with_base_dir(dir.clone()),
            None => loader,
        }
    }
}

/// Evidence persistence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct EvidenceConfig {
    /// Persist evidence for failing round trips
    pub enabled: bool,
    /// Evidence root directory
    pub dir: PathBuf,
}

impl Default for EvidenceConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            dir: PathBuf::from(DEFAULT_EVIDENCE_DIR),
        }
    }
}

impl EvidenceConfig {
    /// The configured sink, if evidence is enabled.
    #[must_use]
    pub fn sink(&self) -> Option<EvidenceSink> {
        self.enabled.then(|| EvidenceSink::new(self.dir.clone()))
    }
}

/// Report output.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct OutputConfig {
    /// Output format
    pub format: ReportFormat,
    /// Output file path (None for stdout)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
    /// Disable colored output
    pub no_color: bool,
    /// Suppress non-essential output
    pub quiet: bool,
}
