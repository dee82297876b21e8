//! Golden fixture loading.
//!
//! A fixture is named by a path such as `testdata/spdx/2.3/json/curl.spdx.json`;
//! its golden canonical graph lives next to it with a fixed suffix appended
//! (`curl.spdx.json.graph.json` by default).

use crate::error::{ConformanceError, FixtureErrorKind, Result};
use crate::formats::{FormatAdapter, FormatDescriptor, GraphAdapter};
use crate::model::NodeList;
use std::path::{Path, PathBuf};

/// Suffix of golden canonical graph files.
pub const DEFAULT_FIXTURE_SUFFIX: &str = ".graph.json";

/// A loaded golden fixture.
#[derive(Debug, Clone)]
pub struct Fixture {
    /// Base name of the fixture path, used in test names and evidence paths
    pub name: String,
    /// File the golden graph was read from
    pub path: PathBuf,
    /// The golden graph
    pub graph: NodeList,
}

/// Loads golden graphs for fixture paths.
#[derive(Debug, Clone)]
pub struct FixtureLoader {
    base_dir: Option<PathBuf>,
    suffix: String,
}

impl Default for FixtureLoader {
    fn default() -> Self {
        Self {
            base_dir: None,
            suffix: DEFAULT_FIXTURE_SUFFIX.to_string(),
        }
    }
}

impl FixtureLoader {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve relative fixture paths against `dir`.
    #[must_use]
    pub fn with_base_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.base_dir = Some(dir.into());
        self
    }

    /// Use a different golden suffix, e.g. `.graph.yaml`.
    #[must_use]
    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = suffix.into();
        self
    }

    #[must_use]
    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    /// Canonical format of golden files, chosen by the suffix extension.
    #[must_use]
    pub fn golden_format(&self) -> FormatDescriptor {
        if self.suffix.ends_with(".yaml") || self.suffix.ends_with(".yml") {
            FormatDescriptor::graph_yaml()
        } else {
            FormatDescriptor::graph_json()
        }
    }

    /// File holding the golden graph for `fixture`.
    #[must_use]
    pub fn golden_path(&self, fixture: &Path) -> PathBuf {
        let resolved = match &self.base_dir {
            Some(base) if fixture.is_relative() => base.join(fixture),
            _ => fixture.to_path_buf(),
        };
        let mut name = resolved.into_os_string();
        name.push(&self.suffix);
        PathBuf::from(name)
    }

    /// Fixture name: the base name of the fixture path.
    pub fn fixture_name(fixture: &Path) -> Result<String> {
        fixture
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| {
                ConformanceError::fixture(
                    fixture,
                    "resolving fixture name",
                    FixtureErrorKind::NoFileName,
                )
            })
    }

    /// Load the golden graph for `fixture`.
    pub fn load(&self, fixture: &Path) -> Result<Fixture> {
        let name = Self::fixture_name(fixture)?;
        let path = self.golden_path(fixture);

        let bytes = std::fs::read(&path)
            .map_err(|e| ConformanceError::fixture(&path, "reading golden graph", e))?;
        let graph = GraphAdapter::new()
            .decode(&bytes, &self.golden_format())
            .map_err(|e| ConformanceError::fixture(&path, "decoding golden graph", e))?;

        tracing::debug!(
            fixture = %name,
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "golden fixture loaded"
        );
        Ok(Fixture { name, path, graph })
    }
}
