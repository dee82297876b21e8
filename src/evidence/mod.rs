//! Evidence persisted for failed round trips.
//!
//! When a round trip produces a non-empty diff, the destination bytes and a
//! pretty JSON rendering of the diff are written under
//!
//! ```text
//! <root>/<srcType>-<srcVersion>/<dstType>-<dstVersion>/<fixture>/
//!     diff.json
//!     dst.<dstType>.<encoding>
//! ```
//!
//! Non-JSON encodings append `-<encoding>` to the version segment so that two
//! encodings of one format family never share a directory. Only the fixture's
//! base name is used, so config validation rejects two fixtures with the same
//! base name under one format pair. Each unit of a conformance run then owns
//! its own directory, and sinks need no coordination across threads.

use crate::diff::DiffResult;
use crate::error::{ConformanceError, Result};
use crate::formats::{Encoding, FormatDescriptor};
use std::fs;
use std::path::{Path, PathBuf};

/// Default evidence root, relative to the working directory.
pub const DEFAULT_EVIDENCE_DIR: &str = ".tmp/diff";

/// File name of the rendered diff.
pub const DIFF_FILE: &str = "diff.json";

/// Identifies the unit of work a piece of evidence belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EvidenceKey {
    pub source: FormatDescriptor,
    pub destination: FormatDescriptor,
    pub fixture: String,
}

impl EvidenceKey {
    pub fn new(
        source: FormatDescriptor,
        destination: FormatDescriptor,
        fixture: impl Into<String>,
    ) -> Self {
        Self {
            source,
            destination,
            fixture: fixture.into(),
        }
    }

    /// Directory of this key, relative to the evidence root.
    #[must_use]
    pub fn relative_dir(&self) -> PathBuf {
        PathBuf::from(format_segment(&self.source))
            .join(format_segment(&self.destination))
            .join(&self.fixture)
    }

    /// File name of the destination bytes.
    #[must_use]
    pub fn destination_file(&self) -> String {
        format!(
            "dst.{}.{}",
            self.destination.type_name(),
            self.destination.encoding()
        )
    }
}

fn format_segment(format: &FormatDescriptor) -> String {
    match format.encoding() {
        Encoding::Json => format!("{}-{}", format.type_name(), format.version()),
        other => format!("{}-{}-{}", format.type_name(), format.version(), other),
    }
}

/// Writes evidence below a root directory.
#[derive(Debug, Clone)]
pub struct EvidenceSink {
    root: PathBuf,
}

impl Default for EvidenceSink {
    fn default() -> Self {
        Self::new(DEFAULT_EVIDENCE_DIR)
    }
}

impl EvidenceSink {
    /// Create a sink rooted at `root`. Nothing is created until evidence is written.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The evidence root.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory evidence for `key` is written to.
    #[must_use]
    pub fn dir_for(&self, key: &EvidenceKey) -> PathBuf {
        self.root.join(key.relative_dir())
    }

    /// Persist the encoded destination bytes and the diff for `key`.
    ///
    /// Existing directories are reused and existing files overwritten.
    /// Returns the evidence directory.
    pub fn persist(&self, key: &EvidenceKey, encoded: &[u8], diff: &DiffResult) -> Result<PathBuf> {
        let dir = self.dir_for(key);
        fs::create_dir_all(&dir)
            .map_err(|e| ConformanceError::evidence(&dir, "creating evidence directory", e))?;

        let rendered = diff
            .to_json_pretty()
            .map_err(|e| ConformanceError::evidence(&dir, "rendering diff", e.into()))?;
        let diff_path = dir.join(DIFF_FILE);
        fs::write(&diff_path, rendered)
            .map_err(|e| ConformanceError::evidence(&diff_path, "writing diff", e))?;

        let dst_path = dir.join(key.destination_file());
        fs::write(&dst_path, encoded)
            .map_err(|e| ConformanceError::evidence(&dst_path, "writing destination bytes", e))?;

        tracing::debug!(dir = %dir.display(), "evidence written");
        Ok(dir)
    }
}
