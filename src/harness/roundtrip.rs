//! The round-trip conformance protocol: encode, decode, diff.

use super::fixtures::FixtureLoader;
use crate::diff::{DiffEngine, DiffResult};
use crate::error::{ConformanceError, ErrorContext, Result};
use crate::evidence::{EvidenceKey, EvidenceSink};
use crate::formats::{FormatDescriptor, FormatRegistry};
use crate::model::NodeList;
use std::path::{Path, PathBuf};

/// Name of one round trip, `diff-<src>-><dst>` with both formats in short form.
#[must_use]
pub fn test_name(source: &FormatDescriptor, destination: &FormatDescriptor) -> String {
    format!("diff-{}->{}", source.short_name(), destination.short_name())
}

/// Everything a single round trip produced.
#[derive(Debug, Clone)]
pub struct RoundTrip {
    /// Destination-format bytes produced by the encoder
    pub encoded: Vec<u8>,
    /// Graph decoded back from `encoded`
    pub decoded: NodeList,
    /// Differences between the golden graph and `decoded`
    pub diff: DiffResult,
}

impl RoundTrip {
    /// Whether the round trip preserved the graph.
    #[must_use]
    pub fn is_equivalent(&self) -> bool {
        self.diff.is_empty()
    }
}

/// Result of running the protocol for one fixture.
#[derive(Debug, Clone)]
pub struct RoundTripOutcome {
    /// Generated test name, see [`test_name`]
    pub name: String,
    pub fixture: String,
    pub source: FormatDescriptor,
    pub destination: FormatDescriptor,
    pub diff: DiffResult,
    /// Evidence directory, when evidence was written
    pub evidence: Option<PathBuf>,
}

impl RoundTripOutcome {
    #[must_use]
    pub fn passed(&self) -> bool {
        self.diff.is_empty()
    }
}

/// Runs round trips against an explicit [`FormatRegistry`].
#[derive(Debug, Clone)]
pub struct RoundTripHarness {
    registry: FormatRegistry,
    engine: DiffEngine,
    fixtures: FixtureLoader,
    evidence: Option<EvidenceSink>,
}

impl RoundTripHarness {
    /// Create a harness with the default engine, fixture loader and no evidence sink.
    #[must_use]
    pub fn new(registry: FormatRegistry) -> Self {
        Self {
            registry,
            engine: DiffEngine::new(),
            fixtures: FixtureLoader::new(),
            evidence: None,
        }
    }

    #[must_use]
    pub fn with_engine(mut self, engine: DiffEngine) -> Self {
        self.engine = engine;
        self
    }

    #[must_use]
    pub fn with_fixture_loader(mut self, loader: FixtureLoader) -> Self {
        self.fixtures = loader;
        self
    }

    /// Persist evidence for failing round trips into `sink`.
    #[must_use]
    pub fn with_evidence(mut self, sink: EvidenceSink) -> Self {
        self.evidence = Some(sink);
        self
    }

    #[must_use]
    pub fn registry(&self) -> &FormatRegistry {
        &self.registry
    }

    #[must_use]
    pub fn engine(&self) -> &DiffEngine {
        &self.engine
    }

    #[must_use]
    pub fn evidence_sink(&self) -> Option<&EvidenceSink> {
        self.evidence.as_ref()
    }

    /// Encode `golden` in `destination`, decode it back and diff.
    ///
    /// `source` only labels the golden graph in error messages. Encode and
    /// decode failures are returned as errors; a non-empty diff is not an
    /// error.
    pub fn verify_round_trip(
        &self,
        golden: &NodeList,
        source: &FormatDescriptor,
        destination: &FormatDescriptor,
    ) -> Result<RoundTrip> {
        let pair = format!("{} -> {}", source.short_name(), destination.short_name());
        let adapter = self.registry.adapter(destination)?;

        let encoded = adapter
            .encode(golden, destination)
            .map_err(|e| ConformanceError::encode(pair.clone(), e))?;
        let decoded = adapter
            .decode(&encoded, destination)
            .map_err(|e| ConformanceError::decode(pair, e))?;

        let diff = self.engine.diff(golden, &decoded);
        Ok(RoundTrip {
            encoded,
            decoded,
            diff,
        })
    }

    /// Load `fixture`, run the round trip and route evidence on mismatch.
    pub fn run_fixture(
        &self,
        fixture: &Path,
        source: &FormatDescriptor,
        destination: &FormatDescriptor,
    ) -> Result<RoundTripOutcome> {
        let name = test_name(source, destination);
        let golden = self.fixtures.load(fixture)?;
        tracing::info!(
            test = %name,
            golden = %golden.path.display(),
            source = %source,
            destination = %destination,
            "running round trip"
        );

        let round_trip = self
            .verify_round_trip(&golden.graph, source, destination)
            .with_context(|| format!("fixture '{}'", golden.name))?;

        let mut evidence = None;
        if round_trip.is_equivalent() {
            tracing::info!(test = %name, fixture = %golden.name, "round trip preserved the graph");
        } else {
            tracing::warn!(
                test = %name,
                fixture = %golden.name,
                summary = %round_trip.diff.summary(),
                "round trip changed the graph"
            );
            tracing::debug!("diff:\n{}", round_trip.diff);

            if let Some(sink) = &self.evidence {
                let key = EvidenceKey::new(source.clone(), destination.clone(), &golden.name);
                match sink.persist(&key, &round_trip.encoded, &round_trip.diff) {
                    Ok(dir) => {
                        tracing::info!(evidence = %dir.display(), "evidence persisted");
                        evidence = Some(dir);
                    }
                    Err(e) => tracing::warn!("failed to persist evidence: {}", e.chain_message()),
                }
            }
        }

        Ok(RoundTripOutcome {
            name,
            fixture: golden.name,
            source: source.clone(),
            destination: destination.clone(),
            diff: round_trip.diff,
            evidence,
        })
    }
}
