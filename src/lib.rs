//! **Round-trip conformance and graph-equivalence diffing for SBOM formats.**
//!
//! `sbom-conformance` answers one question: when a software bill of materials
//! is converted into another format and read back, is it still the same
//! dependency graph? Every document is viewed as a canonical graph of nodes,
//! typed edges and root elements; two graphs are equivalent when their node,
//! edge and root sets are equal.
//!
//! ## Core Concepts & Modules
//!
//! - **[`model`]**: the canonical graph, [`NodeList`], built through a
//!   validating [`NodeListBuilder`].
//! - **[`diff`]**: the [`DiffEngine`], which computes added and removed
//!   nodes, edges and root elements between a golden and a candidate graph.
//! - **[`formats`]**: [`FormatDescriptor`]s, the [`FormatAdapter`] trait and
//!   the [`FormatRegistry`] with the bundled CycloneDX, SPDX and graph
//!   adapters.
//! - **[`harness`]**: the [`RoundTripHarness`] (encode, decode, diff) and the
//!   [`ConformanceMatrix`] that schedules many round trips.
//! - **[`evidence`]**: the [`EvidenceSink`] that persists what a failing round
//!   trip produced.
//! - **[`config`]** and **[`reports`]**: YAML configuration and run output.
//!
//! ## Verifying a Round Trip
//!
//! ```
//! use sbom_conformance::{
//!     Edge, EdgeKind, FormatDescriptor, FormatRegistry, Node, NodeList, RoundTripHarness,
//! };
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let golden = NodeList::builder()
//!     .with_node(Node::new("app").with_property("name", "app"))
//!     .with_node(Node::new("lib").with_property("name", "lib"))
//!     .with_edge(Edge::new("app", "lib", EdgeKind::DependsOn))
//!     .with_root("app")
//!     .build()?;
//!
//! let harness = RoundTripHarness::new(FormatRegistry::with_builtin());
//! let round_trip = harness.verify_round_trip(
//!     &golden,
//!     &FormatDescriptor::graph_json(),
//!     &FormatDescriptor::cyclonedx_json("1.5"),
//! )?;
//! assert!(round_trip.diff.is_empty());
//! # Ok(())
//! # }
//! ```
//!
//! ## Command-Line Interface (CLI)
//!
//! The `sbom-conformance` binary runs configured conformance matrices, single
//! round trips and ad hoc graph diffs. See `sbom-conformance --help`.

#![warn(clippy::unwrap_used)]
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions
)]

pub mod cli;
pub mod config;
pub mod diff;
pub mod error;
pub mod evidence;
pub mod formats;
pub mod harness;
pub mod model;
pub mod reports;

// Re-export main types for convenience
pub use config::{AppConfig, AppConfigBuilder, ConfigError, ConfigPreset, Validatable};
pub use diff::{DiffEngine, DiffResult, DiffSummary, PropertyFilter, RootOrderPolicy};
pub use error::{AdapterError, ConformanceError, ErrorContext, Result};
pub use evidence::{EvidenceKey, EvidenceSink};
pub use formats::{FormatAdapter, FormatDescriptor, FormatFamily, FormatRegistry};
pub use harness::{
    ConformanceCase, ConformanceMatrix, MatrixReport, MatrixRunner, RoundTrip, RoundTripHarness,
    RoundTripOutcome, Verdict,
};
pub use model::{Edge, EdgeKind, GraphError, Node, NodeId, NodeList, NodeListBuilder};
pub use reports::{ReportFormat, ReportGenerator};
