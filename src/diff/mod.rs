//! Graph-equivalence diff engine.
//!
//! Two canonical graphs are compared by symmetric set difference over their
//! nodes, edges and root elements. Because nothing positional is compared
//! (unless [`RootOrderPolicy::Ordered`] is selected), the outcome does not
//! depend on the order in which a format adapter happened to emit elements.
//!
//! # Architecture
//!
//! - [`ChangeComputer`](traits::ChangeComputer): one implementation per element
//!   category, found in the [`changes`] module
//! - [`DiffEngine`]: assembles the three change sets into a [`DiffResult`]
//!
//! # Example
//!
//! ```
//! use sbom_conformance::diff::DiffEngine;
//! use sbom_conformance::model::{Node, NodeList};
//!
//! let golden = NodeList::builder()
//!     .with_node(Node::new("A").with_property("version", "1.0"))
//!     .build()
//!     .unwrap();
//! let candidate = NodeList::builder()
//!     .with_node(Node::new("A").with_property("version", "1.1"))
//!     .build()
//!     .unwrap();
//!
//! let result = DiffEngine::new().diff(&golden, &candidate);
//! assert_eq!(result.nodes.added.len(), 1);
//! assert_eq!(result.nodes.removed.len(), 1);
//! ```

pub mod changes;
mod engine;
mod engine_config;
mod result;
pub mod traits;

pub use engine::DiffEngine;
pub use engine_config::{PropertyFilter, RootOrderPolicy};
pub use result::{DiffResult, DiffSummary};
pub use traits::{ChangeComputer, ChangeSet, EdgeChangeSet, NodeChangeSet, RootChangeSet};
