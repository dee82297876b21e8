//! Canonical graph model for SBOM documents.
//!
//! Every format adapter decodes into, and encodes from, the structures defined
//! here. A document is reduced to a [`NodeList`]: a set of uniquely identified
//! [`Node`]s, a set of typed [`Edge`]s between them, and the ordered sequence of
//! root elements that the document describes.
//!
//! ```
//! use sbom_conformance::model::{Edge, EdgeKind, Node, NodeList};
//!
//! let graph = NodeList::builder()
//!     .with_node(Node::new("app").with_property("name", "app"))
//!     .with_node(Node::new("lib").with_property("name", "lib"))
//!     .with_edge(Edge::new("app", "lib", EdgeKind::DependsOn))
//!     .with_root("app")
//!     .build()
//!     .expect("graph is well formed");
//!
//! assert_eq!(graph.node_count(), 2);
//! assert_eq!(graph.dependencies_of(&"app".into()).count(), 1);
//! ```

mod edge;
mod graph;
mod identifiers;
mod node;

pub use edge::*;
pub use graph::*;
pub use identifiers::*;
pub use node::*;
