//! Graph-equivalence diff engine implementation.

use super::changes::{EdgeChangeComputer, NodeChangeComputer, RootChangeComputer};
use super::engine_config::{PropertyFilter, RootOrderPolicy};
use super::traits::ChangeComputer;
use super::DiffResult;
use crate::model::NodeList;

/// Set-based diff engine for canonical graphs.
///
/// Comparison is insensitive to the storage order of nodes and edges, and to
/// root order under [`RootOrderPolicy::Unordered`]. The engine is pure and
/// `Send + Sync`, so one instance can be shared across worker threads.
#[derive(Debug, Clone, Default)]
pub struct DiffEngine {
    root_order: RootOrderPolicy,
    ignored_properties: PropertyFilter,
}

impl DiffEngine {
    /// Create a new diff engine with default settings
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the root element comparison policy
    #[must_use]
    pub fn with_root_order(mut self, policy: RootOrderPolicy) -> Self {
        self.root_order = policy;
        self
    }

    /// Mask property keys on both sides before comparing nodes
    #[must_use]
    pub fn with_ignored_properties(mut self, filter: PropertyFilter) -> Self {
        self.ignored_properties = filter;
        self
    }

    /// The configured root element policy
    #[must_use]
    pub fn root_order(&self) -> RootOrderPolicy {
        self.root_order
    }

    /// The configured property mask
    #[must_use]
    pub fn ignored_properties(&self) -> &PropertyFilter {
        &self.ignored_properties
    }

    /// Compare a golden graph with a candidate graph.
    #[must_use]
    pub fn diff(&self, golden: &NodeList, candidate: &NodeList) -> DiffResult {
        let nodes = NodeChangeComputer::new().with_filter(self.ignored_properties.clone());
        let edges = EdgeChangeComputer::new();
        let roots = RootChangeComputer::new(self.root_order);

        let result = DiffResult {
            nodes: nodes.compute(golden, candidate),
            edges: edges.compute(golden, candidate),
            root_elements: roots.compute(golden, candidate),
        };

        tracing::debug!(
            summary = %result.summary(),
            policy = %self.root_order,
            golden = %golden.fingerprint_hex(),
            candidate = %candidate.fingerprint_hex(),
            "computed graph diff"
        );
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Edge, EdgeKind, Node, NodeId};

    fn golden() -> NodeList {
        NodeList::builder()
            .with_node(Node::new("A").with_property("name", "a"))
            .with_node(Node::new("B").with_property("name", "b"))
            .with_edge(Edge::new("A", "B", EdgeKind::DependsOn))
            .with_root("A")
            .build()
            .unwrap()
    }

    #[test]
    fn test_identical_graphs() {
        let engine = DiffEngine::new();
        assert!(engine.diff(&golden(), &golden()).is_empty());
        assert!(engine.diff(&NodeList::new(), &NodeList::new()).is_empty());
    }

    #[test]
    fn test_dropped_node_and_edge() {
        let mut builder = golden().into_builder();
        builder.remove_node(&"B".into());
        let candidate = builder.build().unwrap();

        let result = DiffEngine::new().diff(&golden(), &candidate);
        assert_eq!(result.nodes.removed.len(), 1);
        assert_eq!(result.nodes.removed[0].id, NodeId::from("B"));
        assert_eq!(
            result.edges.removed,
            vec![Edge::new("A", "B", EdgeKind::DependsOn)]
        );
        assert!(result.root_elements.is_empty());
        assert!(result.nodes.added.is_empty());
    }

    #[test]
    fn test_root_policy_applies() {
        let two_roots = |first: &str, second: &str| {
            NodeList::builder()
                .with_node(Node::new("A"))
                .with_node(Node::new("B"))
                .with_root(first)
                .with_root(second)
                .build()
                .unwrap()
        };
        let ab = two_roots("A", "B");
        let ba = two_roots("B", "A");

        assert!(DiffEngine::new().diff(&ab, &ba).is_empty());
        let ordered = DiffEngine::new().with_root_order(RootOrderPolicy::Ordered);
        assert_eq!(ordered.diff(&ab, &ba).root_elements.total(), 4);
    }

    #[test]
    fn test_ignored_properties() {
        let candidate = NodeList::builder()
            .with_node(
                Node::new("A")
                    .with_property("name", "a")
                    .with_property("supplier", "Acme"),
            )
            .with_node(Node::new("B").with_property("name", "b"))
            .with_edge(Edge::new("A", "B", EdgeKind::DependsOn))
            .with_root("A")
            .build()
            .unwrap();

        assert!(!DiffEngine::new().diff(&golden(), &candidate).is_empty());
        let lenient = DiffEngine::new()
            .with_ignored_properties(PropertyFilter::from_patterns(["supplier"]));
        assert!(lenient.diff(&golden(), &candidate).is_empty());
    }

    #[test]
    fn test_control_characters_in_values_are_compared() {
        let golden = NodeList::builder()
            .with_node(Node::new("A").with_property("k", "v").with_property("k2", "v2"))
            .build()
            .unwrap();
        let candidate = NodeList::builder()
            .with_node(Node::new("A").with_property("k", "v\u{1e}k2\u{1f}v2"))
            .build()
            .unwrap();

        let result = DiffEngine::new().diff(&golden, &candidate);
        assert_eq!(result.nodes.added.len(), 1);
        assert_eq!(result.nodes.removed.len(), 1);
        assert_eq!(result.nodes.added[0].property("k"), Some("v\u{1e}k2\u{1f}v2"));
    }

    #[test]
    fn test_reordered_graph_is_equivalent() {
        let reordered = NodeList::builder()
            .with_node(Node::new("B").with_property("name", "b"))
            .with_node(Node::new("A").with_property("name", "a"))
            .with_edge(Edge::new("A", "B", EdgeKind::DependsOn))
            .with_root("A")
            .build()
            .unwrap();
        assert!(DiffEngine::new().diff(&golden(), &reordered).is_empty());
    }
}
