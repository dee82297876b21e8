//! The canonical graph (`NodeList`) and its builder.

use super::{Edge, Node, NodeId};
use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use xxhash_rust::xxh3::xxh3_128;

/// Violations of the graph invariants.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum GraphError {
    #[error("node identifier must not be empty")]
    EmptyNodeId,

    #[error("duplicate node identifier: {0}")]
    DuplicateNode(NodeId),

    #[error("edge {edge} references unknown node {missing}")]
    DanglingEdge { edge: Edge, missing: NodeId },

    #[error("root element references unknown node {0}")]
    DanglingRoot(NodeId),
}

/// Canonical in-memory SBOM graph.
///
/// Owns a set of nodes, a set of edges and the ordered root element sequence.
/// Every edge endpoint and every root references a node of the same graph;
/// this is checked once when the graph is built (or deserialized) and the
/// graph is immutable afterwards.
///
/// Storage order is insertion order. It is preserved for serialization but
/// never consulted when graphs are compared.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(try_from = "NodeListRepr", into = "NodeListRepr")]
pub struct NodeList {
    nodes: IndexMap<NodeId, Node>,
    edges: IndexSet<Edge>,
    root_elements: Vec<NodeId>,
}

impl NodeList {
    /// Create an empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start building a graph.
    #[must_use]
    pub fn builder() -> NodeListBuilder {
        NodeListBuilder::default()
    }

    /// Turn this graph back into a builder, e.g. to derive a mutated copy.
    #[must_use]
    pub fn into_builder(self) -> NodeListBuilder {
        NodeListBuilder {
            nodes: self.nodes,
            edges: self.edges,
            root_elements: self.root_elements,
            duplicates: Vec::new(),
        }
    }

    /// Iterate over nodes in storage order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> + '_ {
        self.nodes.values()
    }

    /// Iterate over edges in storage order.
    pub fn edges(&self) -> impl Iterator<Item = &Edge> + '_ {
        self.edges.iter()
    }

    /// Root element identifiers in declared order.
    #[must_use]
    pub fn root_elements(&self) -> &[NodeId] {
        &self.root_elements
    }

    /// Look up a node by identifier.
    #[must_use]
    pub fn node(&self, id: &NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// Whether a node with this identifier exists.
    #[must_use]
    pub fn contains_node(&self, id: &NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Number of nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Whether the graph has no nodes, edges or roots.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty() && self.root_elements.is_empty()
    }

    /// Outgoing edges of `id`.
    pub fn dependencies_of<'a>(&'a self, id: &'a NodeId) -> impl Iterator<Item = &'a Edge> + 'a {
        self.edges.iter().filter(move |e| &e.from == id)
    }

    /// Incoming edges of `id`.
    pub fn dependents_of<'a>(&'a self, id: &'a NodeId) -> impl Iterator<Item = &'a Edge> + 'a {
        self.edges.iter().filter(move |e| &e.to == id)
    }

    /// Order-insensitive content digest, for logs and evidence.
    ///
    /// Nodes and edges are hashed in sorted order, so two graphs that differ
    /// only in storage order share a fingerprint. Root elements are hashed in
    /// declared order. Every string is length-prefixed. Equivalence is never
    /// decided by this value; use the diff engine.
    #[must_use]
    pub fn fingerprint(&self) -> u128 {
        let mut nodes: Vec<&Node> = self.nodes.values().collect();
        nodes.sort();
        let mut edges: Vec<&Edge> = self.edges.iter().collect();
        edges.sort();

        let mut input = Vec::new();
        push_len(&mut input, nodes.len());
        for node in nodes {
            push_str(&mut input, node.id.as_str());
            push_len(&mut input, node.properties.len());
            for (key, value) in &node.properties {
                push_str(&mut input, key);
                push_str(&mut input, value);
            }
        }
        push_len(&mut input, edges.len());
        for edge in edges {
            push_str(&mut input, edge.from.as_str());
            push_str(&mut input, edge.to.as_str());
            push_str(&mut input, edge.kind.as_str());
        }
        push_len(&mut input, self.root_elements.len());
        for root in &self.root_elements {
            push_str(&mut input, root.as_str());
        }

        xxh3_128(&input)
    }

    /// Fingerprint rendered as 32 lowercase hex digits.
    #[must_use]
    pub fn fingerprint_hex(&self) -> String {
        format!("{:032x}", self.fingerprint())
    }
}

fn push_len(buf: &mut Vec<u8>, len: usize) {
    buf.extend((len as u64).to_le_bytes());
}

fn push_str(buf: &mut Vec<u8>, s: &str) {
    push_len(buf, s.len());
    buf.extend(s.as_bytes());
}

/// Incremental constructor for [`NodeList`].
///
/// Additions never fail; all invariant checks happen in [`build`](Self::build)
/// so decoders can feed elements in document order without caring whether an
/// edge is seen before its endpoints.
#[derive(Debug, Clone, Default)]
#[must_use]
pub struct NodeListBuilder {
    nodes: IndexMap<NodeId, Node>,
    edges: IndexSet<Edge>,
    root_elements: Vec<NodeId>,
    duplicates: Vec<NodeId>,
}

impl NodeListBuilder {
    /// Add a node. A second node with the same id is reported by `build`.
    pub fn add_node(&mut self, node: Node) -> &mut Self {
        if self.nodes.contains_key(&node.id) {
            self.duplicates.push(node.id.clone());
        } else {
            self.nodes.insert(node.id.clone(), node);
        }
        self
    }

    /// Add an edge. Repeated edges collapse into one.
    pub fn add_edge(&mut self, edge: Edge) -> &mut Self {
        self.edges.insert(edge);
        self
    }

    /// Append a root element. Repeated roots keep their first position.
    pub fn add_root(&mut self, id: impl Into<NodeId>) -> &mut Self {
        let id = id.into();
        if !self.root_elements.contains(&id) {
            self.root_elements.push(id);
        }
        self
    }

    /// Chaining form of [`add_node`](Self::add_node).
    pub fn with_node(mut self, node: Node) -> Self {
        self.add_node(node);
        self
    }

    /// Chaining form of [`add_edge`](Self::add_edge).
    pub fn with_edge(mut self, edge: Edge) -> Self {
        self.add_edge(edge);
        self
    }

    /// Chaining form of [`add_root`](Self::add_root).
    pub fn with_root(mut self, id: impl Into<NodeId>) -> Self {
        self.add_root(id);
        self
    }

    /// Remove a node together with every edge and root that references it.
    pub fn remove_node(&mut self, id: &NodeId) -> Option<Node> {
        let removed = self.nodes.shift_remove(id)?;
        self.edges.retain(|e| !e.touches(id));
        self.root_elements.retain(|r| r != id);
        Some(removed)
    }

    /// Remove a single edge.
    pub fn remove_edge(&mut self, edge: &Edge) -> bool {
        self.edges.shift_remove(edge)
    }

    /// Mutable access to a node already added.
    pub fn node_mut(&mut self, id: &NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id)
    }

    /// Whether a node with this id has been added.
    #[must_use]
    pub fn contains_node(&self, id: &NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Validate the invariants and produce the immutable graph.
    pub fn build(self) -> Result<NodeList, GraphError> {
        if let Some(dup) = self.duplicates.into_iter().next() {
            return Err(GraphError::DuplicateNode(dup));
        }
        if self.nodes.keys().any(NodeId::is_empty) {
            return Err(GraphError::EmptyNodeId);
        }
        for edge in &self.edges {
            for endpoint in [&edge.from, &edge.to] {
                if !self.nodes.contains_key(endpoint) {
                    return Err(GraphError::DanglingEdge {
                        edge: edge.clone(),
                        missing: endpoint.clone(),
                    });
                }
            }
        }
        if let Some(root) = self
            .root_elements
            .iter()
            .find(|r| !self.nodes.contains_key(*r))
        {
            return Err(GraphError::DanglingRoot(root.clone()));
        }

        Ok(NodeList {
            nodes: self.nodes,
            edges: self.edges,
            root_elements: self.root_elements,
        })
    }
}

/// Serialized shape of a [`NodeList`] in the canonical graph format.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NodeListRepr {
    #[serde(default)]
    nodes: Vec<Node>,
    #[serde(default)]
    edges: Vec<Edge>,
    #[serde(default)]
    root_elements: Vec<NodeId>,
}

impl TryFrom<NodeListRepr> for NodeList {
    type Error = GraphError;

    fn try_from(repr: NodeListRepr) -> Result<Self, Self::Error> {
        let mut builder = NodeList::builder();
        for node in repr.nodes {
            builder.add_node(node);
        }
        for edge in repr.edges {
            builder.add_edge(edge);
        }
        for root in repr.root_elements {
            builder.add_root(root);
        }
        builder.build()
    }
}

impl From<NodeList> for NodeListRepr {
    fn from(list: NodeList) -> Self {
        Self {
            nodes: list.nodes.into_values().collect(),
            edges: list.edges.into_iter().collect(),
            root_elements: list.root_elements,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::EdgeKind;

    fn sample() -> NodeList {
        NodeList::builder()
            .with_node(Node::new("A").with_property("name", "a"))
            .with_node(Node::new("B").with_property("name", "b"))
            .with_edge(Edge::new("A", "B", EdgeKind::DependsOn))
            .with_root("A")
            .build()
            .unwrap()
    }

    #[test]
    fn test_build_valid_graph() {
        let graph = sample();
        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.root_elements(), &[NodeId::from("A")]);
        assert!(graph.contains_node(&"B".into()));
    }

    #[test]
    fn test_duplicate_node_rejected() {
        let err = NodeList::builder()
            .with_node(Node::new("A"))
            .with_node(Node::new("A").with_property("name", "other"))
            .build()
            .unwrap_err();
        assert_eq!(err, GraphError::DuplicateNode("A".into()));
    }

    #[test]
    fn test_dangling_edge_rejected() {
        let err = NodeList::builder()
            .with_node(Node::new("A"))
            .with_edge(Edge::new("A", "Z", EdgeKind::DependsOn))
            .build()
            .unwrap_err();
        assert!(matches!(err, GraphError::DanglingEdge { missing, .. } if missing.as_str() == "Z"));
    }

    #[test]
    fn test_dangling_root_rejected() {
        let err = NodeList::builder()
            .with_node(Node::new("A"))
            .with_root("B")
            .build()
            .unwrap_err();
        assert_eq!(err, GraphError::DanglingRoot("B".into()));
    }

    #[test]
    fn test_empty_node_id_rejected() {
        let err = NodeList::builder().with_node(Node::new("")).build().unwrap_err();
        assert_eq!(err, GraphError::EmptyNodeId);
    }

    #[test]
    fn test_repeated_edges_and_roots_collapse() {
        let graph = NodeList::builder()
            .with_node(Node::new("A"))
            .with_node(Node::new("B"))
            .with_edge(Edge::new("A", "B", EdgeKind::DependsOn))
            .with_edge(Edge::new("A", "B", EdgeKind::DependsOn))
            .with_root("A")
            .with_root("A")
            .build()
            .unwrap();
        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.root_elements().len(), 1);
    }

    #[test]
    fn test_remove_node_drops_incident_edges_and_roots() {
        let mut builder = sample().into_builder();
        let removed = builder.remove_node(&"A".into());
        assert!(removed.is_some());
        let graph = builder.build().unwrap();
        assert_eq!(graph.node_count(), 1);
        assert_eq!(graph.edge_count(), 0);
        assert!(graph.root_elements().is_empty());
    }

    #[test]
    fn test_fingerprint_ignores_storage_order() {
        let forward = sample();
        let reversed = NodeList::builder()
            .with_node(Node::new("B").with_property("name", "b"))
            .with_node(Node::new("A").with_property("name", "a"))
            .with_edge(Edge::new("A", "B", EdgeKind::DependsOn))
            .with_root("A")
            .build()
            .unwrap();
        assert_eq!(forward.fingerprint(), reversed.fingerprint());
        assert_eq!(forward.fingerprint_hex().len(), 32);
    }

    #[test]
    fn test_fingerprint_changes_with_properties() {
        let changed = NodeList::builder()
            .with_node(Node::new("A").with_property("name", "a"))
            .with_node(Node::new("B").with_property("name", "b2"))
            .with_edge(Edge::new("A", "B", EdgeKind::DependsOn))
            .with_root("A")
            .build()
            .unwrap();
        assert_ne!(sample().fingerprint(), changed.fingerprint());
    }

    #[test]
    fn test_fingerprint_separators_in_values() {
        let split = NodeList::builder()
            .with_node(Node::new("A").with_property("k", "v").with_property("k2", "v2"))
            .build()
            .unwrap();
        let joined = NodeList::builder()
            .with_node(Node::new("A").with_property("k", "v\u{1e}k2\u{1f}v2"))
            .build()
            .unwrap();
        assert_ne!(split.fingerprint(), joined.fingerprint());
    }

    #[test]
    fn test_serde_round_trip_and_validation() {
        let json = serde_json::to_string(&sample()).unwrap();
        assert!(json.contains("\"rootElements\":[\"A\"]"));
        let back: NodeList = serde_json::from_str(&json).unwrap();
        assert_eq!(back.fingerprint(), sample().fingerprint());

        let invalid = r#"{"nodes":[{"id":"A"}],"edges":[{"from":"A","to":"B","kind":"depends-on"}]}"#;
        assert!(serde_json::from_str::<NodeList>(invalid).is_err());
    }

    #[test]
    fn test_dependency_queries() {
        let graph = sample();
        let a = NodeId::from("A");
        let b = NodeId::from("B");
        assert_eq!(graph.dependencies_of(&a).count(), 1);
        assert_eq!(graph.dependents_of(&b).count(), 1);
        assert_eq!(graph.dependents_of(&a).count(), 0);
    }
}
