//! Edge change computer implementation.

use crate::diff::traits::{ChangeComputer, EdgeChangeSet};
use crate::model::{Edge, NodeList};
use std::collections::HashSet;

/// Computes edge-level changes keyed by the `(from, to, kind)` triple.
#[derive(Debug, Clone, Copy, Default)]
pub struct EdgeChangeComputer;

impl EdgeChangeComputer {
    /// Create a new edge change computer.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl ChangeComputer for EdgeChangeComputer {
    type ChangeSet = EdgeChangeSet;

    fn compute(&self, golden: &NodeList, candidate: &NodeList) -> EdgeChangeSet {
        let golden_edges: HashSet<&Edge> = golden.edges().collect();
        let candidate_edges: HashSet<&Edge> = candidate.edges().collect();

        let mut result = EdgeChangeSet::new();
        result.added = candidate
            .edges()
            .filter(|e| !golden_edges.contains(e))
            .cloned()
            .collect();
        result.removed = golden
            .edges()
            .filter(|e| !candidate_edges.contains(e))
            .cloned()
            .collect();
        result.sort();
        result
    }

    fn name(&self) -> &str {
        "EdgeChangeComputer"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{EdgeKind, Node};

    fn graph(edges: &[(&str, &str, EdgeKind)]) -> NodeList {
        let mut builder = NodeList::builder();
        for id in ["a", "b", "c"] {
            builder.add_node(Node::new(id));
        }
        for (from, to, kind) in edges {
            builder.add_edge(Edge::new(*from, *to, *kind));
        }
        builder.build().unwrap()
    }

    #[test]
    fn test_edge_change_computer_name() {
        assert_eq!(EdgeChangeComputer::new().name(), "EdgeChangeComputer");
    }

    #[test]
    fn test_kind_is_part_of_identity() {
        let golden = graph(&[("a", "b", EdgeKind::DependsOn)]);
        let candidate = graph(&[("a", "b", EdgeKind::Contains)]);

        let result = EdgeChangeComputer::new().compute(&golden, &candidate);
        assert_eq!(result.added, vec![Edge::new("a", "b", EdgeKind::Contains)]);
        assert_eq!(result.removed, vec![Edge::new("a", "b", EdgeKind::DependsOn)]);
    }

    #[test]
    fn test_edge_order_is_irrelevant() {
        let golden = graph(&[("a", "b", EdgeKind::DependsOn), ("b", "c", EdgeKind::DependsOn)]);
        let candidate = graph(&[("b", "c", EdgeKind::DependsOn), ("a", "b", EdgeKind::DependsOn)]);

        assert!(EdgeChangeComputer::new().compute(&golden, &candidate).is_empty());
    }
}
