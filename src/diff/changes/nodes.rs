//! Node change computer implementation.

use crate::diff::engine_config::PropertyFilter;
use crate::diff::traits::{ChangeComputer, NodeChangeSet};
use crate::model::{Node, NodeList};
use std::borrow::Cow;
use std::collections::HashSet;

/// Computes node-level changes under full-value equality.
///
/// A node whose id is shared but whose properties differ is reported on both
/// sides; there is no "modified" bucket.
#[derive(Debug, Clone, Default)]
pub struct NodeChangeComputer {
    filter: PropertyFilter,
}

impl NodeChangeComputer {
    /// Create a new node change computer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mask the given properties before comparing.
    #[must_use]
    pub fn with_filter(mut self, filter: PropertyFilter) -> Self {
        self.filter = filter;
        self
    }

    fn masked<'a>(&self, graph: &'a NodeList) -> Vec<Cow<'a, Node>> {
        graph.nodes().map(|n| self.filter.apply(n)).collect()
    }
}

impl ChangeComputer for NodeChangeComputer {
    type ChangeSet = NodeChangeSet;

    fn compute(&self, golden: &NodeList, candidate: &NodeList) -> NodeChangeSet {
        let golden_nodes = self.masked(golden);
        let candidate_nodes = self.masked(candidate);

        let golden_set: HashSet<&Node> = golden_nodes.iter().map(|n| &**n).collect();
        let candidate_set: HashSet<&Node> = candidate_nodes.iter().map(|n| &**n).collect();

        let mut result = NodeChangeSet::new();
        result.added = candidate_nodes
            .iter()
            .map(|n| &**n)
            .filter(|n| !golden_set.contains(*n))
            .cloned()
            .collect();
        result.removed = golden_nodes
            .iter()
            .map(|n| &**n)
            .filter(|n| !candidate_set.contains(*n))
            .cloned()
            .collect();
        result.sort();
        result
    }

    fn name(&self) -> &str {
        "NodeChangeComputer"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph(nodes: Vec<Node>) -> NodeList {
        let mut builder = NodeList::builder();
        for node in nodes {
            builder.add_node(node);
        }
        builder.build().unwrap()
    }

    #[test]
    fn test_node_change_computer_name() {
        assert_eq!(NodeChangeComputer::new().name(), "NodeChangeComputer");
    }

    #[test]
    fn test_empty_graphs() {
        let result = NodeChangeComputer::new().compute(&NodeList::new(), &NodeList::new());
        assert!(result.is_empty());
    }

    #[test]
    fn test_property_change_is_replacement() {
        let golden = graph(vec![Node::new("A").with_property("version", "1.0")]);
        let candidate = graph(vec![Node::new("A").with_property("version", "1.1")]);

        let result = NodeChangeComputer::new().compute(&golden, &candidate);
        assert_eq!(result.added.len(), 1);
        assert_eq!(result.removed.len(), 1);
        assert_eq!(result.added[0].version(), Some("1.1"));
        assert_eq!(result.removed[0].version(), Some("1.0"));
    }

    #[test]
    fn test_filter_hides_masked_differences() {
        let golden = graph(vec![Node::new("A").with_property("description", "old")]);
        let candidate = graph(vec![Node::new("A")]);

        let strict = NodeChangeComputer::new().compute(&golden, &candidate);
        assert_eq!(strict.total(), 2);

        let lenient = NodeChangeComputer::new()
            .with_filter(PropertyFilter::from_patterns(["description"]))
            .compute(&golden, &candidate);
        assert!(lenient.is_empty());
    }

    #[test]
    fn test_output_is_sorted() {
        let golden = NodeList::new();
        let candidate = graph(vec![Node::new("c"), Node::new("a"), Node::new("b")]);

        let result = NodeChangeComputer::new().compute(&golden, &candidate);
        let ids: Vec<_> = result.added.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }
}
