//! Trait definitions for diff computation strategies.
//!
//! Each category of graph element (nodes, edges, root elements) is compared by
//! its own [`ChangeComputer`], so categories can be tested in isolation and the
//! engine only has to assemble their outputs.

use crate::model::{Edge, Node, NodeId, NodeList};
use serde::{Deserialize, Serialize};

/// Trait for computing a specific type of change between two graphs.
pub trait ChangeComputer: Send + Sync {
    /// The type of changes this computer produces.
    type ChangeSet;

    /// Compute changes between the golden graph and the candidate graph.
    fn compute(&self, golden: &NodeList, candidate: &NodeList) -> Self::ChangeSet;

    /// Get the name of this change computer for logging/debugging.
    fn name(&self) -> &str;
}

/// Elements present in only one of the two compared graphs.
///
/// `added` holds elements found in the candidate but not in the golden graph,
/// `removed` the reverse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeSet<T> {
    pub added: Vec<T>,
    pub removed: Vec<T>,
}

impl<T> Default for ChangeSet<T> {
    fn default() -> Self {
        Self {
            added: Vec::new(),
            removed: Vec::new(),
        }
    }
}

impl<T> ChangeSet<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.added.len() + self.removed.len()
    }

    /// Exchange `added` and `removed`, as if the two graphs had been swapped.
    pub fn swap(&mut self) {
        std::mem::swap(&mut self.added, &mut self.removed);
    }
}

impl<T: Ord> ChangeSet<T> {
    /// Sort both sides into their natural order.
    pub fn sort(&mut self) {
        self.added.sort();
        self.removed.sort();
    }
}

/// Node-level changes.
pub type NodeChangeSet = ChangeSet<Node>;

/// Edge-level changes.
pub type EdgeChangeSet = ChangeSet<Edge>;

/// Root element changes.
pub type RootChangeSet = ChangeSet<NodeId>;
