//! Root element change computer implementation.

use crate::diff::engine_config::RootOrderPolicy;
use crate::diff::traits::{ChangeComputer, RootChangeSet};
use crate::model::{NodeId, NodeList};
use std::collections::HashSet;

/// Computes root element changes under a [`RootOrderPolicy`].
#[derive(Debug, Clone, Copy, Default)]
pub struct RootChangeComputer {
    policy: RootOrderPolicy,
}

impl RootChangeComputer {
    /// Create a root change computer with the given policy.
    #[must_use]
    pub fn new(policy: RootOrderPolicy) -> Self {
        Self { policy }
    }

    /// The comparison policy in use.
    #[must_use]
    pub fn policy(&self) -> RootOrderPolicy {
        self.policy
    }
}

/// Elements of `from` not present in `other`.
fn set_difference(from: &[NodeId], other: &[NodeId]) -> Vec<NodeId> {
    let other: HashSet<&NodeId> = other.iter().collect();
    from.iter().filter(|id| !other.contains(id)).cloned().collect()
}

/// Elements of `from` whose position in `other` holds something else.
fn positional_difference(from: &[NodeId], other: &[NodeId]) -> Vec<NodeId> {
    from.iter()
        .enumerate()
        .filter(|(i, id)| other.get(*i) != Some(*id))
        .map(|(_, id)| id.clone())
        .collect()
}

impl ChangeComputer for RootChangeComputer {
    type ChangeSet = RootChangeSet;

    fn compute(&self, golden: &NodeList, candidate: &NodeList) -> RootChangeSet {
        let golden_roots = golden.root_elements();
        let candidate_roots = candidate.root_elements();

        let mut result = RootChangeSet::new();
        match self.policy {
            RootOrderPolicy::Unordered => {
                result.added = set_difference(candidate_roots, golden_roots);
                result.removed = set_difference(golden_roots, candidate_roots);
            }
            RootOrderPolicy::Ordered => {
                result.added = positional_difference(candidate_roots, golden_roots);
                result.removed = positional_difference(golden_roots, candidate_roots);
            }
        }
        result.sort();
        result
    }

    fn name(&self) -> &str {
        "RootChangeComputer"
    }
}
