//! Diff result structures.

use super::traits::{EdgeChangeSet, NodeChangeSet, RootChangeSet};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome of comparing a golden graph with a candidate graph.
///
/// "Added" means present in the candidate but not in the golden graph;
/// "removed" means the reverse. An empty result means the two graphs are
/// semantically equivalent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiffResult {
    /// Node changes (a property change shows up on both sides)
    pub nodes: NodeChangeSet,
    /// Edge changes
    pub edges: EdgeChangeSet,
    /// Root element changes
    pub root_elements: RootChangeSet,
}

impl DiffResult {
    /// Create an empty diff result
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the compared graphs are equivalent.
    ///
    /// This is the single conformance predicate: all six sequences are empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty() && self.root_elements.is_empty()
    }

    /// Per-category counts.
    #[must_use]
    pub fn summary(&self) -> DiffSummary {
        DiffSummary {
            nodes_added: self.nodes.added.len(),
            nodes_removed: self.nodes.removed.len(),
            edges_added: self.edges.added.len(),
            edges_removed: self.edges.removed.len(),
            roots_added: self.root_elements.added.len(),
            roots_removed: self.root_elements.removed.len(),
        }
    }

    /// The result of the same comparison with golden and candidate swapped.
    #[must_use]
    pub fn swap(mut self) -> Self {
        self.nodes.swap();
        self.edges.swap();
        self.root_elements.swap();
        self
    }

    /// Pretty JSON rendering, as persisted in evidence.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Summary counts of a [`DiffResult`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiffSummary {
    pub nodes_added: usize,
    pub nodes_removed: usize,
    pub edges_added: usize,
    pub edges_removed: usize,
    pub roots_added: usize,
    pub roots_removed: usize,
}

impl DiffSummary {
    /// Total number of differing elements.
    #[must_use]
    pub fn total(&self) -> usize {
        self.nodes_added
            + self.nodes_removed
            + self.edges_added
            + self.edges_removed
            + self.roots_added
            + self.roots_removed
    }
}

impl fmt::Display for DiffSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "nodes +{}/-{}, edges +{}/-{}, roots +{}/-{}",
            self.nodes_added,
            self.nodes_removed,
            self.edges_added,
            self.edges_removed,
            self.roots_added,
            self.roots_removed
        )
    }
}

fn write_section<T: fmt::Display>(
    f: &mut fmt::Formatter<'_>,
    title: &str,
    added: &[T],
    removed: &[T],
) -> fmt::Result {
    if added.is_empty() && removed.is_empty() {
        return Ok(());
    }
    writeln!(f, "{title}:")?;
    for item in removed {
        writeln!(f, "  - {item}")?;
    }
    for item in added {
        writeln!(f, "  + {item}")?;
    }
    Ok(())
}

impl fmt::Display for DiffResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return writeln!(f, "no differences");
        }
        write_section(f, "nodes", &self.nodes.added, &self.nodes.removed)?;
        write_section(f, "edges", &self.edges.added, &self.edges.removed)?;
        write_section(
            f,
            "root elements",
            &self.root_elements.added,
            &self.root_elements.removed,
        )
    }
}
