//! Node identifiers.
//!
//! A [`NodeId`] is the stable identifier of a node inside one graph. It is an
//! opaque string: `bom-ref` values in CycloneDX, `SPDXID`s in SPDX, and
//! arbitrary keys in the canonical graph format all map onto it unchanged.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// Identifier of a node, unique within a single [`NodeList`](super::NodeList).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    /// Create a node identifier.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Get the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the identifier is empty (never valid inside a graph).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }

    /// Consume the identifier, returning the inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for NodeId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&String> for NodeId {
    fn from(value: &String) -> Self {
        Self(value.clone())
    }
}

impl Borrow<str> for NodeId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for NodeId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_node_id_display_and_borrow() {
        let id = NodeId::new("pkg:npm/lodash@4.17.21");
        assert_eq!(id.to_string(), "pkg:npm/lodash@4.17.21");

        let mut map: HashMap<NodeId, u32> = HashMap::new();
        map.insert(id, 1);
        assert_eq!(map.get("pkg:npm/lodash@4.17.21"), Some(&1));
    }

    #[test]
    fn test_node_id_empty() {
        assert!(NodeId::new("").is_empty());
        assert!(NodeId::new("   ").is_empty());
        assert!(!NodeId::new("a").is_empty());
    }

    #[test]
    fn test_node_id_serializes_as_plain_string() {
        let id = NodeId::from("SPDXRef-Package-curl");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"SPDXRef-Package-curl\"");
    }
}
