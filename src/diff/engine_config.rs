//! Configuration types for the diff engine.

use crate::model::Node;
use clap::ValueEnum;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// How root element sequences are compared.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum RootOrderPolicy {
    /// Roots are a set; only membership matters
    #[default]
    Unordered,
    /// Roots are a sequence; a root at a different position is a change
    Ordered,
}

impl std::fmt::Display for RootOrderPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RootOrderPolicy::Unordered => write!(f, "unordered"),
            RootOrderPolicy::Ordered => write!(f, "ordered"),
        }
    }
}

/// Property keys masked on both sides before nodes are compared.
///
/// A pattern is either an exact key (`cdx:gomod:build:env`) or a prefix
/// followed by `*` (`hash:*`). A lone `*` masks every property.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertyFilter {
    exact: Vec<String>,
    prefixes: Vec<String>,
}

impl PropertyFilter {
    /// An empty filter that masks nothing.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a filter from patterns. Blank patterns are skipped.
    pub fn from_patterns<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut filter = Self::new();
        for pattern in patterns {
            filter.add(pattern.as_ref());
        }
        filter
    }

    /// Add one pattern.
    pub fn add(&mut self, pattern: &str) {
        let pattern = pattern.trim();
        if pattern.is_empty() {
            return;
        }
        match pattern.strip_suffix('*') {
            Some(prefix) => self.prefixes.push(prefix.to_string()),
            None => self.exact.push(pattern.to_string()),
        }
    }

    /// Whether no pattern is configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.exact.is_empty() && self.prefixes.is_empty()
    }

    /// Whether `key` is masked.
    #[must_use]
    pub fn matches(&self, key: &str) -> bool {
        self.exact.iter().any(|k| k == key) || self.prefixes.iter().any(|p| key.starts_with(p))
    }

    /// The node with masked properties removed. Borrows when nothing is masked.
    #[must_use]
    pub fn apply<'a>(&self, node: &'a Node) -> Cow<'a, Node> {
        if self.is_empty() || !node.properties.keys().any(|k| self.matches(k)) {
            return Cow::Borrowed(node);
        }
        let mut masked = node.clone();
        masked.properties.retain(|k, _| !self.matches(k));
        Cow::Owned(masked)
    }

    /// Configured patterns, in the form they were given.
    pub fn patterns(&self) -> impl Iterator<Item = String> + '_ {
        self.exact
            .iter()
            .cloned()
            .chain(self.prefixes.iter().map(|p| format!("{p}*")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_order_policy_default_is_unordered() {
        assert_eq!(RootOrderPolicy::default(), RootOrderPolicy::Unordered);
        assert_eq!(RootOrderPolicy::Ordered.to_string(), "ordered");
    }

    #[test]
    fn test_property_filter_exact_and_prefix() {
        let filter = PropertyFilter::from_patterns(["description", "hash:*", "  "]);
        assert!(filter.matches("description"));
        assert!(filter.matches("hash:sha-256"));
        assert!(!filter.matches("descriptions"));
        assert!(!filter.matches("name"));
        assert_eq!(
            filter.patterns().collect::<Vec<_>>(),
            vec!["description".to_string(), "hash:*".to_string()]
        );
    }

    #[test]
    fn test_property_filter_apply_borrows_when_untouched() {
        let filter = PropertyFilter::from_patterns(["supplier"]);
        let node = Node::new("a").with_property("name", "a");
        assert!(matches!(filter.apply(&node), Cow::Borrowed(_)));

        let node = node.with_property("supplier", "Acme");
        let masked = filter.apply(&node);
        assert!(matches!(masked, Cow::Owned(_)));
        assert_eq!(masked.property("supplier"), None);
        assert_eq!(masked.name(), Some("a"));
    }

    #[test]
    fn test_wildcard_masks_everything() {
        let filter = PropertyFilter::from_patterns(["*"]);
        assert!(filter.matches("anything"));
    }
}
