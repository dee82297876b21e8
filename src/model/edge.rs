//! Typed, directed relationships between nodes.

use super::NodeId;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of relationship an [`Edge`] expresses.
///
/// The names follow the SPDX 2.x relationship vocabulary, rendered in
/// kebab-case in the canonical format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EdgeKind {
    /// Direct dependency
    DependsOn,
    /// Development dependency
    DevDependsOn,
    /// Build dependency
    BuildDependsOn,
    /// Test dependency
    TestDependsOn,
    /// Runtime dependency
    RuntimeDependsOn,
    /// Optional dependency
    OptionalDependsOn,
    /// Provided dependency (e.g. Java `provided` scope)
    ProvidedDependsOn,
    /// Containment (a package contains a file or sub-package)
    Contains,
    /// Document-level description
    Describes,
    /// Generation (source generates artifact)
    Generates,
    /// Ancestor of
    AncestorOf,
    /// Descendant of
    DescendantOf,
    /// Variant of
    VariantOf,
    /// Distribution artifact
    DistributionArtifact,
    /// Patch for
    PatchFor,
    /// Copy of
    CopyOf,
    /// Dynamic link
    DynamicLink,
    /// Static link
    StaticLink,
}

impl EdgeKind {
    /// All edge kinds, in declaration order.
    pub const ALL: [Self; 18] = [
        Self::DependsOn,
        Self::DevDependsOn,
        Self::BuildDependsOn,
        Self::TestDependsOn,
        Self::RuntimeDependsOn,
        Self::OptionalDependsOn,
        Self::ProvidedDependsOn,
        Self::Contains,
        Self::Describes,
        Self::Generates,
        Self::AncestorOf,
        Self::DescendantOf,
        Self::VariantOf,
        Self::DistributionArtifact,
        Self::PatchFor,
        Self::CopyOf,
        Self::DynamicLink,
        Self::StaticLink,
    ];

    /// Kebab-case name used in the canonical format.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::DependsOn => "depends-on",
            Self::DevDependsOn => "dev-depends-on",
            Self::BuildDependsOn => "build-depends-on",
            Self::TestDependsOn => "test-depends-on",
            Self::RuntimeDependsOn => "runtime-depends-on",
            Self::OptionalDependsOn => "optional-depends-on",
            Self::ProvidedDependsOn => "provided-depends-on",
            Self::Contains => "contains",
            Self::Describes => "describes",
            Self::Generates => "generates",
            Self::AncestorOf => "ancestor-of",
            Self::DescendantOf => "descendant-of",
            Self::VariantOf => "variant-of",
            Self::DistributionArtifact => "distribution-artifact",
            Self::PatchFor => "patch-for",
            Self::CopyOf => "copy-of",
            Self::DynamicLink => "dynamic-link",
            Self::StaticLink => "static-link",
        }
    }

    /// Whether this kind is one of the dependency flavours.
    #[must_use]
    pub const fn is_dependency(&self) -> bool {
        matches!(
            self,
            Self::DependsOn
                | Self::DevDependsOn
                | Self::BuildDependsOn
                | Self::TestDependsOn
                | Self::RuntimeDependsOn
                | Self::OptionalDependsOn
                | Self::ProvidedDependsOn
        )
    }
}

impl fmt::Display for EdgeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EdgeKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('_', "-");
        Self::ALL
            .iter()
            .find(|kind| kind.as_str() == normalized)
            .copied()
            .ok_or_else(|| format!("unknown edge kind '{s}'"))
    }
}

/// A directed relationship. Equality is the `(from, to, kind)` triple.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Edge {
    /// Source node
    pub from: NodeId,
    /// Target node
    pub to: NodeId,
    /// Relationship kind
    pub kind: EdgeKind,
}

impl Edge {
    /// Create a new edge.
    pub fn new(from: impl Into<NodeId>, to: impl Into<NodeId>, kind: EdgeKind) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            kind,
        }
    }

    /// Whether either endpoint is `id`.
    #[must_use]
    pub fn touches(&self, id: &NodeId) -> bool {
        &self.from == id || &self.to == id
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -[{}]-> {}", self.from, self.kind, self.to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edge_kind_round_trips_through_str() {
        for kind in EdgeKind::ALL {
            assert_eq!(kind.as_str().parse::<EdgeKind>(), Ok(kind));
        }
    }

    #[test]
    fn test_edge_kind_accepts_spdx_spelling() {
        assert_eq!("DEPENDS_ON".parse::<EdgeKind>(), Ok(EdgeKind::DependsOn));
        assert_eq!(
            "dynamic_link".parse::<EdgeKind>(),
            Ok(EdgeKind::DynamicLink)
        );
        assert!("FRIEND_OF".parse::<EdgeKind>().is_err());
    }

    #[test]
    fn test_edge_kind_serde_matches_as_str() {
        let json = serde_json::to_string(&EdgeKind::OptionalDependsOn).unwrap();
        assert_eq!(json, "\"optional-depends-on\"");
    }

    #[test]
    fn test_edge_equality_is_triple() {
        let a = Edge::new("a", "b", EdgeKind::DependsOn);
        assert_eq!(a, Edge::new("a", "b", EdgeKind::DependsOn));
        assert_ne!(a, Edge::new("a", "b", EdgeKind::Contains));
        assert_ne!(a, Edge::new("b", "a", EdgeKind::DependsOn));
        assert_eq!(a.to_string(), "a -[depends-on]-> b");
    }
}
