//! Graph nodes and their semantic properties.

use super::NodeId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Well-known property keys understood by the bundled format adapters.
///
/// Properties outside this list are still carried by adapters whose format
/// has a generic extension slot.
pub mod keys {
    /// Component name
    pub const NAME: &str = "name";
    /// Component version
    pub const VERSION: &str = "version";
    /// Component type (`library`, `application`, ...)
    pub const TYPE: &str = "type";
    /// Package URL
    pub const PURL: &str = "purl";
    /// CPE identifier
    pub const CPE: &str = "cpe";
    /// Group / namespace
    pub const GROUP: &str = "group";
    /// Free-form description
    pub const DESCRIPTION: &str = "description";
    /// Declared license expression
    pub const LICENSE: &str = "license";
    /// Supplier name
    pub const SUPPLIER: &str = "supplier";
    /// Prefix of checksum properties, e.g. `hash:sha-256`
    pub const HASH_PREFIX: &str = "hash:";

    /// Build the property key holding a checksum for `algorithm`.
    #[must_use]
    pub fn hash(algorithm: &super::HashAlgorithm) -> String {
        format!("{HASH_PREFIX}{}", algorithm.canonical_name())
    }
}

/// A uniquely identified entity in the graph (a component, package, file...).
///
/// Equality is full-value: two nodes are equal iff their identifiers and
/// their complete property maps are equal. Property order never matters.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Node {
    /// Identifier, unique within the owning graph
    pub id: NodeId,
    /// Semantic properties keyed by property name
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: BTreeMap<String, String>,
}

impl Node {
    /// Create a node with no properties.
    pub fn new(id: impl Into<NodeId>) -> Self {
        Self {
            id: id.into(),
            properties: BTreeMap::new(),
        }
    }

    /// Builder-style property setter.
    #[must_use]
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    /// Builder-style checksum setter.
    #[must_use]
    pub fn with_hash(mut self, algorithm: &HashAlgorithm, value: impl Into<String>) -> Self {
        self.properties.insert(keys::hash(algorithm), value.into());
        self
    }

    /// Set a property, returning the previous value.
    pub fn set_property(
        &mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Option<String> {
        self.properties.insert(key.into(), value.into())
    }

    /// Get a property value.
    #[must_use]
    pub fn property(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(String::as_str)
    }

    /// Component name, if present.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.property(keys::NAME)
    }

    /// Component version, if present.
    #[must_use]
    pub fn version(&self) -> Option<&str> {
        self.property(keys::VERSION)
    }

    /// Iterate over the checksums carried by this node.
    pub fn hashes(&self) -> impl Iterator<Item = (HashAlgorithm, &str)> + '_ {
        self.properties.iter().filter_map(|(key, value)| {
            key.strip_prefix(keys::HASH_PREFIX)
                .map(|alg| (HashAlgorithm::from_canonical(alg), value.as_str()))
        })
    }

    /// Iterate over properties that are not well-known keys or checksums.
    pub fn extra_properties(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        const WELL_KNOWN: &[&str] = &[
            keys::NAME,
            keys::VERSION,
            keys::TYPE,
            keys::PURL,
            keys::CPE,
            keys::GROUP,
            keys::DESCRIPTION,
            keys::LICENSE,
            keys::SUPPLIER,
        ];
        self.properties
            .iter()
            .filter(|(key, _)| {
                !WELL_KNOWN.contains(&key.as_str()) && !key.starts_with(keys::HASH_PREFIX)
            })
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)?;
        match (self.name(), self.version()) {
            (Some(name), Some(version)) => write!(f, " ({name}@{version})"),
            (Some(name), None) => write!(f, " ({name})"),
            _ => Ok(()),
        }
    }
}

/// Checksum algorithms with their spellings in each supported format.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum HashAlgorithm {
    Md5,
    Sha1,
    Sha256,
    Sha384,
    Sha512,
    Sha3_256,
    Sha3_384,
    Sha3_512,
    Blake2b256,
    Blake2b384,
    Blake2b512,
    Blake3,
    /// Algorithm without a dedicated variant, stored lowercased
    Other(String),
}

impl HashAlgorithm {
    const TABLE: &'static [(Self, &'static str, &'static str, &'static str)] = &[
        (Self::Md5, "md5", "MD5", "MD5"),
        (Self::Sha1, "sha-1", "SHA-1", "SHA1"),
        (Self::Sha256, "sha-256", "SHA-256", "SHA256"),
        (Self::Sha384, "sha-384", "SHA-384", "SHA384"),
        (Self::Sha512, "sha-512", "SHA-512", "SHA512"),
        (Self::Sha3_256, "sha3-256", "SHA3-256", "SHA3-256"),
        (Self::Sha3_384, "sha3-384", "SHA3-384", "SHA3-384"),
        (Self::Sha3_512, "sha3-512", "SHA3-512", "SHA3-512"),
        (Self::Blake2b256, "blake2b-256", "BLAKE2b-256", "BLAKE2b-256"),
        (Self::Blake2b384, "blake2b-384", "BLAKE2b-384", "BLAKE2b-384"),
        (Self::Blake2b512, "blake2b-512", "BLAKE2b-512", "BLAKE2b-512"),
        (Self::Blake3, "blake3", "BLAKE3", "BLAKE3"),
    ];

    fn lookup(&self) -> Option<&'static (Self, &'static str, &'static str, &'static str)> {
        Self::TABLE.iter().find(|(alg, ..)| alg == self)
    }

    /// Name used in canonical property keys (`hash:<name>`).
    #[must_use]
    pub fn canonical_name(&self) -> String {
        match self {
            Self::Other(name) => name.to_lowercase(),
            known => known.lookup().map(|e| e.1.to_string()).unwrap_or_default(),
        }
    }

    /// Name used in CycloneDX `hashes[].alg`.
    #[must_use]
    pub fn cyclonedx_name(&self) -> String {
        match self {
            Self::Other(name) => name.to_uppercase(),
            known => known.lookup().map(|e| e.2.to_string()).unwrap_or_default(),
        }
    }

    /// Name used in SPDX `checksums[].algorithm`.
    #[must_use]
    pub fn spdx_name(&self) -> String {
        match self {
            Self::Other(name) => name.to_uppercase(),
            known => known.lookup().map(|e| e.3.to_string()).unwrap_or_default(),
        }
    }

    /// Parse a canonical algorithm name.
    #[must_use]
    pub fn from_canonical(name: &str) -> Self {
        Self::find(name, |e| e.1)
    }

    /// Parse a CycloneDX algorithm name (case-insensitive).
    #[must_use]
    pub fn from_cyclonedx(name: &str) -> Self {
        Self::find(name, |e| e.2)
    }

    /// Parse an SPDX algorithm name (case-insensitive).
    #[must_use]
    pub fn from_spdx(name: &str) -> Self {
        Self::find(name, |e| e.3)
    }

    fn find(
        name: &str,
        column: impl Fn(&(Self, &'static str, &'static str, &'static str)) -> &'static str,
    ) -> Self {
        Self::TABLE
            .iter()
            .find(|entry| column(*entry).eq_ignore_ascii_case(name))
            .map_or_else(|| Self::Other(name.to_lowercase()), |entry| entry.0.clone())
    }
}
