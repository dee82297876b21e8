//! Format descriptors and format adapters.
//!
//! A [`FormatDescriptor`] names one wire format: schema family, version and
//! encoding. A [`FormatAdapter`] translates between that wire format and the
//! canonical [`NodeList`]. Adapters are looked up through a
//! [`FormatRegistry`], so the diff engine and the round-trip harness never
//! branch on a concrete format.
//!
//! Bundled adapters:
//!
//! - [`CycloneDxAdapter`]: CycloneDX 1.4, 1.5 and 1.6 JSON
//! - [`SpdxAdapter`]: SPDX 2.2 and 2.3 JSON
//! - [`GraphAdapter`]: the canonical graph format (JSON and YAML), lossless

mod cyclonedx;
mod graph;
mod registry;
mod spdx;

pub use crate::error::AdapterError;
pub use cyclonedx::CycloneDxAdapter;
pub use graph::GraphAdapter;
pub use registry::FormatRegistry;
pub use spdx::SpdxAdapter;

use crate::model::NodeList;
use regex::Regex;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::Read;
use std::str::FromStr;
use std::sync::LazyLock;

// ============================================================================
// Format descriptor
// ============================================================================

/// Schema family of a wire format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FormatFamily {
    CycloneDx,
    Spdx,
    /// Canonical graph format used for golden fixtures
    Graph,
}

impl FormatFamily {
    /// Short lowercase name used in test names and evidence paths.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::CycloneDx => "cyclonedx",
            Self::Spdx => "spdx",
            Self::Graph => "graph",
        }
    }

    fn mime_subtype(&self) -> &'static str {
        match self {
            Self::CycloneDx => "vnd.cyclonedx",
            Self::Spdx => "spdx",
            Self::Graph => "vnd.sbom-graph",
        }
    }

    fn mime_top_level(&self) -> &'static str {
        match self {
            Self::Spdx => "text",
            Self::CycloneDx | Self::Graph => "application",
        }
    }

    fn from_token(token: &str) -> Option<Self> {
        match token.to_ascii_lowercase().as_str() {
            "cyclonedx" | "vnd.cyclonedx" | "cdx" => Some(Self::CycloneDx),
            "spdx" => Some(Self::Spdx),
            "graph" | "sbom-graph" | "vnd.sbom-graph" => Some(Self::Graph),
            _ => None,
        }
    }
}

impl fmt::Display for FormatFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())
    }
}

/// Data serialization syntax of a wire format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Encoding {
    Json,
    Yaml,
}

impl Encoding {
    /// Lowercase name, also used as file extension.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Yaml => "yaml",
        }
    }

    fn from_token(token: &str) -> Option<Self> {
        match token.to_ascii_lowercase().as_str() {
            "json" => Some(Self::Json),
            "yaml" | "yml" => Some(Self::Yaml),
            _ => None,
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identifies a wire format: `(family, version, encoding)`.
///
/// Renders as a MIME-like string (`application/vnd.cyclonedx+json;version=1.5`)
/// and parses from either that form or the short form used in test names
/// (`cyclonedx-1.5-json`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FormatDescriptor {
    family: FormatFamily,
    version: String,
    encoding: Encoding,
}

static MIME_FORM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:application|text)/([a-z0-9.-]+)\+([a-z]+)\s*;\s*version=([0-9][0-9.]*)$")
        .expect("static regex")
});

static SHORT_FORM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([a-z-]+?)[-:@]([0-9][0-9.]*)(?:[-:]([a-z]+))?$").expect("static regex")
});

impl FormatDescriptor {
    /// Create a descriptor.
    pub fn new(family: FormatFamily, version: impl Into<String>, encoding: Encoding) -> Self {
        Self {
            family,
            version: version.into(),
            encoding,
        }
    }

    /// CycloneDX JSON of the given version.
    pub fn cyclonedx_json(version: impl Into<String>) -> Self {
        Self::new(FormatFamily::CycloneDx, version, Encoding::Json)
    }

    /// SPDX JSON of the given version.
    pub fn spdx_json(version: impl Into<String>) -> Self {
        Self::new(FormatFamily::Spdx, version, Encoding::Json)
    }

    /// Canonical graph format in JSON, the golden fixture format.
    #[must_use]
    pub fn graph_json() -> Self {
        Self::new(FormatFamily::Graph, "1", Encoding::Json)
    }

    /// Canonical graph format in YAML.
    #[must_use]
    pub fn graph_yaml() -> Self {
        Self::new(FormatFamily::Graph, "1", Encoding::Yaml)
    }

    #[must_use]
    pub fn family(&self) -> FormatFamily {
        self.family
    }

    #[must_use]
    pub fn version(&self) -> &str {
        &self.version
    }

    #[must_use]
    pub fn encoding(&self) -> Encoding {
        self.encoding
    }

    /// Schema family name (`cyclonedx`, `spdx`, `graph`).
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        self.family.type_name()
    }

    /// Short form, `<type>-<version>-<encoding>`.
    #[must_use]
    pub fn short_name(&self) -> String {
        format!("{}-{}-{}", self.type_name(), self.version, self.encoding)
    }

    /// MIME-like rendering.
    #[must_use]
    pub fn mime(&self) -> String {
        format!(
            "{}/{}+{};version={}",
            self.family.mime_top_level(),
            self.family.mime_subtype(),
            self.encoding,
            self.version
        )
    }
}

impl fmt::Display for FormatDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.mime())
    }
}

impl FromStr for FormatDescriptor {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let input = s.trim().to_ascii_lowercase();

        if let Some(caps) = MIME_FORM.captures(&input) {
            let family = FormatFamily::from_token(&caps[1])
                .ok_or_else(|| format!("unknown format family in '{s}'"))?;
            let encoding = Encoding::from_token(&caps[2])
                .ok_or_else(|| format!("unknown encoding in '{s}'"))?;
            return Ok(Self::new(family, &caps[3], encoding));
        }

        if let Some(caps) = SHORT_FORM.captures(&input) {
            let family = FormatFamily::from_token(&caps[1])
                .ok_or_else(|| format!("unknown format family in '{s}'"))?;
            let encoding = match caps.get(3) {
                Some(token) => Encoding::from_token(token.as_str())
                    .ok_or_else(|| format!("unknown encoding in '{s}'"))?,
                None => Encoding::Json,
            };
            return Ok(Self::new(family, &caps[2], encoding));
        }

        Err(format!(
            "invalid format '{s}': expected e.g. 'application/vnd.cyclonedx+json;version=1.5' or 'spdx-2.3-json'"
        ))
    }
}

impl TryFrom<String> for FormatDescriptor {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<FormatDescriptor> for String {
    fn from(value: FormatDescriptor) -> Self {
        value.mime()
    }
}

impl JsonSchema for FormatDescriptor {
    fn schema_name() -> String {
        "FormatDescriptor".to_string()
    }

    fn json_schema(gen: &mut schemars::gen::SchemaGenerator) -> schemars::schema::Schema {
        String::json_schema(gen)
    }
}

// ============================================================================
// Adapter capability
// ============================================================================

/// Translates between the canonical graph and one or more wire formats.
///
/// Implementations must be `Send + Sync`: a registry is shared across the
/// worker threads of a conformance run.
pub trait FormatAdapter: Send + Sync {
    /// Adapter name for logging and listings.
    fn name(&self) -> &str;

    /// Formats this adapter handles.
    fn formats(&self) -> Vec<FormatDescriptor>;

    /// Serialize `graph` in `format`.
    fn encode(&self, graph: &NodeList, format: &FormatDescriptor) -> Result<Vec<u8>, AdapterError>;

    /// Parse `bytes` in `format` into a canonical graph.
    fn decode(&self, bytes: &[u8], format: &FormatDescriptor) -> Result<NodeList, AdapterError>;

    /// Parse a stream. The default buffers the stream and calls [`decode`](Self::decode).
    fn decode_reader(
        &self,
        reader: &mut dyn Read,
        format: &FormatDescriptor,
    ) -> Result<NodeList, AdapterError> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        self.decode(&bytes, format)
    }

    /// Guess the exact format of a document this adapter can read.
    fn detect(&self, _bytes: &[u8]) -> Option<FormatDescriptor> {
        None
    }

    /// Whether this adapter handles `format`.
    fn supports(&self, format: &FormatDescriptor) -> bool {
        self.formats().contains(format)
    }
}

/// Reject formats an adapter was not registered for.
pub(crate) fn ensure_supported(
    adapter: &dyn FormatAdapter,
    format: &FormatDescriptor,
) -> Result<(), AdapterError> {
    if adapter.supports(format) {
        Ok(())
    } else {
        Err(AdapterError::UnsupportedFormat {
            adapter: adapter.name().to_string(),
            format: format.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mime_rendering() {
        assert_eq!(
            FormatDescriptor::cyclonedx_json("1.5").to_string(),
            "application/vnd.cyclonedx+json;version=1.5"
        );
        assert_eq!(
            FormatDescriptor::spdx_json("2.3").to_string(),
            "text/spdx+json;version=2.3"
        );
        assert_eq!(
            FormatDescriptor::graph_yaml().to_string(),
            "application/vnd.sbom-graph+yaml;version=1"
        );
    }

    #[test]
    fn test_parse_mime_form() {
        let desc: FormatDescriptor = "application/vnd.cyclonedx+json;version=1.5".parse().unwrap();
        assert_eq!(desc, FormatDescriptor::cyclonedx_json("1.5"));

        let desc: FormatDescriptor = "text/spdx+json; version=2.3".parse().unwrap();
        assert_eq!(desc, FormatDescriptor::spdx_json("2.3"));
    }

    #[test]
    fn test_parse_short_form() {
        let desc: FormatDescriptor = "cyclonedx-1.6-json".parse().unwrap();
        assert_eq!(desc, FormatDescriptor::cyclonedx_json("1.6"));

        let desc: FormatDescriptor = "spdx-2.2".parse().unwrap();
        assert_eq!(desc, FormatDescriptor::spdx_json("2.2"));

        let desc: FormatDescriptor = "graph-1-yaml".parse().unwrap();
        assert_eq!(desc, FormatDescriptor::graph_yaml());

        let desc: FormatDescriptor = "cdx:1.4".parse().unwrap();
        assert_eq!(desc.short_name(), "cyclonedx-1.4-json");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!("application/pdf".parse::<FormatDescriptor>().is_err());
        assert!("protobuf-1-json".parse::<FormatDescriptor>().is_err());
        assert!("spdx-2.3-xml".parse::<FormatDescriptor>().is_err());
        assert!("".parse::<FormatDescriptor>().is_err());
    }

    #[test]
    fn test_display_round_trips_through_parse() {
        for desc in [
            FormatDescriptor::cyclonedx_json("1.4"),
            FormatDescriptor::spdx_json("2.3"),
            FormatDescriptor::graph_json(),
            FormatDescriptor::graph_yaml(),
        ] {
            assert_eq!(desc.to_string().parse::<FormatDescriptor>(), Ok(desc.clone()));
            assert_eq!(desc.short_name().parse::<FormatDescriptor>(), Ok(desc));
        }
    }

    #[test]
    fn test_serde_as_string() {
        let desc = FormatDescriptor::spdx_json("2.3");
        let json = serde_json::to_string(&desc).unwrap();
        assert_eq!(json, "\"text/spdx+json;version=2.3\"");
        let back: FormatDescriptor = serde_json::from_str("\"spdx-2.3-json\"").unwrap();
        assert_eq!(back, desc);
    }
}
