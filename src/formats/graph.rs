//! Canonical graph format adapter.
//!
//! The document is the serde rendering of [`NodeList`] itself
//! (`nodes`, `edges`, `rootElements`), so this format is lossless.

use super::{ensure_supported, AdapterError, Encoding, FormatAdapter, FormatDescriptor};
use crate::model::NodeList;

/// Adapter for the canonical graph format in JSON and YAML.
#[derive(Debug, Clone, Copy, Default)]
pub struct GraphAdapter;

impl GraphAdapter {
    /// Create a new canonical graph adapter
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl FormatAdapter for GraphAdapter {
    fn name(&self) -> &str {
        "graph"
    }

    fn formats(&self) -> Vec<FormatDescriptor> {
        vec![FormatDescriptor::graph_json(), FormatDescriptor::graph_yaml()]
    }

    fn encode(&self, graph: &NodeList, format: &FormatDescriptor) -> Result<Vec<u8>, AdapterError> {
        ensure_supported(self, format)?;
        match format.encoding() {
            Encoding::Json => {
                let mut bytes = serde_json::to_vec_pretty(graph)?;
                bytes.push(b'\n');
                Ok(bytes)
            }
            Encoding::Yaml => Ok(serde_yaml::to_string(graph)?.into_bytes()),
        }
    }

    fn decode(&self, bytes: &[u8], format: &FormatDescriptor) -> Result<NodeList, AdapterError> {
        ensure_supported(self, format)?;
        let graph = match format.encoding() {
            Encoding::Json => serde_json::from_slice(bytes)?,
            Encoding::Yaml => serde_yaml::from_slice(bytes)?,
        };
        Ok(graph)
    }

    fn detect(&self, bytes: &[u8]) -> Option<FormatDescriptor> {
        let text = std::str::from_utf8(bytes).ok()?;
        let trimmed = text.trim_start();
        if trimmed.starts_with('{') {
            let value: serde_json::Value = serde_json::from_str(text).ok()?;
            let object = value.as_object()?;
            let looks_like_graph = object.contains_key("nodes")
                && !object.contains_key("bomFormat")
                && !object.contains_key("spdxVersion");
            looks_like_graph.then(FormatDescriptor::graph_json)
        } else {
            let value: serde_yaml::Value = serde_yaml::from_str(text).ok()?;
            value
                .get("nodes")
                .is_some()
                .then(FormatDescriptor::graph_yaml)
        }
    }
}
