//! Registry of format adapters keyed by format descriptor.

use super::{
    CycloneDxAdapter, FormatAdapter, FormatDescriptor, GraphAdapter, SpdxAdapter,
};
use crate::error::{ConformanceError, Result};
use indexmap::IndexMap;
use std::sync::Arc;

/// Maps each known [`FormatDescriptor`] to the adapter that handles it.
///
/// The registry is an explicit value handed to the harness; there is no
/// process-wide format list. Registration order is preserved and determines
/// the order of [`list`](Self::list) and of the full conformance matrix.
#[derive(Clone, Default)]
pub struct FormatRegistry {
    adapters: IndexMap<FormatDescriptor, Arc<dyn FormatAdapter>>,
}

impl FormatRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with the bundled CycloneDX, SPDX and graph adapters.
    #[must_use]
    pub fn with_builtin() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(CycloneDxAdapter::new()));
        registry.register(Arc::new(SpdxAdapter::new()));
        registry.register(Arc::new(GraphAdapter::new()));
        registry
    }

    /// Register an adapter for every format it declares.
    ///
    /// A later registration for the same format replaces the earlier one.
    pub fn register(&mut self, adapter: Arc<dyn FormatAdapter>) -> &mut Self {
        for format in adapter.formats() {
            if let Some(previous) = self.adapters.insert(format.clone(), Arc::clone(&adapter)) {
                tracing::debug!(
                    format = %format,
                    previous = previous.name(),
                    adapter = adapter.name(),
                    "format adapter replaced"
                );
            }
        }
        self
    }

    /// Look up the adapter for `format`.
    pub fn adapter(&self, format: &FormatDescriptor) -> Result<&dyn FormatAdapter> {
        self.adapters
            .get(format)
            .map(|adapter| &**adapter)
            .ok_or_else(|| ConformanceError::unknown_format(format))
    }

    /// Whether an adapter is registered for `format`.
    #[must_use]
    pub fn contains(&self, format: &FormatDescriptor) -> bool {
        self.adapters.contains_key(format)
    }

    /// Registered formats in registration order.
    pub fn list(&self) -> impl Iterator<Item = &FormatDescriptor> + '_ {
        self.adapters.keys()
    }

    /// Registered formats together with the name of their adapter.
    pub fn entries(&self) -> impl Iterator<Item = (&FormatDescriptor, &str)> + '_ {
        self.adapters.iter().map(|(f, a)| (f, a.name()))
    }

    /// Number of registered formats.
    #[must_use]
    pub fn len(&self) -> usize {
        self.adapters.len()
    }

    /// Whether no format is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.adapters.is_empty()
    }

    /// Guess the format of a document by asking each adapter in turn.
    ///
    /// Only formats that are actually registered are returned.
    #[must_use]
    pub fn detect(&self, bytes: &[u8]) -> Option<FormatDescriptor> {
        let mut asked: Vec<&str> = Vec::new();
        for adapter in self.adapters.values() {
            if asked.contains(&adapter.name()) {
                continue;
            }
            asked.push(adapter.name());
            if let Some(format) = adapter.detect(bytes) {
                if self.contains(&format) {
                    return Some(format);
                }
            }
        }
        None
    }
}

impl std::fmt::Debug for FormatRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map().entries(self.entries()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formats::AdapterError;
    use crate::model::NodeList;

    struct NullAdapter;

    impl FormatAdapter for NullAdapter {
        fn name(&self) -> &str {
            "null"
        }

        fn formats(&self) -> Vec<FormatDescriptor> {
            vec![FormatDescriptor::spdx_json("2.3")]
        }

        fn encode(
            &self,
            _graph: &NodeList,
            _format: &FormatDescriptor,
        ) -> std::result::Result<Vec<u8>, AdapterError> {
            Ok(Vec::new())
        }

        fn decode(
            &self,
            _bytes: &[u8],
            _format: &FormatDescriptor,
        ) -> std::result::Result<NodeList, AdapterError> {
            Ok(NodeList::new())
        }
    }

    #[test]
    fn test_builtin_formats() {
        let registry = FormatRegistry::with_builtin();
        let names: Vec<String> = registry.list().map(FormatDescriptor::short_name).collect();
        assert_eq!(
            names,
            vec![
                "cyclonedx-1.4-json",
                "cyclonedx-1.5-json",
                "cyclonedx-1.6-json",
                "spdx-2.2-json",
                "spdx-2.3-json",
                "graph-1-json",
                "graph-1-yaml",
            ]
        );
        assert_eq!(registry.len(), 7);
    }

    #[test]
    fn test_unknown_format() {
        let registry = FormatRegistry::with_builtin();
        let err = registry
            .adapter(&FormatDescriptor::cyclonedx_json("1.2"))
            .err()
            .unwrap();
        assert!(matches!(err, ConformanceError::UnknownFormat(_)));
    }

    #[test]
    fn test_register_replaces_adapter() {
        let mut registry = FormatRegistry::with_builtin();
        registry.register(Arc::new(NullAdapter));
        let adapter = registry.adapter(&FormatDescriptor::spdx_json("2.3")).unwrap();
        assert_eq!(adapter.name(), "null");
        assert_eq!(registry.len(), 7);
    }

    #[test]
    fn test_detect_only_registered_formats() {
        let registry = FormatRegistry::with_builtin();
        let cdx = br#"{"bomFormat":"CycloneDX","specVersion":"1.5"}"#;
        assert_eq!(
            registry.detect(cdx),
            Some(FormatDescriptor::cyclonedx_json("1.5"))
        );

        let old = br#"{"bomFormat":"CycloneDX","specVersion":"1.2"}"#;
        assert_eq!(registry.detect(old), None);
        assert_eq!(FormatRegistry::new().detect(cdx), None);
    }
}
