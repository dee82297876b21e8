#![no_main]
use libfuzzer_sys::fuzz_target;
use sbom_conformance::formats::{FormatAdapter, FormatDescriptor, GraphAdapter};
use sbom_conformance::DiffEngine;

/// Fuzz the canonical graph decoder in both encodings.
///
/// Any graph that decodes must diff empty against itself.
fuzz_target!(|data: &[u8]| {
    let adapter = GraphAdapter::new();
    for format in [FormatDescriptor::graph_json(), FormatDescriptor::graph_yaml()] {
        if let Ok(graph) = adapter.decode(data, &format) {
            assert!(DiffEngine::new().diff(&graph, &graph.clone()).is_empty());
        }
    }
});
