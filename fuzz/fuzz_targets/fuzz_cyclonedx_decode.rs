#![no_main]
use libfuzzer_sys::fuzz_target;
use sbom_conformance::formats::{CycloneDxAdapter, FormatAdapter, FormatDescriptor};

const MAX_WRAPPED_INPUT_LEN: usize = 10_000;

/// Fuzz the CycloneDX decoder.
///
/// Also wraps the input as a component list so mutations reach the
/// component and dependency conversion instead of failing on the envelope.
fuzz_target!(|data: &[u8]| {
    let adapter = CycloneDxAdapter::new();
    let format = FormatDescriptor::cyclonedx_json("1.5");

    let _ = adapter.decode(data, &format);

    if let Ok(s) = std::str::from_utf8(data) {
        if s.len() < MAX_WRAPPED_INPUT_LEN {
            let wrapped = format!(
                r#"{{"bomFormat":"CycloneDX","specVersion":"1.5","components":[{s}]}}"#,
            );
            if let Ok(graph) = adapter.decode(wrapped.as_bytes(), &format) {
                // Anything decoded must encode again
                adapter
                    .encode(&graph, &format)
                    .expect("decoded graph re-encodes");
            }
        }
    }
});
