#![no_main]
use libfuzzer_sys::fuzz_target;
use sbom_conformance::FormatRegistry;

/// Fuzz content-based format detection across the bundled adapters.
fuzz_target!(|data: &[u8]| {
    let registry = FormatRegistry::with_builtin();
    if let Some(format) = registry.detect(data) {
        let _ = registry.adapter(&format);
    }
});
