#![no_main]
use libfuzzer_sys::fuzz_target;
use sbom_conformance::FormatDescriptor;

/// Fuzz format descriptor parsing (short names and MIME types).
fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(descriptor) = s.parse::<FormatDescriptor>() {
            // A parsed descriptor must parse back from its own short name
            let reparsed: FormatDescriptor = descriptor
                .short_name()
                .parse()
                .expect("short name parses");
            assert_eq!(reparsed, descriptor);
        }
    }
});
