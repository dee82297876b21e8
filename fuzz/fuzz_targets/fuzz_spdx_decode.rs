#![no_main]
use libfuzzer_sys::fuzz_target;
use sbom_conformance::formats::{FormatAdapter, FormatDescriptor, SpdxAdapter};

const MAX_WRAPPED_INPUT_LEN: usize = 10_000;

/// Fuzz the SPDX decoder, raw and wrapped as a package list.
fuzz_target!(|data: &[u8]| {
    let adapter = SpdxAdapter::new();
    let format = FormatDescriptor::spdx_json("2.3");

    let _ = adapter.decode(data, &format);

    if let Ok(s) = std::str::from_utf8(data) {
        if s.len() < MAX_WRAPPED_INPUT_LEN {
            let wrapped = format!(
                r#"{{"spdxVersion":"SPDX-2.3","SPDXID":"SPDXRef-DOCUMENT","packages":[{s}]}}"#,
            );
            let _ = adapter.decode(wrapped.as_bytes(), &format);
        }
    }
});
