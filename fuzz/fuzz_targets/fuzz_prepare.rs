#![no_main]

use libfuzzer_sys::fuzz_target;
use schemaref_core::{prepare_text, IdentityConverter, ResolveOptions};

// Accepts arbitrary bytes as document text and runs the whole import →
// resolve pipeline. Goal: no panics and no stack overflow on cyclic or
// malformed input.
fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        let options = ResolveOptions {
            max_nodes: Some(10_000),
            ..ResolveOptions::default()
        };
        let _ = prepare_text(text, &IdentityConverter, &options);
    }
});
