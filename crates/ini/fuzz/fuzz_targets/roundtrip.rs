#![no_main]

use ini::{parse_bytes, serialize, ParseOptions, WriteOptions};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Fuzz round-trip: parse -> serialize -> parse
    // Whatever tolerant parsing accepts must serialize to text that
    // parses again without new warnings
    if let Ok(doc) = parse_bytes(data, ParseOptions::default()) {
        let text = serialize(&doc, WriteOptions::default());
        let reparsed = parse_bytes(text.as_bytes(), ParseOptions::default())
            .expect("canonical output must reparse");
        assert!(reparsed.warnings().is_empty());
    }
});
