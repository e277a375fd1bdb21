#![no_main]

use ini::{parse_bytes, ParseOptions};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Fuzz the main parse_bytes() entry point
    // The parser should never panic on any input
    let _ = parse_bytes(data, ParseOptions::default());
});
