//! Fuzz target for the data parser.
//!
//! This fuzzer tests that the CSV/TSV parser:
//! 1. Never panics on malformed input
//! 2. Handles all delimiter combinations
//! 3. Never returns more records than the row cap

#![no_main]

use libfuzzer_sys::fuzz_target;
use tabview::{Parser, ParserConfig};

fuzz_target!(|data: &[u8]| {
    // Only process reasonable-sized inputs to avoid OOM
    if data.len() > 100_000 {
        return;
    }

    let parser = Parser::with_config(ParserConfig {
        max_rows: Some(500),
        ..ParserConfig::default()
    });

    if let Ok(output) = parser.parse_bytes(data) {
        assert!(output.records.len() <= 500);
        for record in &output.records {
            assert_eq!(record.len(), output.fields.len());
        }
    }
});
