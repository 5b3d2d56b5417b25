//! Fuzz target for the view pipeline.
//!
//! Loads arbitrary text, then runs search, sort, paging and column moves
//! driven by the fuzzer. None of it may panic.

#![no_main]

use std::sync::Arc;

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use tabview::persistence::{MemoryStore, PreferenceGateway};
use tabview::Session;

#[derive(Debug, Arbitrary)]
struct Input {
    text: String,
    term: String,
    sort_field: u8,
    page: u16,
    moves: Vec<(u8, u8)>,
}

fuzz_target!(|input: Input| {
    if input.text.len() > 50_000 {
        return;
    }

    let mut session = Session::new(PreferenceGateway::new(Arc::new(MemoryStore::new())));
    let fields = match session.load_text("fuzz.csv", &input.text) {
        Ok(dataset) => dataset.fields().to_vec(),
        Err(_) => return,
    };

    session.set_search(input.term);
    if !fields.is_empty() {
        let field = &fields[input.sort_field as usize % fields.len()];
        let _ = session.request_sort(field);
        let _ = session.toggle_column(field);
    }
    let _ = session.go_to_page(input.page as usize);

    for (from, to) in input.moves {
        let _ = session.reorder_columns(from as usize, to as usize);
    }

    if let Ok(view) = session.view() {
        assert!(view.page.page_index >= 1);
        assert!(view.page.rows.len() <= view.matched_count());
    }
});
