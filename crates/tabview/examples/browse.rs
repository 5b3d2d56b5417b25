//! Example: Search, sort and page through a data file with Tabview.
//!
//! Usage:
//!   cargo run --example browse -- <file_path> [search term] [sort column]
//!
//! Without a file path the built-in sample dataset is used.

use std::env;
use std::sync::Arc;

use tabview::persistence::{MemoryStore, PreferenceGateway};
use tabview::{ExportFormat, ExportScope, Session};

#[tokio::main]
async fn main() -> tabview::Result<()> {
    let args: Vec<String> = env::args().collect();

    let mut session = Session::new(PreferenceGateway::new(Arc::new(MemoryStore::new())));
    match args.get(1) {
        Some(path) => {
            session.load_file(path).await?;
        }
        None => {
            session.load_sample()?;
        }
    }

    if let Some(term) = args.get(2) {
        session.set_search(term.as_str());
    }
    if let Some(column) = args.get(3) {
        session.request_sort(column)?;
    }

    let separator = "=".repeat(80);
    if let Some(source) = session.source() {
        println!("{}", separator);
        println!("Tabview: {}", source.identity);
        println!("{}", separator);
        println!("Format:  {}", source.format);
        println!("Rows:    {}", source.row_count);
        println!("Columns: {}", source.column_count);
        println!("Hash:    {}", source.hash);
        println!();
    }

    // Walk every page of the result
    loop {
        let view = session.view()?;
        println!(
            "--- page {}/{} ({} matching rows) ---",
            view.page.page_index,
            view.page.display_total(),
            view.matched_count()
        );
        for (i, row) in view.page_cells().iter().enumerate() {
            println!("{:>5}  {}", view.page.row_number(i), row.join(" | "));
        }
        if !view.page.has_next() {
            break;
        }
        session.next_page()?;
    }

    match session.export(ExportFormat::Json, ExportScope::Matched) {
        Ok(export) => println!("\n{} would contain {} bytes", export.file_name, export.contents.len()),
        Err(e) => println!("\nNothing to export: {}", e),
    }

    Ok(())
}
