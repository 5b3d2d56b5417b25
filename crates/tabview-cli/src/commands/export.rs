//! Export command - write the matching rows as JSON or CSV.

use std::fs;
use std::path::{Path, PathBuf};

use colored::Colorize;
use tabview::ExportScope;

use super::{apply_view_args, config_for, open_session};
use crate::cli::{OutputFormat, ViewArgs};

pub fn run(
    file: PathBuf,
    view_args: ViewArgs,
    format: OutputFormat,
    output: Option<PathBuf>,
    page_only: bool,
    prefs: Option<PathBuf>,
    _verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut session = open_session(&file, prefs, config_for(&view_args)?)?;
    apply_view_args(&mut session, &view_args)?;

    let scope = if page_only {
        ExportScope::Page
    } else {
        ExportScope::Matched
    };
    let export = session.export(format.into(), scope)?;

    if output.as_deref() == Some(Path::new("-")) {
        println!("{}", export.contents);
        return Ok(());
    }

    let path = output.unwrap_or_else(|| PathBuf::from(&export.file_name));
    fs::write(&path, &export.contents)
        .map_err(|e| format!("Failed to write {}: {}", path.display(), e))?;

    let rows = match scope {
        ExportScope::Matched => session.view()?.matched_count(),
        ExportScope::Page => session.view()?.page.rows.len(),
    };
    println!(
        "{} {} rows as {} to {}",
        "Exported".green().bold(),
        rows,
        format,
        path.display().to_string().white().bold()
    );

    Ok(())
}
