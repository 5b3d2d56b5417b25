//! Show command - render one page of a data file.

use std::path::PathBuf;

use colored::Colorize;
use tabview::{Session, SortDirection, View, ViewMode};

use super::{apply_view_args, config_for, open_session};
use crate::cli::ViewArgs;

/// Widest a table cell is allowed to get before it is cut.
const MAX_CELL_WIDTH: usize = 32;

pub fn run(
    file: PathBuf,
    view_args: ViewArgs,
    json: bool,
    prefs: Option<PathBuf>,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut session = open_session(&file, prefs, config_for(&view_args)?)?;
    apply_view_args(&mut session, &view_args)?;
    if json {
        session.set_mode(ViewMode::Json);
    }

    print_summary(&session, verbose);

    match session.mode() {
        ViewMode::Json => {
            if session.view()?.page.rows.is_empty() {
                println!("[]");
            } else {
                println!("{}", session.clipboard_payload()?);
            }
        }
        ViewMode::Table => print_table(&session.view()?, &session),
    }

    Ok(())
}

fn print_summary(session: &Session, verbose: bool) {
    let (Some(source), Ok(view)) = (session.source(), session.view()) else {
        return;
    };

    println!(
        "{} {}",
        source.identity.cyan().bold(),
        format!("({} rows, {} columns)", source.row_count, source.column_count).white()
    );

    if view.is_filtered {
        println!(
            "  {} {} of {} rows match {:?}",
            "Search:".yellow(),
            view.matched_count().to_string().white().bold(),
            view.total_rows,
            session.filter().term
        );
    }
    if let Some(key) = &session.sort().key {
        let arrow = match session.sort().direction {
            SortDirection::Ascending => "▲",
            SortDirection::Descending => "▼",
        };
        println!("  {} {} {}", "Sort:".yellow(), key, arrow);
    }
    if source.truncated {
        println!(
            "  {} only the first {} rows were loaded",
            "Note:".yellow(),
            source.row_count
        );
    }
    if verbose {
        println!("  Format: {}  Hash: {}", source.format, source.hash);
        if source.issue_count > 0 {
            println!("  Rows with a wrong field count: {}", source.issue_count);
        }
    }
    println!();
}

fn print_table(view: &View<'_>, session: &Session) {
    if view.columns.is_empty() {
        println!("{}", "All columns are hidden.".yellow());
        return;
    }

    let cells = view.page_cells();
    let widths: Vec<usize> = view
        .columns
        .iter()
        .enumerate()
        .map(|(i, name)| {
            cells
                .iter()
                .map(|row| row[i].chars().count())
                .chain(std::iter::once(name.chars().count()))
                .max()
                .unwrap_or(0)
                .min(MAX_CELL_WIDTH)
        })
        .collect();
    let number_width = view.page.offset.saturating_add(view.page.rows.len()).to_string().len();

    let header: Vec<String> = view
        .columns
        .iter()
        .zip(&widths)
        .map(|(name, &w)| pad(name, w))
        .collect();
    println!("{}  {}", " ".repeat(number_width), header.join("  ").bold());

    for (i, row) in cells.iter().enumerate() {
        let line: Vec<String> = row.iter().zip(&widths).map(|(c, &w)| pad(c, w)).collect();
        println!(
            "{}  {}",
            format!("{:>number_width$}", view.page.row_number(i)).dimmed(),
            line.join("  ")
        );
    }

    println!();
    let range = match view.page.display_range() {
        Some((first, last)) => format!("rows {}-{} of {}", first, last, view.matched_count()),
        None => "no matching rows".to_string(),
    };
    println!(
        "Page {}/{}  {}  ({} of {} columns shown)",
        view.page.page_index.to_string().white().bold(),
        view.page.display_total(),
        range,
        view.columns.len(),
        session.dataset().map(|d| d.column_count()).unwrap_or(0)
    );
}

/// Pad (or cut) `text` to exactly `width` characters.
fn pad(text: &str, width: usize) -> String {
    let len = text.chars().count();
    if len > width {
        let cut: String = text.chars().take(width.saturating_sub(1)).collect();
        format!("{cut}…")
    } else {
        format!("{text}{}", " ".repeat(width - len))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pad_fills_and_cuts() {
        assert_eq!(pad("ab", 4), "ab  ");
        assert_eq!(pad("abcdef", 4), "abc…");
        assert_eq!(pad("東京", 3), "東京 ");
    }
}
