//! Columns command - list and change column visibility and order.

use std::path::PathBuf;

use colored::Colorize;
use tabview::{Session, TabviewConfig, TabviewError};

use super::open_session;

pub struct ColumnChanges {
    pub toggle: Vec<String>,
    pub show_all: bool,
    pub hide_all: bool,
    pub move_to: Option<Vec<usize>>,
}

pub fn run(
    file: PathBuf,
    changes: ColumnChanges,
    prefs: Option<PathBuf>,
    _verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut session = open_session(&file, prefs, TabviewConfig::default())?;
    apply_changes(&mut session, &changes)?;
    print_columns(&session);
    Ok(())
}

/// Check every change up front so a bad one leaves the saved columns untouched.
fn validate_changes(session: &Session, changes: &ColumnChanges) -> Result<(), TabviewError> {
    let order = session.columns().ok_or(TabviewError::NoDataset)?.order();

    if let Some(field) = changes.toggle.iter().find(|f| !order.contains(*f)) {
        return Err(TabviewError::UnknownField(field.clone()));
    }
    if let Some([from, to]) = changes.move_to.as_deref() {
        let len = order.len();
        if let Some(&index) = [from, to].into_iter().find(|&&i| i >= len) {
            return Err(TabviewError::IndexOutOfRange { index, len });
        }
    }
    Ok(())
}

fn apply_changes(
    session: &mut Session,
    changes: &ColumnChanges,
) -> Result<(), Box<dyn std::error::Error>> {
    validate_changes(session, changes)?;

    if changes.show_all {
        session.set_all_columns(true)?;
    }
    if changes.hide_all {
        session.set_all_columns(false)?;
    }
    for field in &changes.toggle {
        session.toggle_column(field)?;
    }
    if let Some([from, to]) = changes.move_to.as_deref() {
        session.reorder_columns(*from, *to)?;
    }
    Ok(())
}

fn print_columns(session: &Session) {
    let Some(columns) = session.columns() else {
        return;
    };

    println!(
        "{} {}",
        "Columns of".cyan().bold(),
        session.dataset().map(|d| d.identity()).unwrap_or_default().white()
    );
    for (i, field) in columns.order().iter().enumerate() {
        let marker = if columns.is_visible(field) {
            "[x]".green()
        } else {
            "[ ]".dimmed()
        };
        println!("  {:>2} {} {}", i, marker, field);
    }
    println!();
    println!(
        "{} of {} columns visible",
        columns.visible_count().to_string().white().bold(),
        columns.order().len()
    );
}
