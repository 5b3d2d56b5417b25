//! CLI command implementations.

pub mod columns;
pub mod export;
pub mod serve;
pub mod show;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tabview::persistence::{FileStore, PreferenceGateway, preferences_path};
use tabview::{FilterScope, Session, TabviewConfig};

use crate::cli::ViewArgs;

/// Preference gateway backed by `prefs`, or the default file next to `data`.
pub fn gateway_for(data: Option<&Path>, prefs: Option<PathBuf>) -> PreferenceGateway {
    let path = prefs.unwrap_or_else(|| match data {
        Some(data) => preferences_path(data),
        None => preferences_path("."),
    });
    PreferenceGateway::new(Arc::new(FileStore::new(path)))
}

/// Session configuration for the given view flags.
pub fn config_for(view: &ViewArgs) -> Result<TabviewConfig, Box<dyn std::error::Error>> {
    let mut config = TabviewConfig::default();
    if let Some(delimiter) = view.delimiter {
        let byte = u8::try_from(delimiter)
            .map_err(|_| format!("Delimiter must be a single-byte character: {:?}", delimiter))?;
        config.parser.delimiter = Some(byte);
    }
    if let Some(size) = view.page_size {
        config.page_size = size;
    }
    Ok(config)
}

/// Load `file` into a new session.
pub fn open_session(
    file: &Path,
    prefs: Option<PathBuf>,
    config: TabviewConfig,
) -> Result<Session, Box<dyn std::error::Error>> {
    let mut session = Session::with_config(config, gateway_for(Some(file), prefs));
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(session.load_file(file))?;
    Ok(session)
}

/// Apply search, sort and paging flags in the order a user would.
pub fn apply_view_args(
    session: &mut Session,
    view: &ViewArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(scope) = &view.scope {
        session.set_search_scope(FilterScope::Field(scope.clone()))?;
    }
    if let Some(term) = &view.search {
        session.set_search(term.clone());
    }
    if let Some(key) = &view.sort {
        session.request_sort(key)?;
        if view.desc {
            session.request_sort(key)?;
        }
    }
    if view.all {
        session.set_show_all(true);
    }
    session.go_to_page(view.page)?;
    Ok(())
}
