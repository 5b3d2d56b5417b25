//! Application state for the web server.

use std::sync::Arc;
use tokio::sync::RwLock;

use tabview::Session;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// The viewer session every request works on.
    pub session: Arc<RwLock<Session>>,
}

impl AppState {
    /// Create new application state.
    pub fn new(session: Session) -> Self {
        Self {
            session: Arc::new(RwLock::new(session)),
        }
    }
}
