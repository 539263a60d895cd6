use crate::session::SessionManager;
use std::sync::Arc;

/// Shared application state for HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// The scoring engine (owns every active session)
    pub engine: Arc<SessionManager>,
}

impl AppState {
    pub fn new(engine: Arc<SessionManager>) -> Self {
        Self { engine }
    }
}
