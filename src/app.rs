use std::sync::Arc;

use crate::accounts::AccountStore;
use crate::config::Settings;
use crate::upstream::RagBackend;

/// Shared application state passed to all route handlers.
pub struct AppState {
    pub settings: Settings,
    pub backend: Arc<dyn RagBackend>,
    pub accounts: Arc<dyn AccountStore>,
}
