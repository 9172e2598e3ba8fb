use std::sync::Arc;

use crate::domain::repository::Storage;

/// Shared application state passed to every handler via axum `State`.
///
/// Holds the one storage backend chosen at startup.
#[derive(Clone)]
pub struct AppState {
    pub storage: Arc<dyn Storage>,
}

impl AppState {
    pub fn new(storage: impl Storage + 'static) -> Self {
        Self {
            storage: Arc::new(storage),
        }
    }
}
