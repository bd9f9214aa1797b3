use assistant::CannedAssistant;
use axum::extract::FromRef;
use std::sync::Arc;

use crate::{repository::LedgerRepository, session::SessionStore};

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub ledger: Arc<dyn LedgerRepository>,
    pub sessions: SessionStore,
    pub assistant: Arc<CannedAssistant>,
}

impl AppState {
    pub fn new(ledger: Arc<dyn LedgerRepository>) -> Self {
        Self {
            ledger,
            sessions: SessionStore::new(),
            assistant: Arc::new(CannedAssistant::default()),
        }
    }
}

impl FromRef<AppState> for SessionStore {
    fn from_ref(state: &AppState) -> Self {
        state.sessions.clone()
    }
}
