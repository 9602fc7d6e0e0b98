// ── Load status ──

use serde::Serialize;

/// Observable load state shared by every consumer of the store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LoadStatus {
    /// A full load (cache hit or remote fetch) has succeeded.
    pub is_loaded: bool,
    /// A remote fetch is in flight.
    pub is_loading: bool,
    /// Message from the most recent failed fetch, cleared when a new one starts.
    pub error: Option<String>,
}

impl LoadStatus {
    pub fn has_error(&self) -> bool {
        self.error.is_some()
    }
}
