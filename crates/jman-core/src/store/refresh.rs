// ── Snapshot application and status transitions ──
//
// The only code paths that mutate the DataStore. Collections are
// replaced wholesale; nothing is merged or patched in place.

use chrono::Utc;

use super::DataStore;
use crate::model::{Plugin, Server, Site};

/// All three collections from one successful load.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct DataSnapshot {
    pub servers: Vec<Server>,
    pub sites: Vec<Site>,
    pub plugins: Vec<Plugin>,
}

/// Where a snapshot came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SnapshotSource {
    Cache,
    Remote,
}

impl DataStore {
    /// Replace all three collections and mark the store loaded.
    pub(crate) fn apply_snapshot(&self, snap: DataSnapshot, source: SnapshotSource) {
        self.servers.replace(snap.servers);
        self.sites.replace(snap.sites);
        self.plugins.replace(snap.plugins);

        if source == SnapshotSource::Remote {
            self.last_full_refresh.send_replace(Some(Utc::now()));
        }
        self.status.send_modify(|s| s.is_loaded = true);
    }

    /// Enter the loading state and clear any previous error.
    pub(crate) fn begin_loading(&self) {
        self.status.send_modify(|s| {
            s.is_loading = true;
            s.error = None;
        });
    }

    pub(crate) fn end_loading(&self) {
        self.status.send_modify(|s| s.is_loading = false);
    }

    pub(crate) fn set_error(&self, message: String) {
        self.status.send_modify(|s| s.error = Some(message));
    }
}

/// Holds the store in the loading state; leaving scope always clears it,
/// including when the owning future is dropped mid-fetch.
pub(crate) struct LoadingGuard<'a> {
    store: &'a DataStore,
}

impl<'a> LoadingGuard<'a> {
    pub(crate) fn begin(store: &'a DataStore) -> Self {
        store.begin_loading();
        Self { store }
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.store.end_loading();
    }
}
