// ── Central reactive data store ──
//
// Holds the three dashboard collections plus the shared load status.
// Mutations are broadcast to subscribers via `watch` channels.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::watch;

use super::collection::{EntityCollection, Snapshot};
use super::status::LoadStatus;
use crate::model::{Plugin, Server, Site};
use crate::stream::{EntityStream, Lookup};

/// Central reactive store for servers, sites and plugins.
///
/// Readers take cheap snapshots or subscribe; only `DataService` mutates
/// the store, through the crate-private methods in `refresh.rs`.
pub struct DataStore {
    pub(crate) servers: EntityCollection<Server>,
    pub(crate) sites: EntityCollection<Site>,
    pub(crate) plugins: EntityCollection<Plugin>,
    pub(crate) status: watch::Sender<LoadStatus>,
    pub(crate) last_full_refresh: watch::Sender<Option<DateTime<Utc>>>,
}

impl DataStore {
    pub fn new() -> Self {
        let (status, _) = watch::channel(LoadStatus::default());
        let (last_full_refresh, _) = watch::channel(None);

        Self {
            servers: EntityCollection::new(),
            sites: EntityCollection::new(),
            plugins: EntityCollection::new(),
            status,
            last_full_refresh,
        }
    }

    // ── Snapshot accessors ───────────────────────────────────────────

    pub fn servers_snapshot(&self) -> Snapshot<Server> {
        self.servers.snapshot()
    }

    pub fn sites_snapshot(&self) -> Snapshot<Site> {
        self.sites.snapshot()
    }

    pub fn plugins_snapshot(&self) -> Snapshot<Plugin> {
        self.plugins.snapshot()
    }

    // ── Single-entity lookups (point in time) ────────────────────────

    pub fn find_server(&self, id: u64) -> Option<Arc<Server>> {
        self.servers.find(|s| s.id == id)
    }

    pub fn find_site(&self, id: u64) -> Option<Arc<Site>> {
        self.sites.find(|s| s.id == id)
    }

    pub fn plugins_for_site(&self, site_id: u64) -> Vec<Arc<Plugin>> {
        self.plugins.filter(|p| p.site_id == site_id)
    }

    pub fn sites_for_server(&self, server_id: u64) -> Vec<Arc<Site>> {
        self.sites.filter(|s| s.server_id == server_id)
    }

    // ── Reactive lookups ─────────────────────────────────────────────

    /// First site with `id`, re-evaluated whenever the sites collection changes.
    pub fn site_by_id(&self, id: u64) -> Lookup<Site, Option<Arc<Site>>> {
        Lookup::new(self.sites.subscribe(), move |sites| {
            sites.iter().find(|s| s.id == id).cloned()
        })
    }

    /// First server with `id`, re-evaluated whenever the servers collection changes.
    pub fn server_by_id(&self, id: u64) -> Lookup<Server, Option<Arc<Server>>> {
        Lookup::new(self.servers.subscribe(), move |servers| {
            servers.iter().find(|s| s.id == id).cloned()
        })
    }

    /// Plugins of `site_id` in collection order.
    pub fn plugins_by_site_id(&self, site_id: u64) -> Lookup<Plugin, Vec<Arc<Plugin>>> {
        Lookup::new(self.plugins.subscribe(), move |plugins| {
            plugins
                .iter()
                .filter(|p| p.site_id == site_id)
                .cloned()
                .collect()
        })
    }

    /// Sites hosted on `server_id` in collection order.
    pub fn sites_by_server_id(&self, server_id: u64) -> Lookup<Site, Vec<Arc<Site>>> {
        Lookup::new(self.sites.subscribe(), move |sites| {
            sites
                .iter()
                .filter(|s| s.server_id == server_id)
                .cloned()
                .collect()
        })
    }

    // ── Count accessors ──────────────────────────────────────────────

    pub fn server_count(&self) -> usize {
        self.servers.len()
    }

    pub fn site_count(&self) -> usize {
        self.sites.len()
    }

    pub fn plugin_count(&self) -> usize {
        self.plugins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.servers.is_empty() && self.sites.is_empty() && self.plugins.is_empty()
    }

    // ── Subscriptions ────────────────────────────────────────────────

    pub fn subscribe_servers(&self) -> EntityStream<Server> {
        EntityStream::new(self.servers.subscribe())
    }

    pub fn subscribe_sites(&self) -> EntityStream<Site> {
        EntityStream::new(self.sites.subscribe())
    }

    pub fn subscribe_plugins(&self) -> EntityStream<Plugin> {
        EntityStream::new(self.plugins.subscribe())
    }

    pub fn subscribe_status(&self) -> watch::Receiver<LoadStatus> {
        self.status.subscribe()
    }

    // ── Metadata ─────────────────────────────────────────────────────

    pub fn status(&self) -> LoadStatus {
        self.status.borrow().clone()
    }

    /// When the collections were last replaced from the remote API.
    /// Cache hits do not count.
    pub fn last_full_refresh(&self) -> Option<DateTime<Utc>> {
        *self.last_full_refresh.borrow()
    }

    /// How long ago the last remote refresh occurred, or `None` if never refreshed.
    pub fn data_age(&self) -> Option<chrono::Duration> {
        self.last_full_refresh().map(|t| Utc::now() - t)
    }
}

impl Default for DataStore {
    fn default() -> Self {
        Self::new()
    }
}
