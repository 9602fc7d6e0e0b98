// ── Data service ──
//
// The single entry point consumers hold. Owns the store, the HTTP client
// and the persistent cache, and implements cache-first initialization and
// all-or-nothing remote fetches on top of them.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::sync::{Mutex, watch};
use tracing::{debug, info, warn};

use jman_api::DashboardClient;

use crate::cache::{CacheError, Collection, PersistentCache};
use crate::config::DataConfig;
use crate::error::CoreError;
use crate::model::{Plugin, Server, Site, SiteDetail};
use crate::store::{DataSnapshot, DataStore, LoadStatus, LoadingGuard, Snapshot, SnapshotSource};
use crate::stream::{EntityStream, Lookup};

/// Loads and holds the dashboard's servers, sites and plugins.
///
/// Cheaply cloneable via `Arc<ServiceInner>`; construct one per backend and
/// share it. `init` and `refresh` never return errors: failures land in
/// [`LoadStatus::error`] and the previous collections stay in place.
#[derive(Clone)]
pub struct DataService {
    inner: Arc<ServiceInner>,
}

struct ServiceInner {
    config: DataConfig,
    store: Arc<DataStore>,
    client: DashboardClient,
    cache: Arc<dyn PersistentCache>,
    init_claim: AtomicBool,
    fetch_lock: Mutex<()>,
}

impl DataService {
    /// Build a service with an HTTP client derived from `config`.
    pub fn new(config: DataConfig, cache: Arc<dyn PersistentCache>) -> Result<Self, CoreError> {
        let client = DashboardClient::new(config.base_url.clone(), &config.transport())?;
        Ok(Self::with_client(config, client, cache))
    }

    /// Build a service around an existing client.
    pub fn with_client(
        config: DataConfig,
        client: DashboardClient,
        cache: Arc<dyn PersistentCache>,
    ) -> Self {
        Self {
            inner: Arc::new(ServiceInner {
                config,
                store: Arc::new(DataStore::new()),
                client,
                cache,
                init_claim: AtomicBool::new(false),
                fetch_lock: Mutex::new(()),
            }),
        }
    }

    pub fn config(&self) -> &DataConfig {
        &self.inner.config
    }

    /// Access the underlying DataStore.
    pub fn store(&self) -> &Arc<DataStore> {
        &self.inner.store
    }

    // ── Loading ──────────────────────────────────────────────────

    /// Cache-first initialization.
    ///
    /// No-op when the store is already loaded or another load is running.
    /// Otherwise adopts the cached collections if all three are present and
    /// valid, and falls back to a full remote fetch.
    pub async fn init(&self) {
        let store = &self.inner.store;
        if store.status().is_loaded {
            debug!("data already loaded, skipping init");
            return;
        }

        if self
            .inner
            .init_claim
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            debug!("init already in progress");
            return;
        }
        let _claim = InitClaim(&self.inner.init_claim);

        // Re-check under the claim: a refresh may have finished or started meanwhile.
        let status = store.status();
        if status.is_loaded || status.is_loading {
            debug!(?status, "skipping init");
            return;
        }

        if let Some(snap) = self.load_from_cache().await {
            // A refresh may have landed while the cache was being read.
            if store.status().is_loaded {
                debug!("fresher data arrived during cache read, discarding cache");
                return;
            }
            store.apply_snapshot(snap, SnapshotSource::Cache);
            info!(
                servers = store.server_count(),
                sites = store.site_count(),
                plugins = store.plugin_count(),
                "loaded data from cache"
            );
            return;
        }

        self.fetch_from_api().await;
    }

    /// Force a full remote fetch, bypassing the cache.
    ///
    /// Waits for any fetch already in flight, then runs its own.
    pub async fn refresh(&self) {
        self.fetch_from_api().await;
    }

    async fn fetch_from_api(&self) {
        let _fetch = self.inner.fetch_lock.lock().await;
        let store = &self.inner.store;
        let _loading = LoadingGuard::begin(store);

        let (snap, raw) = match self.fetch_snapshot().await {
            Ok(fetched) => fetched,
            Err(e) => {
                let message = e.status_message();
                warn!(error = %message, "data fetch failed, keeping previous collections");
                store.set_error(message);
                return;
            }
        };

        store.apply_snapshot(snap, SnapshotSource::Remote);
        info!(
            servers = store.server_count(),
            sites = store.site_count(),
            plugins = store.plugin_count(),
            "data refresh complete"
        );
        self.write_cache(raw).await;
    }

    /// Fetch all three collections; any single failure fails the whole cycle.
    ///
    /// Returns the decoded snapshot and the arrays as received, which are
    /// what gets persisted.
    async fn fetch_snapshot(&self) -> Result<(DataSnapshot, RawSnapshot), CoreError> {
        let client = &self.inner.client;

        // Fetch in parallel; every request runs to completion.
        let (servers_res, sites_res, plugins_res) = tokio::join!(
            client.list_servers(),
            client.list_sites(),
            client.list_plugins(),
        );

        let (servers, sites, plugins) = (servers_res?, sites_res?, plugins_res?);
        Ok((
            DataSnapshot {
                servers: servers.items,
                sites: sites.items,
                plugins: plugins.items,
            },
            RawSnapshot {
                servers: servers.raw,
                sites: sites.raw,
                plugins: plugins.raw,
            },
        ))
    }

    // ── Cache ────────────────────────────────────────────────────

    // Cache I/O runs on the blocking pool; `FileCache` touches the disk.

    async fn load_from_cache(&self) -> Option<DataSnapshot> {
        let cache = Arc::clone(&self.inner.cache);
        let read = tokio::task::spawn_blocking(move || read_cache(cache.as_ref())).await;
        let result = match read {
            Ok(result) => result,
            Err(e) => {
                warn!(error = %e, "cache read task failed");
                return None;
            }
        };
        match result {
            Ok(Some(snap)) => Some(snap),
            Ok(None) => {
                debug!("cache miss");
                None
            }
            Err(e) => {
                warn!(error = %e, "ignoring unusable cache");
                None
            }
        }
    }

    async fn write_cache(&self, raw: RawSnapshot) {
        let cache = Arc::clone(&self.inner.cache);
        let written =
            tokio::task::spawn_blocking(move || write_collections(cache.as_ref(), &raw)).await;
        match written {
            Ok(results) => {
                for (collection, result) in results {
                    if let Err(e) = result {
                        warn!(%collection, error = %e, "failed to persist collection");
                    }
                }
            }
            Err(e) => warn!(error = %e, "cache write task failed"),
        }
    }

    // ── Snapshot accessors (delegate to DataStore) ───────────────

    pub fn servers_snapshot(&self) -> Snapshot<Server> {
        self.inner.store.servers_snapshot()
    }

    pub fn sites_snapshot(&self) -> Snapshot<Site> {
        self.inner.store.sites_snapshot()
    }

    pub fn plugins_snapshot(&self) -> Snapshot<Plugin> {
        self.inner.store.plugins_snapshot()
    }

    pub fn status(&self) -> LoadStatus {
        self.inner.store.status()
    }

    pub fn subscribe_status(&self) -> watch::Receiver<LoadStatus> {
        self.inner.store.subscribe_status()
    }

    pub fn subscribe_servers(&self) -> EntityStream<Server> {
        self.inner.store.subscribe_servers()
    }

    pub fn subscribe_sites(&self) -> EntityStream<Site> {
        self.inner.store.subscribe_sites()
    }

    pub fn subscribe_plugins(&self) -> EntityStream<Plugin> {
        self.inner.store.subscribe_plugins()
    }

    // ── Lookups ──────────────────────────────────────────────────

    pub fn site_by_id(&self, id: u64) -> Lookup<Site, Option<Arc<Site>>> {
        self.inner.store.site_by_id(id)
    }

    pub fn server_by_id(&self, id: u64) -> Lookup<Server, Option<Arc<Server>>> {
        self.inner.store.server_by_id(id)
    }

    pub fn plugins_by_site_id(&self, site_id: u64) -> Lookup<Plugin, Vec<Arc<Plugin>>> {
        self.inner.store.plugins_by_site_id(site_id)
    }

    pub fn sites_by_server_id(&self, server_id: u64) -> Lookup<Site, Vec<Arc<Site>>> {
        self.inner.store.sites_by_server_id(server_id)
    }

    /// Join a site with its server and plugins.
    pub fn site_detail(&self, id: u64) -> Result<SiteDetail, CoreError> {
        let store = &self.inner.store;
        let site = store.find_site(id).ok_or_else(|| CoreError::NotFound {
            entity_type: "Site".into(),
            identifier: id.to_string(),
        })?;
        let server = store.find_server(site.server_id);
        let plugins = store.plugins_for_site(site.id);
        Ok(SiteDetail {
            site,
            server,
            plugins,
        })
    }
}

/// Releases the init claim on every exit path, including cancellation.
struct InitClaim<'a>(&'a AtomicBool);

impl Drop for InitClaim<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// The three arrays exactly as the API returned them.
struct RawSnapshot {
    servers: Vec<Value>,
    sites: Vec<Value>,
    plugins: Vec<Value>,
}

/// Read all three collections; any miss makes the whole cache a miss.
fn read_cache(cache: &dyn PersistentCache) -> Result<Option<DataSnapshot>, CacheError> {
    let Some(servers) = read_collection(cache, Collection::Servers)? else {
        return Ok(None);
    };
    let Some(sites) = read_collection(cache, Collection::Sites)? else {
        return Ok(None);
    };
    let Some(plugins) = read_collection(cache, Collection::Plugins)? else {
        return Ok(None);
    };
    Ok(Some(DataSnapshot {
        servers,
        sites,
        plugins,
    }))
}

fn write_collections(
    cache: &dyn PersistentCache,
    raw: &RawSnapshot,
) -> [(Collection, Result<(), CacheError>); 3] {
    [
        (
            Collection::Servers,
            write_collection(cache, Collection::Servers, &raw.servers),
        ),
        (
            Collection::Sites,
            write_collection(cache, Collection::Sites, &raw.sites),
        ),
        (
            Collection::Plugins,
            write_collection(cache, Collection::Plugins, &raw.plugins),
        ),
    ]
}

/// Read one collection. Absent or empty values count as a miss.
fn read_collection<T: DeserializeOwned>(
    cache: &dyn PersistentCache,
    collection: Collection,
) -> Result<Option<Vec<T>>, CacheError> {
    let Some(raw) = cache
        .get(collection.cache_key())?
        .filter(|raw| !raw.trim().is_empty())
    else {
        return Ok(None);
    };
    serde_json::from_str(&raw)
        .map(Some)
        .map_err(|source| CacheError::Parse { collection, source })
}

fn write_collection<T: Serialize>(
    cache: &dyn PersistentCache,
    collection: Collection,
    items: &[T],
) -> Result<(), CacheError> {
    let raw = serde_json::to_string(items)
        .map_err(|source| CacheError::Serialize { collection, source })?;
    cache.set(collection.cache_key(), &raw)
}
