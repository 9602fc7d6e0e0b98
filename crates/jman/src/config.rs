//! CLI configuration: thin wrapper around `jman_config` shared types.
//!
//! Applies `GlobalOpts` flag overrides (--base-url, --origin, --timeout,
//! --insecure, --cache-dir, --no-cache) on top of the loaded config.

use std::path::PathBuf;
use std::sync::Arc;

use jman_core::{DataConfig, FileCache, MemoryCache, PersistentCache};

use crate::cli::GlobalOpts;
use crate::error::CliError;

// ── Re-exports from shared crate ────────────────────────────────────

pub use jman_config::{Config, config_path, load_config, save_config};

// ── CLI-specific helpers ────────────────────────────────────────────

/// Translate the loaded config + global flags into a `DataConfig`.
///
/// CLI flag overrides take priority over config values.
pub fn resolve_data_config(global: &GlobalOpts, cfg: &Config) -> Result<DataConfig, CliError> {
    let mut api = cfg.api.clone();
    if let Some(ref base_url) = global.base_url {
        api.base_url.clone_from(base_url);
    }
    if let Some(ref origin) = global.origin {
        api.origin.clone_from(origin);
    }
    if let Some(timeout) = global.timeout {
        api.timeout = timeout;
    }
    api.insecure |= global.insecure;

    Ok(api.to_data_config()?)
}

/// Where the disk cache lives, or `None` when caching to disk is off.
pub fn resolve_cache_dir(global: &GlobalOpts, cfg: &Config) -> Option<PathBuf> {
    if global.no_cache || !cfg.cache.enabled {
        return None;
    }
    Some(
        global
            .cache_dir
            .clone()
            .unwrap_or_else(|| cfg.cache.resolved_dir()),
    )
}

/// Build the persistent cache selected by config and flags.
pub fn build_cache(global: &GlobalOpts, cfg: &Config) -> Arc<dyn PersistentCache> {
    match resolve_cache_dir(global, cfg) {
        Some(dir) => {
            tracing::debug!(dir = %dir.display(), "using file cache");
            Arc::new(FileCache::new(dir))
        }
        None => {
            tracing::debug!("using in-memory cache");
            Arc::new(MemoryCache::new())
        }
    }
}
