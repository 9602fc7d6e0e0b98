//! Shared configuration for the jman CLI.
//!
//! A TOML file at the platform config path, overlaid with `JMAN_`-prefixed
//! environment variables, and translation to `jman_core::DataConfig`.
//! The CLI adds flag-aware overrides on top.

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use jman_core::{DataConfig, TlsVerification};

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    /// Where the dashboard API lives.
    #[serde(default)]
    pub api: ApiSettings,

    /// Persistent cache location.
    #[serde(default)]
    pub cache: CacheSettings,

    /// Output defaults.
    #[serde(default)]
    pub defaults: Defaults,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ApiSettings {
    /// API base, absolute or relative to `origin`.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Origin a relative `base_url` is resolved against.
    #[serde(default = "default_origin")]
    pub origin: String,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,

    /// Accept invalid TLS certificates.
    #[serde(default)]
    pub insecure: bool,

    /// Path to a custom CA certificate (PEM).
    pub ca_cert: Option<PathBuf>,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            origin: default_origin(),
            timeout: default_timeout(),
            insecure: false,
            ca_cert: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CacheSettings {
    /// Directory holding the cached collections. Platform data dir when unset.
    pub dir: Option<PathBuf>,

    /// Set to `false` to keep the cache in memory only.
    #[serde(default = "default_true")]
    pub enabled: bool,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            dir: None,
            enabled: true,
        }
    }
}

impl CacheSettings {
    /// Configured cache directory, or the platform default.
    pub fn resolved_dir(&self) -> PathBuf {
        self.dir.clone().unwrap_or_else(default_cache_dir)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default = "default_color")]
    pub color: String,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            color: default_color(),
        }
    }
}

fn default_base_url() -> String {
    "/api".into()
}
fn default_origin() -> String {
    "http://localhost:8080".into()
}
fn default_timeout() -> u64 {
    30
}
fn default_true() -> bool {
    true
}
fn default_output() -> String {
    "table".into()
}
fn default_color() -> String {
    "auto".into()
}

// ── Paths ───────────────────────────────────────────────────────────

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "jman", "jman")
}

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    project_dirs().map_or_else(
        || home_fallback(".config").join("config.toml"),
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

/// Default directory for the persistent cache.
pub fn default_cache_dir() -> PathBuf {
    project_dirs().map_or_else(
        || home_fallback(".local/share").join("cache"),
        |dirs| dirs.data_dir().join("cache"),
    )
}

fn home_fallback(sub: &str) -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(sub);
    p.push("jman");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Layered sources: defaults, then the TOML file, then `JMAN_*` env vars.
///
/// Nested keys use a double underscore: `JMAN_API__BASE_URL`.
pub fn figment_for(path: &Path) -> Figment {
    Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("JMAN_").split("__"))
}

/// Load the full Config from the canonical file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load the full Config from `path` + environment.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let config: Config = figment_for(path).extract()?;
    Ok(config)
}

/// Load config, returning a default if loading fails.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<PathBuf, ConfigError> {
    let path = config_path();
    save_config_to(cfg, &path)?;
    Ok(path)
}

pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

// ── Translation to core config ──────────────────────────────────────

impl ApiSettings {
    /// Build a `DataConfig`, resolving a relative base against the origin.
    pub fn to_data_config(&self) -> Result<DataConfig, ConfigError> {
        let origin = Url::parse(&self.origin).map_err(|e| ConfigError::Validation {
            field: "api.origin".into(),
            reason: format!("invalid URL '{}': {e}", self.origin),
        })?;

        if self.timeout == 0 {
            return Err(ConfigError::Validation {
                field: "api.timeout".into(),
                reason: "must be at least 1 second".into(),
            });
        }

        let mut cfg =
            DataConfig::from_base(&origin, &self.base_url).map_err(|e| ConfigError::Validation {
                field: "api.base_url".into(),
                reason: e.to_string(),
            })?;

        cfg.timeout = Duration::from_secs(self.timeout);
        cfg.tls = if self.insecure {
            TlsVerification::DangerAcceptInvalid
        } else if let Some(ref ca_path) = self.ca_cert {
            TlsVerification::CustomCa(ca_path.clone())
        } else {
            TlsVerification::SystemDefaults
        };
        Ok(cfg)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults_point_at_local_api() {
        let cfg = Config::default();
        assert_eq!(cfg.api.base_url, "/api");
        assert_eq!(cfg.api.origin, "http://localhost:8080");
        assert!(cfg.cache.enabled);

        let data = cfg.api.to_data_config().unwrap();
        assert_eq!(data.base_url.as_str(), "http://localhost:8080/api");
        assert_eq!(data.timeout, Duration::from_secs(30));
        assert_eq!(data.tls, TlsVerification::SystemDefaults);
    }

    #[test]
    fn absolute_base_ignores_origin() {
        let api = ApiSettings {
            base_url: "https://dash.example.com/api/v2".into(),
            origin: "http://unused:1".into(),
            ..ApiSettings::default()
        };
        let data = api.to_data_config().unwrap();
        assert_eq!(data.base_url.as_str(), "https://dash.example.com/api/v2");
    }

    #[test]
    fn tls_mode_follows_settings() {
        let api = ApiSettings {
            ca_cert: Some(PathBuf::from("/etc/ca.pem")),
            ..ApiSettings::default()
        };
        assert_eq!(
            api.to_data_config().unwrap().tls,
            TlsVerification::CustomCa(PathBuf::from("/etc/ca.pem"))
        );

        let api = ApiSettings {
            insecure: true,
            ca_cert: Some(PathBuf::from("/etc/ca.pem")),
            ..ApiSettings::default()
        };
        assert_eq!(
            api.to_data_config().unwrap().tls,
            TlsVerification::DangerAcceptInvalid
        );
    }

    #[test]
    fn invalid_origin_is_rejected() {
        let api = ApiSettings {
            origin: "not a url".into(),
            ..ApiSettings::default()
        };
        let err = api.to_data_config().unwrap_err();
        assert!(matches!(err, ConfigError::Validation { ref field, .. } if field == "api.origin"));
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let api = ApiSettings {
            timeout: 0,
            ..ApiSettings::default()
        };
        assert!(api.to_data_config().is_err());
    }

    #[test]
    fn file_values_override_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[api]\nbase_url = \"/v1\"\ntimeout = 5\n\n[cache]\nenabled = false\n",
        )
        .unwrap();

        let cfg = load_config_from(&path).unwrap();
        assert_eq!(cfg.api.base_url, "/v1");
        assert_eq!(cfg.api.timeout, 5);
        assert_eq!(cfg.api.origin, "http://localhost:8080");
        assert!(!cfg.cache.enabled);
        assert_eq!(cfg.defaults.output, "table");
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = load_config_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(cfg.api, ApiSettings::default());
    }

    #[test]
    fn save_then_load_preserves_settings() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut cfg = Config::default();
        cfg.api.origin = "https://dash.internal".into();
        cfg.cache.dir = Some(dir.path().join("cache"));
        save_config_to(&cfg, &path).unwrap();

        let loaded = load_config_from(&path).unwrap();
        assert_eq!(loaded.api.origin, "https://dash.internal");
        assert_eq!(loaded.cache.resolved_dir(), dir.path().join("cache"));
    }
}
