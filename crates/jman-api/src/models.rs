// Dashboard API response types
//
// Records returned by `/servers`, `/sites` and `/plugins`. Identity and
// foreign-key fields are required; everything else falls back to its
// default when absent or `null`, because upstream records are frequently
// sparse.

use serde::{Deserialize, Deserializer, Serialize};

/// Treat an explicit `null` like a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// ── Server ───────────────────────────────────────────────────────────

/// Infrastructure host record from `GET /servers`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Server {
    pub id: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub provider_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub ubuntu_version: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub ip_address: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub ssh_port: u16,
    #[serde(default, deserialize_with = "null_as_default")]
    pub timezone: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub region: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub size: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub disk_space: DiskSpace,
    #[serde(default, deserialize_with = "null_as_default")]
    pub database: ServerDatabase,
    #[serde(default, deserialize_with = "null_as_default")]
    pub ssh_publickey: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub git_publickey: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub connection_status: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub reboot_required: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub upgrade_required: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub install_notes: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub created_at: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: String,
}

/// Disk usage in bytes, as last sampled by the backend.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiskSpace {
    #[serde(default, deserialize_with = "null_as_default")]
    pub total: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub available: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub used: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub updated_at: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerDatabase {
    #[serde(default, deserialize_with = "null_as_default")]
    pub server: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub host: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub port: u16,
}

// ── Site ─────────────────────────────────────────────────────────────

/// Hosted website from `GET /sites`. Owned by one server via `server_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Site {
    pub id: u64,
    pub server_id: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub domain: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub additional_domains: Vec<AdditionalDomain>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub site_user: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub user_auth: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub php_version: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub public_folder: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_wordpress: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub page_cache: Toggle,
    #[serde(default, deserialize_with = "null_as_default")]
    pub https: Https,
    #[serde(default, deserialize_with = "null_as_default")]
    pub nginx: Nginx,
    #[serde(default, deserialize_with = "null_as_default")]
    pub database: SiteDatabase,
    #[serde(default, deserialize_with = "null_as_default")]
    pub backups: Backups,
    #[serde(default, deserialize_with = "null_as_default")]
    pub wp_core_update: UpdateFlag,
    #[serde(default, deserialize_with = "null_as_default")]
    pub wp_theme_updates: UpdateFlag,
    #[serde(default, deserialize_with = "null_as_default")]
    pub wp_plugin_updates: UpdateFlag,
    #[serde(default, deserialize_with = "null_as_default")]
    pub basic_auth: BasicAuth,
    #[serde(default, deserialize_with = "null_as_default")]
    pub created_at: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdditionalDomain {
    pub domain: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub redirect: Toggle,
    #[serde(default, deserialize_with = "null_as_default")]
    pub created_at: String,
}

/// A `{ "enabled": bool }` sub-record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Toggle {
    #[serde(default, deserialize_with = "null_as_default")]
    pub enabled: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Https {
    #[serde(default, deserialize_with = "null_as_default")]
    pub enabled: bool,
    #[serde(default)]
    pub certificate_expires: Option<String>,
    #[serde(default)]
    pub certificate_renews: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Nginx {
    #[serde(default, deserialize_with = "null_as_default")]
    pub uploads_directory_protected: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub xmlrpc_protected: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub subdirectory_rewrite_in_place: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteDatabase {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table_prefix: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Backups {
    #[serde(default, deserialize_with = "null_as_default")]
    pub files: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub database: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub paths_to_exclude: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_backups_retention_period_enabled: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub retention_period: u32,
    #[serde(default)]
    pub next_run_time: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub storage_provider: StorageProvider,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageProvider {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub region: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub bucket: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BasicAuth {
    #[serde(default, deserialize_with = "null_as_default")]
    pub enabled: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub username: String,
}

/// WordPress update indicator. The backend sends either a boolean or the
/// number of pending updates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UpdateFlag {
    Flag(bool),
    Count(u64),
}

impl Default for UpdateFlag {
    fn default() -> Self {
        Self::Flag(false)
    }
}

// ── Plugin ───────────────────────────────────────────────────────────

/// WordPress plugin from `GET /plugins`. No id of its own; identified by
/// `(site_id, name)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plugin {
    pub site_id: u64,
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub version: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub update: String,
    #[serde(default, deserialize_with = "null_as_default", rename = "autoUpdate")]
    pub auto_update: AutoUpdate,
}

/// Auto-update setting: a boolean, or a backend-provided label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AutoUpdate {
    Enabled(bool),
    Label(String),
}

impl Default for AutoUpdate {
    fn default() -> Self {
        Self::Enabled(false)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn sparse_server_parses_with_defaults() {
        let server: Server = serde_json::from_value(json!({ "id": 7, "name": "web-1" })).unwrap();
        assert_eq!(server.id, 7);
        assert_eq!(server.name, "web-1");
        assert_eq!(server.disk_space, DiskSpace::default());
        assert!(!server.reboot_required);
    }

    #[test]
    fn null_fields_fall_back_to_defaults() {
        let server: Server = serde_json::from_value(json!({
            "id": 1,
            "name": "web-1",
            "install_notes": null,
            "ssh_port": null,
            "disk_space": null
        }))
        .unwrap();
        assert_eq!(server.install_notes, "");
        assert_eq!(server.ssh_port, 0);
        assert_eq!(server.disk_space, DiskSpace::default());

        let site: Site = serde_json::from_value(json!({
            "id": 2,
            "server_id": 1,
            "wp_core_update": null,
            "basic_auth": { "enabled": false, "username": null },
            "backups": { "paths_to_exclude": null }
        }))
        .unwrap();
        assert_eq!(site.wp_core_update, UpdateFlag::Flag(false));
        assert_eq!(site.basic_auth.username, "");
        assert_eq!(site.backups.paths_to_exclude, "");

        let plugin: Plugin = serde_json::from_value(json!({
            "site_id": 2,
            "name": "akismet",
            "update": null,
            "autoUpdate": null
        }))
        .unwrap();
        assert_eq!(plugin.update, "");
        assert_eq!(plugin.auto_update, AutoUpdate::Enabled(false));
    }

    #[test]
    fn server_without_id_is_rejected() {
        let res = serde_json::from_value::<Server>(json!({ "name": "web-1" }));
        assert!(res.is_err());
    }

    #[test]
    fn site_update_flags_accept_bool_or_count() {
        let site: Site = serde_json::from_value(json!({
            "id": 1,
            "server_id": 2,
            "wp_core_update": true,
            "wp_plugin_updates": 3,
            "https": { "enabled": true, "certificate_expires": null }
        }))
        .unwrap();
        assert_eq!(site.wp_core_update, UpdateFlag::Flag(true));
        assert_eq!(site.wp_plugin_updates, UpdateFlag::Count(3));
        assert_eq!(site.wp_theme_updates, UpdateFlag::Flag(false));
        assert!(site.https.enabled);
        assert!(site.https.certificate_expires.is_none());
    }

    #[test]
    fn plugin_auto_update_uses_wire_name() {
        let plugin: Plugin = serde_json::from_value(json!({
            "site_id": 4,
            "name": "akismet",
            "autoUpdate": "on"
        }))
        .unwrap();
        assert_eq!(plugin.auto_update, AutoUpdate::Label("on".into()));

        let out = serde_json::to_value(&plugin).unwrap();
        assert_eq!(out["autoUpdate"], json!("on"));
        assert!(out.get("auto_update").is_none());
    }
}
