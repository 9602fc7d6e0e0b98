// ── Domain model ──
//
// The wire records are already the canonical shape, so they are re-exported
// from `jman-api` and extended here with the derived values views need.

mod detail;

pub use detail::SiteDetail;
pub use jman_api::models::{
    AdditionalDomain, AutoUpdate, Backups, BasicAuth, DiskSpace, Https, Nginx, Plugin, Server,
    ServerDatabase, Site, SiteDatabase, StorageProvider, Toggle, UpdateFlag,
};

/// Percentage of disk in use, `None` when the total is unknown.
#[allow(clippy::cast_precision_loss, clippy::as_conversions)]
pub fn disk_used_percent(disk: &DiskSpace) -> Option<f64> {
    (disk.total > 0).then(|| disk.used as f64 / disk.total as f64 * 100.0)
}

/// Number of pending updates an [`UpdateFlag`] stands for.
pub fn pending_updates(flag: UpdateFlag) -> u64 {
    match flag {
        UpdateFlag::Flag(true) => 1,
        UpdateFlag::Flag(false) => 0,
        UpdateFlag::Count(n) => n,
    }
}

/// Total WordPress updates pending on a site (core + themes + plugins).
pub fn site_pending_updates(site: &Site) -> u64 {
    pending_updates(site.wp_core_update)
        + pending_updates(site.wp_theme_updates)
        + pending_updates(site.wp_plugin_updates)
}

/// Primary domain followed by every additional domain.
pub fn site_domains(site: &Site) -> impl Iterator<Item = &str> {
    std::iter::once(site.domain.as_str())
        .chain(site.additional_domains.iter().map(|d| d.domain.as_str()))
}

/// Whether the backend reports a newer plugin version.
pub fn plugin_has_update(plugin: &Plugin) -> bool {
    let update = plugin.update.trim();
    !update.is_empty() && !update.eq_ignore_ascii_case("none")
}

/// Human-readable auto-update setting.
pub fn auto_update_label(value: &AutoUpdate) -> &str {
    match value {
        AutoUpdate::Enabled(true) => "on",
        AutoUpdate::Enabled(false) => "off",
        AutoUpdate::Label(label) => label.as_str(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    fn site(value: serde_json::Value) -> Site {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn disk_percent_handles_zero_total() {
        assert_eq!(disk_used_percent(&DiskSpace::default()), None);
        let disk = DiskSpace {
            total: 200,
            used: 50,
            ..DiskSpace::default()
        };
        assert_eq!(disk_used_percent(&disk), Some(25.0));
    }

    #[test]
    fn pending_updates_sum_bools_and_counts() {
        let s = site(json!({
            "id": 1, "server_id": 1,
            "wp_core_update": true,
            "wp_theme_updates": false,
            "wp_plugin_updates": 4
        }));
        assert_eq!(site_pending_updates(&s), 5);
    }

    #[test]
    fn domains_start_with_primary() {
        let s = site(json!({
            "id": 1, "server_id": 1, "domain": "a.com",
            "additional_domains": [{ "domain": "www.a.com" }, { "domain": "b.com" }]
        }));
        assert_eq!(site_domains(&s).collect::<Vec<_>>(), ["a.com", "www.a.com", "b.com"]);
    }

    #[test]
    fn plugin_update_detection() {
        let mut p: Plugin =
            serde_json::from_value(json!({ "site_id": 1, "name": "x", "update": "none" })).unwrap();
        assert!(!plugin_has_update(&p));
        p.update = "available".into();
        assert!(plugin_has_update(&p));
        p.update = String::new();
        assert!(!plugin_has_update(&p));
    }

    #[test]
    fn auto_update_labels() {
        assert_eq!(auto_update_label(&AutoUpdate::Enabled(true)), "on");
        assert_eq!(auto_update_label(&AutoUpdate::Label("minor".into())), "minor");
    }
}
