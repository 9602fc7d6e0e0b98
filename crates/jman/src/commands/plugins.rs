//! Plugin list handler.

use std::sync::Arc;

use jman_core::model::{auto_update_label, plugin_has_update};
use jman_core::{DataService, DataStore, Plugin};
use tabled::Tabled;

use crate::cli::{GlobalOpts, PluginsArgs};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct PluginRow {
    #[tabled(rename = "Site")]
    site: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Version")]
    version: String,
    #[tabled(rename = "Update")]
    update: String,
    #[tabled(rename = "Auto-update")]
    auto_update: String,
    #[tabled(rename = "Status")]
    status: String,
}

impl PluginRow {
    fn new(plugin: &Plugin, store: &DataStore) -> Self {
        let site = store
            .find_site(plugin.site_id)
            .map_or_else(|| format!("#{}", plugin.site_id), |s| s.domain.clone());
        Self {
            site,
            name: plugin.name.clone(),
            version: util::or_dash(&plugin.version),
            update: if plugin_has_update(plugin) {
                plugin.update.clone()
            } else {
                "-".into()
            },
            auto_update: auto_update_label(&plugin.auto_update).to_owned(),
            status: util::or_dash(&plugin.status),
        }
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(
    service: &DataService,
    args: &PluginsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let store = service.store();
    let mut plugins: Vec<Arc<Plugin>> = match args.site {
        Some(site_id) => service.plugins_by_site_id(site_id).get(),
        None => service.plugins_snapshot().iter().cloned().collect(),
    };
    if args.updates {
        plugins.retain(|p| plugin_has_update(p));
    }

    let out = output::render_list(
        &global.output,
        &plugins,
        |p| PluginRow::new(p, store),
        |p| format!("{}\t{}", p.site_id, p.name),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}
