//! Site list handler.

use std::sync::Arc;

use jman_core::model::site_pending_updates;
use jman_core::{DataService, DataStore, Site};
use tabled::Tabled;

use crate::cli::{GlobalOpts, SitesArgs};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
pub(super) struct SiteRow {
    #[tabled(rename = "ID")]
    id: u64,
    #[tabled(rename = "Domain")]
    domain: String,
    #[tabled(rename = "Server")]
    server: String,
    #[tabled(rename = "PHP")]
    php: String,
    #[tabled(rename = "WordPress")]
    wordpress: String,
    #[tabled(rename = "HTTPS")]
    https: String,
    #[tabled(rename = "Updates")]
    updates: u64,
    #[tabled(rename = "Status")]
    status: String,
}

impl SiteRow {
    pub(super) fn new(site: &Site, store: &DataStore) -> Self {
        Self {
            id: site.id,
            domain: site.domain.clone(),
            server: server_label(site.server_id, store),
            php: util::or_dash(&site.php_version),
            wordpress: util::yes_no(site.is_wordpress),
            https: util::yes_no(site.https.enabled),
            updates: site_pending_updates(site),
            status: util::or_dash(&site.status),
        }
    }
}

/// Server name, falling back to `#id` for dangling references.
pub(super) fn server_label(server_id: u64, store: &DataStore) -> String {
    store
        .find_server(server_id)
        .filter(|s| !s.name.is_empty())
        .map_or_else(|| format!("#{server_id}"), |s| s.name.clone())
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(service: &DataService, args: &SitesArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let store = service.store();
    let sites: Vec<Arc<Site>> = match args.server {
        Some(server_id) => service.sites_by_server_id(server_id).get(),
        None => service.sites_snapshot().iter().cloned().collect(),
    };

    let out = output::render_list(
        &global.output,
        &sites,
        |s| SiteRow::new(s, store),
        |s| s.id.to_string(),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}
