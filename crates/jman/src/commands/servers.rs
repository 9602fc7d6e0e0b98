//! Server command handler.

use std::sync::Arc;

use jman_core::model::disk_used_percent;
use jman_core::{DataService, DataStore, Server};
use tabled::Tabled;

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
pub(super) struct ServerRow {
    #[tabled(rename = "ID")]
    id: u64,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "IP")]
    ip: String,
    #[tabled(rename = "Provider")]
    provider: String,
    #[tabled(rename = "Region")]
    region: String,
    #[tabled(rename = "Disk")]
    disk: String,
    #[tabled(rename = "Sites")]
    sites: usize,
    #[tabled(rename = "Reboot")]
    reboot: String,
    #[tabled(rename = "Status")]
    status: String,
}

impl ServerRow {
    pub(super) fn new(server: &Server, store: &DataStore) -> Self {
        Self {
            id: server.id,
            name: util::or_dash(&server.name),
            ip: util::or_dash(&server.ip_address),
            provider: util::or_dash(&server.provider_name),
            region: util::or_dash(&server.region),
            disk: disk_used_percent(&server.disk_space)
                .map_or_else(|| "-".into(), |pct| format!("{pct:.0}%")),
            sites: store.sites_for_server(server.id).len(),
            reboot: util::yes_no(server.reboot_required),
            status: util::or_dash(&server.status),
        }
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(service: &DataService, global: &GlobalOpts) -> Result<(), CliError> {
    let store = service.store();
    let snap = service.servers_snapshot();
    let out = output::render_list(
        &global.output,
        snap.as_slice(),
        |s: &Arc<Server>| ServerRow::new(s, store),
        |s| s.id.to_string(),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}
