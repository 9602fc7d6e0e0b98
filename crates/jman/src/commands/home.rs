//! Home view: summary counts plus the server and site tables.

use std::fmt::Write;

use chrono::{DateTime, Utc};
use jman_core::model::{plugin_has_update, site_pending_updates};
use jman_core::{DataService, Server, Site, Snapshot};
use serde::Serialize;

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

use super::servers::ServerRow;
use super::sites::SiteRow;

#[derive(Debug, Serialize)]
struct Counts {
    servers: usize,
    sites: usize,
    plugins: usize,
    site_updates: u64,
    plugin_updates: usize,
    reboot_required: usize,
}

#[derive(Debug, Serialize)]
struct Overview {
    counts: Counts,
    last_refresh: Option<DateTime<Utc>>,
    servers: Snapshot<Server>,
    sites: Snapshot<Site>,
}

fn overview(service: &DataService) -> Overview {
    let servers = service.servers_snapshot();
    let sites = service.sites_snapshot();
    let plugins = service.plugins_snapshot();

    let counts = Counts {
        servers: servers.len(),
        sites: sites.len(),
        plugins: plugins.len(),
        site_updates: sites.iter().map(|s| site_pending_updates(s)).sum(),
        plugin_updates: plugins.iter().filter(|p| plugin_has_update(p)).count(),
        reboot_required: servers.iter().filter(|s| s.reboot_required).count(),
    };

    Overview {
        counts,
        last_refresh: service.store().last_full_refresh(),
        servers,
        sites,
    }
}

fn summary_line(c: &Counts) -> String {
    format!("{} servers, {} sites, {} plugins", c.servers, c.sites, c.plugins)
}

fn detail(o: &Overview, service: &DataService, color: bool) -> String {
    let store = service.store();
    let mut out = String::new();

    let _ = writeln!(out, "{}", summary_line(&o.counts));
    let pending = format!(
        "{} WordPress updates, {} plugin updates, {} reboots pending",
        o.counts.site_updates, o.counts.plugin_updates, o.counts.reboot_required
    );
    let any_pending = o.counts.site_updates > 0
        || o.counts.plugin_updates > 0
        || o.counts.reboot_required > 0;
    if any_pending {
        let _ = writeln!(out, "{}", output::attention(&pending, color));
    } else {
        let _ = writeln!(out, "{pending}");
    }
    let source = o.last_refresh.map_or_else(
        || "loaded from cache".to_owned(),
        |t| format!("fetched {}", t.format("%Y-%m-%d %H:%M:%S UTC")),
    );
    let _ = writeln!(out, "Data {source}");

    let _ = writeln!(out);
    let _ = writeln!(out, "{}", output::heading("Servers", color));
    let rows: Vec<ServerRow> = o.servers.iter().map(|s| ServerRow::new(s, store)).collect();
    let _ = writeln!(out, "{}", output::render_table(&rows));

    let _ = writeln!(out);
    let _ = writeln!(out, "{}", output::heading("Sites", color));
    let rows: Vec<SiteRow> = o.sites.iter().map(|s| SiteRow::new(s, store)).collect();
    let _ = write!(out, "{}", output::render_table(&rows));
    out
}

pub fn handle(service: &DataService, global: &GlobalOpts) -> Result<(), CliError> {
    let view = overview(service);
    let color = output::should_color(&global.color);

    let out = output::render_single(
        &global.output,
        &view,
        |o| detail(o, service, color),
        |o| summary_line(&o.counts),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}
