//! Forced refresh handler.

use jman_core::DataService;
use serde::Serialize;

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

use super::util;

#[derive(Debug, Serialize)]
struct RefreshSummary {
    servers: usize,
    sites: usize,
    plugins: usize,
}

/// Fetch all three collections, replacing the cache. Any failure is an error,
/// even when older data is still available.
pub async fn handle(service: &DataService, global: &GlobalOpts) -> Result<(), CliError> {
    let spinner = util::spinner(global, "Refreshing dashboard data");
    service.refresh().await;
    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }

    let status = service.status();
    if status.error.is_some() || !status.is_loaded {
        return Err(util::load_failed(service, status.error));
    }

    let store = service.store();
    let summary = RefreshSummary {
        servers: store.server_count(),
        sites: store.site_count(),
        plugins: store.plugin_count(),
    };
    let out = output::render_single(
        &global.output,
        &summary,
        |s| {
            format!(
                "Refreshed: {} servers, {} sites, {} plugins",
                s.servers, s.sites, s.plugins
            )
        },
        |s| format!("{}\t{}\t{}", s.servers, s.sites, s.plugins),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}
