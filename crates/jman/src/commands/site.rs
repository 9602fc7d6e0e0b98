//! Site detail handler: a site joined with its server and plugins.

use std::fmt::Write;

use jman_core::model::{site_domains, site_pending_updates};
use jman_core::{DataService, SiteDetail};
use tabled::Tabled;

use crate::cli::{GlobalOpts, SiteArgs};
use crate::error::CliError;
use crate::output;

use super::util;

#[derive(Tabled)]
struct PluginRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Version")]
    version: String,
    #[tabled(rename = "Update")]
    update: String,
    #[tabled(rename = "Status")]
    status: String,
}

fn detail(d: &SiteDetail, color: bool) -> String {
    let site = &d.site;
    let mut out = String::new();

    let _ = writeln!(out, "{}", output::heading(&site.domain, color));
    let _ = writeln!(out, "  ID:          {}", site.id);
    let server = d.server.as_ref().map_or_else(
        || format!("#{} (unknown)", site.server_id),
        |s| format!("{} (#{}, {})", s.name, s.id, util::or_dash(&s.ip_address)),
    );
    let _ = writeln!(out, "  Server:      {server}");
    let aliases: Vec<&str> = site_domains(site).skip(1).collect();
    if !aliases.is_empty() {
        let _ = writeln!(out, "  Aliases:     {}", aliases.join(", "));
    }
    let _ = writeln!(out, "  Status:      {}", util::or_dash(&site.status));
    let _ = writeln!(out, "  PHP:         {}", util::or_dash(&site.php_version));
    let _ = writeln!(out, "  User:        {}", util::or_dash(&site.site_user));
    let _ = writeln!(out, "  WordPress:   {}", util::yes_no(site.is_wordpress));
    let https = match (site.https.enabled, site.https.certificate_expires.as_deref()) {
        (true, Some(expires)) => format!("yes (expires {expires})"),
        (enabled, _) => util::yes_no(enabled),
    };
    let _ = writeln!(out, "  HTTPS:       {https}");
    let _ = writeln!(out, "  Page cache:  {}", util::yes_no(site.page_cache.enabled));
    let _ = writeln!(
        out,
        "  Backups:     files={} database={}",
        util::yes_no(site.backups.files),
        util::yes_no(site.backups.database)
    );
    let updates = site_pending_updates(site);
    let updates = if updates > 0 {
        output::attention(&updates.to_string(), color)
    } else {
        "0".into()
    };
    let _ = writeln!(out, "  Updates:     {updates}");

    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "{}",
        output::heading(&format!("Plugins ({})", d.plugins.len()), color)
    );
    if d.plugins.is_empty() {
        let _ = write!(out, "  (none)");
    } else {
        let rows: Vec<PluginRow> = d
            .plugins
            .iter()
            .map(|p| PluginRow {
                name: p.name.clone(),
                version: util::or_dash(&p.version),
                update: util::or_dash(&p.update),
                status: util::or_dash(&p.status),
            })
            .collect();
        let _ = write!(out, "{}", output::render_table(&rows));
    }
    out
}

pub fn handle(service: &DataService, args: &SiteArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let detail_view = service.site_detail(args.id)?;
    let color = output::should_color(&global.color);

    let out = output::render_single(
        &global.output,
        &detail_view,
        |d| detail(d, color),
        |d| d.site.domain.clone(),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}
