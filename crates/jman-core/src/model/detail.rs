// ── Site detail join ──

use std::sync::Arc;

use serde::Serialize;

use super::{Plugin, Server, Site};

/// A site together with its owning server and its plugins.
///
/// `server` is `None` when the site references a server id the server
/// collection does not contain; referential integrity is not enforced.
#[derive(Debug, Clone, Serialize)]
pub struct SiteDetail {
    pub site: Arc<Site>,
    pub server: Option<Arc<Server>>,
    pub plugins: Vec<Arc<Plugin>>,
}
