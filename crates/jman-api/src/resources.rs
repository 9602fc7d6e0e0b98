// Dashboard resource endpoints
//
// Three read-only collections, each a plain JSON array. No paging,
// filtering or authentication parameters.

use tracing::debug;

use crate::client::{DashboardClient, Listing};
use crate::error::Error;
use crate::models::{Plugin, Server, Site};

pub const SERVERS_PATH: &str = "servers";
pub const SITES_PATH: &str = "sites";
pub const PLUGINS_PATH: &str = "plugins";

impl DashboardClient {
    /// List every server.
    ///
    /// `GET {base}/servers`
    pub async fn list_servers(&self) -> Result<Listing<Server>, Error> {
        debug!("listing servers");
        self.get(SERVERS_PATH).await
    }

    /// List every site.
    ///
    /// `GET {base}/sites`
    pub async fn list_sites(&self) -> Result<Listing<Site>, Error> {
        debug!("listing sites");
        self.get(SITES_PATH).await
    }

    /// List every plugin across all sites.
    ///
    /// `GET {base}/plugins`
    pub async fn list_plugins(&self) -> Result<Listing<Plugin>, Error> {
        debug!("listing plugins");
        self.get(PLUGINS_PATH).await
    }
}
