// Dashboard API HTTP client
//
// Wraps `reqwest::Client` with base-URL handling, status checking and
// body decoding. The endpoint methods live in `resources.rs` as inherent
// methods so this module stays focused on transport mechanics.

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, trace};
use url::Url;

use crate::error::Error;
use crate::transport::TransportConfig;

/// Longest body excerpt carried in error messages.
const BODY_PREVIEW_CHARS: usize = 200;

/// One endpoint's response: the decoded records and the array exactly as
/// the server sent it, element for element.
#[derive(Debug, Clone, PartialEq)]
pub struct Listing<T> {
    pub items: Vec<T>,
    pub raw: Vec<Value>,
}

/// Raw HTTP client for the dashboard's read-only JSON endpoints.
///
/// Every endpoint returns a bare JSON array. Methods return a [`Listing`],
/// or an [`Error`] for transport failures, non-success statuses
/// and malformed bodies alike.
#[derive(Debug, Clone)]
pub struct DashboardClient {
    http: reqwest::Client,
    base_url: Url,
}

impl DashboardClient {
    /// Create a new client from a `TransportConfig`.
    ///
    /// `base_url` is the API root (e.g. `https://dash.example.com/api`);
    /// endpoint paths are appended to it.
    pub fn new(base_url: Url, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self { http, base_url })
    }

    /// Create a client with a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, base_url: Url) -> Self {
        Self { http, base_url }
    }

    /// The API root URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── URL builders ─────────────────────────────────────────────────

    /// Build `{base}/{path}`, tolerating a trailing slash on the base.
    pub(crate) fn endpoint_url(&self, path: &str) -> Result<Url, Error> {
        let base = self.base_url.as_str().trim_end_matches('/');
        let path = path.trim_start_matches('/');
        Ok(Url::parse(&format!("{base}/{path}"))?)
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// Send a GET request and decode the JSON array body.
    ///
    /// The body must be a JSON array and every element must decode as `T`;
    /// one bad record fails the whole listing.
    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        endpoint: &str,
    ) -> Result<Listing<T>, Error> {
        let url = self.endpoint_url(endpoint)?;
        debug!(%url, "GET");

        let resp = self.http.get(url).send().await.map_err(Error::Transport)?;
        let status = resp.status();

        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::Status {
                endpoint: endpoint.to_owned(),
                status: status.as_u16(),
                body: preview(&body),
            });
        }

        let body = resp.text().await.map_err(Error::Transport)?;
        trace!(endpoint, bytes = body.len(), "response body received");

        let raw: Vec<Value> = match serde_json::from_str(&body) {
            Ok(raw) => raw,
            Err(e) => {
                return Err(Error::Deserialization {
                    message: format!("{endpoint}: {e} (body preview: {:?})", preview(&body)),
                    body,
                });
            }
        };

        let items = raw
            .iter()
            .enumerate()
            .map(|(index, value)| {
                T::deserialize(value).map_err(|e| Error::Deserialization {
                    message: format!("{endpoint}[{index}]: {e}"),
                    body: preview(&body),
                })
            })
            .collect::<Result<Vec<T>, Error>>()?;

        Ok(Listing { items, raw })
    }
}

fn preview(body: &str) -> String {
    body.chars().take(BODY_PREVIEW_CHARS).collect()
}

/// Resolve the configured API base against an origin.
///
/// An absolute `base` (`https://host/api`) is used as-is; a relative one
/// (`/api`, the default) is joined onto `origin`.
pub fn resolve_base_url(origin: &Url, base: &str) -> Result<Url, Error> {
    match Url::parse(base) {
        Ok(url) => Ok(url),
        Err(url::ParseError::RelativeUrlWithoutBase) => Ok(origin.join(base)?),
        Err(e) => Err(Error::InvalidUrl(e)),
    }
}
