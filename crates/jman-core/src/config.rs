// ── Runtime data-source configuration ──
//
// Describes *where* the dashboard API lives and how to talk to it.
// Never touches disk: the CLI builds a `DataConfig` from its own config
// layer and hands it in.

use std::time::Duration;

use jman_api::transport::{DEFAULT_TIMEOUT, TlsMode, TransportConfig};
use url::Url;

use crate::error::CoreError;

/// TLS verification strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsVerification {
    /// System CA store (strict).
    #[default]
    SystemDefaults,
    /// Custom CA certificate file.
    CustomCa(std::path::PathBuf),
    /// Skip verification (self-signed development backends).
    DangerAcceptInvalid,
}

/// Configuration for one dashboard backend.
#[derive(Debug, Clone)]
pub struct DataConfig {
    /// Absolute API base, e.g. `http://localhost:8080/api`.
    pub base_url: Url,
    /// Per-request timeout.
    pub timeout: Duration,
    /// TLS verification strategy.
    pub tls: TlsVerification,
}

impl DataConfig {
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            timeout: DEFAULT_TIMEOUT,
            tls: TlsVerification::default(),
        }
    }

    /// Build from an origin and an API base that may be relative to it.
    ///
    /// `"/api"` against `http://localhost:8080` yields
    /// `http://localhost:8080/api`; an absolute base ignores the origin.
    pub fn from_base(origin: &Url, base: &str) -> Result<Self, CoreError> {
        Ok(Self::new(jman_api::resolve_base_url(origin, base)?))
    }

    pub(crate) fn transport(&self) -> TransportConfig {
        TransportConfig::default()
            .with_timeout(self.timeout)
            .with_tls(tls_to_transport(&self.tls))
    }
}

fn tls_to_transport(tls: &TlsVerification) -> TlsMode {
    match tls {
        TlsVerification::SystemDefaults => TlsMode::System,
        TlsVerification::CustomCa(path) => TlsMode::CustomCa(path.clone()),
        TlsVerification::DangerAcceptInvalid => TlsMode::DangerAcceptInvalid,
    }
}
