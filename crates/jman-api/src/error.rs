use thiserror::Error;

/// Top-level error type for the `jman-api` crate.
///
/// Covers every failure mode of a single endpoint request: transport,
/// URL construction, non-success status, and body decoding.
/// `jman-core` maps these into user-facing messages.
#[derive(Debug, Error)]
pub enum Error {
    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, timeout, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// TLS setup or certificate error.
    #[error("TLS error: {0}")]
    Tls(String),

    // ── Protocol ────────────────────────────────────────────────────
    /// The endpoint answered with a non-success status.
    #[error("{endpoint} responded with HTTP {status}")]
    Status {
        endpoint: String,
        status: u16,
        body: String,
    },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}
