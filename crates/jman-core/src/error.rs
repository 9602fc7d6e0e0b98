// ── Core error types ──
//
// User-facing errors from jman-core. Consumers never see raw reqwest or
// serde errors; the `From<jman_api::Error>` impl translates transport
// failures into domain variants whose messages are fit for the status bar.

use thiserror::Error;

/// Message stored in the load status when a failure carries no text.
pub const DEFAULT_FETCH_ERROR: &str = "An error occurred while fetching data";

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot reach dashboard API at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Dashboard API request timed out")]
    Timeout,

    // ── Protocol / data errors ───────────────────────────────────────
    #[error("Failed to fetch data from API endpoints ({endpoint}: HTTP {status})")]
    FetchFailed { endpoint: String, status: u16 },

    #[error("Malformed API response: {message}")]
    MalformedResponse { message: String },

    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: String,
        identifier: String,
    },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl CoreError {
    /// Message suitable for the shared `error` status field.
    ///
    /// Falls back to [`DEFAULT_FETCH_ERROR`] when the underlying cause
    /// carries no text.
    pub fn status_message(&self) -> String {
        let cause_missing = match self {
            Self::ConnectionFailed { reason, .. } => reason.trim().is_empty(),
            Self::MalformedResponse { message } | Self::Config { message } => {
                message.trim().is_empty()
            }
            Self::Timeout | Self::FetchFailed { .. } | Self::NotFound { .. } => false,
        };
        if cause_missing {
            DEFAULT_FETCH_ERROR.to_owned()
        } else {
            self.to_string()
        }
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<jman_api::Error> for CoreError {
    fn from(err: jman_api::Error) -> Self {
        match err {
            jman_api::Error::Transport(ref e) => {
                if e.is_timeout() {
                    CoreError::Timeout
                } else if e.is_decode() {
                    CoreError::MalformedResponse {
                        message: e.to_string(),
                    }
                } else {
                    CoreError::ConnectionFailed {
                        url: e
                            .url()
                            .map_or_else(|| "<unknown>".into(), ToString::to_string),
                        reason: e.to_string(),
                    }
                }
            }
            jman_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            jman_api::Error::Tls(msg) => CoreError::Config {
                message: format!("TLS error: {msg}"),
            },
            jman_api::Error::Status {
                endpoint, status, ..
            } => CoreError::FetchFailed { endpoint, status },
            jman_api::Error::Deserialization { message, body: _ } => {
                CoreError::MalformedResponse { message }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_maps_to_fetch_failed() {
        let err: CoreError = jman_api::Error::Status {
            endpoint: "plugins".into(),
            status: 500,
            body: "boom".into(),
        }
        .into();
        assert!(matches!(err, CoreError::FetchFailed { status: 500, .. }));
        assert_eq!(
            err.status_message(),
            "Failed to fetch data from API endpoints (plugins: HTTP 500)"
        );
    }

    #[test]
    fn deserialization_maps_to_malformed_response() {
        let err: CoreError = jman_api::Error::Deserialization {
            message: "sites: expected value".into(),
            body: "<html>".into(),
        }
        .into();
        assert_eq!(
            err.status_message(),
            "Malformed API response: sites: expected value"
        );
    }

    #[test]
    fn empty_cause_falls_back_to_default() {
        let err = CoreError::MalformedResponse {
            message: String::new(),
        };
        assert_eq!(err.status_message(), DEFAULT_FETCH_ERROR);

        let err = CoreError::ConnectionFailed {
            url: "http://localhost:8080/api/servers".into(),
            reason: "  ".into(),
        };
        assert_eq!(err.status_message(), DEFAULT_FETCH_ERROR);
    }

    #[test]
    fn causes_with_text_keep_their_message() {
        assert_eq!(
            CoreError::Timeout.status_message(),
            "Dashboard API request timed out"
        );
        let err = CoreError::ConnectionFailed {
            url: "http://localhost:8080/api/servers".into(),
            reason: "connection refused".into(),
        };
        assert_eq!(
            err.status_message(),
            "Cannot reach dashboard API at http://localhost:8080/api/servers: connection refused"
        );
    }
}
