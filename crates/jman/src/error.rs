//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` into user-facing errors with
//! actionable help text and stable exit codes.

use miette::Diagnostic;
use thiserror::Error;

use jman_config::ConfigError;
use jman_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const NOT_FOUND: i32 = 4;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Loading ──────────────────────────────────────────────────────
    #[error("{message}")]
    #[diagnostic(
        code(jman::load_failed),
        help(
            "Check that the dashboard API is reachable at {base_url}\n\
             Point elsewhere with --base-url / --origin, or re-run with -v for details."
        )
    )]
    LoadFailed { message: String, base_url: String },

    // ── Resources ────────────────────────────────────────────────────
    #[error("{resource_type} '{identifier}' not found")]
    #[diagnostic(
        code(jman::not_found),
        help("Run: jman {list_command} to see available {resource_type}s")
    )]
    NotFound {
        resource_type: String,
        identifier: String,
        list_command: String,
    },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(jman::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Configuration file already exists at {path}")]
    #[diagnostic(
        code(jman::config_exists),
        help("Pass --force to overwrite it.")
    )]
    ConfigExists { path: String },

    #[error(transparent)]
    #[diagnostic(
        code(jman::config),
        help("Check the config file (see: jman config path) and JMAN_* environment variables.")
    )]
    Config(#[from] ConfigError),

    // ── Fallthrough ──────────────────────────────────────────────────
    #[error("{0}")]
    #[diagnostic(code(jman::internal))]
    Internal(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::Validation { .. } | Self::ConfigExists { .. } | Self::Config(_) => {
                exit_code::USAGE
            }
            Self::LoadFailed { .. } | Self::Internal(_) | Self::Io(_) => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::NotFound {
                entity_type,
                identifier,
            } => {
                let resource_type = entity_type.to_lowercase();
                CliError::NotFound {
                    list_command: format!("{resource_type}s"),
                    resource_type,
                    identifier,
                }
            }

            CoreError::Config { message } => CliError::Validation {
                field: "config".into(),
                reason: message,
            },

            other @ (CoreError::ConnectionFailed { .. }
            | CoreError::Timeout
            | CoreError::FetchFailed { .. }
            | CoreError::MalformedResponse { .. }) => CliError::Internal(other.status_message()),
        }
    }
}
