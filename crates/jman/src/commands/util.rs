//! Shared helpers for command handlers.

use std::io::{self, IsTerminal};
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use jman_core::{DEFAULT_FETCH_ERROR, DataService};

use crate::cli::GlobalOpts;
use crate::error::CliError;

/// Load the store: cache-first `init`, or a forced `refresh` with `--refresh`.
///
/// Fails only when no data is available at all. A failed refresh on top of
/// previously loaded data prints a warning and keeps going with that data.
pub async fn ensure_loaded(service: &DataService, global: &GlobalOpts) -> Result<(), CliError> {
    let spinner = spinner(
        global,
        if global.refresh {
            "Refreshing dashboard data"
        } else {
            "Loading dashboard data"
        },
    );

    if global.refresh {
        service.refresh().await;
    } else {
        service.init().await;
    }

    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }

    let status = service.status();
    if !status.is_loaded {
        return Err(load_failed(service, status.error));
    }
    if let Some(error) = status.error {
        tracing::warn!(%error, "refresh failed, showing previously loaded data");
        if !global.quiet {
            eprintln!("warning: {error}; showing previously loaded data");
        }
    }
    Ok(())
}

/// Build the error for a load that left nothing to show.
pub fn load_failed(service: &DataService, error: Option<String>) -> CliError {
    CliError::LoadFailed {
        message: error.unwrap_or_else(|| DEFAULT_FETCH_ERROR.to_owned()),
        base_url: service.config().base_url.to_string(),
    }
}

/// Stderr spinner shown while a load is in flight. Skipped when quiet or
/// when stderr is not a terminal.
pub fn spinner(global: &GlobalOpts, message: &'static str) -> Option<ProgressBar> {
    if global.quiet || !io::stderr().is_terminal() {
        return None;
    }
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(80));
    Some(pb)
}

/// Render an empty string as a dash for table cells.
pub fn or_dash(value: &str) -> String {
    if value.trim().is_empty() {
        "-".into()
    } else {
        value.to_owned()
    }
}

/// Render a boolean as a short yes/no table cell.
pub fn yes_no(value: bool) -> String {
    if value { "yes" } else { "no" }.into()
}
