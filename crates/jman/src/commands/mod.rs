//! Command dispatch: bridges CLI args -> DataService -> output formatting.

pub mod config_cmd;
pub mod home;
pub mod plugins;
pub mod refresh;
pub mod servers;
pub mod site;
pub mod sites;
pub mod util;

use jman_core::DataService;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch a data-bound command to the appropriate handler.
///
/// Every command except `refresh` reads from the store, so the store is
/// loaded (cache first, unless `--refresh`) before the handler runs.
pub async fn dispatch(
    cmd: Command,
    service: &DataService,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    if matches!(cmd, Command::Refresh) {
        return refresh::handle(service, global).await;
    }

    util::ensure_loaded(service, global).await?;

    match cmd {
        Command::Home => home::handle(service, global),
        Command::Servers => servers::handle(service, global),
        Command::Sites(args) => sites::handle(service, &args, global),
        Command::Site(args) => site::handle(service, &args, global),
        Command::Plugins(args) => plugins::handle(service, &args, global),
        // Refresh, Config and Completions are handled before loading
        Command::Refresh | Command::Config(_) | Command::Completions(_) => unreachable!(),
    }
}
