//! Config subcommand handlers.

use jman_config::ConfigError;

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::config::{self, Config};
use crate::error::CliError;
use crate::output;

pub fn handle(args: &ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Path => {
            output::print_output(&config::config_path().display().to_string(), global.quiet);
            Ok(())
        }

        ConfigCommand::Show => {
            let cfg = config::load_config()?;
            let rendered = toml::to_string_pretty(&cfg).map_err(ConfigError::from)?;
            let cache_dir = config::resolve_cache_dir(global, &cfg).map_or_else(
                || "(memory only)".to_owned(),
                |dir| dir.display().to_string(),
            );

            let out = output::render_single(
                &global.output,
                &cfg,
                |_| format!("{rendered}\n# effective cache dir: {cache_dir}"),
                |c| c.api.base_url.clone(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ConfigCommand::Init { force } => {
            let path = config::config_path();
            if path.exists() && !force {
                return Err(CliError::ConfigExists {
                    path: path.display().to_string(),
                });
            }
            let written = config::save_config(&Config::default())?;
            if !global.quiet {
                eprintln!("Wrote default configuration to {}", written.display());
            }
            Ok(())
        }
    }
}
