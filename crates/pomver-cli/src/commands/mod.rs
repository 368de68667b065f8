//! Command dispatch and handler modules.

mod export;
mod inspect;

use miette::Result;

use pomver_core::config::InventoryConfig;
use pomver_ops::ConfigOverrides;
use pomver_util::errors::PomverError;

use crate::cli::{Cli, Command, ConfigArgs};

/// Route a parsed CLI invocation to the appropriate command handler.
pub fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Export {
            config,
            output,
            ignore_groups,
            ignore_apps,
        } => {
            let overrides = ConfigOverrides {
                root_dir: config.root.clone(),
                export_path: output,
                ignore_group_ids: ignore_groups,
                ignore_applications: ignore_apps,
            };
            export::exec(&config, &overrides)
        }
        Command::Inspect {
            config,
            app,
            format,
        } => inspect::exec(&config, app, format),
    }
}

/// Load the config for a command from the working directory.
fn load_config(args: &ConfigArgs, overrides: &ConfigOverrides) -> Result<InventoryConfig> {
    let cwd = std::env::current_dir().map_err(PomverError::Io)?;
    pomver_ops::load_config(args.config.as_deref(), &cwd, overrides)
}
