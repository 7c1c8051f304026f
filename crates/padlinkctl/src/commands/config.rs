//! Configuration file commands

use anyhow::Result;
use padlink_client::ClientConfig;
use tracing::info;

use crate::commands::ConfigCommands;
use crate::error::CliError;
use crate::output;

/// Execute a config command
pub fn execute(cmd: &ConfigCommands, config: &ClientConfig, json: bool) -> Result<()> {
    match cmd {
        ConfigCommands::Show => {
            output::print_config(config, json);
            Ok(())
        }
        ConfigCommands::Write { path, force } => {
            if path.exists() && !force {
                return Err(CliError::InvalidInput(format!(
                    "{} already exists (use --force to overwrite)",
                    path.display()
                ))
                .into());
            }
            config.save_to_path(path).map_err(CliError::from)?;
            info!("Wrote configuration to {}", path.display());
            output::print_success(&format!("Configuration written to {}", path.display()), json);
            Ok(())
        }
    }
}
