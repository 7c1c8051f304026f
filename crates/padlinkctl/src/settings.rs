//! Configuration file loading

use std::path::Path;

use padlink_client::ClientConfig;
use tracing::debug;

use crate::error::CliError;

/// Load the client configuration, or defaults when no file is given.
pub fn load(path: Option<&Path>) -> Result<ClientConfig, CliError> {
    match path {
        Some(path) => {
            let config = ClientConfig::load_from_path(path)?;
            debug!("Using configuration from {}", path.display());
            Ok(config)
        }
        None => Ok(ClientConfig::default()),
    }
}
