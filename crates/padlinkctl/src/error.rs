//! Error types for padlinkctl

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Malformed frame: {0}")]
    Decode(#[from] padlink_protocol::MalformedPacket),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl From<padlink_client::ClientError> for CliError {
    fn from(err: padlink_client::ClientError) -> Self {
        use padlink_client::ClientError;
        match err {
            ClientError::InvalidConfig(msg) | ClientError::Config(msg) => {
                CliError::InvalidConfiguration(msg)
            }
            other => CliError::Connection(other.to_string()),
        }
    }
}

impl From<padlink_haptics::HapticsError> for CliError {
    fn from(err: padlink_haptics::HapticsError) -> Self {
        CliError::InvalidConfiguration(err.to_string())
    }
}
