//! Client error types

use std::io;
use thiserror::Error;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// Connect did not complete within the configured timeout
    #[error("Connection to {addr} timed out after {timeout_ms}ms")]
    ConnectTimeout {
        /// Target `host:port`
        addr: String,
        /// Timeout in milliseconds
        timeout_ms: u64,
    },

    /// Name resolution or socket connect failed
    #[error("Failed to connect to {addr}: {reason}")]
    ConnectFailure {
        /// Target `host:port`
        addr: String,
        /// Underlying cause
        reason: String,
    },

    /// Socket I/O error during the session
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Host closed the connection
    #[error("Connection closed by host")]
    PeerClosed,

    /// Outbound queue at capacity; the message was dropped
    #[error("Send failed, queue is full ({capacity} messages)")]
    QueueFull {
        /// Queue capacity
        capacity: usize,
    },

    /// `run` called without a host
    #[error("No host configured")]
    MissingHost,

    /// `run` called while a session is already active
    #[error("Client is already running")]
    AlreadyRunning,

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Configuration file could not be read or written
    #[error("Configuration file error: {0}")]
    Config(String),

    /// A worker thread could not be started
    #[error("Failed to spawn {name} thread: {source}")]
    ThreadSpawn {
        /// Thread role
        name: &'static str,
        /// OS error
        source: io::Error,
    },
}

impl ClientError {
    /// Check if retrying the operation later may succeed
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            ClientError::ConnectTimeout { .. }
                | ClientError::ConnectFailure { .. }
                | ClientError::Io(_)
                | ClientError::PeerClosed
                | ClientError::QueueFull { .. }
        )
    }

    /// Check if this is a connect timeout
    pub fn is_timeout(&self) -> bool {
        matches!(self, ClientError::ConnectTimeout { .. })
    }

    /// Create a connect-failure error
    pub fn connect_failure(addr: impl Into<String>, reason: impl ToString) -> Self {
        ClientError::ConnectFailure {
            addr: addr.into(),
            reason: reason.to_string(),
        }
    }

    /// Create an invalid-config error
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        ClientError::InvalidConfig(msg.into())
    }
}

/// Specialized Result type for client operations
pub type ClientResult<T> = std::result::Result<T, ClientError>;
