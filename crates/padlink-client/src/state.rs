//! Connection lifecycle types

use std::fmt;
use std::time::Instant;

use crate::error::ClientError;

/// Where a client is in its connect/teardown cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ConnectionState {
    /// No session
    #[default]
    Disconnected,
    /// Resolving and connecting
    Connecting,
    /// Session live
    Connected,
    /// Teardown in progress
    Closing,
}

impl fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ConnectionState::Disconnected => "disconnected",
            ConnectionState::Connecting => "connecting",
            ConnectionState::Connected => "connected",
            ConnectionState::Closing => "closing",
        };
        f.write_str(s)
    }
}

/// How a call to [`TcpClient::run`](crate::TcpClient::run) ended.
#[derive(Debug)]
pub enum SessionEnd {
    /// `stop` was called
    Stopped,
    /// The host closed the connection
    PeerClosed,
    /// Connect, read or write failed
    Failed(ClientError),
}

impl SessionEnd {
    /// True when the session ended because the caller asked it to.
    pub fn is_stopped(&self) -> bool {
        matches!(self, SessionEnd::Stopped)
    }

    /// The failure, if any.
    pub fn error(&self) -> Option<&ClientError> {
        match self {
            SessionEnd::Failed(err) => Some(err),
            SessionEnd::Stopped | SessionEnd::PeerClosed => None,
        }
    }
}

/// State and connect instant, always read and written together.
#[derive(Debug, Default)]
pub(crate) struct Lifecycle {
    pub(crate) state: ConnectionState,
    pub(crate) connected_at: Option<Instant>,
}

impl Lifecycle {
    pub(crate) fn reset(&mut self) {
        self.state = ConnectionState::Disconnected;
        self.connected_at = None;
    }
}
