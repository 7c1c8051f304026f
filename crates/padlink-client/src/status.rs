//! Status notifications and event sinks

use std::fmt;
use std::panic::{AssertUnwindSafe, catch_unwind};

use crossbeam::channel::{Receiver, Sender, TrySendError, bounded};
use tracing::{debug, warn};

/// Lifecycle and failure notifications raised by the client.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Status {
    /// Connect attempt started
    Connecting,
    /// Socket connected and login sent
    Connected,
    /// Connect attempt timed out
    ConnectionTimeout,
    /// Host closed the connection
    ConnectionClosed,
    /// Read failed while the session was live
    ConnectionNull,
    /// Session torn down
    Disconnected,
    /// Connect failed for a reason other than timeout
    Fail,
    /// Outbound queue full; a message was dropped
    SendFailedQueueFull,
    /// Writing to the socket failed
    SendError(String),
    /// The sender found no open connection to write to
    SenderUnavailable,
    /// `run` was called without a host
    MissingHost,
}

impl Status {
    /// Stable machine-readable name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Connecting => "connecting",
            Status::Connected => "connected",
            Status::ConnectionTimeout => "connection_timeout",
            Status::ConnectionClosed => "connection_closed",
            Status::ConnectionNull => "connection_null",
            Status::Disconnected => "disconnected",
            Status::Fail => "fail",
            Status::SendFailedQueueFull => "send_failed_queue_full",
            Status::SendError(_) => "send_error",
            Status::SenderUnavailable => "sender_unavailable",
            Status::MissingHost => "missing_host",
        }
    }

    /// Whether this status reports a problem rather than a normal transition.
    pub fn is_failure(&self) -> bool {
        !matches!(
            self,
            Status::Connecting | Status::Connected | Status::Disconnected
        )
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::SendError(reason) => write!(f, "send_error: {reason}"),
            other => f.write_str(other.as_str()),
        }
    }
}

/// Receiver of client notifications.
///
/// Called from the producer, sender and reader threads, so implementations
/// must be cheap and thread-safe. A panicking sink is caught and logged; it
/// never takes the client down.
pub trait EventSink: Send + Sync {
    /// A lifecycle transition or failure occurred.
    fn status_changed(&self, status: &Status);

    /// A line arrived from the host (also pushed to the mailbox).
    fn message_received(&self, _message: &str) {}
}

/// Sink that discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl EventSink for NullSink {
    fn status_changed(&self, _status: &Status) {}
}

/// Event forwarded by a [`ChannelSink`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientEvent {
    /// See [`EventSink::status_changed`]
    Status(Status),
    /// See [`EventSink::message_received`]
    Message(String),
}

/// Sink that forwards events into a bounded crossbeam channel.
///
/// Forwarding never blocks; events are dropped with a warning when the
/// receiver falls behind.
#[derive(Debug, Clone)]
pub struct ChannelSink {
    tx: Sender<ClientEvent>,
    forward_messages: bool,
}

impl ChannelSink {
    /// Create a sink and the receiver that drains it.
    pub fn new(capacity: usize) -> (Self, Receiver<ClientEvent>) {
        let (tx, rx) = bounded(capacity);
        (
            Self {
                tx,
                forward_messages: true,
            },
            rx,
        )
    }

    /// Forward only status events.
    #[must_use]
    pub fn status_only(mut self) -> Self {
        self.forward_messages = false;
        self
    }

    fn forward(&self, event: ClientEvent) {
        match self.tx.try_send(event) {
            Ok(()) => {}
            Err(TrySendError::Full(event)) => {
                warn!("Event channel full, dropping {:?}", event);
            }
            Err(TrySendError::Disconnected(_)) => {
                debug!("Event receiver gone");
            }
        }
    }
}

impl EventSink for ChannelSink {
    fn status_changed(&self, status: &Status) {
        self.forward(ClientEvent::Status(status.clone()));
    }

    fn message_received(&self, message: &str) {
        if self.forward_messages {
            self.forward(ClientEvent::Message(message.to_owned()));
        }
    }
}

pub(crate) fn notify_status(sink: &dyn EventSink, status: &Status) {
    debug!(status = %status, "client status");
    if catch_unwind(AssertUnwindSafe(|| sink.status_changed(status))).is_err() {
        warn!(status = %status, "Event sink panicked in status_changed; ignoring");
    }
}

pub(crate) fn notify_message(sink: &dyn EventSink, message: &str) {
    if catch_unwind(AssertUnwindSafe(|| sink.message_received(message))).is_err() {
        warn!("Event sink panicked in message_received; ignoring");
    }
}
