//! Prelude module for convenient imports

pub use crate::client::TcpClient;
pub use crate::config::{ClientConfig, ClientConfigBuilder};
pub use crate::error::{ClientError, ClientResult};
pub use crate::haptics::{DispatchOutcome, HapticDispatcher};
pub use crate::mailbox::Mailbox;
pub use crate::state::{ConnectionState, SessionEnd};
pub use crate::status::{ChannelSink, ClientEvent, EventSink, NullSink, Status};
