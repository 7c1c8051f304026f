//! Connection client for padlink controllers.
//!
//! A [`TcpClient`] owns one TCP session with the host. Three threads touch it:
//!
//! - the producer calls [`TcpClient::enqueue`] / [`TcpClient::send_telemetry`],
//!   which never block;
//! - a sender thread drains the bounded outbound queue onto the socket;
//! - the thread running [`TcpClient::run`] blocks reading newline-delimited
//!   host messages into the [`Mailbox`].
//!
//! Every lifecycle transition and notable failure is reported through a single
//! [`EventSink`].
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use padlink_client::prelude::*;
//!
//! # fn main() -> Result<(), ClientError> {
//! let config = ClientConfig::builder().host("192.168.1.20").build()?;
//! let client = TcpClient::new(config, Arc::new(NullSink))?;
//! let reader = client.spawn()?;
//! client.enqueue("hello")?;
//! client.stop();
//! # let _ = reader.join();
//! # Ok(())
//! # }
//! ```

#![deny(static_mut_refs)]
#![deny(clippy::unwrap_used)]
#![warn(missing_docs, rust_2018_idioms)]

pub mod client;
pub mod config;
pub mod error;
pub mod haptics;
pub mod mailbox;
pub mod prelude;
pub mod state;
pub mod status;

pub use client::TcpClient;
pub use config::{ClientConfig, ClientConfigBuilder};
pub use error::{ClientError, ClientResult};
pub use haptics::{DispatchOutcome, HapticDispatcher};
pub use mailbox::Mailbox;
pub use state::{ConnectionState, SessionEnd};
pub use status::{ChannelSink, ClientEvent, EventSink, NullSink, Status};
