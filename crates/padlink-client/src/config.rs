//! Client configuration

use std::fs;
use std::path::Path;
use std::time::Duration;

use padlink_haptics::SynthConfig;
use padlink_protocol::DEFAULT_PORT;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ClientError, ClientResult};

/// Connection and session settings for a [`TcpClient`](crate::TcpClient).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Host name or address; `run` refuses to start without one
    pub host: Option<String>,
    /// Host TCP port
    pub port: u16,
    /// Which hand this controller is bound to
    pub left_controller: bool,
    /// Connect timeout in milliseconds
    pub connect_timeout_ms: u64,
    /// Grace period after connect before telemetry is sent, in milliseconds
    pub first_packet_delay_ms: u64,
    /// How often the sender re-checks the running flag when idle, in milliseconds
    pub poll_interval_ms: u64,
    /// Outbound queue capacity in messages
    pub queue_capacity: usize,
    /// How long `stop` waits for the sender thread, in milliseconds
    pub stop_join_timeout_ms: u64,
    /// How long session teardown waits for the sender thread, in milliseconds
    pub session_join_timeout_ms: u64,
    /// Disable Nagle's algorithm on the socket
    pub tcp_nodelay: bool,
    /// Haptic synthesis settings
    pub synth: SynthConfig,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            host: None,
            port: DEFAULT_PORT,
            left_controller: false,
            connect_timeout_ms: 5000,
            first_packet_delay_ms: 1000,
            poll_interval_ms: 50,
            queue_capacity: 1000,
            stop_join_timeout_ms: 800,
            session_join_timeout_ms: 1000,
            tcp_nodelay: true,
            synth: SynthConfig::default(),
        }
    }
}

impl ClientConfig {
    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidConfig`] describing the first bad field.
    pub fn validate(&self) -> ClientResult<()> {
        if let Some(host) = &self.host
            && host.trim().is_empty()
        {
            return Err(ClientError::invalid_config("host must not be empty"));
        }
        if self.port == 0 {
            return Err(ClientError::invalid_config("port must be greater than 0"));
        }
        if self.connect_timeout_ms == 0 {
            return Err(ClientError::invalid_config(
                "connect_timeout_ms must be greater than 0",
            ));
        }
        if self.poll_interval_ms == 0 {
            return Err(ClientError::invalid_config(
                "poll_interval_ms must be greater than 0",
            ));
        }
        if self.queue_capacity == 0 {
            return Err(ClientError::invalid_config(
                "queue_capacity must be greater than 0",
            ));
        }
        if self.stop_join_timeout_ms == 0 || self.session_join_timeout_ms == 0 {
            return Err(ClientError::invalid_config(
                "join timeouts must be greater than 0",
            ));
        }
        self.synth
            .validate()
            .map_err(|e| ClientError::invalid_config(e.to_string()))
    }

    /// Create a builder for `ClientConfig`.
    #[must_use]
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }

    /// `host:port` for logging and errors.
    pub fn address(&self) -> String {
        format!("{}:{}", self.host.as_deref().unwrap_or("<unset>"), self.port)
    }

    /// Connect timeout as a `Duration`.
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }

    /// First-packet delay as a `Duration`.
    pub fn first_packet_delay(&self) -> Duration {
        Duration::from_millis(self.first_packet_delay_ms)
    }

    /// Sender poll interval as a `Duration`.
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// `stop` join timeout as a `Duration`.
    pub fn stop_join_timeout(&self) -> Duration {
        Duration::from_millis(self.stop_join_timeout_ms)
    }

    /// Session teardown join timeout as a `Duration`.
    pub fn session_join_timeout(&self) -> Duration {
        Duration::from_millis(self.session_join_timeout_ms)
    }

    /// Load and validate a JSON configuration file.
    ///
    /// # Errors
    ///
    /// [`ClientError::Config`] if the file cannot be read or parsed,
    /// [`ClientError::InvalidConfig`] if it fails validation.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> ClientResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            ClientError::Config(format!("failed to read {}: {e}", path.display()))
        })?;
        let config: ClientConfig = serde_json::from_str(&content).map_err(|e| {
            ClientError::Config(format!("failed to parse {}: {e}", path.display()))
        })?;
        config.validate()?;
        debug!("Loaded client config from {}", path.display());
        Ok(config)
    }

    /// Write this configuration as pretty JSON, creating parent directories.
    ///
    /// # Errors
    ///
    /// [`ClientError::Config`] on any filesystem or serialization failure.
    pub fn save_to_path<P: AsRef<Path>>(&self, path: P) -> ClientResult<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|e| {
                ClientError::Config(format!("failed to create {}: {e}", parent.display()))
            })?;
        }
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| ClientError::Config(format!("failed to serialize config: {e}")))?;
        fs::write(path, content).map_err(|e| {
            ClientError::Config(format!("failed to write {}: {e}", path.display()))
        })?;
        debug!("Saved client config to {}", path.display());
        Ok(())
    }
}

/// Builder for `ClientConfig`.
#[derive(Debug, Default)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    /// Set the host.
    #[must_use]
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.config.host = Some(host.into());
        self
    }

    /// Set the port.
    #[must_use]
    pub fn port(mut self, port: u16) -> Self {
        self.config.port = port;
        self
    }

    /// Bind to the left hand.
    #[must_use]
    pub fn left_controller(mut self, left: bool) -> Self {
        self.config.left_controller = left;
        self
    }

    /// Set the connect timeout in milliseconds.
    #[must_use]
    pub fn connect_timeout_ms(mut self, ms: u64) -> Self {
        self.config.connect_timeout_ms = ms;
        self
    }

    /// Set the first-packet delay in milliseconds.
    #[must_use]
    pub fn first_packet_delay_ms(mut self, ms: u64) -> Self {
        self.config.first_packet_delay_ms = ms;
        self
    }

    /// Set the sender poll interval in milliseconds.
    #[must_use]
    pub fn poll_interval_ms(mut self, ms: u64) -> Self {
        self.config.poll_interval_ms = ms;
        self
    }

    /// Set the outbound queue capacity.
    #[must_use]
    pub fn queue_capacity(mut self, capacity: usize) -> Self {
        self.config.queue_capacity = capacity;
        self
    }

    /// Set the `stop` join timeout in milliseconds.
    #[must_use]
    pub fn stop_join_timeout_ms(mut self, ms: u64) -> Self {
        self.config.stop_join_timeout_ms = ms;
        self
    }

    /// Set the session teardown join timeout in milliseconds.
    #[must_use]
    pub fn session_join_timeout_ms(mut self, ms: u64) -> Self {
        self.config.session_join_timeout_ms = ms;
        self
    }

    /// Enable or disable TCP_NODELAY.
    #[must_use]
    pub fn tcp_nodelay(mut self, enabled: bool) -> Self {
        self.config.tcp_nodelay = enabled;
        self
    }

    /// Set the haptic synthesis settings.
    #[must_use]
    pub fn synth(mut self, synth: SynthConfig) -> Self {
        self.config.synth = synth;
        self
    }

    /// Build and validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidConfig`] if validation fails.
    pub fn build(self) -> ClientResult<ClientConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}
