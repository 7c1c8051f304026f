//! Haptics error types

use thiserror::Error;

/// Haptics error type
#[derive(Debug, Error, Clone, PartialEq)]
pub enum HapticsError {
    /// Synthesizer configuration rejected by validation
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl HapticsError {
    /// Create an invalid-config error
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        HapticsError::InvalidConfig(msg.into())
    }
}

/// Specialized Result type for haptics operations
pub type HapticsResult<T> = std::result::Result<T, HapticsError>;
