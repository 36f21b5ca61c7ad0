//! Parley error types

use thiserror::Error;

/// Errors that can occur around the selector.
///
/// Solving itself never fails; these come from configuration and the
/// service layer.
#[derive(Debug, Error)]
pub enum ParleyError {
    /// Configuration rejected by validation
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// JSON encode/decode failure
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Config file could not be read
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The other side of a channel went away
    #[error("Channel is closed")]
    ChannelClosed,
}
