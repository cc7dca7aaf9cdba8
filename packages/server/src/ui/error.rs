//! Error types for the broadcast server.

use thiserror::Error;

/// Startup failures of the server. Per-connection failures never surface here.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Configuration values are unusable
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Failed to bind the listening socket
    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed to read the bound address of the listener
    #[error("Failed to get local address: {0}")]
    LocalAddr(#[source] std::io::Error),
}
