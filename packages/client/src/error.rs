//! Error types for the chat client.

use thiserror::Error;

/// Client-specific errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    /// Could not open the WebSocket connection
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// An open connection was closed by the server or the network
    #[error("Connection lost: {0}")]
    ConnectionLost(String),

    /// Every reconnection attempt failed
    #[error("Gave up after {0} connection attempts")]
    ReconnectExhausted(u32),
}
