//! Domain error types.

use thiserror::Error;

use super::value_object::ConnectionId;

/// Value Object の生成に失敗した理由
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueObjectError {
    #[error("{field} must not be empty")]
    Empty { field: &'static str },

    #[error("{field} must be at most {max} characters (got {actual})")]
    TooLong {
        field: &'static str,
        max: usize,
        actual: usize,
    },

    #[error("{field} is invalid: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Why an inbound chat frame was not relayed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MalformedFrame {
    #[error("frame of {size} bytes exceeds the {max} byte limit")]
    TooLarge { size: usize, max: usize },

    #[error("frame is not a chat message object: {0}")]
    InvalidJson(String),

    #[error("frame has an invalid field: {0}")]
    InvalidField(#[from] ValueObjectError),

    #[error("binary frames are not accepted ({len} bytes)")]
    Binary { len: usize },
}

/// Why a frame could not be handed to one peer's outbound queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DeliveryFailure {
    #[error("outbound queue is full")]
    QueueFull,

    #[error("outbound queue is closed")]
    ChannelClosed,
}

/// Chat relay error taxonomy.
///
/// None of these are fatal to the relay; each one concerns a single connection.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RelayError {
    #[error("failed to register connection '{0}': already registered")]
    ConnectionRegistrationFailure(ConnectionId),

    #[error("connection '{0}' is not registered and cannot relay")]
    SenderNotRegistered(ConnectionId),

    #[error("failed to deliver to connection '{connection_id}': {cause}")]
    DeliveryFailure {
        connection_id: ConnectionId,
        cause: DeliveryFailure,
    },

    #[error(transparent)]
    MalformedFrame(#[from] MalformedFrame),
}

/// Store error
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i64 },

    #[error("conflict: {0}")]
    Conflict(String),
}
