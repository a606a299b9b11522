//! Identifier factories.

use uuid::Uuid;

use super::{ConnectionId, SessionToken, ValueObjectError};

/// Generates unique relay connection ids (UUID v4).
pub struct ConnectionIdFactory;

impl ConnectionIdFactory {
    pub fn generate() -> Result<ConnectionId, ValueObjectError> {
        ConnectionId::new(Uuid::new_v4().to_string())
    }
}

/// Generates unguessable session tokens (UUID v4, simple form).
pub struct SessionTokenFactory;

impl SessionTokenFactory {
    pub fn generate() -> Result<SessionToken, ValueObjectError> {
        SessionToken::new(Uuid::new_v4().simple().to_string())
    }
}
