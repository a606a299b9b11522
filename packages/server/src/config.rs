//! Server configuration.
//!
//! Values come from the command line (see `src/bin/server.rs`); defaults live here.

use std::time::Duration;

use thiserror::Error;

/// Chat relay limits and timers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayConfig {
    /// Largest text frame that is decoded and relayed.
    pub max_frame_bytes: usize,
    /// Transport ceiling for a single WebSocket message; exceeding it closes the connection.
    pub max_message_bytes: usize,
    pub max_text_chars: usize,
    pub max_sender_chars: usize,
    /// Frames a peer may have queued before it is disconnected.
    pub outbound_queue_capacity: usize,
    /// A connection that sends nothing (not even a pong) for this long is closed.
    pub idle_timeout: Duration,
    pub ping_interval: Duration,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            max_frame_bytes: 16 * 1024,
            max_message_bytes: 64 * 1024,
            max_text_chars: 2000,
            max_sender_chars: 64,
            outbound_queue_capacity: 64,
            idle_timeout: Duration::from_secs(90),
            ping_interval: Duration::from_secs(30),
        }
    }
}

/// Account created at startup so that an administrator can log in and register other users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminSeed {
    pub username: String,
    pub password: String,
    pub name: String,
}

/// Complete server configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub relay: RelayConfig,
    pub session_ttl: Duration,
    pub admin_seed: Option<AdminSeed>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            relay: RelayConfig::default(),
            session_ttl: Duration::from_secs(24 * 60 * 60),
            admin_seed: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{0} must be greater than zero")]
    Zero(&'static str),

    #[error("max_frame_bytes ({frame}) must not exceed max_message_bytes ({message})")]
    FrameExceedsMessage { frame: usize, message: usize },

    #[error("ping_interval ({ping:?}) must be shorter than idle_timeout ({idle:?})")]
    PingNotBeforeIdle { ping: Duration, idle: Duration },
}

impl RelayConfig {
    /// Check that the limits are usable together.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let sizes = [
            ("max_frame_bytes", self.max_frame_bytes),
            ("max_message_bytes", self.max_message_bytes),
            ("max_text_chars", self.max_text_chars),
            ("max_sender_chars", self.max_sender_chars),
            ("outbound_queue_capacity", self.outbound_queue_capacity),
        ];
        if let Some((name, _)) = sizes.iter().find(|(_, value)| *value == 0) {
            return Err(ConfigError::Zero(*name));
        }
        if self.idle_timeout.is_zero() {
            return Err(ConfigError::Zero("idle_timeout"));
        }
        if self.ping_interval.is_zero() {
            return Err(ConfigError::Zero("ping_interval"));
        }
        if self.max_frame_bytes > self.max_message_bytes {
            return Err(ConfigError::FrameExceedsMessage {
                frame: self.max_frame_bytes,
                message: self.max_message_bytes,
            });
        }
        if self.ping_interval >= self.idle_timeout {
            return Err(ConfigError::PingNotBeforeIdle {
                ping: self.ping_interval,
                idle: self.idle_timeout,
            });
        }
        Ok(())
    }
}

impl ServerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.session_ttl.is_zero() {
            return Err(ConfigError::Zero("session_ttl"));
        }
        self.relay.validate()
    }
}
