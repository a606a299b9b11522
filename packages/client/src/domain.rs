//! Domain logic for client-side operations.
//!
//! This module contains pure functions that implement business logic
//! without side effects, making them easy to test.

use std::time::Duration;

use crate::dto::ChatFrame;

/// How often and how many times to reconnect after the connection drops.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReconnectPolicy {
    pub max_attempts: u32,
    pub interval: Duration,
}

impl Default for ReconnectPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            interval: Duration::from_secs(5),
        }
    }
}

impl ReconnectPolicy {
    /// Check if the client should attempt to reconnect.
    ///
    /// # Arguments
    ///
    /// * `failed_attempts` - Consecutive failed attempts so far
    ///
    /// # Returns
    ///
    /// `true` while fewer than `max_attempts` attempts have failed
    pub fn should_attempt_reconnect(&self, failed_attempts: u32) -> bool {
        failed_attempts < self.max_attempts
    }
}

/// A frame received from the relay, as shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Incoming {
    Chat(ChatFrame),
    /// Text that is not a chat frame, kept verbatim.
    Raw(String),
}

/// Interpret a received text frame. Anything that does not parse is kept raw.
pub fn parse_incoming(text: &str) -> Incoming {
    match serde_json::from_str::<ChatFrame>(text) {
        Ok(frame) => Incoming::Chat(frame),
        Err(_) => Incoming::Raw(text.to_string()),
    }
}

/// Build the frame for one input line. Blank lines are not sent.
pub fn build_chat_frame(sender: &str, line: &str, timestamp: i64) -> Option<ChatFrame> {
    let text = line.trim();
    if text.is_empty() {
        return None;
    }
    Some(ChatFrame {
        text: text.to_string(),
        sender: sender.to_string(),
        timestamp,
    })
}
