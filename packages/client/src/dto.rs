//! Wire format of relay frames.

use serde::{Deserialize, Serialize};

/// `{"text": ..., "sender": ..., "timestamp": ...}`, in both directions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatFrame {
    pub text: String,
    pub sender: String,
    /// Milliseconds since the Unix epoch, from the sender's clock.
    pub timestamp: i64,
}
