//! WebSocket frame DTOs.

use serde::{Deserialize, Serialize};

/// Chat frame exchanged over `/ws`, in both directions.
///
/// ```json
/// {"text": "hello", "sender": "alice", "timestamp": 1700000000000}
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatFrame {
    pub text: String,
    pub sender: String,
    /// Milliseconds since the Unix epoch, from the sending client's clock.
    pub timestamp: i64,
}
