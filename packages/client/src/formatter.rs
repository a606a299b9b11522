//! Message formatting utilities for client display.

use campus_shared::time::{timestamp_to_clock_time, timestamp_to_rfc3339};

use crate::{domain::Incoming, message_log::LogEntry};

const RULE: &str = "------------------------------------------------------------";

/// Message formatter for client display
pub struct MessageFormatter;

impl MessageFormatter {
    /// Format a log entry for the terminal
    pub fn format_entry(entry: &LogEntry) -> String {
        match &entry.incoming {
            Incoming::Chat(frame) => {
                Self::format_chat_message(&frame.sender, &frame.text, frame.timestamp)
            }
            Incoming::Raw(text) => Self::format_raw_message(text, entry.received_at),
        }
    }

    /// Format a chat message
    ///
    /// # Arguments
    ///
    /// * `sender` - The display name the sender chose
    /// * `text` - The message text
    /// * `sent_at` - Unix timestamp when the message was sent (milliseconds)
    ///
    /// # Returns
    ///
    /// A formatted string with the chat message
    pub fn format_chat_message(sender: &str, text: &str, sent_at: i64) -> String {
        let timestamp_str = timestamp_to_rfc3339(sent_at);
        format!(
            "\n\n{RULE}\n\
             @{}: {}\n\
             sent at {}\n\
             {RULE}\n",
            sender, text, timestamp_str
        )
    }

    /// Format a confirmation message after sending
    ///
    /// # Arguments
    ///
    /// * `sent_at` - Unix timestamp when the message was sent (milliseconds)
    ///
    /// # Returns
    ///
    /// A formatted string with the sent confirmation
    pub fn format_sent_confirmation(sent_at: i64) -> String {
        let timestamp_str = timestamp_to_rfc3339(sent_at);
        format!("sent at {}\n", timestamp_str)
    }

    /// Format a raw text message (when parsing fails)
    pub fn format_raw_message(text: &str, received_at: i64) -> String {
        format!(
            "\n← [{}] Received: {}\n",
            timestamp_to_clock_time(received_at),
            text
        )
    }

    /// Format a binary message notification
    pub fn format_binary_message(byte_count: usize) -> String {
        format!("\n← Received {} bytes of binary data\n", byte_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dto::ChatFrame;

    // 2023-01-01T00:00:00Z
    const NEW_YEAR: i64 = 1_672_531_200_000;

    #[test]
    fn test_format_chat_message() {
        // テスト項目: チャットメッセージが正しくフォーマットされる
        // given (前提条件):
        let sender = "alice";
        let text = "Hello, world!";

        // when (操作):
        let result = MessageFormatter::format_chat_message(sender, text, NEW_YEAR);

        // then (期待する結果):
        assert!(result.contains("@alice: Hello, world!"));
        assert!(result.contains("sent at 2023-01-01T00:00:00+00:00"));
        assert!(result.contains(RULE));
    }

    #[test]
    fn test_format_sent_confirmation() {
        // テスト項目: 送信確認メッセージが正しくフォーマットされる
        // given (前提条件):
        let sent_at = NEW_YEAR;

        // when (操作):
        let result = MessageFormatter::format_sent_confirmation(sent_at);

        // then (期待する結果):
        assert_eq!(result, "sent at 2023-01-01T00:00:00+00:00\n");
    }

    #[test]
    fn test_format_raw_message() {
        // テスト項目: 解析できなかったテキストは受信時刻付きでそのまま表示される
        // given (前提条件):
        let text = "not a chat frame";

        // when (操作):
        let result = MessageFormatter::format_raw_message(text, NEW_YEAR + 5_000);

        // then (期待する結果):
        assert!(result.contains("[00:00:05]"));
        assert!(result.contains("Received: not a chat frame"));
    }

    #[test]
    fn test_format_binary_message() {
        // テスト項目: バイナリメッセージ通知が正しくフォーマットされる
        // given (前提条件):
        let byte_count = 1024;

        // when (操作):
        let result = MessageFormatter::format_binary_message(byte_count);

        // then (期待する結果):
        assert!(result.contains("1024 bytes"));
        assert!(result.contains("binary data"));
    }

    #[test]
    fn test_format_entry_dispatches_on_kind() {
        // テスト項目: ログエントリの種類に応じて表示形式が切り替わる
        // given (前提条件):
        let chat = LogEntry {
            received_at: NEW_YEAR,
            incoming: Incoming::Chat(ChatFrame {
                text: "hi".to_string(),
                sender: "bob".to_string(),
                timestamp: NEW_YEAR,
            }),
        };
        let raw = LogEntry {
            received_at: NEW_YEAR,
            incoming: Incoming::Raw("???".to_string()),
        };

        // when (操作):
        let chat_line = MessageFormatter::format_entry(&chat);
        let raw_line = MessageFormatter::format_entry(&raw);

        // then (期待する結果):
        assert!(chat_line.contains("@bob: hi"));
        assert!(raw_line.contains("Received: ???"));
    }
}
