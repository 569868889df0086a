// src/notify/mod.rs
mod telegram;

pub use telegram::{TelegramNotifier, TELEGRAM_API_BASE, TELEGRAM_MAX_MESSAGE_CHARS};

use async_trait::async_trait;
use reqwest::StatusCode;

pub const TRUNCATION_MARKER: &str = "… [truncated]";

#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("Invalid notification API base {base}: {reason}")]
    Endpoint { base: String, reason: String },

    /// Carries a `reqwest::Error` with its URL stripped; the URL holds the bot token.
    #[error("Failed to send notification: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("Notification rejected with {status}: {body}")]
    Rejected { status: StatusCode, body: String },
}

/// Delivers a failure message to some external channel.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, message: &str) -> Result<(), NotifyError>;

    /// Longest message the channel accepts, in characters.
    fn max_message_chars(&self) -> Option<usize> {
        None
    }
}

/// Cut `text` down to at most `max_chars` characters, ending with
/// [`TRUNCATION_MARKER`] when anything was dropped.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }

    let marker_len = TRUNCATION_MARKER.chars().count();
    if max_chars < marker_len {
        return text.chars().take(max_chars).collect();
    }

    let mut truncated: String = text.chars().take(max_chars - marker_len).collect();
    truncated.push_str(TRUNCATION_MARKER);
    truncated
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_leaves_short_text_alone() {
        assert_eq!(truncate_chars("API Error: 503", 4096), "API Error: 503");
    }

    #[test]
    fn test_truncate_appends_marker() {
        let text = "x".repeat(100);
        let truncated = truncate_chars(&text, 40);

        assert_eq!(truncated.chars().count(), 40);
        assert!(truncated.ends_with(TRUNCATION_MARKER));
        assert!(truncated.starts_with("xxxx"));
    }

    #[test]
    fn test_truncate_counts_chars_not_bytes() {
        let text = "é".repeat(50);
        let truncated = truncate_chars(&text, 20);

        assert_eq!(truncated.chars().count(), 20);
        assert!(truncated.ends_with(TRUNCATION_MARKER));
    }

    #[test]
    fn test_truncate_below_marker_length() {
        assert_eq!(truncate_chars("abcdefghijklmnop", 3), "abc");
    }
}
