//! Transcript entries.

use chrono::{DateTime, Local};
use embedbot_common::Sender;

/// Shown in place of a reply when the chat request fails.
pub const ERROR_REPLY: &str = "Sorry, I encountered an error. Please try again later.";

/// One exchanged message. `text` is plain text, never markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub text: String,
    pub sender: Sender,
    /// Locally synthesized failure notice.
    pub is_error: bool,
    /// Capture time, for display only. Transcript order is chronological order.
    pub timestamp: DateTime<Local>,
}

impl Message {
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(text, Sender::User, false)
    }

    pub fn bot(text: impl Into<String>) -> Self {
        Self::new(text, Sender::Bot, false)
    }

    pub fn error() -> Self {
        Self::new(ERROR_REPLY, Sender::Bot, true)
    }

    fn new(text: impl Into<String>, sender: Sender, is_error: bool) -> Self {
        Self {
            text: text.into(),
            sender,
            is_error,
            timestamp: Local::now(),
        }
    }
}
