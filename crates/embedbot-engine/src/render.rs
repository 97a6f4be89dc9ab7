//! Message rendering.
//!
//! The widget runs inside arbitrary third-party pages, so user and backend
//! text is only ever emitted as escaped HTML or as control-free plain text.

use embedbot_common::Sender;

use crate::message::Message;

/// A transcript entry prepared for a view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedMessage {
    pub sender: Sender,
    /// Safe to place inside an element's inner HTML.
    pub html: String,
    /// Safe to write to a terminal.
    pub plain: String,
    /// Local `hh:mm AM` capture time.
    pub time_label: String,
    pub is_error: bool,
}

impl RenderedMessage {
    pub fn from_message(message: &Message) -> Self {
        Self {
            sender: message.sender,
            html: escape_html(&message.text),
            plain: strip_controls(&message.text),
            time_label: message.timestamp.format("%I:%M %p").to_string(),
            is_error: message.is_error,
        }
    }

    /// CSS class of the bubble element.
    pub fn css_class(&self) -> &'static str {
        match self.sender {
            Sender::User => "user-message",
            Sender::Bot => "bot-message",
        }
    }
}

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Drop control characters (ANSI escapes included) except newline and tab.
pub fn strip_controls(text: &str) -> String {
    text.chars()
        .filter(|c| !c.is_control() || *c == '\n' || *c == '\t')
        .collect()
}
