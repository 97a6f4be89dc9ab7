//! Per-mount widget state and its transitions.
//!
//! Every method here is synchronous and side-effect free apart from the
//! session itself; the engine decides what to render and report based on
//! the return values.

use crate::message::Message;

#[derive(Debug, Clone, Default)]
pub struct Session {
    is_open: bool,
    /// Set from submit until the chat request resolves. Gates `begin_send`.
    is_awaiting_response: bool,
    /// User messages sent this session. Never decreases.
    message_count: u64,
    /// Bot messages delivered while closed. Zero whenever `is_open`.
    unread_count: u32,
    /// Append-only.
    transcript: Vec<Message>,
    /// Current contents of the input field.
    draft: String,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn is_awaiting_response(&self) -> bool {
        self.is_awaiting_response
    }

    pub fn message_count(&self) -> u64 {
        self.message_count
    }

    pub fn unread_count(&self) -> u32 {
        self.unread_count
    }

    pub fn transcript(&self) -> &[Message] {
        &self.transcript
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    /// Flip the panel. Opening clears the unread count. Returns the new state.
    pub fn toggle(&mut self) -> bool {
        self.is_open = !self.is_open;
        if self.is_open {
            self.unread_count = 0;
        }
        self.is_open
    }

    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
    }

    /// Start a send from the current draft.
    ///
    /// Returns `None` without touching anything when the trimmed draft is
    /// empty or a request is already in flight. Otherwise appends the user
    /// message, clears the draft, bumps the message count, closes the gate
    /// and returns the trimmed text to send.
    pub fn begin_send(&mut self) -> Option<String> {
        if self.is_awaiting_response {
            return None;
        }
        let text = self.draft.trim();
        if text.is_empty() {
            return None;
        }
        let text = text.to_string();

        self.transcript.push(Message::user(text.clone()));
        self.draft.clear();
        self.message_count += 1;
        self.is_awaiting_response = true;
        Some(text)
    }

    /// Reopen the gate. Runs once per `begin_send`, whatever the outcome.
    pub fn finish_send(&mut self) {
        self.is_awaiting_response = false;
    }

    /// Append the failure notice for a request that did not succeed.
    pub fn push_error(&mut self) -> &Message {
        self.push(Message::error())
    }

    /// Append a bot reply. Returns the new unread count if the panel is
    /// closed, `None` if the visitor is looking at it.
    pub fn deliver_reply(&mut self, text: impl Into<String>) -> Option<u32> {
        self.push(Message::bot(text));
        if self.is_open {
            None
        } else {
            self.unread_count += 1;
            Some(self.unread_count)
        }
    }

    /// Mark the synthetic unread notification if the visitor has neither
    /// opened the panel nor sent anything. Returns whether it applied.
    pub fn idle_nudge(&mut self) -> bool {
        if self.message_count == 0 && !self.is_open {
            self.unread_count = 1;
            true
        } else {
            false
        }
    }

    pub fn last_message(&self) -> Option<&Message> {
        self.transcript.last()
    }

    fn push(&mut self, message: Message) -> &Message {
        self.transcript.push(message);
        // Just pushed, so never empty.
        &self.transcript[self.transcript.len() - 1]
    }
}
