use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use crate::types::Sender;

/// Observable state changes of a mounted widget.
///
/// Published by the session engine after each transition so host code
/// (and tests) can follow the widget without polling it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum WidgetEvent {
    Mounted,
    PanelOpened,
    PanelClosed,
    MessageAppended { sender: Sender, is_error: bool },
    AwaitingChanged(bool),
    UnreadChanged(u32),
    IdleNudge,
    TornDown,
    #[serde(other)]
    Unknown,
}

pub struct EventBus {
    sender: broadcast::Sender<WidgetEvent>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<WidgetEvent> {
        self.sender.subscribe()
    }

    /// Returns the number of subscribers that saw the event.
    pub fn publish(&self, event: WidgetEvent) -> usize {
        self.sender.send(event).unwrap_or(0)
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(64)
    }
}

impl Clone for EventBus {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}
