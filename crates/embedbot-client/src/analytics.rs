//! Analytics event vocabulary and beacon payload.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Everything the widget reports about itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalyticsEvent {
    WidgetLoaded,
    ChatOpened,
    ChatClosed,
    MessageSent { message_count: u64 },
    Error { error: String },
    TabHidden,
    TabVisible,
    PageUnload { total_messages: u64, chat_opened: bool },
}

impl AnalyticsEvent {
    pub fn name(&self) -> &'static str {
        match self {
            AnalyticsEvent::WidgetLoaded => "widget_loaded",
            AnalyticsEvent::ChatOpened => "chat_opened",
            AnalyticsEvent::ChatClosed => "chat_closed",
            AnalyticsEvent::MessageSent { .. } => "message_sent",
            AnalyticsEvent::Error { .. } => "error",
            AnalyticsEvent::TabHidden => "tab_hidden",
            AnalyticsEvent::TabVisible => "tab_visible",
            AnalyticsEvent::PageUnload { .. } => "page_unload",
        }
    }

    pub fn data(&self) -> Value {
        match self {
            AnalyticsEvent::MessageSent { message_count } => {
                json!({ "message_count": message_count })
            }
            AnalyticsEvent::Error { error } => json!({ "error": error }),
            AnalyticsEvent::PageUnload {
                total_messages,
                chat_opened,
            } => json!({ "total_messages": total_messages, "chat_opened": chat_opened }),
            _ => json!({}),
        }
    }
}

/// Body of `POST {base}/analytics`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsBeacon {
    pub chatbot_key: String,
    pub event: String,
    pub data: Value,
    /// UTC, ISO-8601 with millisecond precision.
    pub timestamp: String,
}

impl AnalyticsBeacon {
    pub fn new(chatbot_key: &str, event: &AnalyticsEvent) -> Self {
        Self::at(chatbot_key, event, Utc::now())
    }

    pub fn at(chatbot_key: &str, event: &AnalyticsEvent, when: DateTime<Utc>) -> Self {
        Self {
            chatbot_key: chatbot_key.to_string(),
            event: event.name().to_string(),
            data: event.data(),
            timestamp: when.to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}
