//! Outbound collaborators of the widget: the chat endpoint and the
//! analytics sink.
//!
//! Both sit behind traits so the session engine can be driven by the
//! [`HttpBackend`] in production and by scripted fakes in tests.

pub mod analytics;
pub mod http;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub use analytics::{AnalyticsBeacon, AnalyticsEvent};
pub use http::HttpBackend;

/// Sends one visitor message to the chatbot backend.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// Returns the bot's reply text. Any failure is reported as a
    /// [`ChatError`]; callers do not distinguish between kinds.
    async fn send_message(&self, chatbot_key: &str, message: &str) -> Result<String, ChatError>;
}

/// Receives best-effort analytics beacons.
#[async_trait]
pub trait AnalyticsSink: Send + Sync {
    async fn track(&self, beacon: &AnalyticsBeacon) -> Result<(), ChatError>;
}

/// A sink that drops everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopAnalytics;

#[async_trait]
impl AnalyticsSink for NoopAnalytics {
    async fn track(&self, _beacon: &AnalyticsBeacon) -> Result<(), ChatError> {
        Ok(())
    }
}

/// Body of `POST {base}/chat`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    pub chatbot_api_key: String,
}

/// Success body of `POST {base}/chat`. Extra fields are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatResponse {
    pub response: String,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChatError {
    #[error("network error: {0}")]
    Network(String),
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("parse error: {0}")]
    Parse(String),
    #[error("request timed out")]
    Timeout,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chat_request_wire_shape() {
        let req = ChatRequest {
            message: "Hi".into(),
            chatbot_api_key: "cb_1".into(),
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json, serde_json::json!({"message": "Hi", "chatbot_api_key": "cb_1"}));
    }

    #[test]
    fn chat_response_ignores_extra_fields() {
        let json = r#"{"response":"Hello!","sources":["https://a"],"latency_ms":12}"#;
        let resp: ChatResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.response, "Hello!");
    }

    #[test]
    fn chat_response_requires_response_field() {
        assert!(serde_json::from_str::<ChatResponse>(r#"{"answer":"x"}"#).is_err());
    }

    #[test]
    fn error_display() {
        let err = ChatError::Status {
            status: 500,
            body: "boom".into(),
        };
        assert_eq!(err.to_string(), "HTTP 500: boom");
        assert_eq!(ChatError::Timeout.to_string(), "request timed out");
    }

    #[tokio::test]
    async fn noop_sink_accepts_everything() {
        let beacon = AnalyticsBeacon::new("cb_1", &AnalyticsEvent::WidgetLoaded);
        assert!(NoopAnalytics.track(&beacon).await.is_ok());
    }
}
