//! `reqwest` implementation of both outbound collaborators.


use async_trait::async_trait;
use embedbot_config::WidgetSettings;
use tracing::debug;

use crate::{AnalyticsBeacon, AnalyticsSink, ChatBackend, ChatError, ChatRequest, ChatResponse};

/// Anonymous client for the chatbot backend. Carries no session or auth
/// token; the chatbot key in each body is the only credential.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    chat_url: String,
    analytics_url: String,
    http: reqwest::Client,
}

impl HttpBackend {
    pub fn new(settings: &WidgetSettings) -> Result<Self, ChatError> {
        let mut builder = reqwest::Client::builder().connect_timeout(settings.connect_timeout());
        if let Some(timeout) = settings.request_timeout() {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| ChatError::Network(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            chat_url: settings.endpoint("chat"),
            analytics_url: settings.endpoint("analytics"),
            http,
        })
    }

    pub fn chat_url(&self) -> &str {
        &self.chat_url
    }

    pub fn analytics_url(&self) -> &str {
        &self.analytics_url
    }
}

fn map_send_error(e: reqwest::Error) -> ChatError {
    if e.is_timeout() {
        ChatError::Timeout
    } else {
        ChatError::Network(e.to_string())
    }
}

#[async_trait]
impl ChatBackend for HttpBackend {
    async fn send_message(&self, chatbot_key: &str, message: &str) -> Result<String, ChatError> {
        let body = ChatRequest {
            message: message.to_string(),
            chatbot_api_key: chatbot_key.to_string(),
        };

        debug!(url = %self.chat_url, "chat request");

        let response = self
            .http
            .post(&self.chat_url)
            .json(&body)
            .send()
            .await
            .map_err(map_send_error)?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let text = text.chars().take(200).collect::<String>();
            return Err(ChatError::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        let reply: ChatResponse = response
            .json()
            .await
            .map_err(|e| ChatError::Parse(e.to_string()))?;
        Ok(reply.response)
    }
}

#[async_trait]
impl AnalyticsSink for HttpBackend {
    async fn track(&self, beacon: &AnalyticsBeacon) -> Result<(), ChatError> {
        // The response body is never inspected.
        self.http
            .post(&self.analytics_url)
            .json(beacon)
            .send()
            .await
            .map_err(map_send_error)?;
        Ok(())
    }
}
