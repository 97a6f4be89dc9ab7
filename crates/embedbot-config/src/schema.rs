//! Engine tunables.

use std::time::Duration;

use serde::{Deserialize, Serialize};

pub const DEFAULT_API_BASE: &str = "http://127.0.0.1:8000/api";
pub const DEFAULT_GREETING: &str = "👋 Hi! How can I help you today?";

/// Settings shared by every widget mount of a host process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WidgetSettings {
    /// Base URL of the chatbot backend; `/chat` and `/analytics` hang off it.
    pub api_base: String,
    /// Pause between a reply arriving and it being shown.
    pub response_delay_ms: u64,
    /// How long after mount an untouched, closed widget nudges the visitor.
    pub idle_nudge_ms: u64,
    /// Upper bound on one chat request. 0 waits forever.
    pub request_timeout_secs: u64,
    pub connect_timeout_secs: u64,
    /// Shown in the panel at mount. Not part of the transcript.
    pub greeting: String,
}

impl Default for WidgetSettings {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.into(),
            response_delay_ms: 500,
            idle_nudge_ms: 3000,
            request_timeout_secs: 30,
            connect_timeout_secs: 10,
            greeting: DEFAULT_GREETING.into(),
        }
    }
}

impl WidgetSettings {
    pub fn response_delay(&self) -> Duration {
        Duration::from_millis(self.response_delay_ms)
    }

    pub fn idle_nudge_delay(&self) -> Duration {
        Duration::from_millis(self.idle_nudge_ms)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        (self.request_timeout_secs > 0).then(|| Duration::from_secs(self.request_timeout_secs))
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    /// `api_base` without trailing slashes, ready for path joins.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.api_base.trim_end_matches('/'), path.trim_start_matches('/'))
    }

    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    pub fn with_response_delay_ms(mut self, ms: u64) -> Self {
        self.response_delay_ms = ms;
        self
    }

    pub fn with_idle_nudge_ms(mut self, ms: u64) -> Self {
        self.idle_nudge_ms = ms;
        self
    }

    pub fn with_request_timeout_secs(mut self, secs: u64) -> Self {
        self.request_timeout_secs = secs;
        self
    }
}
