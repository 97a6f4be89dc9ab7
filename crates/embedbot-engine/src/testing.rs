//! Scripted collaborators for engine tests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use embedbot_client::{AnalyticsBeacon, AnalyticsSink, ChatBackend, ChatError};
use embedbot_config::WidgetConfig;

use crate::render::RenderedMessage;
use crate::view::WidgetView;

/// Replies from a queue after a fixed latency. An empty queue answers
/// with an echo of the message.
pub(crate) struct ScriptedBackend {
    replies: Mutex<VecDeque<Result<String, ChatError>>>,
    latency: Duration,
    calls: Mutex<Vec<(String, String)>>,
}

impl ScriptedBackend {
    pub(crate) fn new(latency: Duration) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(VecDeque::new()),
            latency,
            calls: Mutex::new(Vec::new()),
        })
    }

    pub(crate) fn replying(latency: Duration, replies: Vec<Result<String, ChatError>>) -> Arc<Self> {
        let backend = Self::new(latency);
        backend.replies.lock().unwrap().extend(replies);
        backend
    }

    /// `(chatbot_key, message)` for every request issued.
    pub(crate) fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatBackend for ScriptedBackend {
    async fn send_message(&self, chatbot_key: &str, message: &str) -> Result<String, ChatError> {
        self.calls
            .lock()
            .unwrap()
            .push((chatbot_key.to_string(), message.to_string()));
        let reply = self.replies.lock().unwrap().pop_front();
        tokio::time::sleep(self.latency).await;
        reply.unwrap_or_else(|| Ok(format!("echo: {message}")))
    }
}

/// Records beacons, optionally failing every one of them.
#[derive(Default)]
pub(crate) struct RecordingAnalytics {
    beacons: Mutex<Vec<AnalyticsBeacon>>,
    fail: bool,
}

impl RecordingAnalytics {
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub(crate) fn failing() -> Arc<Self> {
        Arc::new(Self {
            beacons: Mutex::new(Vec::new()),
            fail: true,
        })
    }

    pub(crate) fn events(&self) -> Vec<String> {
        self.beacons.lock().unwrap().iter().map(|b| b.event.clone()).collect()
    }

    pub(crate) fn find(&self, event: &str) -> Option<AnalyticsBeacon> {
        self.all(event).into_iter().next()
    }

    pub(crate) fn all(&self, event: &str) -> Vec<AnalyticsBeacon> {
        self.beacons
            .lock()
            .unwrap()
            .iter()
            .filter(|b| b.event == event)
            .cloned()
            .collect()
    }
}

#[async_trait]
impl AnalyticsSink for RecordingAnalytics {
    async fn track(&self, beacon: &AnalyticsBeacon) -> Result<(), ChatError> {
        self.beacons.lock().unwrap().push(beacon.clone());
        if self.fail {
            Err(ChatError::Network("analytics down".into()))
        } else {
            Ok(())
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ViewOp {
    Mount { chatbot_key: String, greeting: String },
    PanelOpen(bool),
    FocusInput,
    ClearInput,
    InputEnabled(bool),
    TypingShown,
    TypingHidden,
    Append(RenderedMessage),
    Badge(Option<u32>),
    Attention(bool),
    PulseSend,
    Unmount,
}

/// A view that only remembers what it was asked to do.
#[derive(Clone, Default)]
pub(crate) struct RecordingView {
    ops: Arc<Mutex<Vec<ViewOp>>>,
}

impl RecordingView {
    pub(crate) fn ops(&self) -> Vec<ViewOp> {
        self.ops.lock().unwrap().clone()
    }

    pub(crate) fn appended(&self) -> Vec<RenderedMessage> {
        self.ops()
            .into_iter()
            .filter_map(|op| match op {
                ViewOp::Append(m) => Some(m),
                _ => None,
            })
            .collect()
    }

    pub(crate) fn last_badge(&self) -> Option<Option<u32>> {
        self.ops().into_iter().rev().find_map(|op| match op {
            ViewOp::Badge(b) => Some(b),
            _ => None,
        })
    }

    pub(crate) fn input_enabled(&self) -> bool {
        self.ops()
            .into_iter()
            .rev()
            .find_map(|op| match op {
                ViewOp::InputEnabled(on) => Some(on),
                _ => None,
            })
            .unwrap_or(true)
    }

    fn record(&self, op: ViewOp) {
        self.ops.lock().unwrap().push(op);
    }
}

impl WidgetView for RecordingView {
    fn mount(&mut self, config: &WidgetConfig, greeting: &str) {
        self.record(ViewOp::Mount {
            chatbot_key: config.chatbot_key.clone(),
            greeting: greeting.to_string(),
        });
    }

    fn set_panel_open(&mut self, open: bool) {
        self.record(ViewOp::PanelOpen(open));
    }

    fn focus_input(&mut self) {
        self.record(ViewOp::FocusInput);
    }

    fn clear_input(&mut self) {
        self.record(ViewOp::ClearInput);
    }

    fn set_input_enabled(&mut self, enabled: bool) {
        self.record(ViewOp::InputEnabled(enabled));
    }

    fn show_typing_indicator(&mut self) {
        self.record(ViewOp::TypingShown);
    }

    fn hide_typing_indicator(&mut self) {
        self.record(ViewOp::TypingHidden);
    }

    fn append_message(&mut self, message: &RenderedMessage) {
        self.record(ViewOp::Append(message.clone()));
    }

    fn set_unread_badge(&mut self, count: Option<u32>) {
        self.record(ViewOp::Badge(count));
    }

    fn set_attention(&mut self, on: bool) {
        self.record(ViewOp::Attention(on));
    }

    fn pulse_send(&mut self) {
        self.record(ViewOp::PulseSend);
    }

    fn unmount(&mut self) {
        self.record(ViewOp::Unmount);
    }
}
