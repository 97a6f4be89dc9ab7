//! Work that runs off the event loop: network calls and timers.

use embedbot_client::{AnalyticsBeacon, AnalyticsEvent, ChatError};
use tracing::{debug, trace};

use super::{Command, WidgetEngine};

impl WidgetEngine {
    /// Issue the one outbound chat request for a send. Its outcome comes
    /// back as `Command::ChatResolved`.
    pub(super) fn spawn_chat_request(&self, text: String) {
        let backend = self.backend.clone();
        let key = self.config.chatbot_key.clone();
        let timeout = self.settings.request_timeout();
        let tx = self.tx.clone();

        tokio::spawn(async move {
            let request = backend.send_message(&key, &text);
            let result = match timeout {
                Some(limit) => tokio::time::timeout(limit, request)
                    .await
                    .unwrap_or(Err(ChatError::Timeout)),
                None => request.await,
            };
            let _ = tx.send(Command::ChatResolved(result));
        });
    }

    /// Post the reply back after the presentation delay, unless the widget
    /// is torn down first.
    pub(super) fn schedule_reply(&self, text: String) {
        let delay = self.settings.response_delay();
        let tx = self.tx.clone();
        let cancel = self.cancel.clone();

        tokio::spawn(async move {
            tokio::select! {
                _ = cancel.cancelled() => debug!("reply dropped by teardown"),
                _ = tokio::time::sleep(delay) => {
                    let _ = tx.send(Command::ReplyDue(text));
                }
            }
        });
    }

    pub(super) fn schedule_idle_nudge(&self) {
        let delay = self.settings.idle_nudge_delay();
        let tx = self.tx.clone();
        let cancel = self.cancel.clone();

        tokio::spawn(async move {
            tokio::select! {
                _ = cancel.cancelled() => {}
                _ = tokio::time::sleep(delay) => {
                    let _ = tx.send(Command::IdleNudgeDue);
                }
            }
        });
    }

    /// Fire-and-forget analytics beacon. Failures are swallowed.
    pub(super) fn track(&self, event: AnalyticsEvent) {
        let beacon = AnalyticsBeacon::new(&self.config.chatbot_key, &event);
        let sink = self.analytics.clone();

        tokio::spawn(async move {
            if let Err(e) = sink.track(&beacon).await {
                trace!(event = %beacon.event, "analytics beacon dropped: {e}");
            }
        });
    }
}
