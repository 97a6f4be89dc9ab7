//! State transitions, one per command.

use embedbot_client::{AnalyticsEvent, ChatError};
use embedbot_common::WidgetEvent;
use tracing::{debug, warn};

use super::{Command, Trigger, WidgetEngine};
use crate::render::RenderedMessage;

impl WidgetEngine {
    pub(super) fn handle(&mut self, command: Command) {
        match command {
            Command::Trigger(trigger) => self.handle_trigger(trigger),
            Command::ChatResolved(Ok(reply)) => self.on_reply(reply),
            Command::ChatResolved(Err(e)) => self.on_failure(e),
            Command::ReplyDue(reply) => self.deliver_reply(reply),
            Command::IdleNudgeDue => self.idle_nudge(),
            Command::Snapshot(reply_tx) => {
                let _ = reply_tx.send(self.session.clone());
            }
        }
    }

    fn handle_trigger(&mut self, trigger: Trigger) {
        match trigger {
            Trigger::Toggle | Trigger::Minimize => self.toggle(),
            Trigger::Input(text) => {
                if !text.is_empty() {
                    self.view.pulse_send();
                }
                self.session.set_draft(text);
            }
            Trigger::Submit => self.send(),
            Trigger::KeyPress { key, shift } => {
                if key == "Enter" && !shift {
                    self.send();
                }
            }
            Trigger::VisibilityChanged { hidden } => {
                self.track(if hidden {
                    AnalyticsEvent::TabHidden
                } else {
                    AnalyticsEvent::TabVisible
                });
            }
            Trigger::Unload => {
                self.track(AnalyticsEvent::PageUnload {
                    total_messages: self.session.message_count(),
                    chat_opened: self.session.is_open(),
                });
            }
        }
    }

    fn toggle(&mut self) {
        let had_unread = self.session.unread_count() > 0;
        let open = self.session.toggle();
        self.view.set_panel_open(open);

        if open {
            self.view.focus_input();
            self.view.set_unread_badge(None);
            self.view.set_attention(false);
            self.track(AnalyticsEvent::ChatOpened);
            self.events.publish(WidgetEvent::PanelOpened);
            if had_unread {
                self.events.publish(WidgetEvent::UnreadChanged(0));
            }
        } else {
            self.track(AnalyticsEvent::ChatClosed);
            self.events.publish(WidgetEvent::PanelClosed);
        }
    }

    fn send(&mut self) {
        // Empty draft or a request already in flight: silently ignored.
        let Some(text) = self.session.begin_send() else {
            return;
        };
        debug!(count = self.session.message_count(), "sending message");

        self.render_last();
        self.view.clear_input();
        self.view.set_input_enabled(false);
        self.view.show_typing_indicator();
        self.events.publish(WidgetEvent::AwaitingChanged(true));

        self.spawn_chat_request(text);
    }

    fn on_reply(&mut self, reply: String) {
        self.view.hide_typing_indicator();
        self.schedule_reply(reply);
        self.track(AnalyticsEvent::MessageSent {
            message_count: self.session.message_count(),
        });
        self.finish_send();
    }

    fn on_failure(&mut self, e: ChatError) {
        warn!("chat request failed: {e}");
        self.view.hide_typing_indicator();
        self.session.push_error();
        self.render_last();
        self.track(AnalyticsEvent::Error {
            error: e.to_string(),
        });
        self.finish_send();
    }

    /// Runs after every resolved request, success or failure.
    fn finish_send(&mut self) {
        self.session.finish_send();
        self.view.set_input_enabled(true);
        self.view.focus_input();
        self.events.publish(WidgetEvent::AwaitingChanged(false));
    }

    fn deliver_reply(&mut self, reply: String) {
        let unread = self.session.deliver_reply(reply);
        self.render_last();
        if let Some(count) = unread {
            self.view.set_unread_badge(Some(count));
            self.events.publish(WidgetEvent::UnreadChanged(count));
        }
    }

    fn idle_nudge(&mut self) {
        if !self.session.idle_nudge() {
            return;
        }
        debug!("idle nudge");
        self.view.set_unread_badge(Some(1));
        self.view.set_attention(true);
        self.events.publish(WidgetEvent::IdleNudge);
        self.events.publish(WidgetEvent::UnreadChanged(1));
    }

    fn render_last(&mut self) {
        if let Some(message) = self.session.last_message() {
            let rendered = RenderedMessage::from_message(message);
            self.view.append_message(&rendered);
            self.events.publish(WidgetEvent::MessageAppended {
                sender: rendered.sender,
                is_error: rendered.is_error,
            });
        }
    }
}
