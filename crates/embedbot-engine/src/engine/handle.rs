//! Host-facing entry points into a mounted widget.

use embedbot_common::{EventBus, WidgetEvent, WidgetSessionId};
use tokio::sync::{broadcast, mpsc, oneshot};
use tokio_util::sync::CancellationToken;

use super::{Command, Trigger};
use crate::session::Session;

/// Cheap, cloneable handle to a mounted widget.
///
/// Every method is fire-and-forget and never fails back into the host:
/// once the widget is torn down they silently do nothing.
#[derive(Clone)]
pub struct WidgetHandle {
    id: WidgetSessionId,
    tx: mpsc::UnboundedSender<Command>,
    cancel: CancellationToken,
    events: EventBus,
}

impl WidgetHandle {
    pub(super) fn new(
        id: WidgetSessionId,
        tx: mpsc::UnboundedSender<Command>,
        cancel: CancellationToken,
        events: EventBus,
    ) -> Self {
        Self {
            id,
            tx,
            cancel,
            events,
        }
    }

    pub fn id(&self) -> &WidgetSessionId {
        &self.id
    }

    pub fn dispatch(&self, trigger: Trigger) {
        let _ = self.tx.send(Command::Trigger(trigger));
    }

    pub fn toggle(&self) {
        self.dispatch(Trigger::Toggle);
    }

    pub fn minimize(&self) {
        self.dispatch(Trigger::Minimize);
    }

    pub fn input(&self, text: impl Into<String>) {
        self.dispatch(Trigger::Input(text.into()));
    }

    pub fn submit(&self) {
        self.dispatch(Trigger::Submit);
    }

    pub fn key_press(&self, key: impl Into<String>, shift: bool) {
        self.dispatch(Trigger::KeyPress {
            key: key.into(),
            shift,
        });
    }

    pub fn visibility_changed(&self, hidden: bool) {
        self.dispatch(Trigger::VisibilityChanged { hidden });
    }

    pub fn unload(&self) {
        self.dispatch(Trigger::Unload);
    }

    /// Copy of the session as of every trigger dispatched before this call.
    /// `None` once the widget is torn down.
    pub async fn snapshot(&self) -> Option<Session> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.tx.send(Command::Snapshot(reply_tx)).ok()?;
        reply_rx.await.ok()
    }

    pub fn subscribe(&self) -> broadcast::Receiver<WidgetEvent> {
        self.events.subscribe()
    }

    /// Tear the widget down. Pending delayed replies and the idle nudge are
    /// dropped; an in-flight chat request finishes but its result is ignored.
    pub fn shutdown(&self) {
        self.cancel.cancel();
    }

    pub fn is_shut_down(&self) -> bool {
        self.cancel.is_cancelled()
    }
}
