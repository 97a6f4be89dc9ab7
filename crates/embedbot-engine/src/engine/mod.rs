//! The widget event loop.
//!
//! One task owns the [`Session`] and the [`WidgetView`] and applies every
//! state transition. Chat requests, analytics beacons and timers run as
//! spawned tasks; the ones that affect state post a [`Command`] back into
//! the loop instead of touching the session themselves.

mod dispatch;
mod handle;
mod tasks;


use std::sync::Arc;

use embedbot_client::{AnalyticsEvent, AnalyticsSink, ChatBackend, ChatError};
use embedbot_common::{EventBus, WidgetError, WidgetEvent, WidgetSessionId};
use embedbot_config::{EmbedAttributes, WidgetConfig, WidgetSettings};
use tokio::sync::{mpsc, oneshot};
use tokio_util::sync::CancellationToken;
use tracing::{error, info, info_span, Instrument};

use crate::session::Session;
use crate::view::WidgetView;

pub use handle::WidgetHandle;

/// A UI occurrence the host forwards to the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Trigger {
    /// The floating toggle button.
    Toggle,
    /// The minimize control in the panel header. Same effect as `Toggle`.
    Minimize,
    /// The input field's contents changed.
    Input(String),
    /// The send control.
    Submit,
    /// A key pressed in the input field. `Enter` without shift commits.
    KeyPress { key: String, shift: bool },
    VisibilityChanged { hidden: bool },
    Unload,
}

pub(crate) enum Command {
    Trigger(Trigger),
    ChatResolved(Result<String, ChatError>),
    ReplyDue(String),
    IdleNudgeDue,
    Snapshot(oneshot::Sender<Session>),
}

pub struct WidgetEngine {
    id: WidgetSessionId,
    config: Arc<WidgetConfig>,
    settings: WidgetSettings,
    session: Session,
    backend: Arc<dyn ChatBackend>,
    analytics: Arc<dyn AnalyticsSink>,
    view: Box<dyn WidgetView>,
    events: EventBus,
    tx: mpsc::UnboundedSender<Command>,
    cancel: CancellationToken,
}

impl WidgetEngine {
    /// Mount a widget and start its event loop on the current tokio runtime.
    ///
    /// A missing chatbot key aborts with a diagnostic before anything is
    /// drawn or spawned.
    pub fn mount(
        attrs: &EmbedAttributes,
        settings: WidgetSettings,
        backend: Arc<dyn ChatBackend>,
        analytics: Arc<dyn AnalyticsSink>,
        mut view: Box<dyn WidgetView>,
    ) -> Result<WidgetHandle, WidgetError> {
        let config = match WidgetConfig::from_attributes(attrs) {
            Ok(config) => Arc::new(config),
            Err(e) => {
                error!("widget not mounted: {e}");
                return Err(e.into());
            }
        };

        let id = WidgetSessionId::new();
        let (tx, rx) = mpsc::unbounded_channel();
        let cancel = CancellationToken::new();
        let events = EventBus::default();

        view.mount(&config, &settings.greeting);

        let engine = Self {
            id: id.clone(),
            config,
            settings,
            session: Session::new(),
            backend,
            analytics,
            view,
            events: events.clone(),
            tx: tx.clone(),
            cancel: cancel.clone(),
        };

        info!(
            session = %id.short(),
            position = %engine.config.position,
            theme = %engine.config.theme,
            "widget mounted"
        );
        engine.track(AnalyticsEvent::WidgetLoaded);
        engine.schedule_idle_nudge();
        events.publish(WidgetEvent::Mounted);

        let span = info_span!("widget", session = %id.short());
        tokio::spawn(engine.run(rx).instrument(span));

        Ok(WidgetHandle::new(id, tx, cancel, events))
    }

    async fn run(mut self, mut rx: mpsc::UnboundedReceiver<Command>) {
        loop {
            tokio::select! {
                biased;
                _ = self.cancel.cancelled() => break,
                command = rx.recv() => match command {
                    Some(command) => self.handle(command),
                    None => break,
                },
            }
        }

        self.view.unmount();
        self.events.publish(WidgetEvent::TornDown);
        info!(session = %self.id.short(), "widget torn down");
    }
}
