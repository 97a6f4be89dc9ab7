//! Presentation port.

use embedbot_config::WidgetConfig;

use crate::render::RenderedMessage;

/// Everything the engine asks of the surface the widget is drawn on.
///
/// Calls arrive from the engine's single event loop, in order, and never
/// concurrently. Implementations must not fail back into the engine.
pub trait WidgetView: Send {
    /// Insert the widget into the host page. Called once, only after the
    /// embed attributes parsed successfully.
    fn mount(&mut self, config: &WidgetConfig, greeting: &str);

    /// Show or hide the conversation panel and swap the toggle icon.
    fn set_panel_open(&mut self, open: bool);

    fn focus_input(&mut self);

    fn clear_input(&mut self);

    /// Enable or disable both the input field and the send control.
    fn set_input_enabled(&mut self, enabled: bool);

    fn show_typing_indicator(&mut self);

    fn hide_typing_indicator(&mut self);

    fn append_message(&mut self, message: &RenderedMessage);

    /// `None` hides the badge.
    fn set_unread_badge(&mut self, count: Option<u32>);

    /// Attention cue on the toggle control.
    fn set_attention(&mut self, on: bool);

    /// Brief cue on the send control while the visitor types.
    fn pulse_send(&mut self) {}

    /// Remove the widget from the host page.
    fn unmount(&mut self) {}
}
