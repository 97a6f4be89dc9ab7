//! The widget session engine.
//!
//! Owns all per-page widget state (panel open/closed, the in-flight gate,
//! counters and the transcript) and mediates between UI triggers, the chat
//! endpoint and the analytics sink.
//!
//! - [`Session`]: the state and its pure transitions
//! - [`WidgetView`]: the presentation port the engine drives
//! - [`WidgetEngine`] / [`WidgetHandle`]: the single event loop and the
//!   fire-and-forget entry points the host calls into
//! - [`render`]: plain-text and HTML-escaped message rendering

pub mod engine;
pub mod message;
pub mod render;
pub mod session;
pub mod view;

#[cfg(test)]
pub(crate) mod testing;

pub use engine::{Trigger, WidgetEngine, WidgetHandle};
pub use message::{Message, ERROR_REPLY};
pub use render::RenderedMessage;
pub use session::Session;
pub use view::WidgetView;
