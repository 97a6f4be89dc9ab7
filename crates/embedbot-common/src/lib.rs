//! Types shared by every embedbot crate: errors, ids, colors and the
//! observable widget event bus.

pub mod errors;
pub mod events;
pub mod id;
pub mod types;

pub use errors::{ConfigError, WidgetError};
pub use events::{EventBus, WidgetEvent};
pub use id::WidgetSessionId;
pub use types::{Color, Sender};

pub type Result<T> = std::result::Result<T, WidgetError>;
