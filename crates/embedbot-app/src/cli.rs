use std::path::PathBuf;

use clap::Parser;
use embedbot_config::embed::{ATTR_CHATBOT_KEY, ATTR_POSITION, ATTR_THEME};
use embedbot_config::EmbedAttributes;

/// Embedbot: mount the chat widget in a terminal and talk to a chatbot backend.
#[derive(Parser, Debug)]
#[command(name = "embedbot", version, about)]
pub struct Args {
    /// Chatbot key, as given by data-chatbot-key on the embed tag.
    #[arg(short = 'k', long)]
    pub chatbot_key: Option<String>,

    /// Widget corner (left or right).
    #[arg(long)]
    pub position: Option<String>,

    /// Widget theme (gradient, blue, purple or dark).
    #[arg(long)]
    pub theme: Option<String>,

    /// Backend base URL override.
    #[arg(long)]
    pub api_base: Option<String>,

    /// Settings file path override.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Do not send analytics beacons.
    #[arg(long)]
    pub no_analytics: bool,

    /// Log level override (debug, info, warn, error).
    #[arg(long)]
    pub log_level: Option<String>,
}

impl Args {
    /// The attributes a script tag with these options would carry.
    pub fn embed_attributes(&self) -> EmbedAttributes {
        let mut attrs = EmbedAttributes::new();
        if let Some(ref key) = self.chatbot_key {
            attrs = attrs.with(ATTR_CHATBOT_KEY, key.clone());
        }
        if let Some(ref position) = self.position {
            attrs = attrs.with(ATTR_POSITION, position.clone());
        }
        if let Some(ref theme) = self.theme {
            attrs = attrs.with(ATTR_THEME, theme.clone());
        }
        attrs
    }
}

pub fn parse() -> Args {
    Args::parse()
}
