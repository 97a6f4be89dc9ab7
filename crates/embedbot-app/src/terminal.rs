//! A line-oriented view that draws the widget into a terminal.

use std::io::{self, Stdout, Write};

use colored::{ColoredString, Colorize};
use embedbot_common::{Color, Sender};
use embedbot_config::WidgetConfig;
use embedbot_engine::{RenderedMessage, WidgetView};

pub struct TerminalView<W: Write + Send = Stdout> {
    out: W,
    /// Theme brand color, set at mount.
    accent: Option<Color>,
    /// Foreground used on top of `accent`.
    on_accent: Option<Color>,
    input_enabled: bool,
}

impl TerminalView<Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write + Send> TerminalView<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            accent: None,
            on_accent: None,
            input_enabled: true,
        }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }

    fn line(&mut self, text: impl std::fmt::Display) {
        // A closed pipe is not the engine's problem.
        let _ = writeln!(self.out, "{text}");
        let _ = self.out.flush();
    }

    fn prompt(&mut self) {
        if self.input_enabled {
            let _ = write!(self.out, "{} ", ">".dimmed());
            let _ = self.out.flush();
        }
    }

    fn accented(&self, text: &str) -> ColoredString {
        match self.accent {
            Some(c) => text.truecolor(c.r, c.g, c.b),
            None => text.normal(),
        }
    }

    fn bubble(&mut self, time: &str, label: ColoredString, text: ColoredString) {
        let stamp = format!("[{time}]");
        self.line(format_args!("{} {} {}", stamp.dimmed(), label, text));
    }
}

impl<W: Write + Send> WidgetView for TerminalView<W> {
    fn mount(&mut self, config: &WidgetConfig, greeting: &str) {
        let palette = config.theme.palette();
        self.accent = palette.solid_color();
        self.on_accent = palette.text_color();

        let title = match (self.accent, self.on_accent) {
            (Some(bg), Some(fg)) => " Chat with us "
                .truecolor(fg.r, fg.g, fg.b)
                .on_truecolor(bg.r, bg.g, bg.b)
                .bold(),
            _ => " Chat with us ".bold(),
        };
        let details = format!("({} theme, {} corner)", config.theme, config.position);
        self.line(format_args!("{} {}", title, details.dimmed()));

        let label = self.accented("bot:");
        self.bubble("--:--", label, greeting.normal());
        self.line("/toggle opens the panel, /quit leaves".dimmed());
    }

    fn set_panel_open(&mut self, open: bool) {
        let icon = if open { "✕ panel open" } else { "💬 panel closed" };
        self.line(icon.dimmed());
    }

    fn focus_input(&mut self) {
        self.prompt();
    }

    fn clear_input(&mut self) {}

    fn set_input_enabled(&mut self, enabled: bool) {
        self.input_enabled = enabled;
    }

    fn show_typing_indicator(&mut self) {
        self.line("bot is typing…".dimmed());
    }

    fn hide_typing_indicator(&mut self) {}

    fn append_message(&mut self, message: &RenderedMessage) {
        let (label, text) = match message.sender {
            Sender::User => ("you:".bold(), message.plain.normal()),
            Sender::Bot if message.is_error => ("bot:".red(), message.plain.red()),
            Sender::Bot => (self.accented("bot:"), message.plain.normal()),
        };
        self.bubble(&message.time_label, label, text);

        // A reply lands after the prompt was already drawn.
        if message.sender == Sender::Bot {
            self.prompt();
        }
    }

    fn set_unread_badge(&mut self, count: Option<u32>) {
        if let Some(count) = count {
            let badge = self.accented(&format!("({count} unread)"));
            self.line(badge);
        }
    }

    fn set_attention(&mut self, on: bool) {
        if on {
            self.line("💬 psst, the chat is waiting".dimmed());
        }
    }

    fn unmount(&mut self) {
        self.line("widget removed".dimmed());
    }
}
