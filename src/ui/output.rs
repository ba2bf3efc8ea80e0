//! User-facing output
//!
//! Status lines go to stdout with a semantic icon; diagnostics go through
//! `tracing` instead.

use std::thread;
use std::time::Duration;

use crossterm::style::Stylize;
use mastermind::application::{classify_line, LineKind};
use mastermind::presentation::ColorWhen;

use crate::ui::primitives::icon::Icon;
use crate::ui::terminal::{detect_capabilities, TerminalCapabilities};
use crate::ui::theme;

const BANNER: &str = r"
  __  __           _                      _           _
 |  \/  | __ _ ___| |_ ___ _ __ _ __ ___ (_)_ __   __| |
 | |\/| |/ _` / __| __/ _ \ '__| '_ ` _ \| | '_ \ / _` |
 | |  | | (_| \__ \ ||  __/ |  | | | | | | | | | | (_| |
 |_|  |_|\__,_|___/\__\___|_|  |_| |_| |_|_|_| |_|\__,_|
";
const BANNER_WIDTH: usize = 58;

#[derive(Debug, Clone)]
pub struct Reporter {
    supports_color: bool,
    supports_unicode: bool,
    interactive: bool,
    width: u16,
    pacing: Duration,
}

impl Reporter {
    pub fn new(color: Option<ColorWhen>, pacing: Duration) -> Self {
        Self::from_capabilities(detect_capabilities(), color, pacing)
    }

    pub fn from_capabilities(
        caps: TerminalCapabilities,
        color: Option<ColorWhen>,
        pacing: Duration,
    ) -> Self {
        let supports_color = match color {
            Some(ColorWhen::Always) => true,
            Some(ColorWhen::Never) => false,
            Some(ColorWhen::Auto) | None => caps.supports_color,
        };
        Self {
            supports_color,
            supports_unicode: caps.supports_unicode,
            interactive: caps.is_interactive,
            width: caps.width,
            pacing,
        }
    }

    pub fn supports_unicode(&self) -> bool {
        self.supports_unicode
    }

    /// Prompts can be answered on stdin
    pub fn is_interactive(&self) -> bool {
        self.interactive
    }

    pub fn line(&self, icon: Icon, message: &str) -> String {
        format!(
            "{} {}",
            icon.colored(self.supports_color, self.supports_unicode),
            message
        )
    }

    pub fn success(&self, message: impl AsRef<str>) {
        println!("{}", self.line(Icon::Success, message.as_ref()));
    }

    pub fn info(&self, message: impl AsRef<str>) {
        println!("{}", self.line(Icon::Info, message.as_ref()));
    }

    pub fn warn(&self, message: impl AsRef<str>) {
        println!("{}", self.line(Icon::Warning, message.as_ref()));
    }

    pub fn step(&self, icon: Icon, message: impl AsRef<str>) {
        println!("{}", self.line(icon, message.as_ref()));
    }

    /// Indented detail under the previous line
    pub fn detail(&self, message: impl AsRef<str>) {
        println!("  {}", self.line(Icon::Arrow, message.as_ref()));
    }

    pub fn heading(&self, title: &str) {
        if self.supports_color {
            println!("\n{}", title.bold().with(theme::colors::INFO));
        } else {
            println!("\n{}", title);
        }
    }

    pub fn dim(&self, text: &str) -> String {
        if self.supports_color {
            format!("{}", text.with(theme::colors::DIM))
        } else {
            text.to_string()
        }
    }

    /// Present ORM CLI output line by line
    pub fn orm_output(&self, output: &str) {
        for line in output.lines().filter(|l| !l.trim().is_empty()) {
            match classify_line(line) {
                LineKind::Info => self.info(line.trim()),
                LineKind::Success => self.success(line.trim()),
                LineKind::Plain => println!("{}", line),
            }
        }
    }

    pub fn banner(&self) {
        let text = if usize::from(self.width) < BANNER_WIDTH {
            "\n  Mastermind\n"
        } else {
            BANNER
        };
        if self.supports_color {
            println!("{}", text.with(theme::colors::INFO));
        } else {
            println!("{}", text);
        }
    }

    /// Short pause between wizard steps so output can be read
    pub fn pause(&self) {
        if !self.pacing.is_zero() {
            thread::sleep(self.pacing);
        }
    }
}
