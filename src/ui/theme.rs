use crossterm::style::Color;
use dialoguer::theme::Theme;
use std::fmt;

/// Design tokens for the Mastermind CLI.
///
/// Only 5 semantic colors (`colors::*`); all icons come from this module.
pub mod colors {
    use super::Color;

    /// #22C55E
    pub const SUCCESS: Color = Color::Green;
    /// #EF4444
    pub const ERROR: Color = Color::Red;
    /// #F59E0B
    pub const WARNING: Color = Color::Yellow;
    /// #06B6D4
    pub const INFO: Color = Color::Cyan;
    /// #6B7280
    pub const DIM: Color = Color::DarkGrey;
}

pub mod icons {
    pub const SUCCESS: &str = "✓";
    pub const ERROR: &str = "✗";
    pub const WARNING: &str = "⚠";
    pub const INFO: &str = "ℹ";
    pub const PROGRESS: &str = "●";
    pub const ARROW: &str = "↳";
    pub const POINTER: &str = "❯";

    pub const DATABASE: &str = "🛢";
    pub const CONTAINER: &str = "🐳";
    pub const BACKUP: &str = "💾";
    pub const TRASH: &str = "🗑";
}

pub mod icons_ascii {
    pub const SUCCESS: &str = "[OK]";
    pub const ERROR: &str = "[FAIL]";
    pub const WARNING: &str = "[WARN]";
    pub const INFO: &str = "[INFO]";
    pub const PROGRESS: &str = "[..]";
    pub const ARROW: &str = "[>]";
    pub const POINTER: &str = ">";

    pub const DATABASE: &str = "[DB]";
    pub const CONTAINER: &str = "[DOCKER]";
    pub const BACKUP: &str = "[BACKUP]";
    pub const TRASH: &str = "[DEL]";
}

// ----------------------------------------------------------------------------
// MastermindTheme - dialoguer theme with the CLI's pointer icon
// ----------------------------------------------------------------------------

/// Custom theme for dialoguer prompts.
///
/// Wraps `ColorfulTheme` and only overrides select item formatting, so menus
/// use `❯` (or `>` in ASCII mode) for the highlighted entry.
pub struct MastermindTheme {
    unicode: bool,
    inner: dialoguer::theme::ColorfulTheme,
}

impl MastermindTheme {
    pub fn new(unicode: bool) -> Self {
        Self {
            unicode,
            inner: dialoguer::theme::ColorfulTheme::default(),
        }
    }

    pub fn pointer(&self) -> &'static str {
        if self.unicode {
            icons::POINTER
        } else {
            icons_ascii::POINTER
        }
    }
}

impl Theme for MastermindTheme {
    fn format_prompt(&self, f: &mut dyn fmt::Write, prompt: &str) -> fmt::Result {
        self.inner.format_prompt(f, prompt)
    }

    fn format_error(&self, f: &mut dyn fmt::Write, err: &str) -> fmt::Result {
        self.inner.format_error(f, err)
    }

    fn format_confirm_prompt(
        &self,
        f: &mut dyn fmt::Write,
        prompt: &str,
        default: Option<bool>,
    ) -> fmt::Result {
        self.inner.format_confirm_prompt(f, prompt, default)
    }

    fn format_confirm_prompt_selection(
        &self,
        f: &mut dyn fmt::Write,
        prompt: &str,
        selection: Option<bool>,
    ) -> fmt::Result {
        self.inner
            .format_confirm_prompt_selection(f, prompt, selection)
    }

    fn format_input_prompt(
        &self,
        f: &mut dyn fmt::Write,
        prompt: &str,
        default: Option<&str>,
    ) -> fmt::Result {
        self.inner.format_input_prompt(f, prompt, default)
    }

    fn format_input_prompt_selection(
        &self,
        f: &mut dyn fmt::Write,
        prompt: &str,
        sel: &str,
    ) -> fmt::Result {
        self.inner.format_input_prompt_selection(f, prompt, sel)
    }

    fn format_select_prompt(&self, f: &mut dyn fmt::Write, prompt: &str) -> fmt::Result {
        self.inner.format_select_prompt(f, prompt)
    }

    fn format_select_prompt_selection(
        &self,
        f: &mut dyn fmt::Write,
        prompt: &str,
        sel: &str,
    ) -> fmt::Result {
        self.inner.format_select_prompt_selection(f, prompt, sel)
    }

    fn format_select_prompt_item(
        &self,
        f: &mut dyn fmt::Write,
        text: &str,
        active: bool,
    ) -> fmt::Result {
        if active {
            write!(f, "{} {}", self.pointer(), text)
        } else {
            write!(f, "  {}", text)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_pointer_icons() {
        assert_eq!(MastermindTheme::new(true).pointer(), "❯");
        assert_eq!(MastermindTheme::new(false).pointer(), ">");
    }

    #[test]
    fn test_select_item_marks_active_entry() {
        let theme = MastermindTheme::new(false);
        let mut active = String::new();
        let mut idle = String::new();
        theme
            .format_select_prompt_item(&mut active, "Create a new service", true)
            .unwrap();
        theme
            .format_select_prompt_item(&mut idle, "Exit", false)
            .unwrap();

        assert_eq!(active, "> Create a new service");
        assert_eq!(idle, "  Exit");
    }
}
