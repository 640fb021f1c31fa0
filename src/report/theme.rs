//! ANSI color themes for the terminal dashboard.
//!
//! Light and dark palettes plus a plain mode that emits no escape codes at
//! all (for piping output or terminals without color support). The dark
//! palette uses the bright variants so status colors stay readable on dark
//! backgrounds.

use crate::models::HealthStatus;

/// ANSI escape codes.
pub mod ansi {
    pub const RESET: &str = "\x1b[0m";
    pub const BOLD: &str = "\x1b[1m";
    pub const DIM: &str = "\x1b[2m";

    pub const RED: &str = "\x1b[31m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const BLUE: &str = "\x1b[34m";
    pub const CYAN: &str = "\x1b[36m";

    pub const BRIGHT_RED: &str = "\x1b[91m";
    pub const BRIGHT_GREEN: &str = "\x1b[92m";
    pub const BRIGHT_YELLOW: &str = "\x1b[93m";
    pub const BRIGHT_BLUE: &str = "\x1b[94m";
    pub const BRIGHT_CYAN: &str = "\x1b[96m";
}

/// Color palette selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Light,
    Dark,
    /// No escape codes at all.
    Plain,
}

impl Theme {
    /// Pick a theme from the dark and no-color flags.
    pub fn select(dark: bool, no_color: bool) -> Self {
        if no_color {
            Theme::Plain
        } else if dark {
            Theme::Dark
        } else {
            Theme::Light
        }
    }

    /// Color code for a health status.
    fn status_code(&self, status: HealthStatus) -> &'static str {
        match (self, status) {
            (Theme::Plain, _) => "",
            (Theme::Light, HealthStatus::Excellent) => ansi::GREEN,
            (Theme::Light, HealthStatus::Good) => ansi::BLUE,
            (Theme::Light, HealthStatus::Attention) => ansi::YELLOW,
            (Theme::Light, HealthStatus::Critical) => ansi::RED,
            (Theme::Dark, HealthStatus::Excellent) => ansi::BRIGHT_GREEN,
            (Theme::Dark, HealthStatus::Good) => ansi::BRIGHT_BLUE,
            (Theme::Dark, HealthStatus::Attention) => ansi::BRIGHT_YELLOW,
            (Theme::Dark, HealthStatus::Critical) => ansi::BRIGHT_RED,
        }
    }

    /// Paint text in the color of a health status.
    pub fn status(&self, status: HealthStatus, text: &str) -> String {
        self.wrap(self.status_code(status), text)
    }

    /// Paint text in the "passed" color.
    pub fn passed(&self, text: &str) -> String {
        self.status(HealthStatus::Excellent, text)
    }

    /// Paint text in the "failed" color.
    pub fn failed(&self, text: &str) -> String {
        self.status(HealthStatus::Critical, text)
    }

    /// Section heading (bold cyan).
    pub fn heading(&self, text: &str) -> String {
        match self {
            Theme::Plain => text.to_string(),
            Theme::Light => format!("{}{}{}{}", ansi::BOLD, ansi::CYAN, text, ansi::RESET),
            Theme::Dark => format!("{}{}{}{}", ansi::BOLD, ansi::BRIGHT_CYAN, text, ansi::RESET),
        }
    }

    /// Bold text.
    pub fn bold(&self, text: &str) -> String {
        self.wrap(ansi::BOLD, text)
    }

    /// De-emphasized text.
    pub fn dim(&self, text: &str) -> String {
        self.wrap(ansi::DIM, text)
    }

    /// Error text (red, bold).
    pub fn error(&self, text: &str) -> String {
        match self {
            Theme::Plain => text.to_string(),
            Theme::Light => format!("{}{}{}{}", ansi::BOLD, ansi::RED, text, ansi::RESET),
            Theme::Dark => format!("{}{}{}{}", ansi::BOLD, ansi::BRIGHT_RED, text, ansi::RESET),
        }
    }

    fn wrap(&self, code: &str, text: &str) -> String {
        if matches!(self, Theme::Plain) || code.is_empty() {
            text.to_string()
        } else {
            format!("{}{}{}", code, text, ansi::RESET)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_theme_emits_no_escapes() {
        let theme = Theme::Plain;
        assert_eq!(theme.status(HealthStatus::Critical, "bad"), "bad");
        assert_eq!(theme.heading("title"), "title");
        assert_eq!(theme.bold("x"), "x");
    }

    #[test]
    fn test_dark_theme_uses_bright_variants() {
        let light = Theme::Light.status(HealthStatus::Excellent, "ok");
        let dark = Theme::Dark.status(HealthStatus::Excellent, "ok");
        assert!(light.contains(ansi::GREEN));
        assert!(dark.contains(ansi::BRIGHT_GREEN));
    }

    #[test]
    fn test_theme_selection() {
        assert_eq!(Theme::select(false, false), Theme::Light);
        assert_eq!(Theme::select(true, false), Theme::Dark);
        assert_eq!(Theme::select(true, true), Theme::Plain);
    }
}
