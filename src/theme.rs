//! Theme configuration for CLI output
//!
//! Centralizes the ANSI colors used when printing progress and reports.
//! Color is dropped entirely when `NO_COLOR` is set or stdout is not a
//! terminal, so redirected output stays plain text.

/// Terminal colors used by the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Red,
    Green,
    Yellow,
    Cyan,
    Gray,
    DarkGray,
    White,
}

impl Color {
    fn ansi(self) -> &'static str {
        match self {
            Color::Red => "\x1b[31m",
            Color::Green => "\x1b[32m",
            Color::Yellow => "\x1b[33m",
            Color::Cyan => "\x1b[36m",
            Color::Gray => "\x1b[37m",
            Color::DarkGray => "\x1b[90m",
            Color::White => "\x1b[97m",
        }
    }
}

/// ANSI reset sequence
const ANSI_RESET: &str = "\x1b[0m";

/// Color scheme plus whether to emit escape codes at all.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Primary text color (used for most content)
    pub text_primary: Color,
    /// Secondary/dimmed text color
    pub text_secondary: Color,
    /// Accent color for labels and paths
    pub accent: Color,
    /// Warning color (non-zero build status, skipped lines)
    pub warning: Color,
    /// Error color
    pub error: Color,
    /// Success color
    pub success: Color,
    enabled: bool,
}

impl Default for Theme {
    fn default() -> Self {
        Self::standard()
    }
}

impl Theme {
    /// Standard ANSI palette.
    pub fn standard() -> Self {
        Self {
            text_primary: Color::Gray,
            text_secondary: Color::DarkGray,
            accent: Color::Cyan,
            warning: Color::Yellow,
            error: Color::Red,
            success: Color::Green,
            enabled: true,
        }
    }

    /// Same palette with escape codes switched off.
    pub fn plain() -> Self {
        Self {
            enabled: false,
            ..Self::standard()
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn paint(&self, color: Color, text: &str) -> String {
        if self.enabled {
            format!("{}{}{}", color.ansi(), text, ANSI_RESET)
        } else {
            text.to_string()
        }
    }

    /// Format text with the primary color.
    pub fn primary_text(&self, text: &str) -> String {
        self.paint(self.text_primary, text)
    }

    /// Format text with the secondary color.
    pub fn secondary_text(&self, text: &str) -> String {
        self.paint(self.text_secondary, text)
    }

    /// Format text with the accent color.
    pub fn accent_text(&self, text: &str) -> String {
        self.paint(self.accent, text)
    }

    /// Format text with the warning color.
    pub fn warning_text(&self, text: &str) -> String {
        self.paint(self.warning, text)
    }

    /// Format text with the error color.
    pub fn error_text(&self, text: &str) -> String {
        self.paint(self.error, text)
    }

    /// Format text with the success color.
    pub fn success_text(&self, text: &str) -> String {
        self.paint(self.success, text)
    }
}

/// Theme for the current process: colored only on an interactive stdout
/// without `NO_COLOR`.
pub fn current_theme() -> Theme {
    let no_color = std::env::var_os("NO_COLOR").map_or(false, |v| !v.is_empty());
    if no_color || !atty::is(atty::Stream::Stdout) {
        Theme::plain()
    } else {
        Theme::standard()
    }
}

/// Raw ANSI codes for diff-style previews.
pub mod ansi {
    pub const GREEN: &str = "\x1b[32m";
    pub const RESET: &str = "\x1b[0m";
}
