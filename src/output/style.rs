//! Terminal styling for the table renderer.

use std::io;

use crossterm::style::{Color, Stylize};
use crossterm::tty::IsTty;

const HEADER: Color = Color::AnsiValue(12);
const EVEN_ROW: Color = Color::AnsiValue(252);
const ODD_ROW: Color = Color::AnsiValue(245);
const SUCCESS: Color = Color::AnsiValue(10);
const DIM: Color = Color::AnsiValue(240);
const AUTHOR: Color = Color::AnsiValue(14);
const BORDER: Color = Color::AnsiValue(238);

/// Decides whether output should carry ANSI styling.
///
/// `NO_COLOR` always wins; otherwise `FORCE_COLOR` or an interactive stream
/// enables styling.
#[must_use]
pub fn color_enabled(no_color: Option<&str>, force_color: Option<&str>, is_tty: bool) -> bool {
    let set = |value: Option<&str>| value.is_some_and(|raw| !raw.is_empty());
    if set(no_color) {
        return false;
    }
    set(force_color) || is_tty
}

/// Styling switch applied to table output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Style {
    enabled: bool,
}

impl Style {
    /// Styling on.
    #[must_use]
    pub const fn styled() -> Self {
        Self { enabled: true }
    }

    /// Styling off.
    #[must_use]
    pub const fn plain() -> Self {
        Self { enabled: false }
    }

    /// Detects styling for standard output from the environment.
    #[must_use]
    pub fn for_stdout() -> Self {
        let no_color = std::env::var("NO_COLOR").ok();
        let force_color = std::env::var("FORCE_COLOR").ok();
        Self {
            enabled: color_enabled(
                no_color.as_deref(),
                force_color.as_deref(),
                io::stdout().is_tty(),
            ),
        }
    }

    fn paint(self, text: &str, color: Color, bold: bool) -> String {
        if !self.enabled {
            return text.to_owned();
        }
        let styled = text.with(color);
        if bold {
            styled.bold().to_string()
        } else {
            styled.to_string()
        }
    }

    pub(super) fn header(self, text: &str) -> String {
        self.paint(text, HEADER, true)
    }

    pub(super) fn row(self, text: &str, even: bool) -> String {
        let color = if even { EVEN_ROW } else { ODD_ROW };
        self.paint(text, color, false)
    }

    pub(super) fn success(self, text: &str) -> String {
        self.paint(text, SUCCESS, false)
    }

    pub(super) fn dim(self, text: &str) -> String {
        self.paint(text, DIM, false)
    }

    pub(super) fn author(self, text: &str) -> String {
        self.paint(text, AUTHOR, true)
    }

    pub(super) fn border(self, text: &str) -> String {
        self.paint(text, BORDER, false)
    }
}
