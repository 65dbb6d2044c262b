//! Terminal output primitives
//!
//! Icons and semantic colors with plain-ASCII and no-color fallbacks.

use is_terminal::IsTerminal;

use crossterm::style::Stylize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Icon {
    Success,
    Error,
    Warning,
    Pending,
    Arrow,
}

impl Icon {
    pub fn render(&self, unicode: bool) -> &'static str {
        match (unicode, self) {
            (true, Icon::Success) => "✓",
            (true, Icon::Error) => "✗",
            (true, Icon::Warning) => "!",
            (true, Icon::Pending) => "◌",
            (true, Icon::Arrow) => "→",
            (false, Icon::Success) => "ok",
            (false, Icon::Error) => "x",
            (false, Icon::Warning) => "!",
            (false, Icon::Pending) => "-",
            (false, Icon::Arrow) => ">",
        }
    }

    pub fn colored(&self, style: OutputStyle) -> String {
        let s = self.render(style.unicode);
        if !style.color {
            return s.to_string();
        }
        match self {
            Icon::Success => s.green().to_string(),
            Icon::Error => s.red().to_string(),
            Icon::Warning => s.yellow().to_string(),
            Icon::Pending | Icon::Arrow => s.dark_grey().to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SemanticColor {
    Success,
    Error,
    Warning,
    Dim,
}

/// Terminal capabilities for the current invocation
#[derive(Debug, Clone, Copy)]
pub struct OutputStyle {
    pub color: bool,
    pub unicode: bool,
}

impl OutputStyle {
    pub fn detect() -> Self {
        let tty = std::io::stdout().is_terminal();
        let no_color = std::env::var_os("NO_COLOR").is_some();
        let dumb = std::env::var("TERM").map(|t| t == "dumb").unwrap_or(false);
        Self {
            color: tty && !no_color && !dumb,
            unicode: !dumb,
        }
    }

    /// No color, no unicode - for JSON mode and tests.
    pub fn plain() -> Self {
        Self {
            color: false,
            unicode: false,
        }
    }
}

pub fn paint(text: &str, color: SemanticColor, style: OutputStyle) -> String {
    if !style.color {
        return text.to_string();
    }
    match color {
        SemanticColor::Success => text.green().to_string(),
        SemanticColor::Error => text.red().to_string(),
        SemanticColor::Warning => text.yellow().to_string(),
        SemanticColor::Dim => text.dark_grey().to_string(),
    }
}
