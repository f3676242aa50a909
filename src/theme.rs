//! Centralized palette and styles for the console
//!
//! The console uses a small fixed palette: seven foreground/background pairs.
//! All colors are defined here rather than hardcoded in the renderers.
//!
//! # Usage
//! ```rust
//! use silverline::theme::{Colors, Styles};
//! use silverline::types::StatusLevel;
//! use ratatui::style::Style;
//!
//! let style = Style::default().fg(Colors::HIGHLIGHT_FG);
//! let status = Styles::status(StatusLevel::Warning);
//! ```

use ratatui::style::{Color, Modifier, Style};

use crate::types::StatusLevel;

// =============================================================================
// COLOR PALETTE
// =============================================================================

/// Core color palette
pub struct Colors;

impl Colors {
    /// Screen background and status bar
    pub const BACKGROUND_FG: Color = Color::White;
    pub const BACKGROUND_BG: Color = Color::Blue;

    /// Menu panels
    pub const PANEL_FG: Color = Color::Black;
    pub const PANEL_BG: Color = Color::White;

    /// Highlighted menu entry
    pub const HIGHLIGHT_FG: Color = Color::Red;
    pub const HIGHLIGHT_BG: Color = Color::White;

    /// Error status text
    pub const ERROR_FG: Color = Color::Red;
    pub const ERROR_BG: Color = Color::Blue;

    /// Warning status text
    pub const WARNING_FG: Color = Color::Green;
    pub const WARNING_BG: Color = Color::Blue;

    /// Filled progress cells
    pub const SUCCESS_FG: Color = Color::Black;
    pub const SUCCESS_BG: Color = Color::Green;

    /// Empty progress cells
    pub const PENDING_FG: Color = Color::Black;
    pub const PENDING_BG: Color = Color::White;
}

// =============================================================================
// PRE-BUILT STYLES
// =============================================================================

/// Pre-built styles, one per palette role
pub struct Styles;

impl Styles {
    /// Whole-screen background
    pub fn background() -> Style {
        Style::default()
            .fg(Colors::BACKGROUND_FG)
            .bg(Colors::BACKGROUND_BG)
    }

    /// Menu panel body
    pub fn panel() -> Style {
        Style::default().fg(Colors::PANEL_FG).bg(Colors::PANEL_BG)
    }

    /// Menu title (bold panel text)
    pub fn panel_title() -> Style {
        Self::panel().add_modifier(Modifier::BOLD)
    }

    /// Highlighted menu entry
    pub fn highlight() -> Style {
        Style::default()
            .fg(Colors::HIGHLIGHT_FG)
            .bg(Colors::HIGHLIGHT_BG)
    }

    /// Filled progress cell
    pub fn success() -> Style {
        Style::default()
            .fg(Colors::SUCCESS_FG)
            .bg(Colors::SUCCESS_BG)
    }

    /// Empty progress cell
    pub fn pending() -> Style {
        Style::default()
            .fg(Colors::PENDING_FG)
            .bg(Colors::PENDING_BG)
    }

    /// Status bar text for a severity
    pub fn status(level: StatusLevel) -> Style {
        let style = match level {
            StatusLevel::Normal => Self::background(),
            StatusLevel::Error => Style::default().fg(Colors::ERROR_FG).bg(Colors::ERROR_BG),
            StatusLevel::Warning => Style::default().fg(Colors::WARNING_FG).bg(Colors::WARNING_BG),
        };
        style.add_modifier(Modifier::BOLD)
    }
}
