//! Centralized theme and styling for the TUI
//!
//! All colors and pre-built styles live here rather than being hardcoded in the
//! renderers.

use ratatui::style::{Color, Modifier, Style};

/// Core color palette for the application
pub struct Colors;

impl Colors {
    /// Primary dark background
    pub const BG_PRIMARY: Color = Color::Rgb(20, 20, 30);

    /// Default foreground text color
    pub const FG_PRIMARY: Color = Color::White;

    /// Secondary/muted text color
    pub const FG_SECONDARY: Color = Color::Gray;

    /// Disabled/inactive text color
    pub const FG_MUTED: Color = Color::DarkGray;

    /// Primary accent color - used for borders, titles, highlights
    pub const PRIMARY: Color = Color::Cyan;

    /// Secondary accent color - used for the configuration cursor
    pub const SECONDARY: Color = Color::Yellow;

    /// Success/positive feedback
    pub const SUCCESS: Color = Color::Green;

    /// Error/danger feedback
    pub const ERROR: Color = Color::Red;

    /// Traversable cell fill
    pub const CELL_VALID: Color = Color::Rgb(22, 163, 74);

    /// Non-traversable cell fill
    pub const CELL_EMPTY: Color = Color::Rgb(45, 45, 60);

    /// Agent glyph
    pub const AGENT: Color = Color::White;

    /// Loop marker chips
    pub const LOOP: Color = Color::Magenta;
}

/// Pre-built styles for common UI elements
pub struct Styles;

impl Styles {
    /// Title text style - bold primary color
    pub fn title() -> Style {
        Style::default()
            .fg(Colors::PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    /// Border style for the focused panel
    pub fn border_active() -> Style {
        Style::default().fg(Colors::PRIMARY)
    }

    /// Border style for unfocused panels
    pub fn border_inactive() -> Style {
        Style::default().fg(Colors::FG_MUTED)
    }

    /// Key hint in the navigation bar
    pub fn key_hint() -> Style {
        Style::default()
            .fg(Colors::SECONDARY)
            .add_modifier(Modifier::BOLD)
    }

    /// Plain descriptive text
    pub fn text() -> Style {
        Style::default().fg(Colors::FG_SECONDARY)
    }

    /// Status message, colored by outcome
    pub fn notice(success: bool) -> Style {
        let color = if success { Colors::SUCCESS } else { Colors::ERROR };
        Style::default().fg(color).add_modifier(Modifier::BOLD)
    }

    /// A grid cell
    pub fn cell(traversable: bool) -> Style {
        let bg = if traversable {
            Colors::CELL_VALID
        } else {
            Colors::CELL_EMPTY
        };
        Style::default().bg(bg).fg(Colors::AGENT)
    }

    /// Configuration cursor overlay on a cell
    pub fn cursor(traversable: bool) -> Style {
        Self::cell(traversable)
            .fg(Colors::SECONDARY)
            .add_modifier(Modifier::BOLD)
    }
}
