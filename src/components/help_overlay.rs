//! Help overlay component
//!
//! Displays context-sensitive help in a centered floating window.

use super::keybindings::{HelpSection, KeybindingContext};
use crate::app::AppMode;
use crate::theme::{Colors, Styles};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

/// Help overlay component
pub struct HelpOverlay {
    content: Vec<Line<'static>>,
}

impl HelpOverlay {
    /// Create a new help overlay for the given mode
    pub fn new(mode: &AppMode, keybinding_ctx: &KeybindingContext) -> Self {
        let sections = keybinding_ctx.get_help_content(mode);
        Self {
            content: Self::build_content(&sections, mode),
        }
    }

    /// Build the help content from sections
    fn build_content(sections: &[HelpSection], mode: &AppMode) -> Vec<Line<'static>> {
        let mut lines: Vec<Line<'static>> = Vec::new();

        lines.push(Line::from(vec![Span::styled("  trackbot Help  ", Styles::title())]));
        lines.push(Line::from(""));

        let mode_name = match mode {
            AppMode::Programming => "Programming",
            AppMode::Configuring => "Editing track",
        };
        lines.push(Line::from(vec![
            Span::styled("Mode: ", Style::default().fg(Colors::FG_SECONDARY)),
            Span::styled(mode_name, Style::default().fg(Colors::SECONDARY)),
        ]));
        lines.push(Line::from(""));

        for section in sections {
            lines.push(Line::from(vec![Span::styled(
                format!("{}:", section.title),
                Style::default()
                    .fg(Colors::PRIMARY)
                    .add_modifier(Modifier::BOLD),
            )]));

            for (key, desc) in &section.items {
                lines.push(Line::from(vec![
                    Span::styled(format!("  {:>8}", key), Styles::key_hint()),
                    Span::raw("  "),
                    Span::styled(desc.clone(), Styles::text()),
                ]));
            }
            lines.push(Line::from(""));
        }

        lines.push(Line::from(vec![Span::styled(
            "Loops repeat their body twice; an unclosed loop runs once.",
            Style::default().fg(Colors::FG_MUTED),
        )]));

        lines
    }

    /// Render the overlay centered in `area`
    pub fn render(&self, f: &mut Frame, area: Rect) {
        let popup = centered_rect(60, 80, area);
        f.render_widget(Clear, popup);

        let widget = Paragraph::new(self.content.clone())
            .block(
                Block::default()
                    .title(" Help ")
                    .borders(Borders::ALL)
                    .border_style(Styles::border_active())
                    .style(Style::default().bg(Colors::BG_PRIMARY)),
            )
            .wrap(Wrap { trim: false });
        f.render_widget(widget, popup);
    }
}

/// A rectangle of the given percentage size centered in `area`
fn centered_rect(width_percent: u16, height_percent: u16, area: Rect) -> Rect {
    let scale = |len: u16, percent: u16| (u32::from(len) * u32::from(percent) / 100) as u16;
    let width = scale(area.width, width_percent).max(40).min(area.width);
    let height = scale(area.height, height_percent).max(12).min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
