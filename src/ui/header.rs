//! Title bar, status line and navigation bar rendering

use crate::app::AppState;
use crate::components::keybindings::KeybindingContext;
use crate::engine::RunState;
use crate::theme::{Colors, Styles};
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

/// Render the title bar with the current run state
pub fn render_title(f: &mut Frame, state: &AppState, area: Rect) {
    let run_state = state.session.run_state();
    let state_color = match run_state {
        RunState::Idle => Colors::FG_SECONDARY,
        RunState::Running => Colors::PRIMARY,
        RunState::Failed => Colors::ERROR,
        RunState::Completed => Colors::SUCCESS,
    };

    let mut spans = vec![
        Span::styled("trackbot", Styles::title()),
        Span::raw("  "),
        Span::styled(run_state.description(), Style::default().fg(state_color)),
    ];
    if state.session.config_mode() {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(
            "[editing track]",
            Style::default().fg(Colors::SECONDARY),
        ));
    }

    let title = Paragraph::new(Line::from(spans))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Styles::border_inactive()),
        )
        .alignment(Alignment::Center);
    f.render_widget(title, area);
}

/// Render the status message, or nothing when there is none
pub fn render_status(f: &mut Frame, state: &AppState, area: Rect) {
    let Some(notice) = &state.notice else {
        return;
    };
    let status = Paragraph::new(Span::styled(
        notice.text.clone(),
        Styles::notice(notice.success),
    ))
    .alignment(Alignment::Center);
    f.render_widget(status, area);
}

/// Render the single-line key hint bar
pub fn render_nav_bar(f: &mut Frame, state: &AppState, keybinding_ctx: &KeybindingContext, area: Rect) {
    let mut spans: Vec<Span> = Vec::new();
    for item in keybinding_ctx.get_nav_items(&state.mode()) {
        if !spans.is_empty() {
            spans.push(Span::styled(" | ", Style::default().fg(Colors::FG_MUTED)));
        }
        spans.push(Span::styled(item.key_display, Styles::key_hint()));
        spans.push(Span::raw(" "));
        spans.push(Span::styled(item.action_label, Styles::text()));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}
