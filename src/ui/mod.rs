//! User interface rendering module
//!
//! This module is organized into submodules:
//! - `header` - Title bar, status line and navigation bar
//! - `board` - Track grid and program panel

mod board;
mod header;

use crate::app::AppState;
use crate::components::help_overlay::HelpOverlay;
use crate::components::keybindings::KeybindingContext;
use crate::track::ROWS;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
};

/// Height of the grid panel: two lines per row, the robot line and borders
const GRID_HEIGHT: u16 = (ROWS as u16) * 2 + 3;

/// UI renderer for the application
///
/// This is the main entry point for UI rendering. It delegates to specialized
/// submodules for different parts of the UI.
#[derive(Debug, Default)]
pub struct UiRenderer;

impl UiRenderer {
    /// Create a new UI renderer
    pub fn new() -> Self {
        Self
    }

    /// Render the complete UI
    pub fn render(&self, f: &mut Frame, state: &AppState, keybinding_ctx: &KeybindingContext) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),           // Title
                Constraint::Length(GRID_HEIGHT), // Grid
                Constraint::Min(3),              // Program
                Constraint::Length(1),           // Status
                Constraint::Length(1),           // Navigation bar
            ])
            .split(f.area());

        header::render_title(f, state, chunks[0]);
        board::render_grid(f, state, chunks[1]);
        board::render_program(f, state, chunks[2]);
        header::render_status(f, state, chunks[3]);
        header::render_nav_bar(f, state, keybinding_ctx, chunks[4]);

        // Help overlay sits on top of everything
        if state.help_visible {
            let area = f.area();
            HelpOverlay::new(&state.mode(), keybinding_ctx).render(f, area);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{Command, Notice, Session};
    use crate::track;
    use crate::types::Instruction;
    use crate::engine::Timing;
    use ratatui::{Terminal, backend::TestBackend};

    fn screen_text(state: &AppState) -> String {
        let backend = TestBackend::new(80, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        let ctx = KeybindingContext::new();
        terminal
            .draw(|f| UiRenderer::new().render(f, state, &ctx))
            .unwrap();
        let buffer = terminal.backend().buffer();
        buffer.content().iter().map(|cell| cell.symbol()).collect()
    }

    #[test]
    fn test_renders_agent_program_and_status() {
        let mut session = Session::new(track::preset(0).unwrap(), Timing::zero());
        session.dispatch(Command::Append(Instruction::LoopStart));
        session.dispatch(Command::Append(Instruction::Advance));
        let mut state = AppState::new(session);
        state.notice = Some(Notice::success("Mission accomplished!"));

        let text = screen_text(&state);
        assert!(text.contains('▶'));
        assert!(text.contains("Program (1 steps)"));
        assert!(text.contains("Last added: Forward"));
        assert!(text.contains("Mission accomplished!"));
    }

    #[test]
    fn test_help_overlay_is_drawn_when_visible() {
        let mut state = AppState::default();
        state.help_visible = true;
        assert!(screen_text(&state).contains("trackbot Help"));
    }
}
