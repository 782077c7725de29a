//! Grid and program panel rendering

use crate::app::{AppMode, AppState};
use crate::theme::{Colors, Styles};
use crate::track::{COLS, ROWS};
use crate::types::{Instruction, Position};
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

/// Width of one grid cell in terminal columns
const CELL_WIDTH: usize = 5;

/// Render the track grid with the agent and, while editing, the cursor
pub fn render_grid(f: &mut Frame, state: &AppState, area: Rect) {
    let session = &state.session;
    let agent = session.agent();
    let editing = state.mode() == AppMode::Configuring;

    let mut lines: Vec<Line> = Vec::with_capacity(ROWS * 2);
    for row in 0..ROWS {
        let mut spans: Vec<Span> = Vec::with_capacity(COLS * 2);
        for col in 0..COLS {
            let pos = Position::new(row, col);
            let traversable = session.track().is_traversable(pos);
            let under_cursor = editing && pos == state.cursor;

            let glyph = if pos == agent.position {
                agent.heading.arrow().to_string()
            } else if under_cursor {
                "+".to_string()
            } else {
                String::new()
            };
            let style = if under_cursor {
                Styles::cursor(traversable)
            } else {
                Styles::cell(traversable)
            };

            spans.push(Span::styled(format!("{glyph:^CELL_WIDTH$}"), style));
            spans.push(Span::raw(" "));
        }
        lines.push(Line::from(spans));
        lines.push(Line::from(""));
    }

    lines.push(Line::from(vec![
        Span::styled("Robot ", Style::default().fg(Colors::FG_MUTED)),
        Span::styled(
            format!("{} facing {}", agent.position, agent.heading),
            Styles::text(),
        ),
    ]));

    let border = if editing {
        Styles::border_active()
    } else {
        Styles::border_inactive()
    };
    let grid = Paragraph::new(lines)
        .block(
            Block::default()
                .title(" Track ")
                .borders(Borders::ALL)
                .border_style(border),
        )
        .alignment(Alignment::Center);
    f.render_widget(grid, area);
}

/// Render the program as a row of instruction chips
pub fn render_program(f: &mut Frame, state: &AppState, area: Rect) {
    let program = state.session.program();

    let content: Vec<Line> = if program.is_empty() {
        vec![Line::from(Span::styled(
            "No instructions yet. Use the arrow keys and [ ] to build a program.",
            Style::default().fg(Colors::FG_MUTED),
        ))]
    } else {
        let mut spans: Vec<Span> = Vec::with_capacity(program.len() * 2);
        for &instruction in program.instructions() {
            let color = match instruction {
                Instruction::LoopStart | Instruction::LoopEnd => Colors::LOOP,
                _ => Colors::PRIMARY,
            };
            spans.push(Span::styled(
                format!("[{}]", chip(instruction)),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ));
            spans.push(Span::raw(" "));
        }
        let mut lines = vec![Line::from(spans)];
        if let Some(last) = program.instructions().last() {
            lines.push(Line::from(Span::styled(
                format!("Last added: {}", last.label()),
                Style::default().fg(Colors::FG_MUTED),
            )));
        }
        lines
    };

    let border = if state.mode() == AppMode::Programming {
        Styles::border_active()
    } else {
        Styles::border_inactive()
    };
    let title = format!(" Program ({} steps) ", program.expand().len());
    let panel = Paragraph::new(content)
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_style(border),
        )
        .wrap(Wrap { trim: true });
    f.render_widget(panel, area);
}

fn chip(instruction: Instruction) -> &'static str {
    match instruction {
        Instruction::TurnLeft => "↺",
        Instruction::TurnRight => "↻",
        Instruction::Advance => "↑",
        Instruction::LoopStart => "loop",
        Instruction::LoopEnd => "end",
    }
}
