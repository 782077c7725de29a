//! Application module
//!
//! Contains the terminal front end: the event loop, key handling and the
//! playback scheduler that drives the session's runs.
//!
//! # Module Structure
//! - `state` - Application state types (AppState, AppMode)
//! - Main module - App struct and event loop

mod state;

pub use state::{AppMode, AppState};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use ratatui::{Terminal, backend::Backend};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

use crate::components::keybindings::{KeyAction, KeybindingContext};
use crate::config_file::SimulatorConfig;
use crate::session::{Command, Effect, Notice, Session};
use crate::track::{COLS, ROWS};
use crate::track_file::TrackFile;
use crate::track_source::{self, FileSource, PresetSource, TrackSource};
use crate::types::{Instruction, Position};
use crate::ui::UiRenderer;

/// How long to wait for input when no step is due
const IDLE_POLL: Duration = Duration::from_millis(50);

/// Main application struct
pub struct App {
    state: AppState,
    ui_renderer: UiRenderer,
    keybinding_context: KeybindingContext,
    custom_track: PathBuf,
}

impl App {
    /// Create the application, loading the saved custom track or a preset
    pub fn new(config: &SimulatorConfig) -> Self {
        let custom = FileSource::new(&config.custom_track);
        let loaded = track_source::load_custom_or_preset(Some(&custom));
        info!(custom = ?config.custom_track, "Creating new App instance");

        let mut app = Self::with_session(
            Session::new(loaded.track, config.timing()),
            &config.custom_track,
        );
        app.state.notice = loaded.notice;
        app
    }

    /// Create the application around an existing session
    pub fn with_session(session: Session, custom_track: &Path) -> Self {
        Self {
            state: AppState::new(session),
            ui_renderer: UiRenderer::new(),
            keybinding_context: KeybindingContext::new(),
            custom_track: custom_track.to_path_buf(),
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Run the main application loop
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        info!("Starting main application loop");

        loop {
            self.advance_run(Instant::now());

            terminal.draw(|f| {
                self.ui_renderer
                    .render(f, &self.state, &self.keybinding_context);
            })?;

            let timeout = self
                .state
                .next_step_at
                .map(|at| at.saturating_duration_since(Instant::now()).min(IDLE_POLL))
                .unwrap_or(IDLE_POLL);

            if event::poll(timeout)? {
                if let Event::Key(key_event) = event::read()? {
                    if key_event.kind == KeyEventKind::Press
                        && self.handle_key_event(key_event, Instant::now())
                    {
                        break;
                    }
                }
            }
        }

        info!("Leaving main application loop");
        Ok(())
    }

    /// Handle a key press. Returns true when the user asked to quit.
    pub fn handle_key_event(&mut self, key_event: KeyEvent, now: Instant) -> bool {
        let mode = self.state.mode();
        match self
            .keybinding_context
            .lookup(&mode, key_event.code, key_event.modifiers)
        {
            Some(action) => self.perform(action, now),
            None => false,
        }
    }

    /// Carry out a key action. Returns true when the user asked to quit.
    pub fn perform(&mut self, action: KeyAction, now: Instant) -> bool {
        debug!(?action, "Key action");

        if self.state.help_visible {
            match action {
                KeyAction::Quit => return true,
                KeyAction::Help | KeyAction::Dismiss => self.state.help_visible = false,
                _ => {}
            }
            return false;
        }

        match action {
            KeyAction::TurnLeft => self.dispatch(Command::Append(Instruction::TurnLeft), now),
            KeyAction::TurnRight => self.dispatch(Command::Append(Instruction::TurnRight), now),
            KeyAction::Forward => self.dispatch(Command::Append(Instruction::Advance), now),
            KeyAction::LoopStart => self.dispatch(Command::Append(Instruction::LoopStart), now),
            KeyAction::LoopEnd => self.dispatch(Command::Append(Instruction::LoopEnd), now),
            KeyAction::ClearProgram => self.dispatch(Command::ClearProgram, now),
            KeyAction::Run => {
                self.dispatch(Command::Run, now);
                if self.state.session.is_running() {
                    // First token is due immediately
                    self.state.next_step_at = Some(now);
                }
            }
            KeyAction::ToggleConfig => {
                let was_configuring = self.state.session.config_mode();
                self.dispatch(Command::ToggleConfigMode, now);
                if self.state.session.config_mode() != was_configuring {
                    self.state.cursor = self.state.session.agent().position;
                }
            }
            KeyAction::ToggleCell => self.dispatch(Command::ToggleCell(self.state.cursor), now),
            KeyAction::CursorUp => self.move_cursor(-1, 0),
            KeyAction::CursorDown => self.move_cursor(1, 0),
            KeyAction::CursorLeft => self.move_cursor(0, -1),
            KeyAction::CursorRight => self.move_cursor(0, 1),
            KeyAction::ResetBoard => self.reset_board(now),
            KeyAction::RandomTrack => self.random_track(now),
            KeyAction::SaveTrack => self.save_track(),
            KeyAction::Help => self.state.help_visible = true,
            KeyAction::Dismiss => {}
            KeyAction::Quit => return true,
        }
        false
    }

    /// Take the next step of the active run once its pause has elapsed
    pub fn advance_run(&mut self, now: Instant) {
        if !self.state.session.is_running() {
            self.state.next_step_at = None;
            return;
        }
        if self.state.next_step_at.is_some_and(|at| now < at) {
            return;
        }

        let effects = self.state.session.tick();
        self.apply_effects(effects, now);

        if !self.state.session.is_running() {
            self.state.next_step_at = None;
        }
    }

    fn dispatch(&mut self, command: Command, now: Instant) {
        let effects = self.state.session.dispatch(command);
        self.apply_effects(effects, now);
    }

    /// Every frame redraws everything, so render requests need no extra work
    fn apply_effects(&mut self, effects: Vec<Effect>, now: Instant) {
        for effect in effects {
            match effect {
                Effect::Render | Effect::RenderProgram => {}
                Effect::Notify(notice) => self.state.notice = Some(notice),
                Effect::ClearNotice => self.state.notice = None,
                Effect::Suspend(delay) => self.state.next_step_at = Some(now + delay),
            }
        }
    }

    fn move_cursor(&mut self, d_row: isize, d_col: isize) {
        let cursor = self.state.cursor;
        let row = cursor.row.saturating_add_signed(d_row).min(ROWS - 1);
        let col = cursor.col.saturating_add_signed(d_col).min(COLS - 1);
        self.state.cursor = Position::new(row, col);
    }

    /// Reload the saved custom track, or a random preset when there is none
    fn reset_board(&mut self, now: Instant) {
        if self.state.session.is_running() {
            return;
        }
        let custom = FileSource::new(&self.custom_track);
        let loaded = track_source::load_custom_or_preset(Some(&custom));
        let notice = loaded
            .notice
            .unwrap_or_else(|| Notice::success("Board reset."));
        self.dispatch(
            Command::ReplaceTrack {
                track: loaded.track,
                notice: Some(notice),
            },
            now,
        );
    }

    fn random_track(&mut self, now: Instant) {
        if self.state.session.is_running() {
            return;
        }
        match PresetSource::random().load() {
            Ok(track) => self.dispatch(
                Command::ReplaceTrack {
                    track,
                    notice: Some(Notice::success("Random track loaded.")),
                },
                now,
            ),
            Err(err) => {
                warn!(error = %format!("{err:#}"), "Random preset failed");
                self.state.notice = Some(Notice::failure("Could not load a random track."));
            }
        }
    }

    /// Save the edited track as the custom track used by startup and reset
    fn save_track(&mut self) {
        if self.state.session.is_running() {
            return;
        }
        let file = TrackFile::new("custom", *self.state.session.track());
        self.state.notice = Some(match file.save_to_file(&self.custom_track) {
            Ok(()) => {
                info!(path = ?self.custom_track, "Saved custom track");
                Notice::success(format!("Track saved to {}.", self.custom_track.display()))
            }
            Err(err) => {
                warn!(error = %format!("{err:#}"), "Saving custom track failed");
                Notice::failure(format!("Could not save track: {err}"))
            }
        });
    }
}
