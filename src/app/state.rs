//! Application state definitions
//!
//! Contains the state the terminal front end keeps around the core session:
//! the status line, the track editing cursor and the playback deadline.

use std::time::Instant;

use crate::session::{Notice, Session};
use crate::types::Position;

/// Application operating modes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AppMode {
    /// Building and running programs
    Programming,
    /// Painting the track cell by cell
    Configuring,
}

/// Main application state
#[derive(Debug, Clone)]
pub struct AppState {
    /// Track, program, agent and engine
    pub session: Session,
    /// Status message for user feedback
    pub notice: Option<Notice>,
    /// Cell under the editing cursor
    pub cursor: Position,
    /// Whether help overlay is visible
    pub help_visible: bool,
    /// When the active run may take its next step
    pub next_step_at: Option<Instant>,
}

impl AppState {
    pub fn new(session: Session) -> Self {
        Self {
            session,
            notice: None,
            cursor: Position::default(),
            help_visible: false,
            next_step_at: None,
        }
    }

    /// Mode derived from the session's configuration flag
    pub fn mode(&self) -> AppMode {
        if self.session.config_mode() {
            AppMode::Configuring
        } else {
            AppMode::Programming
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Session::default())
    }
}
