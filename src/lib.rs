//! trackbot library
//!
//! Core of a small robot simulator: a 4x5 track, a program of turn and
//! advance instructions with a single-level loop, and an engine that plays the
//! expanded program step by step with timed pauses.

pub mod app;
pub mod cli;
pub mod components;
pub mod config_file;
pub mod engine;
pub mod error;
pub mod logging;
pub mod program;
pub mod session;
pub mod theme;
pub mod track;
pub mod track_file;
pub mod track_source;
pub mod types;
pub mod ui;

// Re-export main types for convenience
pub use config_file::SimulatorConfig;
pub use engine::{Clock, Engine, RunError, RunState, StepError, StepOutcome, ThreadClock, Timing};
pub use error::TrackbotError;
pub use program::{Program, ProgramParseError, expand};
pub use session::{Command, Effect, Notice, Presenter, Session};
pub use track::{COLS, ROWS, Track};
pub use track_file::TrackFile;
pub use types::{Agent, Heading, Instruction, Position};
