//! Error handling module for trackbot
//!
//! Provides centralized error handling with proper error types using thiserror.
//! Domain errors (`RunError`, `StepError`, `ProgramParseError`) live next to the
//! code that raises them and convert into `TrackbotError` at the edges.

use thiserror::Error;

use crate::engine::{RunError, StepError};
use crate::program::ProgramParseError;

/// Main error type for trackbot
#[derive(Error, Debug)]
pub enum TrackbotError {
    /// IO errors (file operations, terminal, etc.)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration errors (loading, parsing, validation)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Track errors (bad dimensions, unknown preset, invalid track file)
    #[error("Track error: {0}")]
    Track(String),

    /// Program text could not be parsed
    #[error("Program error: {0}")]
    Program(#[from] ProgramParseError),

    /// A run could not start or ended off the track
    #[error("Run error: {0}")]
    Run(String),

    /// Terminal/UI errors
    #[error("Terminal error: {0}")]
    Terminal(String),
}

impl TrackbotError {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a track error
    pub fn track(msg: impl Into<String>) -> Self {
        Self::Track(msg.into())
    }

    /// Create a terminal error
    pub fn terminal(msg: impl Into<String>) -> Self {
        Self::Terminal(msg.into())
    }
}

impl From<RunError> for TrackbotError {
    fn from(err: RunError) -> Self {
        TrackbotError::Run(err.to_string())
    }
}

impl From<StepError> for TrackbotError {
    fn from(err: StepError) -> Self {
        TrackbotError::Run(err.to_string())
    }
}
