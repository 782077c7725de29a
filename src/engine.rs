//! Execution engine
//!
//! Consumes the expanded instruction sequence one token at a time, mutating the
//! agent and validating every advance against the track.
//!
//! # State Flow
//!
//! ```text
//! Idle ──start──▶ Running ──step…──▶ Completed
//!                    │
//!                    └──off track──▶ Failed
//!
//! (Completed and Failed accept a new start exactly like Idle)
//! ```
//!
//! The engine never sleeps itself. Each successful step reports how long the
//! caller should suspend before asking for the next one, so the terminal UI can
//! keep drawing while a headless driver simply blocks on a [`Clock`].

use std::fmt;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};

use crate::program::Program;
use crate::track::Track;
use crate::types::{Agent, Heading, Instruction, Position};

/// Engine lifecycle states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RunState {
    #[default]
    Idle,
    Running,
    Failed,
    Completed,
}

impl RunState {
    /// Returns true for the states a finished run lands in
    #[inline]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }

    /// Whether a new run request may be accepted from this state
    #[inline]
    pub const fn accepts_run(self) -> bool {
        !matches!(self, Self::Running)
    }

    pub const fn description(self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::Running => "Running",
            Self::Failed => "Failed",
            Self::Completed => "Completed",
        }
    }
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// Reasons a run request is refused
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunError {
    #[error("a run is already in progress")]
    AlreadyRunning,

    #[error("the program is empty")]
    EmptyProgram,

    #[error("configuration mode is active")]
    ConfigMode,

    #[error("the robot is not on the track at {position}")]
    NotOnTrack { position: Position },
}

impl RunError {
    /// Guard rejections are dropped without telling the user
    pub const fn is_silent(self) -> bool {
        !matches!(self, Self::NotOnTrack { .. })
    }
}

/// A step that ended the run
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepError {
    #[error("the robot left the track at step {index}: {from} facing {heading}")]
    OffTrack {
        index: usize,
        from: Position,
        heading: Heading,
    },
}

/// How long playback pauses after each kind of step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timing {
    pub turn: Duration,
    pub step: Duration,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            turn: Duration::from_millis(440),
            step: Duration::from_millis(600),
        }
    }
}

impl Timing {
    /// No pauses at all, for tests and batch runs
    pub const fn zero() -> Self {
        Self {
            turn: Duration::ZERO,
            step: Duration::ZERO,
        }
    }

    pub fn from_millis(turn_ms: u64, step_ms: u64) -> Self {
        Self {
            turn: Duration::from_millis(turn_ms),
            step: Duration::from_millis(step_ms),
        }
    }

    /// Pause that follows `instruction`
    pub const fn delay_for(&self, instruction: Instruction) -> Duration {
        match instruction {
            Instruction::Advance => self.step,
            _ => self.turn,
        }
    }
}

/// Something that can suspend the caller between steps
pub trait Clock {
    fn sleep(&mut self, duration: Duration);
}

/// Blocks the current thread
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadClock;

impl Clock for ThreadClock {
    fn sleep(&mut self, duration: Duration) {
        if !duration.is_zero() {
            std::thread::sleep(duration);
        }
    }
}

/// Result of asking the engine for one step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// A token was applied; suspend for `delay` before the next step
    Stepped {
        index: usize,
        instruction: Instruction,
        agent: Agent,
        delay: Duration,
    },
    /// The sequence is exhausted without failure
    Completed { steps: usize },
    /// An advance left the track; remaining tokens were not processed
    Failed(StepError),
    /// No run is active
    Idle,
}

/// An active run over one expanded sequence
#[derive(Debug, Clone)]
struct Run {
    sequence: Vec<Instruction>,
    cursor: usize,
}

/// The run state machine
#[derive(Debug, Clone, Default)]
pub struct Engine {
    state: RunState,
    run: Option<Run>,
    timing: Timing,
}

impl Engine {
    pub fn new(timing: Timing) -> Self {
        Self {
            state: RunState::Idle,
            run: None,
            timing,
        }
    }

    #[inline]
    pub fn state(&self) -> RunState {
        self.state
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.state == RunState::Running
    }

    /// Remaining tokens of the active run, if any
    pub fn remaining(&self) -> usize {
        self.run
            .as_ref()
            .map_or(0, |run| run.sequence.len() - run.cursor)
    }

    /// Validate the entry guard and begin a run over the expanded program.
    ///
    /// Returns the length of the expanded sequence.
    ///
    /// # Errors
    ///
    /// - `AlreadyRunning`, `EmptyProgram`, `ConfigMode`: silent guard rejections
    /// - `NotOnTrack` if the agent's cell is not traversable
    pub fn start(
        &mut self,
        program: &Program,
        track: &Track,
        agent: &Agent,
        config_mode: bool,
    ) -> Result<usize, RunError> {
        if !self.state.accepts_run() {
            return Err(RunError::AlreadyRunning);
        }
        if program.is_empty() {
            return Err(RunError::EmptyProgram);
        }
        if config_mode {
            return Err(RunError::ConfigMode);
        }
        if !track.is_traversable(agent.position) {
            return Err(RunError::NotOnTrack {
                position: agent.position,
            });
        }

        let sequence = program.expand();
        let len = sequence.len();
        info!(
            program = %program,
            expanded = len,
            start = %agent.position,
            "Run started"
        );

        self.run = Some(Run {
            sequence,
            cursor: 0,
        });
        self.state = RunState::Running;
        Ok(len)
    }

    /// Apply the next token of the active run to `agent`.
    pub fn step(&mut self, track: &Track, agent: &mut Agent) -> StepOutcome {
        let Some(run) = self.run.as_mut() else {
            return StepOutcome::Idle;
        };

        let Some(&instruction) = run.sequence.get(run.cursor) else {
            let steps = run.cursor;
            self.finish(RunState::Completed);
            info!(steps, end = %agent.position, "Run completed");
            return StepOutcome::Completed { steps };
        };
        let index = run.cursor;
        run.cursor += 1;

        match instruction {
            Instruction::TurnLeft => agent.heading = agent.heading.turn_left(),
            Instruction::TurnRight => agent.heading = agent.heading.turn_right(),
            Instruction::Advance => {
                match agent.position.step(agent.heading) {
                    Some(next) if track.is_traversable(next) => agent.position = next,
                    _ => {
                        let err = StepError::OffTrack {
                            index,
                            from: agent.position,
                            heading: agent.heading,
                        };
                        self.finish(RunState::Failed);
                        info!(%err, "Run failed");
                        return StepOutcome::Failed(err);
                    }
                }
            }
            // Expansion strips loop markers
            Instruction::LoopStart | Instruction::LoopEnd => {}
        }

        debug!(
            index,
            %instruction,
            position = %agent.position,
            heading = %agent.heading,
            "Step"
        );

        StepOutcome::Stepped {
            index,
            instruction,
            agent: *agent,
            delay: self.timing.delay_for(instruction),
        }
    }

    /// Release the run and land in a terminal state
    fn finish(&mut self, state: RunState) {
        self.run = None;
        self.state = state;
    }
}
