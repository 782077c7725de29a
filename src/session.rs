//! Editing session and command dispatcher
//!
//! `Session` owns everything a user works with: the track, the program, the
//! agent and the engine. Every user action is a [`Command`]; dispatching one
//! mutates the session and returns the side effects the front end must carry
//! out, so the whole state machine is testable without a terminal.
//!
//! The single `running` gate (the engine being in `Running`) blocks program
//! edits, track edits, track replacement and configuration mode toggles alike.

use std::time::Duration;
use tracing::{debug, info};

use crate::engine::{Clock, Engine, RunError, RunState, StepOutcome, Timing};
use crate::program::Program;
use crate::track::Track;
use crate::types::{Agent, Instruction, Position};

pub const MSG_SUCCESS: &str = "Mission accomplished!";
pub const MSG_OFF_TRACK: &str = "Try again: the robot left the track.";
pub const MSG_NOT_ON_TRACK: &str = "Try again: the robot is not on the track.";

/// User-visible status line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub text: String,
    pub success: bool,
}

impl Notice {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            success: true,
        }
    }

    pub fn failure(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            success: false,
        }
    }
}

/// Side effects requested by the session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Redraw the track and the agent
    Render,
    /// Redraw the program listing
    RenderProgram,
    /// Show a status message
    Notify(Notice),
    /// Hide the status message
    ClearNotice,
    /// Wait this long before the next `tick`
    Suspend(Duration),
}

/// User actions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Append(Instruction),
    ClearProgram,
    Run,
    ToggleConfigMode,
    ToggleCell(Position),
    /// Swap in a new track, clearing the program. The notice is shown afterwards.
    ReplaceTrack { track: Track, notice: Option<Notice> },
}

/// Receives the render and notify effects
pub trait Presenter {
    fn render(&mut self, track: &Track, agent: &Agent);
    fn render_program(&mut self, _program: &Program) {}
    fn notify(&mut self, notice: &Notice);
    fn clear_notice(&mut self) {}
}

#[derive(Debug, Clone)]
pub struct Session {
    track: Track,
    program: Program,
    agent: Agent,
    config_mode: bool,
    engine: Engine,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(Track::empty(), Timing::default())
    }
}

impl Session {
    /// A session on `track` with the agent parked on its start cell
    pub fn new(track: Track, timing: Timing) -> Self {
        Self {
            agent: Agent::at(track.derive_start()),
            track,
            program: Program::new(),
            config_mode: false,
            engine: Engine::new(timing),
        }
    }

    #[inline]
    pub fn track(&self) -> &Track {
        &self.track
    }

    #[inline]
    pub fn program(&self) -> &Program {
        &self.program
    }

    #[inline]
    pub fn agent(&self) -> &Agent {
        &self.agent
    }

    #[inline]
    pub fn config_mode(&self) -> bool {
        self.config_mode
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.engine.is_running()
    }

    #[inline]
    pub fn run_state(&self) -> RunState {
        self.engine.state()
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    /// Apply one user action
    pub fn dispatch(&mut self, command: Command) -> Vec<Effect> {
        match command {
            Command::Append(instruction) => {
                if self.is_running() {
                    return Vec::new();
                }
                self.program.append(instruction);
                vec![Effect::RenderProgram]
            }
            Command::ClearProgram => {
                if self.is_running() {
                    return Vec::new();
                }
                self.program.clear();
                vec![Effect::RenderProgram]
            }
            Command::Run => match self.start_run() {
                Ok(effects) => effects,
                Err(err) if err.is_silent() => {
                    debug!(%err, "Run request ignored");
                    Vec::new()
                }
                Err(_) => vec![Effect::Notify(Notice::failure(MSG_NOT_ON_TRACK))],
            },
            Command::ToggleConfigMode => {
                if self.is_running() {
                    return Vec::new();
                }
                self.config_mode = !self.config_mode;
                info!(config_mode = self.config_mode, "Configuration mode toggled");
                vec![Effect::Render]
            }
            Command::ToggleCell(pos) => {
                if !self.config_mode || self.is_running() {
                    return Vec::new();
                }
                if self.track.toggle(pos).is_none() {
                    return Vec::new();
                }
                self.reset_agent();
                vec![Effect::Render]
            }
            Command::ReplaceTrack { track, notice } => {
                if self.is_running() {
                    return Vec::new();
                }
                self.track = track;
                self.reset_agent();
                self.program.clear();
                info!(start = %self.agent.position, cells = track.traversable_count(), "Track replaced");
                let mut effects = vec![Effect::Render, Effect::RenderProgram];
                effects.extend(notice.map(Effect::Notify));
                effects
            }
        }
    }

    /// Start a run, reporting the guard outcome to the caller.
    ///
    /// # Errors
    ///
    /// See [`Engine::start`]
    pub fn start_run(&mut self) -> Result<Vec<Effect>, RunError> {
        self.engine
            .start(&self.program, &self.track, &self.agent, self.config_mode)?;
        // The track is repainted on entry in case the display went stale
        Ok(vec![Effect::ClearNotice, Effect::Render])
    }

    /// Advance the active run by one token. Empty when no run is active.
    pub fn tick(&mut self) -> Vec<Effect> {
        match self.engine.step(&self.track, &mut self.agent) {
            StepOutcome::Stepped { delay, .. } => vec![Effect::Render, Effect::Suspend(delay)],
            StepOutcome::Completed { .. } => vec![Effect::Notify(Notice::success(MSG_SUCCESS))],
            StepOutcome::Failed(_) => vec![Effect::Notify(Notice::failure(MSG_OFF_TRACK))],
            StepOutcome::Idle => Vec::new(),
        }
    }

    /// Start a run and block until it ends, suspending on `clock`.
    ///
    /// Returns the terminal state of the run.
    ///
    /// # Errors
    ///
    /// The entry guard rejection. `NotOnTrack` is also reported to `presenter`.
    pub fn play<C, P>(&mut self, clock: &mut C, presenter: &mut P) -> Result<RunState, RunError>
    where
        C: Clock + ?Sized,
        P: Presenter + ?Sized,
    {
        let effects = match self.start_run() {
            Ok(effects) => effects,
            Err(err) => {
                if !err.is_silent() {
                    presenter.notify(&Notice::failure(MSG_NOT_ON_TRACK));
                }
                return Err(err);
            }
        };
        self.apply(effects, clock, presenter);

        while self.is_running() {
            let effects = self.tick();
            self.apply(effects, clock, presenter);
        }
        Ok(self.run_state())
    }

    /// Carry out effects against a presenter, sleeping on `clock` for suspends
    pub fn apply<C, P>(&self, effects: Vec<Effect>, clock: &mut C, presenter: &mut P)
    where
        C: Clock + ?Sized,
        P: Presenter + ?Sized,
    {
        for effect in effects {
            match effect {
                Effect::Render => presenter.render(&self.track, &self.agent),
                Effect::RenderProgram => presenter.render_program(&self.program),
                Effect::Notify(notice) => presenter.notify(&notice),
                Effect::ClearNotice => presenter.clear_notice(),
                Effect::Suspend(duration) => clock.sleep(duration),
            }
        }
    }

    /// Park the agent on the derived start, facing the initial heading
    fn reset_agent(&mut self) {
        self.agent = Agent::at(self.track.derive_start());
    }
}
