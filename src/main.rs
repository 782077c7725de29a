//! trackbot - Main entry point

use anyhow::{Context, Result};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::stdout;
use tracing::{debug, error, info};

use trackbot::app::App;
use trackbot::cli::{Cli, Commands};
use trackbot::logging::{self, LogTarget};
use trackbot::track_source::{PresetSource, TrackSource};
use trackbot::{
    Agent, Command, Notice, Presenter, Program, RunState, Session, SimulatorConfig, ThreadClock, Timing,
    Track, TrackFile, TrackbotError, track,
};

/// Main application entry point
fn main() -> Result<()> {
    let cli = Cli::parse_args();

    let target = match (&cli.log_file, &cli.command) {
        (Some(path), _) => LogTarget::File(path),
        (None, None | Some(Commands::Tui)) => LogTarget::Disabled,
        (None, Some(_)) => LogTarget::Stderr,
    };
    logging::init(target)?;
    info!("trackbot starting up");

    let config = SimulatorConfig::load_or_default(cli.config.as_deref())?;
    debug!(?config, "Configuration loaded");

    match cli.command {
        None | Some(Commands::Tui) => run_tui(&config)?,
        Some(Commands::Run {
            program,
            track,
            preset,
            turn_ms,
            step_ms,
        }) => {
            let timing = Timing::from_millis(
                turn_ms.unwrap_or(config.turn_delay_ms),
                step_ms.unwrap_or(config.step_delay_ms),
            );
            let track = match (track, preset) {
                (Some(path), _) => TrackFile::load_from_file(&path)?.track(),
                (None, Some(index)) => PresetSource::fixed(index).load()?,
                (None, None) => PresetSource::random().load()?,
            };
            if run_headless(&program, track, timing)? != RunState::Completed {
                std::process::exit(1);
            }
        }
        Some(Commands::Expand { program }) => {
            let program: Program = program.parse()?;
            let expanded = Program::from(program.expand());
            println!("{}", expanded);
        }
        Some(Commands::Validate { track }) => match TrackFile::load_from_file(&track) {
            Ok(file) => {
                println!(
                    "✓ Track file is valid: {} ({} traversable cells, start {})",
                    file.name,
                    file.track().traversable_count(),
                    file.track().derive_start()
                );
            }
            Err(e) => {
                error!("Track validation failed: {:#}", e);
                eprintln!("✗ Track validation failed: {:#}", e);
                std::process::exit(1);
            }
        },
        Some(Commands::Export { preset, name, out }) => {
            let track = track::preset(preset)
                .ok_or_else(|| TrackbotError::track(format!("Unknown preset {}", preset)))?;
            TrackFile::new(name, track).save_to_file(&out)?;
            println!("✓ Preset {} written to {}", preset, out.display());
        }
    }

    Ok(())
}

/// Prints every rendered step and notice to stdout
struct ConsolePresenter {
    steps: usize,
}

impl Presenter for ConsolePresenter {
    fn render(&mut self, _track: &Track, agent: &Agent) {
        println!(
            "{:>3}  {} {} facing {}",
            self.steps,
            agent.heading.arrow(),
            agent.position,
            agent.heading
        );
        self.steps += 1;
    }

    fn notify(&mut self, notice: &Notice) {
        let mark = if notice.success { '✓' } else { '✗' };
        println!("{} {}", mark, notice.text);
    }
}

/// Play a program on `track` in the foreground, returning the final run state
fn run_headless(program: &str, track: Track, timing: Timing) -> Result<RunState> {
    let program: Program = program.parse()?;
    let mut session = Session::new(track, timing);
    for &instruction in program.instructions() {
        session.dispatch(Command::Append(instruction));
    }
    info!(program = %program, start = %session.agent().position, "Running headless");

    let mut presenter = ConsolePresenter { steps: 0 };
    match session.play(&mut ThreadClock, &mut presenter) {
        Ok(state) => Ok(state),
        Err(err) if err.is_silent() => {
            eprintln!("✗ {}", err);
            Ok(RunState::Idle)
        }
        // Already reported by the presenter
        Err(_) => Ok(RunState::Idle),
    }
}

/// Run the interactive terminal UI
fn run_tui(config: &SimulatorConfig) -> Result<()> {
    debug!("Initializing terminal for TUI mode");

    enable_raw_mode()
        .map_err(|e| TrackbotError::terminal(format!("Failed to enable raw mode: {}", e)))?;
    crossterm::execute!(stdout(), crossterm::terminal::EnterAlternateScreen)
        .map_err(|e| TrackbotError::terminal(format!("Failed to enter alternate screen: {}", e)))?;

    let result = run_app(config);

    // Cleanup terminal (always attempt cleanup, even if app failed)
    let _ = disable_raw_mode();
    let _ = crossterm::execute!(stdout(), crossterm::terminal::LeaveAlternateScreen);

    result
}

fn run_app(config: &SimulatorConfig) -> Result<()> {
    let backend = CrosstermBackend::new(stdout());
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
    let mut app = App::new(config);
    app.run(&mut terminal)
}
