use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// trackbot - program a robot to drive along a grid track
#[derive(Parser)]
#[command(name = "trackbot")]
#[command(about = "Program a robot to follow a track on a 4x5 grid")]
#[command(version)]
pub struct Cli {
    /// Simulator configuration file (JSON)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Write logs to this file (the TUI logs nowhere otherwise)
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Launch the interactive terminal UI (default)
    Tui,
    /// Run a program headlessly and print every step
    Run {
        /// Program text, e.g. "F F [ R F ] L"
        #[arg(short, long)]
        program: String,

        /// Track file to run on
        #[arg(short, long, conflicts_with = "preset")]
        track: Option<PathBuf>,

        /// Built-in preset to run on (0-2); random when neither is given
        #[arg(long)]
        preset: Option<usize>,

        /// Pause after a turn, overriding the config file
        #[arg(long)]
        turn_ms: Option<u64>,

        /// Pause after an advance, overriding the config file
        #[arg(long)]
        step_ms: Option<u64>,
    },
    /// Print the expanded instruction sequence of a program
    Expand {
        /// Program text
        program: String,
    },
    /// Validate a track file
    Validate {
        /// Path to the track file
        track: PathBuf,
    },
    /// Write a built-in preset as a track file
    Export {
        /// Preset index (0-2)
        #[arg(long)]
        preset: usize,

        /// Track name stored in the file
        #[arg(long)]
        name: String,

        /// Output path
        out: PathBuf,
    },
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_subcommand_means_tui() {
        let cli = Cli::try_parse_from(["trackbot"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_run_arguments() {
        let cli = Cli::try_parse_from([
            "trackbot", "run", "--program", "F F R", "--preset", "1", "--step-ms", "0",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Run {
                program,
                preset,
                step_ms,
                track,
                ..
            }) => {
                assert_eq!(program, "F F R");
                assert_eq!(preset, Some(1));
                assert_eq!(step_ms, Some(0));
                assert!(track.is_none());
            }
            _ => panic!("expected run"),
        }
    }

    #[test]
    fn test_track_conflicts_with_preset() {
        let result = Cli::try_parse_from([
            "trackbot", "run", "-p", "F", "--track", "t.json", "--preset", "0",
        ]);
        assert!(result.is_err());
    }
}
