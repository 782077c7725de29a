//! Tests for the session dispatcher and its file collaborators
//!
//! These tests verify:
//! - Track edits recompute the start and reset the heading
//! - Replacing a track clears the program
//! - Track files and config files survive a save/load cycle on disk
//! - Broken custom tracks fall back to the presets

use tempfile::TempDir;

use trackbot::engine::Timing;
use trackbot::session::Effect;
use trackbot::track::{self, COLS, ROWS};
use trackbot::track_source::{self, FileSource, PresetSource};
use trackbot::{
    Command, Heading, Instruction, Notice, Position, Session, SimulatorConfig, Track, TrackFile,
};

// =============================================================================
// Dispatcher
// =============================================================================

#[test]
fn test_toggle_recomputes_start_and_heading() {
    let mut session = Session::new(track::preset(1).unwrap(), Timing::zero());
    // Preset 1 starts at the top-left corner
    assert_eq!(session.agent().position, Position::new(0, 0));

    session.dispatch(Command::ToggleConfigMode);
    let effects = session.dispatch(Command::ToggleCell(Position::new(0, 0)));
    assert_eq!(effects, vec![Effect::Render]);
    assert_eq!(session.agent().position, Position::new(0, 1));
    assert_eq!(session.agent().heading, Heading::East);

    // Painting an earlier cell moves the start back
    session.dispatch(Command::ToggleCell(Position::new(0, 0)));
    assert_eq!(session.agent().position, Position::new(0, 0));
}

#[test]
fn test_config_mode_round_trip_keeps_program() {
    let mut session = Session::new(track::preset(0).unwrap(), Timing::zero());
    session.dispatch(Command::Append(Instruction::Advance));
    session.dispatch(Command::ToggleConfigMode);
    session.dispatch(Command::ToggleConfigMode);
    assert!(!session.config_mode());
    assert_eq!(session.program().len(), 1);
}

#[test]
fn test_program_edits_are_allowed_in_config_mode() {
    let mut session = Session::default();
    session.dispatch(Command::ToggleConfigMode);
    assert_eq!(
        session.dispatch(Command::Append(Instruction::LoopStart)),
        vec![Effect::RenderProgram]
    );
}

#[test]
fn test_replace_track_without_notice() {
    let mut session = Session::new(track::preset(0).unwrap(), Timing::zero());
    session.dispatch(Command::Append(Instruction::TurnLeft));

    let effects = session.dispatch(Command::ReplaceTrack {
        track: track::preset(2).unwrap(),
        notice: None,
    });

    assert_eq!(effects, vec![Effect::Render, Effect::RenderProgram]);
    assert!(session.program().is_empty());
    assert_eq!(*session.track(), track::preset(2).unwrap());
}

// =============================================================================
// Track files
// =============================================================================

#[test]
fn test_track_file_is_row_major_json() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("single.json");
    TrackFile::new("single", Track::from_coords(&[(1, 2)]))
        .save_to_file(&path)
        .unwrap();

    let value: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(value["cells"].as_array().unwrap().len(), ROWS);
    assert_eq!(value["cells"][1][2], serde_json::Value::Bool(true));
    assert_eq!(value["cells"][2][1], serde_json::Value::Bool(false));
}

#[test]
fn test_wrong_dimensions_are_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("wide.json");
    let mut file = TrackFile::new("wide", Track::empty());
    file.width = COLS + 1;
    file.save_to_file(&path).unwrap();

    assert!(TrackFile::load_from_file(&path).is_err());
}

// =============================================================================
// Track sources
// =============================================================================

#[test]
fn test_broken_custom_track_falls_back_with_notice() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.json");
    std::fs::write(&path, "[[true]]").unwrap();

    let mut primary = FileSource::new(&path);
    let mut fallback = PresetSource::fixed(1);
    let loaded = track_source::with_fallback(&mut primary, &mut fallback);

    assert_eq!(loaded.track, track::preset(1).unwrap());
    let notice: Notice = loaded.notice.unwrap();
    assert!(!notice.success);
    assert!(notice.text.contains("preset 1"));
}

// =============================================================================
// Configuration
// =============================================================================

#[test]
fn test_config_file_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("trackbot.json");
    let config = SimulatorConfig {
        turn_delay_ms: 10,
        step_delay_ms: 20,
        custom_track: dir.path().join("mine.json"),
    };
    config.save_to_file(&path).unwrap();

    let loaded = SimulatorConfig::load_or_default(Some(path.as_path())).unwrap();
    assert_eq!(loaded, config);
    assert_eq!(loaded.timing(), Timing::from_millis(10, 20));
}

#[test]
fn test_partial_config_uses_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("partial.json");
    std::fs::write(&path, r#"{ "step_delay_ms": 50 }"#).unwrap();

    let loaded = SimulatorConfig::load_from_file(&path).unwrap();
    assert_eq!(loaded.step_delay_ms, 50);
    assert_eq!(loaded.turn_delay_ms, SimulatorConfig::default().turn_delay_ms);
}
