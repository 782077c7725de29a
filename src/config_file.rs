//! Simulator configuration file.
//!
//! Every field has a default, so an empty JSON object is a valid config and a
//! missing file simply means "use the defaults".

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::engine::Timing;
use crate::error::TrackbotError;

/// Longest pause accepted for a single step
const MAX_DELAY_MS: u64 = 10_000;

/// Default location of the saved custom track
pub const DEFAULT_CUSTOM_TRACK: &str = "trackbot-track.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulatorConfig {
    /// Pause after a turn: the 400 ms turn animation plus 40 ms to settle
    pub turn_delay_ms: u64,
    /// Pause after an advance
    pub step_delay_ms: u64,
    /// Where the custom track is saved and looked up at startup
    pub custom_track: PathBuf,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            turn_delay_ms: 440,
            step_delay_ms: 600,
            custom_track: PathBuf::from(DEFAULT_CUSTOM_TRACK),
        }
    }
}

impl SimulatorConfig {
    /// Save configuration to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .context("Failed to serialize configuration to JSON")?;

        fs::write(&path, json)
            .with_context(|| format!("Failed to write configuration to {:?}", path.as_ref()))?;

        Ok(())
    }

    /// Load configuration from a JSON file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read configuration from {:?}", path.as_ref()))?;

        let config: Self =
            serde_json::from_str(&content).context("Failed to parse configuration JSON")?;
        config.validate()?;

        Ok(config)
    }

    /// Load `path` if given, defaults otherwise
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.turn_delay_ms > MAX_DELAY_MS {
            anyhow::bail!(TrackbotError::config(format!(
                "turn_delay_ms must be at most {} ms",
                MAX_DELAY_MS
            )));
        }
        if self.step_delay_ms > MAX_DELAY_MS {
            anyhow::bail!(TrackbotError::config(format!(
                "step_delay_ms must be at most {} ms",
                MAX_DELAY_MS
            )));
        }
        if self.custom_track.as_os_str().is_empty() {
            anyhow::bail!(TrackbotError::config("custom_track must not be empty"));
        }
        Ok(())
    }

    pub fn timing(&self) -> Timing {
        Timing::from_millis(self.turn_delay_ms, self.step_delay_ms)
    }
}
