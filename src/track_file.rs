//! Track files for saving, exporting and importing tracks.
//!
//! A track file is a small JSON document carrying the name, the declared grid
//! dimensions and the boolean mask as row-major nested arrays:
//!
//! ```json
//! { "name": "L-shape", "width": 5, "height": 4, "cells": [[true, ...], ...] }
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::TrackbotError;
use crate::track::{COLS, ROWS, Track};

/// Track interchange document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackFile {
    pub name: String,
    pub width: usize,
    pub height: usize,
    pub cells: Track,
}

impl TrackFile {
    pub fn new(name: impl Into<String>, track: Track) -> Self {
        Self {
            name: name.into(),
            width: COLS,
            height: ROWS,
            cells: track,
        }
    }

    pub fn track(&self) -> Track {
        self.cells
    }

    /// Save the track to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json =
            serde_json::to_string_pretty(self).context("Failed to serialize track to JSON")?;

        fs::write(&path, json)
            .with_context(|| format!("Failed to write track to {:?}", path.as_ref()))?;

        Ok(())
    }

    /// Load and validate a track from a JSON file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read track from {:?}", path.as_ref()))?;

        let file: Self = serde_json::from_str(&content).context("Failed to parse track JSON")?;
        file.validate()?;

        Ok(file)
    }

    /// Validate the declared metadata against the fixed grid
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            anyhow::bail!(TrackbotError::track("track name must be specified"));
        }
        if self.width != COLS || self.height != ROWS {
            anyhow::bail!(TrackbotError::track(format!(
                "track is {}x{} but the grid is {}x{}",
                self.width, self.height, COLS, ROWS
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::track;

    #[test]
    fn test_new_declares_grid_dimensions() {
        let file = TrackFile::new("demo", Track::empty());
        assert_eq!(file.width, 5);
        assert_eq!(file.height, 4);
        assert!(file.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_blank_name() {
        let file = TrackFile::new("  ", Track::empty());
        assert!(file.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_wrong_dimensions() {
        let mut file = TrackFile::new("demo", Track::empty());
        file.width = 8;
        let err = file.validate().unwrap_err();
        assert!(matches!(
            err.downcast_ref::<TrackbotError>(),
            Some(TrackbotError::Track(_))
        ));
        assert!(err.to_string().contains("8x4"));
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("track.json");

        let file = TrackFile::new("staircase", track::preset(2).unwrap());
        file.save_to_file(&path).unwrap();

        let loaded = TrackFile::load_from_file(&path).unwrap();
        assert_eq!(loaded, file);
    }

    #[test]
    fn test_load_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = TrackFile::load_from_file(dir.path().join("nope.json")).unwrap_err();
        assert!(err.to_string().contains("Failed to read track"));
    }

    #[test]
    fn test_load_rejects_ragged_cells() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(
            &path,
            r#"{"name":"bad","width":5,"height":4,"cells":[[true],[false],[false],[false]]}"#,
        )
        .unwrap();
        assert!(TrackFile::load_from_file(&path).is_err());
    }
}
