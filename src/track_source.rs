//! Track sources
//!
//! Tracks come from a locally saved custom track file or from the built-in
//! presets. A source is only consulted at startup and on explicit reset/random
//! requests, never while a run is active.

use anyhow::{Context, Result};
use rand::rngs::ThreadRng;
use std::path::PathBuf;
use tracing::{info, warn};

use crate::session::Notice;
use crate::track::{self, Track};
use crate::track_file::TrackFile;

/// Supplies a track
pub trait TrackSource {
    fn load(&mut self) -> Result<Track>;

    /// Short name for logs and status messages
    fn describe(&self) -> String;
}

/// Built-in presets, fixed or chosen at random
#[derive(Debug, Default)]
pub struct PresetSource {
    index: Option<usize>,
    rng: ThreadRng,
}

impl PresetSource {
    pub fn random() -> Self {
        Self::default()
    }

    pub fn fixed(index: usize) -> Self {
        Self {
            index: Some(index),
            rng: rand::thread_rng(),
        }
    }
}

impl TrackSource for PresetSource {
    fn load(&mut self) -> Result<Track> {
        match self.index {
            Some(index) => track::preset(index).with_context(|| {
                format!(
                    "Unknown preset {} (expected 0..{})",
                    index,
                    track::presets().len()
                )
            }),
            None => Ok(track::random_preset(&mut self.rng)),
        }
    }

    fn describe(&self) -> String {
        match self.index {
            Some(index) => format!("preset {}", index),
            None => "random preset".to_string(),
        }
    }
}

/// A saved track file
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }
}

impl TrackSource for FileSource {
    fn load(&mut self) -> Result<Track> {
        let file = TrackFile::load_from_file(&self.path)?;
        info!(name = %file.name, path = ?self.path, "Loaded track file");
        Ok(file.track())
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// What a load produced, with the message to show the user
#[derive(Debug, Clone)]
pub struct Loaded {
    pub track: Track,
    pub notice: Option<Notice>,
}

/// Load the saved custom track if there is one, else a random preset.
///
/// A broken custom track never fails the caller: the failure is logged and
/// reported, and a preset is used instead.
pub fn load_custom_or_preset(custom: Option<&FileSource>) -> Loaded {
    let mut presets = PresetSource::random();
    match custom.filter(|c| c.exists()) {
        Some(source) => with_fallback(&mut source.clone(), &mut presets),
        None => Loaded {
            // Random presets cannot fail
            track: presets.load().unwrap_or_else(|_| Track::empty()),
            notice: None,
        },
    }
}

/// Try `primary`, falling back to `fallback` on failure
pub fn with_fallback<P, F>(primary: &mut P, fallback: &mut F) -> Loaded
where
    P: TrackSource + ?Sized,
    F: TrackSource + ?Sized,
{
    match primary.load() {
        Ok(track) => Loaded {
            track,
            notice: None,
        },
        Err(err) => {
            warn!(source = %primary.describe(), error = %format!("{err:#}"), "Track source failed, falling back");
            let track = fallback.load().unwrap_or_else(|err| {
                warn!(source = %fallback.describe(), error = %format!("{err:#}"), "Fallback source failed");
                Track::empty()
            });
            Loaded {
                track,
                notice: Some(Notice::failure(format!(
                    "Could not load {} (using {}).",
                    primary.describe(),
                    fallback.describe()
                ))),
            }
        }
    }
}
