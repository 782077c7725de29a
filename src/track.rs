//! Track model: the boolean traversability mask over the fixed grid
//!
//! The grid dimensions are compile-time constants and part of the `Track` type,
//! so a track can be replaced wholesale but never resized.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::types::Position;

/// Number of grid rows
pub const ROWS: usize = 4;
/// Number of grid columns
pub const COLS: usize = 5;

/// Traversable cells of the grid, row-major
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Track {
    cells: [[bool; COLS]; ROWS],
}

impl Track {
    /// A track with no traversable cells
    pub const fn empty() -> Self {
        Self {
            cells: [[false; COLS]; ROWS],
        }
    }

    pub const fn from_cells(cells: [[bool; COLS]; ROWS]) -> Self {
        Self { cells }
    }

    /// Build a track from `(row, col)` pairs. Out-of-range pairs are ignored.
    pub fn from_coords(coords: &[(usize, usize)]) -> Self {
        let mut track = Self::empty();
        for &(row, col) in coords {
            if row < ROWS && col < COLS {
                track.cells[row][col] = true;
            }
        }
        track
    }

    /// Whether the agent may stand on `pos`. Out-of-bounds is never traversable.
    #[inline]
    pub fn is_traversable(&self, pos: Position) -> bool {
        pos.in_bounds() && self.cells[pos.row][pos.col]
    }

    /// Flip one cell and return its new value, or `None` when out of bounds
    pub fn toggle(&mut self, pos: Position) -> Option<bool> {
        if !pos.in_bounds() {
            return None;
        }
        let cell = &mut self.cells[pos.row][pos.col];
        *cell = !*cell;
        Some(*cell)
    }

    /// First traversable cell in row-major order, `(0, 0)` if there is none
    pub fn derive_start(&self) -> Position {
        self.cells
            .iter()
            .enumerate()
            .find_map(|(row, cols)| cols.iter().position(|&c| c).map(|col| Position::new(row, col)))
            .unwrap_or_default()
    }

    pub fn traversable_count(&self) -> usize {
        self.cells.iter().flatten().filter(|&&c| c).count()
    }
}

/// The built-in tracks used when no custom track is available
pub fn presets() -> [Track; 3] {
    [
        // Along the top, then down the right edge
        Track::from_coords(&[
            (0, 0), (0, 1), (0, 2), (0, 3), (0, 4),
            (1, 4), (2, 4), (3, 4),
        ]),
        // Up the left edge, then along the top
        Track::from_coords(&[
            (3, 0), (2, 0), (1, 0), (0, 0),
            (0, 1), (0, 2), (0, 3), (0, 4),
        ]),
        // Staircase to the bottom-right corner
        Track::from_coords(&[
            (0, 0), (0, 1), (1, 1), (1, 2),
            (2, 2), (2, 3), (3, 3), (3, 4),
        ]),
    ]
}

/// Preset by index
pub fn preset(index: usize) -> Option<Track> {
    presets().get(index).copied()
}

/// A uniformly chosen preset
pub fn random_preset<R: Rng + ?Sized>(rng: &mut R) -> Track {
    let all = presets();
    all[rng.gen_range(0..all.len())]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_track_starts_at_origin() {
        assert_eq!(Track::empty().derive_start(), Position::new(0, 0));
        assert_eq!(Track::empty().traversable_count(), 0);
    }

    #[test]
    fn test_derive_start_is_row_major_first() {
        let track = Track::from_coords(&[(2, 1), (1, 3), (1, 4), (3, 0)]);
        assert_eq!(track.derive_start(), Position::new(1, 3));
    }

    #[test]
    fn test_from_coords_ignores_out_of_range() {
        let track = Track::from_coords(&[(0, 0), (4, 0), (0, 5), (9, 9)]);
        assert_eq!(track.traversable_count(), 1);
    }

    #[test]
    fn test_toggle_flips_and_reports() {
        let mut track = Track::empty();
        assert_eq!(track.toggle(Position::new(1, 1)), Some(true));
        assert!(track.is_traversable(Position::new(1, 1)));
        assert_eq!(track.toggle(Position::new(1, 1)), Some(false));
        assert!(!track.is_traversable(Position::new(1, 1)));
        assert_eq!(track.toggle(Position::new(ROWS, 0)), None);
    }

    #[test]
    fn test_presets_have_eight_cells() {
        for track in presets() {
            assert_eq!(track.traversable_count(), 8);
        }
        assert_eq!(preset(1).unwrap().derive_start(), Position::new(0, 0));
        assert!(preset(3).is_none());
    }

    #[test]
    fn test_serializes_as_nested_arrays() {
        let track = Track::from_coords(&[(0, 0)]);
        let json = serde_json::to_string(&track).unwrap();
        assert!(json.starts_with("[[true,false,false,false,false],"));

        let back: Track = serde_json::from_str(&json).unwrap();
        assert_eq!(back, track);
    }

    #[test]
    fn test_rejects_wrong_dimensions() {
        let json = "[[true,false],[false,true]]";
        assert!(serde_json::from_str::<Track>(json).is_err());
    }

    #[test]
    fn test_random_preset_is_a_preset() {
        let mut rng = rand::thread_rng();
        let all = presets();
        for _ in 0..10 {
            assert!(all.contains(&random_preset(&mut rng)));
        }
    }
}
