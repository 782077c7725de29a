//! Core value types shared by the interpreter and its collaborators
//!
//! Instructions are a closed enum rather than free text so the expander and the
//! engine can match exhaustively. The strum derives give every instruction a
//! canonical name plus a one-character alias for program text.

use serde::{Deserialize, Serialize};
use std::fmt;
use strum::{Display, EnumIter, EnumString};

use crate::track::{COLS, ROWS};

/// A single token of a user program
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[derive(Display, EnumString, EnumIter)]
#[serde(rename_all = "snake_case")]
#[strum(ascii_case_insensitive)]
pub enum Instruction {
    #[strum(to_string = "left", serialize = "l")]
    TurnLeft,
    #[strum(to_string = "right", serialize = "r")]
    TurnRight,
    #[strum(to_string = "forward", serialize = "f")]
    Advance,
    #[strum(to_string = "loop", serialize = "[")]
    LoopStart,
    #[strum(to_string = "end", serialize = "]")]
    LoopEnd,
}

impl Instruction {
    /// True for the motion tokens that survive loop expansion
    pub const fn is_primitive(self) -> bool {
        matches!(self, Self::TurnLeft | Self::TurnRight | Self::Advance)
    }

    /// Human readable label, shown for the most recent program entry
    pub const fn label(self) -> &'static str {
        match self {
            Self::TurnLeft => "Turn left",
            Self::TurnRight => "Turn right",
            Self::Advance => "Forward",
            Self::LoopStart => "Loop start",
            Self::LoopEnd => "Loop end",
        }
    }

    /// Short alias accepted by the program parser
    pub const fn alias(self) -> &'static str {
        match self {
            Self::TurnLeft => "L",
            Self::TurnRight => "R",
            Self::Advance => "F",
            Self::LoopStart => "[",
            Self::LoopEnd => "]",
        }
    }
}

/// Cardinal direction the agent faces, encoded in degrees clockwise from up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u16)]
pub enum Heading {
    North = 0,
    #[default]
    East = 90,
    South = 180,
    West = 270,
}

impl Heading {
    /// Heading every agent starts a session with
    pub const INITIAL: Heading = Heading::East;

    #[inline]
    pub const fn degrees(self) -> u16 {
        self as u16
    }

    /// Maps a multiple of 90 onto a heading, reducing modulo 360
    pub const fn from_degrees(degrees: u16) -> Option<Self> {
        match degrees % 360 {
            0 => Some(Self::North),
            90 => Some(Self::East),
            180 => Some(Self::South),
            270 => Some(Self::West),
            _ => None,
        }
    }

    /// `(heading + 270) mod 360`
    pub const fn turn_left(self) -> Self {
        match self {
            Self::North => Self::West,
            Self::East => Self::North,
            Self::South => Self::East,
            Self::West => Self::South,
        }
    }

    /// `(heading + 90) mod 360`
    pub const fn turn_right(self) -> Self {
        match self {
            Self::North => Self::East,
            Self::East => Self::South,
            Self::South => Self::West,
            Self::West => Self::North,
        }
    }

    /// Arrow glyph for the grid renderer
    pub const fn arrow(self) -> char {
        match self {
            Self::North => '▲',
            Self::East => '▶',
            Self::South => '▼',
            Self::West => '◀',
        }
    }
}

impl fmt::Display for Heading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}°", self.degrees())
    }
}

/// A cell coordinate on the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// True when the coordinate lies inside the fixed grid
    #[inline]
    pub const fn in_bounds(self) -> bool {
        self.row < ROWS && self.col < COLS
    }

    /// The neighbouring cell in `heading`, or `None` when it falls off the grid
    pub fn step(self, heading: Heading) -> Option<Position> {
        let next = match heading {
            Heading::North => Position::new(self.row.checked_sub(1)?, self.col),
            Heading::East => Position::new(self.row, self.col + 1),
            Heading::South => Position::new(self.row + 1, self.col),
            Heading::West => Position::new(self.row, self.col.checked_sub(1)?),
        };
        next.in_bounds().then_some(next)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Where the agent is and which way it faces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Agent {
    pub position: Position,
    pub heading: Heading,
}

impl Agent {
    /// Agent parked on `start`, facing the initial heading
    pub const fn at(start: Position) -> Self {
        Self {
            position: start,
            heading: Heading::INITIAL,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_instruction_parses_names_and_aliases() {
        assert_eq!("left".parse::<Instruction>().unwrap(), Instruction::TurnLeft);
        assert_eq!("R".parse::<Instruction>().unwrap(), Instruction::TurnRight);
        assert_eq!("Forward".parse::<Instruction>().unwrap(), Instruction::Advance);
        assert_eq!("[".parse::<Instruction>().unwrap(), Instruction::LoopStart);
        assert_eq!("]".parse::<Instruction>().unwrap(), Instruction::LoopEnd);
        assert!("jump".parse::<Instruction>().is_err());
    }

    #[test]
    fn test_instruction_display_is_canonical_name() {
        assert_eq!(Instruction::TurnLeft.to_string(), "left");
        assert_eq!(Instruction::LoopEnd.to_string(), "end");
    }

    #[test]
    fn test_alias_round_trips() {
        for instruction in Instruction::iter() {
            assert_eq!(instruction.alias().parse::<Instruction>().unwrap(), instruction);
        }
    }

    #[test]
    fn test_only_motion_tokens_are_primitive() {
        let primitive: Vec<_> = Instruction::iter().filter(|i| i.is_primitive()).collect();
        assert_eq!(
            primitive,
            vec![Instruction::TurnLeft, Instruction::TurnRight, Instruction::Advance]
        );
    }

    #[test]
    fn test_turns_match_modular_arithmetic() {
        for heading in [Heading::North, Heading::East, Heading::South, Heading::West] {
            assert_eq!(
                Some(heading.turn_left()),
                Heading::from_degrees(heading.degrees() + 270)
            );
            assert_eq!(
                Some(heading.turn_right()),
                Heading::from_degrees(heading.degrees() + 90)
            );
        }
        // Turning left from north wraps to 270, never a negative angle
        assert_eq!(Heading::North.turn_left().degrees(), 270);
    }

    #[test]
    fn test_from_degrees_rejects_non_cardinal() {
        assert_eq!(Heading::from_degrees(45), None);
        assert_eq!(Heading::from_degrees(450), Some(Heading::East));
    }

    #[test]
    fn test_step_respects_bounds() {
        let origin = Position::new(0, 0);
        assert_eq!(origin.step(Heading::North), None);
        assert_eq!(origin.step(Heading::West), None);
        assert_eq!(origin.step(Heading::East), Some(Position::new(0, 1)));
        assert_eq!(origin.step(Heading::South), Some(Position::new(1, 0)));

        let corner = Position::new(ROWS - 1, COLS - 1);
        assert_eq!(corner.step(Heading::South), None);
        assert_eq!(corner.step(Heading::East), None);
    }

    #[test]
    fn test_agent_starts_facing_east() {
        let agent = Agent::at(Position::new(2, 3));
        assert_eq!(agent.heading, Heading::East);
        assert_eq!(agent.heading.degrees(), 90);
    }
}
