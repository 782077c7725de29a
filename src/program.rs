//! User programs and loop expansion
//!
//! A program is free-form: nothing is validated while authoring. An unterminated
//! loop or an empty loop body is accepted here and resolved by [`expand`] when a
//! run starts.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::types::Instruction;

/// Errors raised while parsing program text
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProgramParseError {
    #[error("unknown instruction '{token}' at position {index}")]
    UnknownToken { token: String, index: usize },
}

/// Ordered list of instructions as authored
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Program {
    instructions: Vec<Instruction>,
}

impl Program {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, instruction: Instruction) {
        self.instructions.push(instruction);
    }

    pub fn clear(&mut self) {
        self.instructions.clear();
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// The flat motion sequence this program runs
    pub fn expand(&self) -> Vec<Instruction> {
        expand(&self.instructions)
    }
}

impl From<Vec<Instruction>> for Program {
    fn from(instructions: Vec<Instruction>) -> Self {
        Self { instructions }
    }
}

impl FromStr for Program {
    type Err = ProgramParseError;

    /// Parse whitespace separated instruction names or aliases, e.g. `"[ F F ] R"`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.split_whitespace()
            .enumerate()
            .map(|(index, token)| {
                token.parse::<Instruction>().map_err(|_| ProgramParseError::UnknownToken {
                    token: token.to_string(),
                    index,
                })
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Program::from)
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for instruction in &self.instructions {
            if !first {
                f.write_str(" ")?;
            }
            first = false;
            f.write_str(instruction.alias())?;
        }
        Ok(())
    }
}

/// Unroll the single-level repeat block into primitive instructions.
///
/// A closed `LoopStart .. LoopEnd` block is emitted twice. A block still open at
/// the end of input is emitted once. A `LoopStart` inside an open block discards
/// what was buffered so far, and a `LoopEnd` outside a block is dropped.
pub fn expand(tokens: &[Instruction]) -> Vec<Instruction> {
    let mut out = Vec::with_capacity(tokens.len());
    let mut buffer = Vec::new();
    let mut in_loop = false;

    for &token in tokens {
        match token {
            Instruction::LoopStart => {
                in_loop = true;
                buffer.clear();
            }
            Instruction::LoopEnd => {
                if in_loop {
                    out.extend_from_slice(&buffer);
                    out.extend_from_slice(&buffer);
                    buffer.clear();
                    in_loop = false;
                }
            }
            Instruction::TurnLeft | Instruction::TurnRight | Instruction::Advance => {
                if in_loop {
                    buffer.push(token);
                } else {
                    out.push(token);
                }
            }
        }
    }

    if in_loop {
        out.extend_from_slice(&buffer);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use Instruction::{Advance as F, LoopEnd as End, LoopStart as Loop, TurnLeft as L, TurnRight as R};

    #[test]
    fn test_flat_input_is_unchanged() {
        let flat = vec![F, L, F, R, R, F];
        assert_eq!(expand(&flat), flat);
    }

    #[test]
    fn test_closed_loop_runs_twice() {
        assert_eq!(expand(&[Loop, F, L, End]), vec![F, L, F, L]);
    }

    #[test]
    fn test_open_loop_runs_once() {
        assert_eq!(expand(&[Loop, F, L]), vec![F, L]);
    }

    #[test]
    fn test_stray_end_is_ignored() {
        assert_eq!(expand(&[F, End, R]), vec![F, R]);
    }

    #[test]
    fn test_second_loop_start_discards_buffer() {
        assert_eq!(expand(&[Loop, F, F, Loop, R, End]), vec![R, R]);
        assert_eq!(expand(&[F, Loop, L, Loop, R]), vec![F, R]);
    }

    #[test]
    fn test_loop_between_plain_tokens() {
        assert_eq!(expand(&[R, Loop, F, End, L]), vec![R, F, F, L]);
    }

    #[test]
    fn test_empty_bodies_produce_nothing() {
        assert!(expand(&[]).is_empty());
        assert!(expand(&[Loop, End]).is_empty());
        assert!(expand(&[Loop]).is_empty());
    }

    #[test]
    fn test_parse_program_text() {
        let program: Program = "[ f F ] right L".parse().unwrap();
        assert_eq!(program.instructions(), &[Loop, F, F, End, R, L]);
        assert_eq!(program.to_string(), "[ F F ] R L");
    }

    #[test]
    fn test_parse_reports_unknown_token() {
        let err = "F F jump".parse::<Program>().unwrap_err();
        assert_eq!(
            err,
            ProgramParseError::UnknownToken {
                token: "jump".to_string(),
                index: 2
            }
        );
    }

    #[test]
    fn test_append_and_clear() {
        let mut program = Program::new();
        assert!(program.is_empty());
        program.append(Loop);
        program.append(F);
        assert_eq!(program.len(), 2);
        assert_eq!(program.expand(), vec![F]);
        program.clear();
        assert!(program.is_empty());
    }
}
