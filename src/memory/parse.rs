//! Program images are plain text, one byte per line written as a binary
//! literal. Anything after `#` is a comment:
//!
//! ```text
//! 10000010 # LDI R0,8
//! 00000000
//! 00001000
//! 01000111 # PRN R0
//! 00000000
//! 00000001 # HLT
//! ```

use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use std::str::{FromStr, Lines};

use crate::error::{MachineError, Result};

use super::{Byte, Memory};

/// Parses a binary literal, with or without a `0b` prefix. Values wider than
/// a byte are truncated to their low 8 bits.
fn parse_binary(literal: &str) -> Option<Byte> {
    let digits = literal.strip_prefix("0b").unwrap_or(literal);
    if digits.is_empty() || !digits.bytes().all(|digit| digit == b'0' || digit == b'1') {
        return None;
    }

    let low = &digits[digits.len().saturating_sub(8)..];
    Byte::from_str_radix(low, 2).ok()
}

#[derive(Debug, Clone)]
pub struct Parser<'a, const S: usize> {
    lines: Lines<'a>,
    line_nr: usize,
    position: usize,
    memory: Memory<S>,
}

impl<'a, const S: usize> Parser<'a, S> {
    /// Creates a new parser for `data` which will populate `memory` from
    /// address 0.
    pub fn new(data: &'a str, memory: Memory<S>) -> Self {
        Self {
            lines: data.lines(),
            line_nr: 0,
            position: 0,
            memory,
        }
    }

    /// Consumes `self` and writes every valid line of `data` into memory.
    ///
    /// # Errors
    ///
    /// Fails with [`MachineError::OutOfBounds`] if the program does not fit
    /// into memory. Malformed lines are skipped, never fatal.
    pub fn parse(mut self) -> Result<Memory<S>> {
        while let Some(res) = self.parse_next_line() {
            res?;
        }

        log::debug!("Loaded {} bytes from {} lines", self.position, self.line_nr);

        Ok(self.memory)
    }

    /// Tries to parse the next line. Each byte should be located on its own
    /// line.
    fn parse_next_line(&mut self) -> Option<Result<()>> {
        let line = self.lines.next()?;
        self.line_nr += 1;

        let literal = line.split('#').next().unwrap_or_default().trim();

        if literal.is_empty() {
            // Comment or empty line; skip
            return Some(Ok(()));
        }

        match parse_binary(literal) {
            Some(byte) => Some(self.write_byte(byte)),
            None => {
                log::warn!(
                    "[{}] Skipping malformed line `{}`",
                    self.line_nr,
                    line.trim()
                );
                Some(Ok(()))
            }
        }
    }

    /// Writes `byte` at the current position and moves past it.
    fn write_byte(&mut self, byte: Byte) -> Result<()> {
        self.memory.write_byte(self.position, byte)?;
        self.position += 1;
        Ok(())
    }
}

impl<const S: usize> FromStr for Memory<S> {
    type Err = MachineError;

    fn from_str(s: &str) -> Result<Self> {
        Parser::new(s, Memory::default()).parse()
    }
}

impl<const S: usize> Memory<S> {
    /// Loads a program image from `path`.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let data = fs::read_to_string(path).map_err(|source| {
            let path = path.to_path_buf();
            match source.kind() {
                ErrorKind::NotFound => MachineError::ProgramNotFound { path, source },
                _ => MachineError::ProgramUnreadable { path, source },
            }
        })?;

        log::info!("Loading program `{}`", path.display());

        data.parse()
    }
}
