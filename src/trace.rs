//! Reading branch traces.
//!
//! A trace is a text file with one resolved conditional branch per line:
//! the program counter in hexadecimal (an `0x` prefix is optional) followed
//! by the outcome, `1` for taken and `0` for not-taken.
//!
//! ```text
//! 0x40b9f8 1
//! 40ba04 0
//! ```

use std::fs::File;
use std::io::{ BufRead, BufReader };
use std::path::Path;
use thiserror::Error;

use crate::branch::*;

/// Errors produced while reading a trace.
#[derive(Debug, Error)]
pub enum TraceError {
    #[error("failed to read trace: {0}")]
    Io(#[from] std::io::Error),

    #[error("line {line}: malformed record '{content}'")]
    Malformed { line: usize, content: String },

    #[error("line {line}: invalid program counter '{pc}'")]
    InvalidPc { line: usize, pc: String },

    #[error("line {line}: invalid outcome '{outcome}' (expected 0 or 1)")]
    InvalidOutcome { line: usize, outcome: String },
}

/// An iterator over the [BranchRecord]s in a text trace.
pub struct TraceReader<R> {
    src: R,
    buf: String,
    line: usize,
}

impl TraceReader<BufReader<File>> {
    /// Open a trace file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, TraceError> {
        let f = File::open(path)?;
        Ok(Self::from_reader(BufReader::new(f)))
    }
}

impl<R: BufRead> TraceReader<R> {
    pub fn from_reader(src: R) -> Self {
        Self { src, buf: String::new(), line: 0 }
    }

    /// Return the number of the most recently read line.
    pub fn line(&self) -> usize { self.line }
}

/// Parse a single (non-empty) line of a trace.
pub fn parse_record(line: usize, s: &str) -> Result<BranchRecord, TraceError> {
    let mut fields = s.split_whitespace();
    let (pc, outcome) = match (fields.next(), fields.next(), fields.next()) {
        (Some(pc), Some(outcome), None) => (pc, outcome),
        _ => return Err(TraceError::Malformed {
            line, content: s.to_string()
        }),
    };

    let digits = pc.strip_prefix("0x")
        .or_else(|| pc.strip_prefix("0X"))
        .unwrap_or(pc);
    let pc = u32::from_str_radix(digits, 16).map_err(|_| {
        TraceError::InvalidPc { line, pc: pc.to_string() }
    })?;

    let outcome = match outcome {
        "1" => Outcome::T,
        "0" => Outcome::N,
        _ => return Err(TraceError::InvalidOutcome {
            line, outcome: outcome.to_string()
        }),
    };

    Ok(BranchRecord::new(pc, outcome))
}

impl<R: BufRead> Iterator for TraceReader<R> {
    type Item = Result<BranchRecord, TraceError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            self.buf.clear();
            match self.src.read_line(&mut self.buf) {
                Ok(0) => return None,
                Ok(_) => {},
                Err(e) => return Some(Err(e.into())),
            }
            self.line += 1;
            let s = self.buf.trim();
            if s.is_empty() {
                continue;
            }
            return Some(parse_record(self.line, s));
        }
    }
}
