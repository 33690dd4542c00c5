// SPDX-License-Identifier: MIT

use std::{fmt, io};

#[derive(Debug)]
pub enum SeqPrepError {
    Io(io::Error),
    Format(String),
}

// These allow conversion to SeqPrepError, required for main() to return Result<()> and for '?' to
// work.

impl From<io::Error> for SeqPrepError {
    fn from(e: io::Error) -> Self {
        SeqPrepError::Io(e)
    }
}

impl From<String> for SeqPrepError {
    fn from(s: String) -> Self {
        SeqPrepError::Format(s)
    }
}

impl fmt::Display for SeqPrepError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SeqPrepError::Io(e) => write!(f, "I/O error: {}", e),
            SeqPrepError::Format(msg) => write!(f, "Format error: {}", msg),
        }
    }
}
