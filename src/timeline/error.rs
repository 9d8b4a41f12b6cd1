use std::{io, num::ParseIntError};

use thiserror::Error;

/// Everything that can go wrong while turning a log into events. Splitting and aggregation can't
/// fail, so all of these come from reading and parsing.
#[derive(Debug, Error)]
pub enum TimelineError {
    #[error("Field {field} on line {line} is not numeric: {source}")]
    Parse {
        line: usize,
        field: usize,
        source: ParseIntError,
    },
    #[error("Field {field} on line {line} is missing")]
    MissingField { line: usize, field: usize },
    #[error("Line {line} doesn't describe a valid local time")]
    InvalidTimestamp { line: usize },
    #[error("Failed to read the log: {0}")]
    Io(#[from] io::Error),
}

impl TimelineError {
    /// 1-based line the error was found on.
    pub fn line(&self) -> Option<usize> {
        match self {
            TimelineError::Parse { line, .. }
            | TimelineError::MissingField { line, .. }
            | TimelineError::InvalidTimestamp { line } => Some(*line),
            TimelineError::Io(_) => None,
        }
    }

    /// 0-based field index the error was found in.
    pub fn field(&self) -> Option<usize> {
        match self {
            TimelineError::Parse { field, .. } | TimelineError::MissingField { field, .. } => {
                Some(*field)
            }
            TimelineError::InvalidTimestamp { .. } | TimelineError::Io(_) => None,
        }
    }
}

pub type Result<T, E = TimelineError> = std::result::Result<T, E>;
