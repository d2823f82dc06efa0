//! Error types for the engine.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that stop a rule set from being built.
#[derive(Debug, Error)]
pub enum RuleSpecError {
    /// Rule file could not be opened or read.
    #[error("cannot read rule file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A malformed line, reported only when parsing strictly.
    #[error("line {line}: {kind}")]
    Malformed { line: usize, kind: WarningKind },

    /// A rule points past the last neighborhood.
    #[error("rule {rule} references neighborhood {neighborhood}, only {available} defined")]
    UnknownNeighborhood {
        rule: usize,
        neighborhood: usize,
        available: usize,
    },

    /// Neighborhood ids must equal their position.
    #[error("neighborhood at index {index} has id {id}")]
    NeighborhoodIndex { index: usize, id: usize },
}

/// Reasons a single line's contribution is dropped.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WarningKind {
    #[error("invalid bit value {0:?}, expected \"0\" or \"1\"")]
    InvalidBit(String),

    #[error("window cell ({row}, {col}) outside the 31x31 window")]
    OutsideWindow { row: usize, col: usize },

    #[error("bitmap line before any [N<id> <row>] header")]
    MissingRowHeader,

    #[error("bitmap line for N{found} under header for N{header}")]
    HeaderMismatch { header: usize, found: usize },

    #[error("neighborhood id {found} out of sequence, expected at most {expected}")]
    NonDenseNeighborhood { found: usize, expected: usize },

    #[error("malformed header {0:?}")]
    MalformedHeader(String),

    #[error("malformed rule id {0:?}, expected S<digits>")]
    MalformedRuleId(String),

    #[error("rule targets neighborhood S{found}, only {available} defined")]
    UndefinedNeighborhood { found: usize, available: usize },

    #[error("{field} value {value:?} is not a number, using 0")]
    InvalidNumber { field: &'static str, value: String },

    #[error("expected 2 or 3 rule fields, found {0}")]
    FieldCount(usize),

    #[error("interval [{min}, {max}] is empty")]
    EmptyInterval { min: u32, max: u32 },

    #[error("unrecognized line {0:?}")]
    Unrecognized(String),
}

/// Errors raised when building a grid.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("grid {width}x{height} must be larger than neighborhood reach {reach} in both axes")]
    TooSmall { width: usize, height: usize, reach: u32 },

    #[error("expected {expected} cells, got {got}")]
    CellCount { expected: usize, got: usize },
}
