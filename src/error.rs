//! Error types for recoverable conditions.
//!
//! Broken internal invariants (for example a crossover that cannot find a
//! city in a parent) are not represented here: they panic.

use std::path::PathBuf;
use thiserror::Error;

/// Failure to load a city set from text.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The file could not be opened or read.
    #[error("cannot read city file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A line did not contain two whitespace-separated integers.
    #[error("malformed city on line {line}: {content:?}")]
    Malformed { line: usize, content: String },

    /// The input held no cities at all.
    #[error("no cities found")]
    Empty,
}

/// An unrecognized strategy name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("unknown selection strategy: {0}")]
    UnknownSelection(String),

    #[error("unknown crossover operator: {0}")]
    UnknownCrossover(String),
}

/// An out-of-range GA parameter.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("{name} must be within [0, 1], got {value}")]
    RateOutOfRange { name: &'static str, value: f64 },

    #[error("tournament sample size must be at least 1")]
    EmptyTournament,
}
