//! crates/logging/src/error.rs
//! Error type returned by the configuration setters.

use std::convert::Infallible;

use thiserror::Error;

/// Error returned when a logging setter rejects its input.
///
/// The facility has a single recoverable failure class. Every rejection
/// leaves the previous configuration untouched.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum LogError {
    /// A setter received a value outside its valid domain.
    #[error("invalid argument: {0}")]
    InvalidArgument(#[from] InvalidArgument),
}

impl LogError {
    /// Returns the rejected argument.
    #[must_use]
    pub const fn argument(&self) -> &InvalidArgument {
        match self {
            Self::InvalidArgument(argument) => argument,
        }
    }
}

impl From<Infallible> for LogError {
    fn from(never: Infallible) -> Self {
        match never {}
    }
}

/// Describes which input a setter rejected.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum InvalidArgument {
    /// Numeric log level outside `0..=5`.
    #[error("invalid log level {0}")]
    Level(i32),
    /// Log level text that names no level.
    #[error("unknown log level '{0}'")]
    LevelName(String),
    /// Option mask containing bits outside the known flags.
    #[error("invalid log options {0}")]
    Options(i32),
    /// Option list entry that names no flag.
    #[error("unknown log option '{0}'")]
    OptionName(String),
    /// No log domain was supplied.
    #[error("log domain was not provided")]
    MissingDomain,
    /// No callback was supplied.
    #[error("log callback was not provided")]
    MissingCallback,
}
