//! crates/logging/src/level.rs
//! Severity threshold shared by the emitters and the filter.

use std::fmt;
use std::str::FromStr;

use crate::error::{InvalidArgument, LogError};

/// Message severity and verbosity threshold.
///
/// Variants are ordered by verbosity: [`LogLevel::None`] suppresses every
/// message while [`LogLevel::Spew`] lets everything through. A message at
/// severity `S` passes a threshold `T` when `S <= T`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[repr(u8)]
pub enum LogLevel {
    /// Output nothing.
    None = 0,
    /// Errors only.
    Error = 1,
    /// Warnings and errors.
    #[default]
    Warn = 2,
    /// Informational messages.
    Info = 3,
    /// Debug messages.
    Debug = 4,
    /// Extremely verbose tracing of internal activity.
    Spew = 5,
}

impl LogLevel {
    /// Every level from the least to the most verbose.
    pub const ALL: [Self; 6] = [
        Self::None,
        Self::Error,
        Self::Warn,
        Self::Info,
        Self::Debug,
        Self::Spew,
    ];

    /// Returns the numeric value of the level.
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    /// Converts a numeric level, returning `None` outside `0..=5`.
    #[must_use]
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::None),
            1 => Some(Self::Error),
            2 => Some(Self::Warn),
            3 => Some(Self::Info),
            4 => Some(Self::Debug),
            5 => Some(Self::Spew),
            _ => None,
        }
    }

    /// Reports whether a message at `severity` passes this threshold.
    ///
    /// Messages tagged [`LogLevel::None`] never pass, even though their
    /// numeric value is below every threshold. `None` means "silence" as a
    /// threshold, so a message carrying it has nothing to say at any setting.
    /// Custom callbacks bypass this filter and still receive such messages.
    #[inline]
    #[must_use]
    pub const fn permits(self, severity: Self) -> bool {
        !matches!(severity, Self::None) && severity as u8 <= self as u8
    }

    /// Lower-case name used when parsing and displaying levels.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Spew => "spew",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl TryFrom<i32> for LogLevel {
    type Error = LogError;

    fn try_from(value: i32) -> Result<Self, LogError> {
        u8::try_from(value)
            .ok()
            .and_then(Self::from_u8)
            .ok_or(LogError::InvalidArgument(InvalidArgument::Level(value)))
    }
}

impl From<LogLevel> for i32 {
    fn from(level: LogLevel) -> Self {
        Self::from(level.as_u8())
    }
}

impl FromStr for LogLevel {
    type Err = LogError;

    /// Parses a level name (`none`, `error`, `warn`, `info`, `debug`, `spew`,
    /// plus the aliases `err`, `warning`, `dbg`) or a numeric value.
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let trimmed = text.trim();
        if !trimmed.is_empty() && trimmed.bytes().all(|b| b.is_ascii_digit()) {
            return match trimmed.parse::<i32>() {
                Ok(value) => Self::try_from(value),
                Err(_) => Err(LogError::InvalidArgument(InvalidArgument::LevelName(
                    trimmed.to_owned(),
                ))),
            };
        }

        match trimmed.to_ascii_lowercase().as_str() {
            "none" | "off" => Ok(Self::None),
            "error" | "err" => Ok(Self::Error),
            "warn" | "warning" => Ok(Self::Warn),
            "info" => Ok(Self::Info),
            "debug" | "dbg" => Ok(Self::Debug),
            "spew" => Ok(Self::Spew),
            _ => Err(LogError::InvalidArgument(InvalidArgument::LevelName(
                trimmed.to_owned(),
            ))),
        }
    }
}
