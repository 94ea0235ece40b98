//! crates/logging/src/clock.rs
//! Wall-clock source used for timestamp decoration.

use std::fmt;
use std::time::SystemTime;

use thiserror::Error;
use time::error::IndeterminateOffset;
use time::{OffsetDateTime, UtcOffset};

/// Local UTC offset could not be determined.
#[derive(Debug, Error)]
pub enum LocalOffsetError {
    /// The platform refused to report the offset.
    #[error(transparent)]
    Indeterminate(#[from] IndeterminateOffset),
    /// A custom clock has no zone information; carries the reason.
    #[error("{0}")]
    Unavailable(String),
}

/// Supplies the current time and the local UTC offset.
pub trait Clock: Send + Sync {
    /// Current wall-clock time.
    fn now(&self) -> SystemTime;

    /// Offset of local time from UTC at `at`.
    ///
    /// # Errors
    ///
    /// Returns [`LocalOffsetError`] when the offset cannot be determined, e.g.
    /// on platforms where reading the zone is unsound once threads exist.
    fn local_offset(&self, at: OffsetDateTime) -> Result<UtcOffset, LocalOffsetError> {
        Ok(UtcOffset::local_offset_at(at)?)
    }
}

/// Reads the operating system clock and time zone.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> SystemTime {
        SystemTime::now()
    }
}

/// Always reports the same instant and offset.
///
/// Useful for reproducible log output, e.g. when comparing captured lines.
#[derive(Clone, Copy)]
pub struct FixedClock {
    instant: SystemTime,
    offset: UtcOffset,
}

impl FixedClock {
    /// Creates a clock frozen at `instant` whose local time equals UTC.
    #[must_use]
    pub const fn new(instant: SystemTime) -> Self {
        Self {
            instant,
            offset: UtcOffset::UTC,
        }
    }

    /// Uses `offset` as the local time zone.
    #[must_use]
    pub fn with_offset(mut self, offset: UtcOffset) -> Self {
        self.offset = offset;
        self
    }
}

impl fmt::Debug for FixedClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FixedClock")
            .field("instant", &OffsetDateTime::from(self.instant))
            .field("offset", &self.offset)
            .finish()
    }
}

impl Clock for FixedClock {
    fn now(&self) -> SystemTime {
        self.instant
    }

    fn local_offset(&self, _at: OffsetDateTime) -> Result<UtcOffset, LocalOffsetError> {
        Ok(self.offset)
    }
}
