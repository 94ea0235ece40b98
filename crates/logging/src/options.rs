//! crates/logging/src/options.rs
//! Decoration flags applied by the default emitter.

use std::fmt;
use std::ops::{BitOr, BitOrAssign};
use std::str::FromStr;

use crate::error::{InvalidArgument, LogError};

/// Bitmask of timestamp decorations for the default emitter.
///
/// The empty mask leaves lines undecorated. [`LogOptions::TIME_MS`] and
/// [`LogOptions::TIME_US`] refine [`LogOptions::TIME`]; when both are set the
/// microsecond precision wins.
#[derive(Copy, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "u8", into = "u8"))]
pub struct LogOptions(u8);

impl LogOptions {
    /// No decoration.
    pub const NONE: Self = Self(0);
    /// Prefix `YYYYMMDD `.
    pub const DATE: Self = Self(0x01);
    /// Prefix `HHMMSS `.
    pub const TIME: Self = Self(0x02);
    /// Append a millisecond fraction to the time.
    pub const TIME_MS: Self = Self(0x04);
    /// Append a microsecond fraction to the time.
    pub const TIME_US: Self = Self(0x08);
    /// Render timestamps in UTC instead of local time.
    pub const UTC: Self = Self(0x10);
    /// Union of every known flag.
    pub const ALL: Self = Self(0x1f);

    const NAMED: [(Self, &'static str); 5] = [
        (Self::DATE, "date"),
        (Self::TIME, "time"),
        (Self::TIME_MS, "time-ms"),
        (Self::TIME_US, "time-us"),
        (Self::UTC, "utc"),
    ];

    /// Builds a mask from raw bits, rejecting unknown bits.
    #[must_use]
    pub const fn from_bits(bits: u8) -> Option<Self> {
        if bits & !Self::ALL.0 == 0 {
            Some(Self(bits))
        } else {
            None
        }
    }

    /// Raw bit representation.
    #[must_use]
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Reports whether every flag in `other` is set.
    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Reports whether any flag in `other` is set.
    #[must_use]
    pub const fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }

    /// Reports whether no flag is set.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Returns the union of both masks.
    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// Reports whether any time-of-day flag is set.
    #[must_use]
    pub const fn wants_time(self) -> bool {
        self.intersects(Self(Self::TIME.0 | Self::TIME_MS.0 | Self::TIME_US.0))
    }

    /// Reports whether the emitter has to read the clock at all.
    #[must_use]
    pub const fn wants_timestamp(self) -> bool {
        self.intersects(Self::DATE) || self.wants_time()
    }
}

impl BitOr for LogOptions {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}

impl BitOrAssign for LogOptions {
    fn bitor_assign(&mut self, rhs: Self) {
        *self = self.union(rhs);
    }
}

impl TryFrom<i32> for LogOptions {
    type Error = LogError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        u8::try_from(value)
            .ok()
            .and_then(Self::from_bits)
            .ok_or(LogError::InvalidArgument(InvalidArgument::Options(value)))
    }
}

impl TryFrom<u8> for LogOptions {
    type Error = LogError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::try_from(i32::from(value))
    }
}

impl From<LogOptions> for u8 {
    fn from(options: LogOptions) -> Self {
        options.bits()
    }
}

impl From<LogOptions> for i32 {
    fn from(options: LogOptions) -> Self {
        Self::from(options.bits())
    }
}

impl fmt::Debug for LogOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LogOptions({self})")
    }
}

impl fmt::Display for LogOptions {
    /// Renders the comma separated flag list accepted by [`FromStr`].
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("none");
        }
        let mut first = true;
        for (flag, name) in Self::NAMED {
            if self.contains(flag) {
                if !first {
                    f.write_str(",")?;
                }
                f.write_str(name)?;
                first = false;
            }
        }
        Ok(())
    }
}

impl FromStr for LogOptions {
    type Err = LogError;

    /// Parses a comma separated flag list such as `date,time-ms,utc`.
    ///
    /// Underscores are accepted in place of dashes, `none` or an empty string
    /// yields the empty mask, and a purely numeric value is taken as raw bits.
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let trimmed = text.trim();
        if !trimmed.is_empty() && trimmed.bytes().all(|b| b.is_ascii_digit()) {
            return trimmed.parse::<i32>().map_or_else(
                |_| {
                    Err(LogError::InvalidArgument(InvalidArgument::OptionName(
                        trimmed.to_owned(),
                    )))
                },
                Self::try_from,
            );
        }

        let mut options = Self::NONE;
        for token in trimmed.split(',').map(str::trim).filter(|t| !t.is_empty()) {
            let normalized = token.to_ascii_lowercase().replace('_', "-");
            if normalized == "none" {
                continue;
            }
            let flag = Self::NAMED
                .iter()
                .find(|(_, name)| *name == normalized)
                .map(|(flag, _)| *flag)
                .ok_or_else(|| {
                    LogError::InvalidArgument(InvalidArgument::OptionName(token.to_owned()))
                })?;
            options |= flag;
        }
        Ok(options)
    }
}
