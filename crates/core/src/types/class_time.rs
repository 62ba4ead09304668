//! Time-of-day type for schedule entries.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`ClassTime`].
#[derive(thiserror::Error, Debug, Clone)]
pub enum ClassTimeError {
    /// The input is empty.
    #[error("time cannot be empty")]
    Empty,
    /// The input is not in `HH:MM` form.
    #[error("time must be in HH:MM form: {0}")]
    Malformed(String),
    /// The hour or minute is out of range.
    #[error("time out of range: {0}")]
    OutOfRange(String),
}

/// A time of day in `HH:MM` form, as entered for a schedule entry.
///
/// The numeric form (`07:00` -> 700, `18:30` -> 1830) feeds the schedule
/// sort key and orders entries within a day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ClassTime {
    hour: u32,
    minute: u32,
}

impl ClassTime {
    /// Parse a `ClassTime` from an `HH:MM` string.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty, not in `HH:MM` form, or the
    /// hour/minute fall outside 00-23/00-59.
    pub fn parse(s: &str) -> Result<Self, ClassTimeError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ClassTimeError::Empty);
        }

        let (h, m) = s
            .split_once(':')
            .ok_or_else(|| ClassTimeError::Malformed(s.to_string()))?;

        let hour: u32 = h
            .parse()
            .map_err(|_| ClassTimeError::Malformed(s.to_string()))?;
        let minute: u32 = m
            .parse()
            .map_err(|_| ClassTimeError::Malformed(s.to_string()))?;

        if hour > 23 || minute > 59 {
            return Err(ClassTimeError::OutOfRange(s.to_string()));
        }

        Ok(Self { hour, minute })
    }

    /// The hour component (0-23).
    #[must_use]
    pub const fn hour(self) -> u32 {
        self.hour
    }

    /// The minute component (0-59).
    #[must_use]
    pub const fn minute(self) -> u32 {
        self.minute
    }

    /// Numeric form used by the sort key: `HH * 100 + MM`.
    #[must_use]
    pub const fn numeric(self) -> u32 {
        self.hour * 100 + self.minute
    }
}

impl fmt::Display for ClassTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl std::str::FromStr for ClassTime {
    type Err = ClassTimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for ClassTime {
    type Error = ClassTimeError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<ClassTime> for String {
    fn from(t: ClassTime) -> Self {
        t.to_string()
    }
}
