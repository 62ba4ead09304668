//! Day-of-week type with the academy's fixed week order.
//!
//! Schedule rows store the Portuguese day label verbatim, so the label is
//! data, not presentation. The week starts on Segunda (Monday) and ends on
//! Domingo (Sunday); [`Weekday::index`] follows that order and feeds the
//! schedule sort key.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Weekday`].
#[derive(thiserror::Error, Debug, Clone)]
pub enum WeekdayError {
    /// The input is not one of the seven known day labels.
    #[error("unknown day of week: {0}")]
    Unknown(String),
}

/// A day of the week, labeled in Portuguese as stored by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Weekday {
    Segunda,
    #[serde(rename = "Terça")]
    Terca,
    Quarta,
    Quinta,
    Sexta,
    #[serde(rename = "Sábado")]
    Sabado,
    Domingo,
}

impl Weekday {
    /// All days in week order (Segunda first).
    pub const ALL: [Self; 7] = [
        Self::Segunda,
        Self::Terca,
        Self::Quarta,
        Self::Quinta,
        Self::Sexta,
        Self::Sabado,
        Self::Domingo,
    ];

    /// Position of this day in the fixed week order, starting at 0.
    #[must_use]
    pub const fn index(self) -> u32 {
        match self {
            Self::Segunda => 0,
            Self::Terca => 1,
            Self::Quarta => 2,
            Self::Quinta => 3,
            Self::Sexta => 4,
            Self::Sabado => 5,
            Self::Domingo => 6,
        }
    }

    /// The label stored in schedule rows.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Segunda => "Segunda",
            Self::Terca => "Terça",
            Self::Quarta => "Quarta",
            Self::Quinta => "Quinta",
            Self::Sexta => "Sexta",
            Self::Sabado => "Sábado",
            Self::Domingo => "Domingo",
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl std::str::FromStr for Weekday {
    type Err = WeekdayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Segunda" => Ok(Self::Segunda),
            "Terça" => Ok(Self::Terca),
            "Quarta" => Ok(Self::Quarta),
            "Quinta" => Ok(Self::Quinta),
            "Sexta" => Ok(Self::Sexta),
            "Sábado" => Ok(Self::Sabado),
            "Domingo" => Ok(Self::Domingo),
            other => Err(WeekdayError::Unknown(other.to_string())),
        }
    }
}
