//! Schedule sort key.

use serde::{Deserialize, Serialize};

use super::class_time::ClassTime;
use super::weekday::Weekday;

/// The numeric key that orders schedule entries week-then-time.
///
/// `sort_key = weekday_index * 10000 + (hour * 100 + minute)`. A single
/// ascending sort on this key yields Segunda before Domingo and earlier
/// classes before later ones within a day, with no secondary sort clause.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct SortKey(u32);

impl SortKey {
    /// Spacing between consecutive days. Large enough that any valid
    /// time-of-day numeric (at most 2359) stays below the next day.
    const DAY_STRIDE: u32 = 10_000;

    /// Compute the sort key for a (day, time) pair.
    #[must_use]
    pub const fn compute(day: Weekday, time: ClassTime) -> Self {
        Self(day.index() * Self::DAY_STRIDE + time.numeric())
    }

    /// The raw numeric value as stored in the schedule row.
    #[must_use]
    pub const fn as_u32(self) -> u32 {
        self.0
    }
}

impl From<u32> for SortKey {
    fn from(raw: u32) -> Self {
        Self(raw)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_known_values() {
        let t = ClassTime::parse("07:00").unwrap();
        assert_eq!(SortKey::compute(Weekday::Segunda, t).as_u32(), 700);
        assert_eq!(SortKey::compute(Weekday::Terca, t).as_u32(), 10_700);
        assert_eq!(SortKey::compute(Weekday::Domingo, t).as_u32(), 60_700);
    }

    #[test]
    fn test_strictly_increasing_across_days() {
        // Latest possible class on one day sorts before the earliest on the
        // next day.
        let latest = ClassTime::parse("23:59").unwrap();
        let earliest = ClassTime::parse("00:00").unwrap();

        for pair in Weekday::ALL.windows(2) {
            let end_of_day = SortKey::compute(pair[0], latest);
            let start_of_next = SortKey::compute(pair[1], earliest);
            assert!(end_of_day < start_of_next, "{:?} vs {:?}", pair[0], pair[1]);
        }
    }

    #[test]
    fn test_increasing_by_time_within_a_day() {
        for day in Weekday::ALL {
            let six = SortKey::compute(day, ClassTime::parse("06:00").unwrap());
            let six_thirty = SortKey::compute(day, ClassTime::parse("06:30").unwrap());
            let nineteen = SortKey::compute(day, ClassTime::parse("19:00").unwrap());
            assert!(six < six_thirty);
            assert!(six_thirty < nineteen);
        }
    }

    #[test]
    fn test_later_day_earlier_time_still_sorts_after() {
        // Segunda 07:00 must precede Terça 06:00 regardless of time.
        let segunda = SortKey::compute(Weekday::Segunda, ClassTime::parse("07:00").unwrap());
        let terca = SortKey::compute(Weekday::Terca, ClassTime::parse("06:00").unwrap());
        assert!(segunda < terca);
    }
}
