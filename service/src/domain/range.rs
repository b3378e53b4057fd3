//! [`DateRange`] definitions.

use common::Date;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};

/// Inclusive range of calendar [`Date`]s selected for a booking.
///
/// An absent end means a 1-day booking equal to the start.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(try_from = "Repr", into = "Repr")]
pub struct DateRange {
    /// First [`Date`] of this [`DateRange`].
    start: Date,

    /// Last [`Date`] of this [`DateRange`], inclusive, if any.
    end: Option<Date>,
}

impl DateRange {
    /// Creates a new [`DateRange`], checking both its structural invariant
    /// (`end >= start`) and that it doesn't start before the provided
    /// `today` [`Date`].
    ///
    /// # Errors
    ///
    /// - [`InvalidError::EndsBeforeStart`] if `end < start`;
    /// - [`InvalidError::StartsInPast`] if `start < today`.
    pub fn new(
        start: Date,
        end: Option<Date>,
        today: Date,
    ) -> Result<Self, InvalidError> {
        let range = Self::from_parts(start, end)?;
        if range.starts_before(today) {
            return Err(InvalidError::StartsInPast);
        }
        Ok(range)
    }

    /// Creates a new [`DateRange`] checking only its structural invariant
    /// (`end >= start`).
    ///
    /// Used when reloading a previously staged selection, which may have
    /// aged into the past and is revalidated separately.
    ///
    /// # Errors
    ///
    /// [`InvalidError::EndsBeforeStart`] if `end < start`.
    pub fn from_parts(
        start: Date,
        end: Option<Date>,
    ) -> Result<Self, InvalidError> {
        if end.is_some_and(|e| e < start) {
            return Err(InvalidError::EndsBeforeStart);
        }
        Ok(Self { start, end })
    }

    /// Returns the first [`Date`] of this [`DateRange`].
    #[must_use]
    pub fn start(&self) -> Date {
        self.start
    }

    /// Returns the last [`Date`] of this [`DateRange`], inclusive.
    #[must_use]
    pub fn end_inclusive(&self) -> Date {
        self.end.unwrap_or(self.start)
    }

    /// Indicates whether this [`DateRange`] starts before the provided
    /// `today` [`Date`].
    #[must_use]
    pub fn starts_before(&self, today: Date) -> bool {
        self.start < today
    }

    /// Returns the inclusive number of days this [`DateRange`] spans.
    ///
    /// Always at least 1.
    #[expect(
        clippy::missing_panics_doc,
        reason = "`end >= start` is an invariant"
    )]
    #[must_use]
    pub fn num_days(&self) -> u32 {
        u32::try_from(self.end_inclusive() - self.start + 1)
            .expect("`end >= start` is an invariant")
    }

    /// Returns an [`Iterator`] over every [`Date`] of this [`DateRange`].
    pub fn days(&self) -> impl Iterator<Item = Date> {
        self.start.until(self.end_inclusive())
    }
}

/// Error of constructing an invalid [`DateRange`].
#[derive(Clone, Copy, Debug, Display, Eq, Error, PartialEq)]
pub enum InvalidError {
    /// End of the range is before its start.
    #[display("range ends before it starts")]
    EndsBeforeStart,

    /// Range starts before today.
    #[display("range starts in the past")]
    StartsInPast,
}

/// Serialized representation of a [`DateRange`].
#[derive(Clone, Copy, Debug, Deserialize, Serialize)]
struct Repr {
    /// First [`Date`] of the range.
    from: Date,

    /// Last [`Date`] of the range, inclusive, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    to: Option<Date>,
}

impl TryFrom<Repr> for DateRange {
    type Error = InvalidError;

    fn try_from(repr: Repr) -> Result<Self, Self::Error> {
        Self::from_parts(repr.from, repr.to)
    }
}

impl From<DateRange> for Repr {
    fn from(range: DateRange) -> Self {
        Self {
            from: range.start,
            to: range.end,
        }
    }
}

#[cfg(test)]
mod spec {
    use std::str::FromStr as _;

    use common::Date;

    use super::{DateRange, InvalidError};

    fn date(s: &str) -> Date {
        Date::from_str(s).unwrap()
    }

    #[test]
    fn absent_end_means_single_day() {
        let today = date("2025-10-01");
        let range = DateRange::new(date("2025-10-05"), None, today).unwrap();

        assert_eq!(range.num_days(), 1);
        assert_eq!(range.end_inclusive(), date("2025-10-05"));
    }

    #[test]
    fn day_count_is_inclusive() {
        let today = date("2025-10-01");
        let range =
            DateRange::new(date("2025-10-05"), Some(date("2025-10-07")), today)
                .unwrap();

        assert_eq!(range.num_days(), 3);
        assert_eq!(range.days().count(), 3);
    }

    #[test]
    fn rejects_end_before_start() {
        let today = date("2025-10-01");

        assert_eq!(
            DateRange::new(
                date("2025-10-07"),
                Some(date("2025-10-05")),
                today,
            ),
            Err(InvalidError::EndsBeforeStart),
        );
    }

    #[test]
    fn rejects_past_start() {
        let today = date("2025-10-01");

        assert_eq!(
            DateRange::new(date("2025-09-30"), None, today),
            Err(InvalidError::StartsInPast),
        );
        assert!(DateRange::new(date("2025-10-01"), None, today).is_ok());
    }

    #[test]
    fn serializes_as_from_to() {
        let range = DateRange::from_parts(
            date("2025-10-05"),
            Some(date("2025-10-07")),
        )
        .unwrap();

        let json = serde_json::to_value(range).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"from": "2025-10-05", "to": "2025-10-07"}),
        );

        let back: DateRange = serde_json::from_value(json).unwrap();
        assert_eq!(back, range);

        assert!(serde_json::from_value::<DateRange>(serde_json::json!({
            "from": "2025-10-07",
            "to": "2025-10-05",
        }))
        .is_err());
    }
}
