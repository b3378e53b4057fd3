//! Calendar [`Date`] utilities.

use std::{fmt, ops, str::FromStr};

use derive_more::{Display, Error};
use time::{format_description::BorrowedFormatItem, macros::format_description};

/// [ISO 8601] calendar date format (`YYYY-MM-DD`).
///
/// [ISO 8601]: https://wikipedia.org/wiki/ISO_8601
const ISO8601_DATE: &[BorrowedFormatItem<'_>] =
    format_description!("[year]-[month]-[day]");

/// Calendar date without a time component.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Date(time::Date);

impl Date {
    /// Returns the current [`Date`] in UTC.
    #[must_use]
    pub fn today() -> Self {
        Self(time::OffsetDateTime::now_utc().date())
    }

    /// Returns the [`Date`] following this one.
    ///
    /// [`None`] is returned on calendar overflow.
    #[must_use]
    pub fn next(self) -> Option<Self> {
        self.0.next_day().map(Self)
    }

    /// Indicates whether this [`Date`] falls on a weekend (Friday, Saturday
    /// or Sunday).
    #[must_use]
    pub fn is_weekend(self) -> bool {
        use time::Weekday as W;

        matches!(self.0.weekday(), W::Friday | W::Saturday | W::Sunday)
    }

    /// Returns an [`Iterator`] over the [`Date`]s from this one up to the
    /// provided `until` one, inclusively.
    ///
    /// Empty if `until` is before this [`Date`].
    pub fn until(self, until: Self) -> impl Iterator<Item = Self> {
        let mut next = (self <= until).then_some(self);
        std::iter::from_fn(move || {
            let current = next?;
            next = current.next().filter(|d| *d <= until);
            Some(current)
        })
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = self
            .0
            .format(ISO8601_DATE)
            .unwrap_or_else(|e| panic!("cannot format `Date`: {e}"));
        write!(f, "{s}")
    }
}

impl FromStr for Date {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        time::Date::parse(s, ISO8601_DATE)
            .map(Self)
            .map_err(ParseError)
    }
}

/// Error of parsing a [`Date`] from a string.
#[derive(Clone, Copy, Debug, Display, Error)]
#[display("invalid `YYYY-MM-DD` date: {_0}")]
pub struct ParseError(time::error::Parse);

impl From<time::Date> for Date {
    fn from(d: time::Date) -> Self {
        Self(d)
    }
}

impl From<Date> for time::Date {
    fn from(d: Date) -> Self {
        d.0
    }
}

impl ops::Sub for Date {
    type Output = i64;

    fn sub(self, rhs: Self) -> Self::Output {
        (self.0 - rhs.0).whole_days()
    }
}

#[cfg(feature = "serde")]
mod serde {
    //! Module providing integration with [`serde`] crate.

    use std::str::FromStr as _;

    use serde::{de, Deserialize as _, Deserializer, Serialize, Serializer};

    use super::Date;

    /// Calendar date in `YYYY-MM-DD` format.
    impl Serialize for Date {
        fn serialize<S: Serializer>(
            &self,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            serializer.serialize_str(&self.to_string())
        }
    }

    impl<'de> serde::Deserialize<'de> for Date {
        fn deserialize<D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Self, D::Error> {
            let s = String::deserialize(deserializer)?;
            Self::from_str(&s).map_err(de::Error::custom)
        }
    }
}

#[cfg(test)]
mod spec {
    use std::str::FromStr as _;

    use super::Date;

    fn date(s: &str) -> Date {
        Date::from_str(s).unwrap()
    }

    #[test]
    fn parses_and_formats_iso8601() {
        assert_eq!(date("2025-10-05").to_string(), "2025-10-05");
        assert!(Date::from_str("05/10/2025").is_err());
        assert!(Date::from_str("2025-13-01").is_err());
    }

    #[test]
    fn orders_chronologically() {
        assert!(date("2025-10-05") < date("2025-10-06"));
        assert_eq!(date("2025-10-07") - date("2025-10-05"), 2);
    }

    #[test]
    fn until_is_inclusive() {
        let days = date("2025-10-05")
            .until(date("2025-10-07"))
            .collect::<Vec<_>>();
        assert_eq!(
            days,
            vec![date("2025-10-05"), date("2025-10-06"), date("2025-10-07")],
        );

        assert_eq!(
            date("2025-10-05").until(date("2025-10-05")).count(),
            1,
        );
        assert_eq!(
            date("2025-10-07").until(date("2025-10-05")).count(),
            0,
        );
    }

    #[test]
    fn weekend_covers_friday_to_sunday() {
        // 2025-10-03 is a Friday.
        assert!(date("2025-10-03").is_weekend());
        assert!(date("2025-10-04").is_weekend());
        assert!(date("2025-10-05").is_weekend());
        assert!(!date("2025-10-06").is_weekend());
        assert!(!date("2025-10-02").is_weekend());
    }
}
