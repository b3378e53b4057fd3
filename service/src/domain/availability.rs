//! [`AvailabilityIndex`] definitions.

use std::collections::BTreeSet;

use common::Date;

use super::{booking::ExistingBooking, range::DateRange};

/// Index of calendar [`Date`]s a venue is unavailable on.
///
/// Built from the venue's [`ExistingBooking`]s and a fixed `today` [`Date`].
/// The result is a set, so it doesn't depend on the order the bookings are
/// supplied in.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AvailabilityIndex {
    /// [`Date`] considered "today" at the time this index was built.
    today: Date,

    /// [`Date`]s occupied by pending or confirmed bookings.
    blocked: BTreeSet<Date>,
}

impl AvailabilityIndex {
    /// Builds a new [`AvailabilityIndex`] from the provided
    /// [`ExistingBooking`]s.
    ///
    /// Bookings that don't [`occupy`] their dates are skipped. A booking
    /// whose end precedes its start is malformed upstream data: it
    /// contributes a single-day block at its start and is logged, since a
    /// calendar must keep rendering on bad data.
    ///
    /// [`occupy`]: ExistingBooking::occupies
    pub fn new(
        today: Date,
        bookings: impl IntoIterator<Item = ExistingBooking>,
    ) -> Self {
        let mut blocked = BTreeSet::new();
        for b in bookings {
            if !b.occupies() {
                continue;
            }

            if b.end < b.start {
                tracing::warn!(
                    booking = %b.id,
                    start = %b.start,
                    end = %b.end,
                    "booking range ends before it starts, \
                     blocking its start date only",
                );
                _ = blocked.insert(b.start);
            } else {
                blocked.extend(b.start.until(b.end));
            }
        }

        Self { today, blocked }
    }

    /// Returns the set of [`Date`]s occupied by pending or confirmed
    /// bookings.
    ///
    /// [`Date`]s before today are blocked unconditionally and are not
    /// enumerated here; use [`is_blocked()`] for point queries.
    ///
    /// [`is_blocked()`]: AvailabilityIndex::is_blocked
    #[must_use]
    pub fn blocked_dates(&self) -> &BTreeSet<Date> {
        &self.blocked
    }

    /// Indicates whether the provided [`Date`] is blocked.
    #[must_use]
    pub fn is_blocked(&self, date: Date) -> bool {
        date < self.today || self.blocked.contains(&date)
    }

    /// Indicates whether every [`Date`] of the provided [`DateRange`] is
    /// free.
    ///
    /// This is the advisory client-side answer; the marketplace's own check
    /// remains authoritative and wins on disagreement.
    #[must_use]
    pub fn is_range_available(&self, range: &DateRange) -> bool {
        !range.starts_before(self.today)
            && !range.days().any(|d| self.is_blocked(d))
    }
}

#[cfg(test)]
mod spec {
    use std::str::FromStr as _;

    use common::Date;

    use crate::domain::{
        booking::{self, ExistingBooking, Status},
        range::DateRange,
    };

    use super::AvailabilityIndex;

    fn date(s: &str) -> Date {
        Date::from_str(s).unwrap()
    }

    fn booking(start: &str, end: &str, status: Status) -> ExistingBooking {
        ExistingBooking {
            id: booking::Id::new(),
            start: date(start),
            end: date(end),
            status,
        }
    }

    fn range(start: &str, end: &str) -> DateRange {
        DateRange::from_parts(date(start), Some(date(end))).unwrap()
    }

    const TODAY: &str = "2025-10-01";

    #[test]
    fn union_is_order_independent() {
        let bookings = [
            booking("2025-10-05", "2025-10-07", Status::Confirmed),
            booking("2025-10-06", "2025-10-09", Status::Pending),
            booking("2025-10-20", "2025-10-21", Status::Confirmed),
        ];

        let forward =
            AvailabilityIndex::new(date(TODAY), bookings.iter().copied());
        let backward = AvailabilityIndex::new(
            date(TODAY),
            bookings.iter().rev().copied(),
        );
        let rotated = AvailabilityIndex::new(
            date(TODAY),
            bookings.iter().cycle().skip(1).take(3).copied(),
        );

        assert_eq!(forward.blocked_dates(), backward.blocked_dates());
        assert_eq!(forward.blocked_dates(), rotated.blocked_dates());
        assert_eq!(forward.blocked_dates().len(), 9);
    }

    #[test]
    fn cancelled_and_completed_never_block() {
        let index = AvailabilityIndex::new(
            date(TODAY),
            [
                booking("2025-10-05", "2025-10-07", Status::Cancelled),
                booking("2025-10-10", "2025-10-12", Status::Completed),
            ],
        );

        assert!(index.blocked_dates().is_empty());
        assert!(index.is_range_available(&range("2025-10-05", "2025-10-06")));
    }

    #[test]
    fn past_dates_are_always_blocked() {
        let index = AvailabilityIndex::new(date(TODAY), []);

        assert!(index.is_blocked(date("2025-09-30")));
        assert!(!index.is_blocked(date(TODAY)));

        let past = range("2025-09-29", "2025-10-02");
        assert!(!index.is_range_available(&past));
    }

    #[test]
    fn malformed_booking_blocks_its_start_only() {
        let index = AvailabilityIndex::new(
            date(TODAY),
            [booking("2025-10-07", "2025-10-05", Status::Confirmed)],
        );

        assert_eq!(
            index.blocked_dates().iter().copied().collect::<Vec<_>>(),
            vec![date("2025-10-07")],
        );
    }

    #[test]
    fn overlapping_confirmed_booking_blocks_range() {
        // Confirmed booking covering Oct 5-7 makes Oct 6-8 unavailable.
        let index = AvailabilityIndex::new(
            date(TODAY),
            [booking("2025-10-05", "2025-10-07", Status::Confirmed)],
        );

        assert!(!index.is_range_available(&range("2025-10-06", "2025-10-08")));
        assert!(index.is_range_available(&range("2025-10-08", "2025-10-09")));
    }
}
