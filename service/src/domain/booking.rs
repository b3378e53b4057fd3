//! [`ExistingBooking`] definitions.

use common::Date;
use derive_more::{Display, From, FromStr, Into};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[cfg(doc)]
use super::Venue;

/// Booking already recorded against a [`Venue`], as reported by the
/// marketplace.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ExistingBooking {
    /// ID of this [`ExistingBooking`].
    pub id: Id,

    /// First occupied [`Date`].
    pub start: Date,

    /// Last occupied [`Date`], inclusive.
    ///
    /// A value before [`start`] is malformed upstream data and is treated as
    /// a single-day booking at [`start`].
    ///
    /// [`start`]: ExistingBooking::start
    pub end: Date,

    /// [`Status`] of this [`ExistingBooking`].
    pub status: Status,
}

impl ExistingBooking {
    /// Indicates whether this [`ExistingBooking`] occupies its dates.
    ///
    /// Cancelled and completed bookings never block a calendar.
    #[must_use]
    pub fn occupies(&self) -> bool {
        match self.status {
            Status::Pending | Status::Confirmed => true,
            Status::Cancelled | Status::Completed => false,
        }
    }
}

/// ID of an [`ExistingBooking`].
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Deserialize,
    Display,
    Eq,
    From,
    FromStr,
    Hash,
    Into,
    PartialEq,
    Serialize,
)]
pub struct Id(Uuid);

impl Id {
    /// Creates a new random [`Id`].
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

/// Status of an [`ExistingBooking`].
#[derive(
    Clone,
    Copy,
    Debug,
    Deserialize,
    Eq,
    PartialEq,
    Serialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    /// Requested but not confirmed yet. Occupies its dates.
    Pending = 1,

    /// Confirmed by the vendor. Occupies its dates.
    Confirmed = 2,

    /// Cancelled. Never occupies dates.
    Cancelled = 3,

    /// Already happened. Never occupies dates.
    Completed = 4,
}
