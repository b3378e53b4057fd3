//! [`ExistingBooking`] wire definitions.

use common::{Date, Money};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{
    booking::{ExistingBooking, Status},
    draft::Guests,
    range::DateRange,
    venue::{self, add_on},
};

/// Booking payload as returned by `GET /bookings?listingId={id}`.
///
/// The aliases cover the fallback field names observed in collaborator
/// responses. An absent end date means a single-day booking.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingDto {
    /// ID of the booking.
    pub id: Uuid,

    /// First occupied date.
    #[serde(alias = "from", alias = "checkIn")]
    pub start_date: Date,

    /// Last occupied date, inclusive.
    #[serde(default, alias = "to", alias = "checkOut")]
    pub end_date: Option<Date>,

    /// Status of the booking.
    pub status: Status,
}

impl From<BookingDto> for ExistingBooking {
    fn from(dto: BookingDto) -> Self {
        Self {
            id: dto.id.into(),
            start: dto.start_date,
            end: dto.end_date.unwrap_or(dto.start_date),
            status: dto.status,
        }
    }
}

pub mod list {
    //! [`ExistingBooking`]s list definitions.

    use common::define_pagination;

    use crate::domain::{booking::ExistingBooking, venue};

    define_pagination!(ExistingBooking, Filter);

    /// Filter for [`Selector`].
    #[derive(Clone, Copy, Debug)]
    pub struct Filter {
        /// [`venue::Id`] to list bookings of.
        pub venue: venue::Id,
    }
}

/// Page payload as returned by `GET /bookings?listingId={id}&page={n}`.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageDto {
    /// Bookings on this page.
    #[serde(alias = "results", alias = "data")]
    pub items: Vec<BookingDto>,

    /// Indicator whether more pages follow this one.
    #[serde(default, alias = "hasNextPage")]
    pub has_more: bool,
}

impl PageDto {
    /// Normalizes this [`PageDto`] into a [`list::Page`].
    #[must_use]
    pub fn into_page(self, number: common::pagination::Number) -> list::Page {
        list::Page {
            items: self.items.into_iter().map(Into::into).collect(),
            number,
            has_more: self.has_more,
        }
    }
}

/// Payload submitted as `POST /bookings`.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    /// ID of the booked venue.
    pub listing_id: venue::Id,

    /// First booked date.
    pub start_date: Date,

    /// Last booked date, inclusive.
    pub end_date: Date,

    /// Selected add-on IDs.
    pub add_ons: Vec<add_on::Id>,

    /// Expected guests.
    pub guests: Guests,

    /// Grand total the user confirmed.
    pub total: Money,
}

impl Submission {
    /// Creates a new [`Submission`] of the provided [`DateRange`].
    #[must_use]
    pub fn new(
        listing_id: venue::Id,
        range: DateRange,
        add_ons: Vec<add_on::Id>,
        guests: Guests,
        total: Money,
    ) -> Self {
        Self {
            listing_id,
            start_date: range.start(),
            end_date: range.end_inclusive(),
            add_ons,
            guests,
            total,
        }
    }
}

/// Booking record created by a [`Submission`].
#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Receipt {
    /// ID of the created booking.
    pub id: Uuid,
}
