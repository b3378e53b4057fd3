//! Domain definitions.

pub mod availability;
pub mod booking;
pub mod draft;
pub mod price;
pub mod range;
pub mod venue;

pub use self::{
    availability::AvailabilityIndex,
    booking::ExistingBooking,
    draft::BookingDraft,
    price::{PriceBreakdown, PriceCalculator},
    range::DateRange,
    venue::Venue,
};
