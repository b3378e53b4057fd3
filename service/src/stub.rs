//! Stubbed backends and fixtures for tests.

use common::{
    money::Currency,
    operations::{By, Insert, Perform, Select},
    Date, DateTime, Handler, Money,
};
use rust_decimal::Decimal;
use tracerr::Traced;
use uuid::Uuid;

use crate::{
    domain::{
        draft::{BookingDraft, Guests, Headcount, Stage, VenueCard},
        range::DateRange,
        venue::{self, add_on, AddOn, Pricing, Venue},
        ExistingBooking, PriceCalculator,
    },
    infra::{marketplace, InMemory},
    read::{
        availability::{Probe, Verdict},
        booking::{list, Receipt, Submission},
    },
    Config, Service,
};

/// Stubbed marketplace collaborator answering out of fixed state.
#[derive(Clone, Debug)]
pub(crate) struct Marketplace {
    /// Venue every lookup resolves to.
    pub(crate) venue: Option<Venue>,

    /// Bookings listed on the single page.
    pub(crate) bookings: Vec<ExistingBooking>,

    /// Verdict of every availability probe.
    pub(crate) available: bool,

    /// Whether every submission is rejected as a dates conflict.
    pub(crate) reject_submission: bool,
}

impl Default for Marketplace {
    fn default() -> Self {
        Self {
            venue: Some(venue()),
            bookings: Vec::new(),
            available: true,
            reject_submission: false,
        }
    }
}

impl Handler<Select<By<Option<Venue>, venue::Selector>>> for Marketplace {
    type Ok = Option<Venue>;
    type Err = Traced<marketplace::Error>;

    async fn execute(
        &self,
        _: Select<By<Option<Venue>, venue::Selector>>,
    ) -> Result<Self::Ok, Self::Err> {
        Ok(self.venue.clone())
    }
}

impl Handler<Select<By<list::Page, list::Selector>>> for Marketplace {
    type Ok = list::Page;
    type Err = Traced<marketplace::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<list::Page, list::Selector>>,
    ) -> Result<Self::Ok, Self::Err> {
        Ok(list::Page {
            items: self.bookings.clone(),
            number: by.into_inner().number,
            has_more: false,
        })
    }
}

impl Handler<Perform<Probe>> for Marketplace {
    type Ok = Verdict;
    type Err = Traced<marketplace::Error>;

    async fn execute(&self, _: Perform<Probe>) -> Result<Self::Ok, Self::Err> {
        Ok(Verdict {
            available: self.available,
        })
    }
}

impl Handler<Insert<Submission>> for Marketplace {
    type Ok = Receipt;
    type Err = Traced<marketplace::Error>;

    async fn execute(
        &self,
        _: Insert<Submission>,
    ) -> Result<Self::Ok, Self::Err> {
        if self.reject_submission {
            return Err(tracerr::new!(marketplace::Error::Conflict));
        }
        Ok(Receipt { id: Uuid::new_v4() })
    }
}

/// Assembles a [`Service`] over the provided stubbed `marketplace`.
pub(crate) fn service(
    marketplace: Marketplace,
) -> Service<Marketplace, InMemory> {
    Service::new(Config::default(), marketplace, InMemory::default())
}

pub(crate) fn ngn(amount: i64) -> Money {
    Money::new(Decimal::from(amount), Currency::Ngn)
}

/// Venue with a flat 100 000 daily rate and a single "Catering" add-on.
///
/// IDs are fixed, so every call returns the very same venue.
pub(crate) fn venue() -> Venue {
    Venue {
        id: venue::Id::from(Uuid::from_u128(0x10)),
        slug: None,
        name: "Eko Hall".parse().expect("valid name"),
        address: "12 Marina Rd, Lagos".parse().expect("valid address"),
        image: None,
        pricing: Pricing::Flat(ngn(100_000)),
        add_ons: vec![AddOn {
            id: add_on::Id::from(Uuid::from_u128(0x20)),
            name: "Catering".parse().expect("valid name"),
            price: ngn(350_000),
        }],
    }
}

/// Single-day [`DateRange`] of tomorrow, guaranteed not to be in the past.
pub(crate) fn tomorrow() -> DateRange {
    let start = Date::today().next().expect("no calendar overflow");
    DateRange::from_parts(start, None).expect("valid range")
}

/// [`BookingDraft`] of [`venue()`] over [`tomorrow()`] at the given `stage`.
pub(crate) fn draft(stage: Stage) -> BookingDraft {
    let venue = venue();
    let range = tomorrow();
    let breakdown = PriceCalculator::default()
        .breakdown(&venue, range, &[])
        .expect("priceable selection");
    BookingDraft {
        venue: VenueCard {
            id: venue.id,
            name: venue.name.clone(),
            address: venue.address.clone(),
            image: None,
            start_price: venue.pricing.starting_rate(),
        },
        range,
        add_ons: Vec::new(),
        guests: Guests::Count(Headcount::new(50).expect("positive")),
        breakdown,
        stage,
        created_at: DateTime::now().coerce(),
    }
}
