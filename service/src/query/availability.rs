//! Availability queries.

use common::{
    operations::{By, Perform, Select},
    Date,
};
use tracerr::Traced;

use crate::{
    domain::{range::DateRange, venue, AvailabilityIndex, ExistingBooking},
    infra::{marketplace, Marketplace},
    read::{
        availability::{Probe, Verdict},
        booking::list,
    },
    Service,
};

use super::Query;

/// Walks every page of the venue's bookings.
///
/// The collaborator paginates its booking list, so a single page is never
/// enough to build a correct [`AvailabilityIndex`].
pub(crate) async fn all_bookings<Mp>(
    marketplace: &Mp,
    venue: venue::Id,
) -> Result<Vec<ExistingBooking>, Traced<marketplace::Error>>
where
    Mp: Marketplace<
        Select<By<list::Page, list::Selector>>,
        Ok = list::Page,
        Err = Traced<marketplace::Error>,
    >,
{
    let mut bookings = Vec::new();
    let mut selector = list::Selector::first(list::Filter { venue });
    loop {
        let page = marketplace
            .execute(Select(By::new(selector)))
            .await
            .map_err(tracerr::wrap!())?;
        bookings.extend(page.items.iter().copied());
        match page.next() {
            Some(number) => selector.number = number,
            None => break,
        }
    }
    Ok(bookings)
}

/// [`Query`] of the [`AvailabilityIndex`] of a venue, built from all its
/// current bookings.
#[derive(Clone, Copy, Debug)]
pub struct BlockedDates {
    /// [`venue::Id`] to index availability of.
    pub venue: venue::Id,
}

impl<Mp, St> Query<BlockedDates> for Service<Mp, St>
where
    Mp: Marketplace<
        Select<By<list::Page, list::Selector>>,
        Ok = list::Page,
        Err = Traced<marketplace::Error>,
    >,
{
    type Ok = AvailabilityIndex;
    type Err = Traced<marketplace::Error>;

    async fn execute(
        &self,
        query: BlockedDates,
    ) -> Result<Self::Ok, Self::Err> {
        let bookings = all_bookings(self.marketplace(), query.venue)
            .await
            .map_err(tracerr::wrap!())?;
        Ok(AvailabilityIndex::new(Date::today(), bookings))
    }
}

/// [`Query`] checking whether a [`DateRange`] of a venue can be booked.
///
/// Answers with both the advisory [`AvailabilityIndex`] verdict and the
/// collaborator's authoritative one. A failed authoritative [`Probe`]
/// propagates as an error: "cannot confirm" never means "available".
#[derive(Clone, Copy, Debug)]
pub struct CheckRange {
    /// [`venue::Id`] to check.
    pub venue: venue::Id,

    /// Candidate [`DateRange`].
    pub range: DateRange,
}

/// Result of a [`CheckRange`] query.
#[derive(Clone, Copy, Debug)]
pub struct Confirmation {
    /// Advisory verdict of the locally built [`AvailabilityIndex`].
    pub advisory: bool,

    /// Authoritative verdict of the collaborator. Wins on disagreement.
    pub available: bool,
}

impl<Mp, St> Query<CheckRange> for Service<Mp, St>
where
    Mp: Marketplace<
            Select<By<list::Page, list::Selector>>,
            Ok = list::Page,
            Err = Traced<marketplace::Error>,
        > + Marketplace<
            Perform<Probe>,
            Ok = Verdict,
            Err = Traced<marketplace::Error>,
        >,
{
    type Ok = Confirmation;
    type Err = Traced<marketplace::Error>;

    async fn execute(&self, query: CheckRange) -> Result<Self::Ok, Self::Err> {
        let CheckRange { venue, range } = query;

        let bookings = all_bookings(self.marketplace(), venue)
            .await
            .map_err(tracerr::wrap!())?;
        let advisory = AvailabilityIndex::new(Date::today(), bookings)
            .is_range_available(&range);

        let Verdict { available } = self
            .marketplace()
            .execute(Perform(Probe { venue, range }))
            .await
            .map_err(tracerr::wrap!())?;

        if advisory != available {
            tracing::warn!(
                %venue,
                advisory,
                available,
                "advisory availability disagrees with the marketplace",
            );
        }

        Ok(Confirmation {
            advisory,
            available,
        })
    }
}
