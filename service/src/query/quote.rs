//! Price quotation queries.

use common::operations::{By, Select};
use derive_more::{Display, Error as StdError, From};
use tracerr::Traced;

use crate::{
    domain::{
        price,
        range::DateRange,
        venue::{self, add_on},
        PriceBreakdown, PriceCalculator, Venue,
    },
    infra::{marketplace, Marketplace},
    Service,
};

use super::Query;

/// [`Query`] pricing a booking selection without staging a draft.
///
/// Powers the live price panel of the venue page: every change of dates or
/// add-ons re-runs this query.
#[derive(Clone, Debug)]
pub struct Quote {
    /// [`venue::Selector`] of the venue to price.
    pub venue: venue::Selector,

    /// Selected [`DateRange`].
    pub range: DateRange,

    /// Selected add-ons.
    pub add_ons: Vec<add_on::Id>,
}

impl<Mp, St> Query<Quote> for Service<Mp, St>
where
    Mp: Marketplace<
        Select<By<Option<Venue>, venue::Selector>>,
        Ok = Option<Venue>,
        Err = Traced<marketplace::Error>,
    >,
{
    type Ok = PriceBreakdown;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, query: Quote) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let Quote {
            venue,
            range,
            add_ons,
        } = query;

        let venue = self
            .marketplace()
            .execute(Select(By::<Option<Venue>, _>::new(venue.clone())))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::VenueNotExists(venue))
            .map_err(tracerr::wrap!())?;

        PriceCalculator::new(self.config().fees)
            .breakdown(&venue, range, &add_ons)
            .map_err(tracerr::from_and_wrap!(=> E))
    }
}

/// Error of a [`Quote`] query execution.
#[derive(Debug, Display, From, StdError)]
pub enum ExecutionError {
    /// Marketplace collaborator failed.
    Marketplace(marketplace::Error),

    /// Priced [`Venue`] doesn't exist.
    #[display("`Venue(selector: {_0})` doesn't exist")]
    #[from(ignore)]
    VenueNotExists(#[error(not(source))] venue::Selector),

    /// Selection cannot be priced.
    Price(price::Error),
}
