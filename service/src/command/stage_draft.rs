//! [`StageDraft`] [`Command`] definition.

use common::{
    operations::{By, Insert, Perform, Select},
    Date, DateTime,
};
use derive_more::{Display, Error as StdError, From};
use tracerr::Traced;

use crate::{
    domain::{
        draft::{BookingDraft, Guests, Stage, VenueCard},
        price,
        range::DateRange,
        venue::{self, add_on},
        AvailabilityIndex, PriceCalculator, Venue,
    },
    infra::{marketplace, session, Marketplace, Sessions},
    query,
    read::{
        availability::{Probe, Verdict},
        booking::list,
    },
    Service,
};

use super::Command;

/// [`Command`] staging a new [`BookingDraft`] out of the venue page
/// selection.
///
/// Revalidates the selection end-to-end before writing: the venue must
/// exist, the range must be bookable both by the advisory index and by the
/// collaborator's authoritative check, and every selected add-on must belong
/// to the venue.
///
/// A session without an [`Id`] gets a fresh one minted; a session already
/// holding a draft gets it replaced.
///
/// [`Id`]: session::Id
#[derive(Clone, Debug)]
pub struct StageDraft {
    /// [`session::Id`] of an existing booking session, if any.
    pub session: Option<session::Id>,

    /// [`venue::Selector`] of the venue to book.
    pub venue: venue::Selector,

    /// Selected [`DateRange`].
    pub range: DateRange,

    /// Selected add-ons.
    pub add_ons: Vec<add_on::Id>,

    /// Expected [`Guests`].
    pub guests: Guests,
}

/// Result of a [`StageDraft`] [`Command`] execution.
#[derive(Clone, Debug)]
pub struct Staged {
    /// [`session::Id`] owning the staged draft.
    pub session: session::Id,

    /// Staged [`BookingDraft`].
    pub draft: BookingDraft,
}

impl<Mp, St> Command<StageDraft> for Service<Mp, St>
where
    Mp: Marketplace<
            Select<By<Option<Venue>, venue::Selector>>,
            Ok = Option<Venue>,
            Err = Traced<marketplace::Error>,
        > + Marketplace<
            Select<By<list::Page, list::Selector>>,
            Ok = list::Page,
            Err = Traced<marketplace::Error>,
        > + Marketplace<
            Perform<Probe>,
            Ok = Verdict,
            Err = Traced<marketplace::Error>,
        >,
    St: Sessions<
        Insert<session::Slot>,
        Ok = (),
        Err = Traced<session::Error>,
    >,
{
    type Ok = Staged;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: StageDraft) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let StageDraft {
            session,
            venue,
            range,
            add_ons,
            guests,
        } = cmd;

        let venue = self
            .marketplace()
            .execute(Select(By::<Option<Venue>, _>::new(venue.clone())))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::VenueNotExists(venue))
            .map_err(tracerr::wrap!())?;

        let bookings =
            query::availability::all_bookings(self.marketplace(), venue.id)
                .await
                .map_err(tracerr::map_from_and_wrap!(=> E))?;
        let index = AvailabilityIndex::new(Date::today(), bookings);
        if !index.is_range_available(&range) {
            return Err(tracerr::new!(E::DatesUnavailable));
        }

        // The advisory index may be stale, so the collaborator has the last
        // word. Its failure propagates: "cannot confirm" is not "available".
        let verdict = self
            .marketplace()
            .execute(Perform(Probe {
                venue: venue.id,
                range,
            }))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        if !verdict.available {
            return Err(tracerr::new!(E::DatesUnavailable));
        }

        let breakdown = PriceCalculator::new(self.config().fees)
            .breakdown(&venue, range, &add_ons)
            .map_err(tracerr::from_and_wrap!(=> E))?;

        let draft = BookingDraft {
            venue: VenueCard {
                id: venue.id,
                name: venue.name.clone(),
                address: venue.address.clone(),
                image: venue.image.clone(),
                start_price: venue.pricing.starting_rate(),
            },
            range,
            add_ons: super::denormalize_add_ons(&venue, &add_ons),
            guests,
            breakdown,
            stage: Stage::Staged,
            created_at: DateTime::now().coerce(),
        };

        let session = session.unwrap_or_else(session::Id::new);
        self.sessions()
            .execute(Insert(session::Slot {
                session,
                draft: draft.clone(),
            }))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        Ok(Staged { session, draft })
    }
}

/// Error of a [`StageDraft`] [`Command`] execution.
#[derive(Debug, Display, From, StdError)]
pub enum ExecutionError {
    /// Marketplace collaborator failed.
    Marketplace(marketplace::Error),

    /// Draft-session store failed.
    Sessions(session::Error),

    /// Booked [`Venue`] doesn't exist.
    #[display("`Venue(selector: {_0})` doesn't exist")]
    #[from(ignore)]
    VenueNotExists(#[error(not(source))] venue::Selector),

    /// Selected [`DateRange`] cannot be booked.
    #[display("selected dates are unavailable")]
    #[from(ignore)]
    DatesUnavailable,

    /// Selection cannot be priced.
    Price(price::Error),
}

#[cfg(test)]
mod spec {
    use common::{
        operations::{By, Select},
        Date,
    };

    use crate::{
        domain::{
            booking::{self, ExistingBooking, Status},
            draft::{BookingDraft, Guests, Headcount, Stage},
            venue,
        },
        infra::Sessions as _,
        stub,
    };

    use super::{Command as _, ExecutionError as E, StageDraft};

    fn guests() -> Guests {
        Guests::Count(Headcount::new(50).unwrap())
    }

    #[tokio::test]
    async fn stages_a_draft_and_mints_a_session() {
        let service = stub::service(stub::Marketplace::default());

        let staged = service
            .execute(StageDraft {
                session: None,
                venue: venue::Selector::Id(venue::Id::new()),
                range: stub::tomorrow(),
                add_ons: vec![],
                guests: guests(),
            })
            .await
            .unwrap();

        assert_eq!(staged.draft.stage, Stage::Staged);
        assert_eq!(staged.draft.breakdown.grand_total, stub::ngn(161_250));

        let stored = service
            .sessions()
            .execute(Select(By::<Option<BookingDraft>, _>::new(
                staged.session,
            )))
            .await
            .unwrap();
        assert!(stored.is_some());
    }

    #[tokio::test]
    async fn rejects_collaborator_verdict_of_unavailable() {
        let service = stub::service(stub::Marketplace {
            available: false,
            ..stub::Marketplace::default()
        });

        let err = service
            .execute(StageDraft {
                session: None,
                venue: venue::Selector::Id(venue::Id::new()),
                range: stub::tomorrow(),
                add_ons: vec![],
                guests: guests(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err.as_ref(), E::DatesUnavailable));
    }

    #[tokio::test]
    async fn rejects_dates_blocked_by_existing_bookings() {
        let tomorrow = Date::today().next().unwrap();
        let service = stub::service(stub::Marketplace {
            bookings: vec![ExistingBooking {
                id: booking::Id::new(),
                start: tomorrow,
                end: tomorrow,
                status: Status::Confirmed,
            }],
            ..stub::Marketplace::default()
        });

        let err = service
            .execute(StageDraft {
                session: None,
                venue: venue::Selector::Id(venue::Id::new()),
                range: stub::tomorrow(),
                add_ons: vec![],
                guests: guests(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err.as_ref(), E::DatesUnavailable));
    }

    #[tokio::test]
    async fn replaces_prior_draft_of_the_session() {
        let service = stub::service(stub::Marketplace::default());

        let first = service
            .execute(StageDraft {
                session: None,
                venue: venue::Selector::Id(venue::Id::new()),
                range: stub::tomorrow(),
                add_ons: vec![],
                guests: guests(),
            })
            .await
            .unwrap();
        let catering = stub::venue().add_ons[0].id;
        let second = service
            .execute(StageDraft {
                session: Some(first.session),
                venue: venue::Selector::Id(venue::Id::new()),
                range: stub::tomorrow(),
                add_ons: vec![catering],
                guests: guests(),
            })
            .await
            .unwrap();

        assert_eq!(first.session, second.session);
        assert_ne!(
            first.draft.breakdown.grand_total,
            second.draft.breakdown.grand_total,
        );
    }

    #[tokio::test]
    async fn rejects_foreign_add_on() {
        let service = stub::service(stub::Marketplace::default());

        let err = service
            .execute(StageDraft {
                session: None,
                venue: venue::Selector::Id(venue::Id::new()),
                range: stub::tomorrow(),
                add_ons: vec![venue::add_on::Id::new()],
                guests: guests(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err.as_ref(), E::Price(_)));
    }
}
