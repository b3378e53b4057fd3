//! [`ReviewDraft`] [`Command`] definition.

use common::{
    operations::{By, Select, Update},
    Date, Money,
};
use derive_more::{Display, Error as StdError, From};
use tracerr::Traced;

use crate::{
    domain::{
        draft::{BookingDraft, StageError},
        price,
        venue::{self, Venue},
        PriceCalculator,
    },
    infra::{marketplace, session, Marketplace, Sessions},
    Service,
};

use super::Command;

/// [`Command`] loading the session's [`BookingDraft`] onto the summary page
/// and reconciling its price against the venue's current state.
///
/// The staged breakdown is a display cache, never a financial commitment:
/// the venue is refetched, add-ons the venue no longer offers are dropped,
/// and the whole breakdown is recomputed. A total differing from the staged
/// one is reported, so the summary page can surface the change instead of
/// silently honoring a stale price.
#[derive(Clone, Copy, Debug)]
pub struct ReviewDraft {
    /// [`session::Id`] owning the draft to review.
    pub session: session::Id,
}

/// Result of a [`ReviewDraft`] [`Command`] execution.
#[derive(Clone, Debug)]
pub struct Reconciled {
    /// Reviewed [`BookingDraft`], repriced against the venue's current
    /// state.
    pub draft: BookingDraft,

    /// Grand total the draft was staged with.
    pub previous_total: Money,

    /// Indicator whether the reconciled total differs from the staged one,
    /// or a staged add-on vanished.
    pub price_changed: bool,
}

impl<Mp, St> Command<ReviewDraft> for Service<Mp, St>
where
    Mp: Marketplace<
        Select<By<Option<Venue>, venue::Selector>>,
        Ok = Option<Venue>,
        Err = Traced<marketplace::Error>,
    >,
    St: Sessions<
            Select<By<Option<BookingDraft>, session::Id>>,
            Ok = Option<BookingDraft>,
            Err = Traced<session::Error>,
        > + Sessions<
            Update<session::Slot>,
            Ok = (),
            Err = Traced<session::Error>,
        >,
{
    type Ok = Reconciled;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: ReviewDraft) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let ReviewDraft { session } = cmd;

        let draft = self
            .sessions()
            .execute(Select(By::<Option<BookingDraft>, _>::new(session)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::NoDraft)
            .map_err(tracerr::wrap!())?;
        let mut draft = draft
            .into_review()
            .map_err(tracerr::from_and_wrap!(=> E))?;

        // A draft may sit idle long enough for its dates to slip into the
        // past.
        if draft.range.starts_before(Date::today()) {
            return Err(tracerr::new!(E::RangeElapsed));
        }

        let venue = self
            .marketplace()
            .execute(Select(By::<Option<Venue>, _>::new(
                venue::Selector::Id(draft.venue.id),
            )))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::VenueGone(draft.venue.id))
            .map_err(tracerr::wrap!())?;

        let surviving: Vec<_> = draft
            .add_ons
            .iter()
            .map(|a| a.id)
            .filter(|id| venue.add_on(*id).is_some())
            .collect();
        let dropped = surviving.len() != draft.add_ons.len();
        if dropped {
            tracing::info!(
                venue = %venue.id,
                "staged add-ons are no longer offered, dropping them",
            );
        }

        let breakdown = PriceCalculator::new(self.config().fees)
            .breakdown(&venue, draft.range, &surviving)
            .map_err(tracerr::from_and_wrap!(=> E))?;

        let previous_total = draft.breakdown.grand_total;
        let price_changed =
            dropped || breakdown.grand_total != previous_total;

        draft.add_ons = super::denormalize_add_ons(&venue, &surviving);
        draft.breakdown = breakdown;

        self.sessions()
            .execute(Update(session::Slot {
                session,
                draft: draft.clone(),
            }))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        Ok(Reconciled {
            draft,
            previous_total,
            price_changed,
        })
    }
}

/// Error of a [`ReviewDraft`] [`Command`] execution.
#[derive(Debug, Display, From, StdError)]
pub enum ExecutionError {
    /// Marketplace collaborator failed.
    Marketplace(marketplace::Error),

    /// Draft-session store failed.
    Sessions(session::Error),

    /// Session holds no draft to review.
    #[display("session holds no draft")]
    #[from(ignore)]
    NoDraft,

    /// Draft cannot transition into review.
    Stage(StageError),

    /// Drafted [`DateRange`] has slipped into the past.
    ///
    /// [`DateRange`]: crate::domain::DateRange
    #[display("drafted dates have elapsed")]
    #[from(ignore)]
    RangeElapsed,

    /// Drafted [`Venue`] is no longer listed.
    #[display("`Venue(id: {_0})` is no longer listed")]
    #[from(ignore)]
    VenueGone(#[error(not(source))] venue::Id),

    /// Reconciled selection cannot be priced.
    Price(price::Error),
}

#[cfg(test)]
mod spec {
    use common::operations::Insert;
    use rust_decimal::Decimal;

    use crate::{
        domain::{
            draft::{Guests, Headcount, Stage},
            venue::{self, Pricing},
        },
        infra::{session, Sessions as _},
        stub, Config, Service,
    };

    use super::{Command as _, ExecutionError as E, ReviewDraft};

    use crate::command::StageDraft;

    async fn staged(
        service: &Service<stub::Marketplace, crate::infra::InMemory>,
        add_ons: Vec<venue::add_on::Id>,
    ) -> session::Id {
        service
            .execute(StageDraft {
                session: None,
                venue: venue::Selector::Id(venue::Id::new()),
                range: stub::tomorrow(),
                add_ons,
                guests: Guests::Count(Headcount::new(50).unwrap()),
            })
            .await
            .unwrap()
            .session
    }

    #[tokio::test]
    async fn surfaces_a_price_change() {
        let service = stub::service(stub::Marketplace::default());
        let session = staged(&service, vec![]).await;

        let mut repriced = stub::venue();
        repriced.pricing =
            Pricing::Flat(stub::ngn(120_000));
        let service = Service::new(
            Config::default(),
            stub::Marketplace {
                venue: Some(repriced),
                ..stub::Marketplace::default()
            },
            service.sessions().clone(),
        );

        let reconciled = service
            .execute(ReviewDraft { session })
            .await
            .unwrap();

        assert!(reconciled.price_changed);
        assert_eq!(reconciled.previous_total, stub::ngn(161_250));
        assert_eq!(
            reconciled.draft.breakdown.grand_total.amount,
            Decimal::from(182_750),
        );
        assert_eq!(reconciled.draft.stage, Stage::UnderReview);
    }

    #[tokio::test]
    async fn keeps_an_unchanged_price() {
        let service = stub::service(stub::Marketplace::default());
        let session = staged(&service, vec![]).await;

        let reconciled = service
            .execute(ReviewDraft { session })
            .await
            .unwrap();

        assert!(!reconciled.price_changed);
        assert_eq!(
            reconciled.draft.breakdown.grand_total,
            reconciled.previous_total,
        );
    }

    #[tokio::test]
    async fn drops_vanished_add_ons_and_reports_the_change() {
        let service = stub::service(stub::Marketplace::default());
        let catering = stub::venue().add_ons[0].id;
        let session = staged(&service, vec![catering]).await;

        let mut stripped = stub::venue();
        stripped.add_ons.clear();
        let service = Service::new(
            Config::default(),
            stub::Marketplace {
                venue: Some(stripped),
                ..stub::Marketplace::default()
            },
            service.sessions().clone(),
        );

        let reconciled = service
            .execute(ReviewDraft { session })
            .await
            .unwrap();

        assert!(reconciled.price_changed);
        assert!(reconciled.draft.add_ons.is_empty());
        assert_eq!(
            reconciled.draft.breakdown.grand_total,
            stub::ngn(161_250),
        );
    }

    #[tokio::test]
    async fn rejects_an_empty_session() {
        let service = stub::service(stub::Marketplace::default());

        let err = service
            .execute(ReviewDraft {
                session: session::Id::new(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err.as_ref(), E::NoDraft));
    }

    #[tokio::test]
    async fn rejects_a_submitted_draft() {
        let service = stub::service(stub::Marketplace::default());
        let session = session::Id::new();
        service
            .sessions()
            .execute(Insert(session::Slot {
                session,
                draft: stub::draft(Stage::Submitted),
            }))
            .await
            .unwrap();

        let err = service
            .execute(ReviewDraft { session })
            .await
            .unwrap_err();

        assert!(matches!(err.as_ref(), E::Stage(_)));
    }
}
