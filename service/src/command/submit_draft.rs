//! [`SubmitDraft`] [`Command`] definition.

use common::{
    operations::{By, Insert, Select, Update},
    Date, Money,
};
use derive_more::{Display, Error as StdError, From};
use tracerr::Traced;
use uuid::Uuid;

use crate::{
    domain::{
        draft::{BookingDraft, StageError},
        venue, AvailabilityIndex,
    },
    infra::{marketplace, session, Marketplace, Sessions},
    query,
    read::booking::{list, Receipt, Submission},
    Service,
};

use super::Command;

/// [`Command`] submitting the session's reviewed [`BookingDraft`] to the
/// marketplace.
///
/// Only an [`UnderReview`] draft may be submitted, and only with the exact
/// grand total the summary page displayed: a mismatch means the client
/// confirmed a price the draft no longer carries, and must re-review.
///
/// [`UnderReview`]: crate::domain::draft::Stage::UnderReview
#[derive(Clone, Copy, Debug)]
pub struct SubmitDraft {
    /// [`session::Id`] owning the draft to submit.
    pub session: session::Id,

    /// Grand total the user confirmed on the summary page.
    pub confirmed_total: Money,
}

/// Result of a [`SubmitDraft`] [`Command`] execution.
#[derive(Clone, Debug)]
pub struct Submitted {
    /// ID of the booking created by the marketplace.
    pub booking: Uuid,

    /// Submitted [`BookingDraft`], kept for the confirmation page.
    pub draft: BookingDraft,
}

impl<Mp, St> Command<SubmitDraft> for Service<Mp, St>
where
    Mp: Marketplace<
            Insert<Submission>,
            Ok = Receipt,
            Err = Traced<marketplace::Error>,
        > + Marketplace<
            Select<By<list::Page, list::Selector>>,
            Ok = list::Page,
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
    type Ok = Submitted;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: SubmitDraft) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let SubmitDraft {
            session,
            confirmed_total,
        } = cmd;

        let draft = self
            .sessions()
            .execute(Select(By::<Option<BookingDraft>, _>::new(session)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::NoDraft)
            .map_err(tracerr::wrap!())?;

        if confirmed_total != draft.breakdown.grand_total {
            return Err(tracerr::new!(E::PriceNotConfirmed {
                expected: draft.breakdown.grand_total,
            }));
        }

        let draft = draft
            .into_submitted()
            .map_err(tracerr::from_and_wrap!(=> E))?;

        let submission = Submission::new(
            draft.venue.id,
            draft.range,
            draft.add_ons.iter().map(|a| a.id).collect(),
            draft.guests.clone(),
            draft.breakdown.grand_total,
        );
        let receipt = match self
            .marketplace()
            .execute(Insert(submission))
            .await
        {
            Ok(receipt) => receipt,
            Err(e) if matches!(e.as_ref(), marketplace::Error::Conflict) => {
                // Lost the race for the dates. Hand back the fresh blocked
                // set, so the client restarts its selection against it.
                let bookings = query::availability::all_bookings(
                    self.marketplace(),
                    draft.venue.id,
                )
                .await
                .map_err(tracerr::map_from_and_wrap!(=> E))?;
                let index = AvailabilityIndex::new(Date::today(), bookings);
                return Err(tracerr::new!(E::DatesTaken {
                    blocked: index.blocked_dates().iter().copied().collect(),
                }));
            }
            Err(e) => {
                return Err(e).map_err(tracerr::map_from_and_wrap!(=> E));
            }
        };

        self.sessions()
            .execute(Update(session::Slot {
                session,
                draft: draft.clone(),
            }))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        Ok(Submitted {
            booking: receipt.id,
            draft,
        })
    }
}

/// Error of a [`SubmitDraft`] [`Command`] execution.
#[derive(Debug, Display, From, StdError)]
pub enum ExecutionError {
    /// Marketplace collaborator failed.
    Marketplace(marketplace::Error),

    /// Draft-session store failed.
    Sessions(session::Error),

    /// Session holds no draft to submit.
    #[display("session holds no draft")]
    #[from(ignore)]
    NoDraft,

    /// Draft cannot transition into submission, e.g. it was never reviewed.
    Stage(StageError),

    /// Confirmed total differs from the draft's grand total.
    #[display("confirmed total differs from the draft's total {expected}")]
    #[from(ignore)]
    PriceNotConfirmed {
        /// Grand total the draft actually carries.
        expected: Money,
    },

    /// Dates were taken concurrently, submission was rejected.
    #[display("dates were taken concurrently")]
    #[from(ignore)]
    DatesTaken {
        /// Fresh blocked dates of the venue, for restarting the selection.
        blocked: Vec<Date>,
    },
}

#[cfg(test)]
mod spec {
    use crate::{
        domain::{
            draft::{Guests, Headcount, Stage},
            venue,
        },
        infra::session,
        stub, Config, Service,
    };

    use super::{Command as _, ExecutionError as E, SubmitDraft};

    use crate::command::{ReviewDraft, StageDraft};

    async fn reviewed(
        service: &Service<stub::Marketplace, crate::infra::InMemory>,
    ) -> (session::Id, common::Money) {
        let session = service
            .execute(StageDraft {
                session: None,
                venue: venue::Selector::Id(venue::Id::new()),
                range: stub::tomorrow(),
                add_ons: vec![],
                guests: Guests::Count(Headcount::new(50).unwrap()),
            })
            .await
            .unwrap()
            .session;
        let reconciled =
            service.execute(ReviewDraft { session }).await.unwrap();
        (session, reconciled.draft.breakdown.grand_total)
    }

    #[tokio::test]
    async fn submits_a_reviewed_draft() {
        let service = stub::service(stub::Marketplace::default());
        let (session, total) = reviewed(&service).await;

        let submitted = service
            .execute(SubmitDraft {
                session,
                confirmed_total: total,
            })
            .await
            .unwrap();

        assert_eq!(submitted.draft.stage, Stage::Submitted);
    }

    #[tokio::test]
    async fn rejects_an_unreviewed_draft() {
        let service = stub::service(stub::Marketplace::default());
        let staged = service
            .execute(StageDraft {
                session: None,
                venue: venue::Selector::Id(venue::Id::new()),
                range: stub::tomorrow(),
                add_ons: vec![],
                guests: Guests::Count(Headcount::new(50).unwrap()),
            })
            .await
            .unwrap();

        let err = service
            .execute(SubmitDraft {
                session: staged.session,
                confirmed_total: staged.draft.breakdown.grand_total,
            })
            .await
            .unwrap_err();

        assert!(matches!(err.as_ref(), E::Stage(_)));
    }

    #[tokio::test]
    async fn rejects_a_mismatched_total() {
        let service = stub::service(stub::Marketplace::default());
        let (session, _) = reviewed(&service).await;

        let err = service
            .execute(SubmitDraft {
                session,
                confirmed_total: stub::ngn(1),
            })
            .await
            .unwrap_err();

        assert!(matches!(err.as_ref(), E::PriceNotConfirmed { .. }));
    }

    #[tokio::test]
    async fn lost_race_reports_fresh_blocked_dates() {
        let service = stub::service(stub::Marketplace::default());
        let (session, total) = reviewed(&service).await;

        let service = Service::new(
            Config::default(),
            stub::Marketplace {
                reject_submission: true,
                ..stub::Marketplace::default()
            },
            service.sessions().clone(),
        );

        let err = service
            .execute(SubmitDraft {
                session,
                confirmed_total: total,
            })
            .await
            .unwrap_err();

        assert!(matches!(err.as_ref(), E::DatesTaken { .. }));
    }

    #[tokio::test]
    async fn rejects_an_empty_session() {
        let service = stub::service(stub::Marketplace::default());

        let err = service
            .execute(SubmitDraft {
                session: session::Id::new(),
                confirmed_total: stub::ngn(161_250),
            })
            .await
            .unwrap_err();

        assert!(matches!(err.as_ref(), E::NoDraft));
    }
}
