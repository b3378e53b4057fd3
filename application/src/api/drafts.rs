//! Booking draft API handlers.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Extension, Json,
};
use common::{operations::By, Date, Money};
use serde::{Deserialize, Serialize};
use service::{
    command::{
        self, AbandonDraft, ReviewDraft, StageDraft, SubmitDraft,
    },
    domain::{
        draft::{BookingDraft, Guests},
        venue::add_on,
    },
    infra::session,
    query, Command as _, Query as _,
};
use uuid::Uuid;

use crate::{
    context::{MaybeSession, Session, SESSION_HEADER},
    AsError as _, Error, Service,
};

use super::{RangeError, VenueError};

/// Body of a `POST /booking/draft` request.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StageRequest {
    /// Selector of the venue to book: its ID or slug.
    pub venue: String,

    /// First date of the booking.
    pub start_date: Date,

    /// Last date of the booking, inclusive, if any.
    #[serde(default)]
    pub end_date: Option<Date>,

    /// Selected add-on IDs.
    #[serde(default)]
    pub add_ons: Vec<add_on::Id>,

    /// Expected guests.
    pub guests: Guests,
}

/// Body of a staged draft response.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StagedResponse {
    /// ID of the booking session owning the draft.
    pub session: session::Id,

    /// Staged draft.
    pub draft: BookingDraft,
}

/// `POST /booking/draft` handler.
///
/// # Errors
///
/// See [`DraftError`], [`VenueError`] and [`RangeError`].
pub async fn stage(
    Extension(service): Extension<Service>,
    MaybeSession(session): MaybeSession,
    Json(req): Json<StageRequest>,
) -> Result<Response, Error> {
    let StageRequest {
        venue,
        start_date,
        end_date,
        add_ons,
        guests,
    } = req;

    let venue = venue
        .parse()
        .map_err(|_| Error::from(VenueError::SelectorMalformed))?;
    let range = service::domain::DateRange::new(
        start_date,
        end_date,
        Date::today(),
    )
    .map_err(|_| Error::from(RangeError::Invalid))?;

    let staged = service
        .execute(StageDraft {
            session,
            venue,
            range,
            add_ons,
            guests,
        })
        .await
        .map_err(|e| e.as_error())?;

    Ok((
        StatusCode::CREATED,
        [(SESSION_HEADER, staged.session.to_string())],
        Json(StagedResponse {
            session: staged.session,
            draft: staged.draft,
        }),
    )
        .into_response())
}

/// `GET /booking/draft` handler.
///
/// # Errors
///
/// See [`DraftError`].
pub async fn show(
    Extension(service): Extension<Service>,
    Session(session): Session,
) -> Result<Json<BookingDraft>, Error> {
    service
        .execute(query::FromSessions(By::<Option<BookingDraft>, _>::new(
            session,
        )))
        .await
        .map_err(|e| e.as_error())?
        .map(Json)
        .ok_or_else(|| DraftError::NoDraft.into())
}

/// Body of an abandoned draft response.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct AbandonedResponse {
    /// Indicator whether a draft actually existed.
    pub existed: bool,
}

/// `DELETE /booking/draft` handler.
///
/// # Errors
///
/// If the draft-session store fails.
pub async fn abandon(
    Extension(service): Extension<Service>,
    Session(session): Session,
) -> Result<Json<AbandonedResponse>, Error> {
    service
        .execute(AbandonDraft { session })
        .await
        .map(|existed| Json(AbandonedResponse { existed }))
        .map_err(|e| e.as_error())
}

/// Body of a reviewed draft response.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewedResponse {
    /// Reviewed draft, repriced against the venue's current state.
    pub draft: BookingDraft,

    /// Grand total the draft was staged with.
    pub previous_total: Money,

    /// Indicator whether the price changed since staging.
    pub price_changed: bool,
}

/// `POST /booking/draft/review` handler.
///
/// # Errors
///
/// See [`DraftError`].
pub async fn review(
    Extension(service): Extension<Service>,
    Session(session): Session,
) -> Result<Json<ReviewedResponse>, Error> {
    let reconciled = service
        .execute(ReviewDraft { session })
        .await
        .map_err(|e| e.as_error())?;
    Ok(Json(ReviewedResponse {
        draft: reconciled.draft,
        previous_total: reconciled.previous_total,
        price_changed: reconciled.price_changed,
    }))
}

/// Body of a `POST /booking/draft/submit` request.
#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitRequest {
    /// Grand total displayed to and confirmed by the user.
    pub confirmed_total: Money,
}

/// Body of a submitted draft response.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmittedResponse {
    /// ID of the booking created by the marketplace.
    pub booking_id: Uuid,

    /// Submitted draft, for the confirmation page.
    pub draft: BookingDraft,
}

/// `POST /booking/draft/submit` handler.
///
/// A lost race for the dates answers `409` with the venue's fresh blocked
/// dates, so the client restarts its selection against them.
///
/// # Errors
///
/// See [`DraftError`].
pub async fn submit(
    Extension(service): Extension<Service>,
    Session(session): Session,
    Json(req): Json<SubmitRequest>,
) -> Result<Response, Error> {
    let submitted = match service
        .execute(SubmitDraft {
            session,
            confirmed_total: req.confirmed_total,
        })
        .await
    {
        Ok(submitted) => submitted,
        Err(e) => {
            if let command::submit_draft::ExecutionError::DatesTaken {
                blocked,
            } = e.as_ref()
            {
                let body = serde_json::json!({
                    "code": "DATES_TAKEN",
                    "message": "Selected dates were taken concurrently",
                    "blockedDates": blocked,
                });
                return Ok(
                    (StatusCode::CONFLICT, Json(body)).into_response()
                );
            }
            return Err(e.as_error());
        }
    };
    Ok(Json(SubmittedResponse {
        booking_id: submitted.booking,
        draft: submitted.draft,
    })
    .into_response())
}

impl crate::AsError for command::stage_draft::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        use command::stage_draft::ExecutionError as E;

        match self {
            E::VenueNotExists(_) => Some(VenueError::NotFound.into()),
            E::DatesUnavailable => Some(DraftError::DatesUnavailable.into()),
            E::Price(_) => {
                Some(super::venues::QuoteError::ForeignAddOn.into())
            }
            E::Marketplace(_) | E::Sessions(_) => None,
        }
    }
}

impl crate::AsError for command::review_draft::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        use command::review_draft::ExecutionError as E;

        match self {
            E::NoDraft => Some(DraftError::NoDraft.into()),
            E::Stage(_) => Some(DraftError::WrongStage.into()),
            E::RangeElapsed => Some(DraftError::RangeElapsed.into()),
            E::VenueGone(_) => Some(DraftError::VenueGone.into()),
            E::Marketplace(_) | E::Sessions(_) | E::Price(_) => None,
        }
    }
}

impl crate::AsError for command::submit_draft::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        use command::submit_draft::ExecutionError as E;

        match self {
            E::NoDraft => Some(DraftError::NoDraft.into()),
            E::Stage(_) => Some(DraftError::WrongStage.into()),
            E::PriceNotConfirmed { .. } => {
                Some(DraftError::PriceNotConfirmed.into())
            }
            // Handled by the `submit` handler itself.
            E::DatesTaken { .. } => None,
            E::Marketplace(_) | E::Sessions(_) => None,
        }
    }
}

crate::define_error! {
    enum DraftError {
        #[code = "NO_DRAFT"]
        #[status = NOT_FOUND]
        #[message = "Booking session holds no draft"]
        NoDraft,

        #[code = "DATES_UNAVAILABLE"]
        #[status = CONFLICT]
        #[message = "Selected dates are unavailable"]
        DatesUnavailable,

        #[code = "WRONG_STAGE"]
        #[status = CONFLICT]
        #[message = "Draft is not in a stage allowing this operation"]
        WrongStage,

        #[code = "RANGE_ELAPSED"]
        #[status = GONE]
        #[message = "Drafted dates have elapsed"]
        RangeElapsed,

        #[code = "VENUE_GONE"]
        #[status = GONE]
        #[message = "Drafted venue is no longer listed"]
        VenueGone,

        #[code = "PRICE_NOT_CONFIRMED"]
        #[status = CONFLICT]
        #[message = "Confirmed total differs from the draft's current total"]
        PriceNotConfirmed,
    }
}
