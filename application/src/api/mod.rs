//! REST API definitions.

pub mod drafts;
pub mod venues;

use axum::{
    routing::{get, post},
    Router,
};

use crate::define_error;

/// Assembles the [`Router`] of the whole API surface.
///
/// The [`Service`] is expected to be provided as an [`Extension`].
///
/// [`Extension`]: axum::Extension
/// [`Service`]: crate::Service
pub fn router() -> Router {
    Router::new()
        .route("/venues/:selector", get(venues::show))
        .route("/venues/:selector/blocked-dates", get(venues::blocked_dates))
        .route("/venues/:selector/availability", get(venues::availability))
        .route("/venues/:selector/quote", get(venues::quote))
        .route(
            "/booking/draft",
            post(drafts::stage).get(drafts::show).delete(drafts::abandon),
        )
        .route("/booking/draft/review", post(drafts::review))
        .route("/booking/draft/submit", post(drafts::submit))
}

define_error! {
    enum VenueError {
        #[code = "SELECTOR_MALFORMED"]
        #[status = BAD_REQUEST]
        #[message = "Venue selector is neither a UUID nor a valid slug"]
        SelectorMalformed,

        #[code = "VENUE_NOT_FOUND"]
        #[status = NOT_FOUND]
        #[message = "No such venue is listed"]
        NotFound,
    }
}

define_error! {
    enum RangeError {
        #[code = "RANGE_INVALID"]
        #[status = BAD_REQUEST]
        #[message = "Selected date range is invalid or in the past"]
        Invalid,
    }
}
