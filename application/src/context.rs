//! Extractors of the booking session context.

use axum::{async_trait, extract::FromRequestParts};
use service::infra::session;

use crate::{define_error, Error};

/// Name of the HTTP header carrying the booking session ID.
pub const SESSION_HEADER: &str = "X-Booking-Session";

/// Booking session of the current HTTP request, required to be present.
#[derive(Clone, Copy, Debug)]
pub struct Session(pub session::Id);

/// Booking session of the current HTTP request, if any.
///
/// Used where a missing session is legal, e.g. the very first staging of a
/// draft.
#[derive(Clone, Copy, Debug)]
pub struct MaybeSession(pub Option<session::Id>);

fn parse(
    parts: &http::request::Parts,
) -> Result<Option<session::Id>, Error> {
    parts
        .headers
        .get(SESSION_HEADER)
        .map(|v| {
            v.to_str()
                .ok()
                .and_then(|s| s.parse().ok())
                .ok_or_else(|| SessionError::Malformed.into())
        })
        .transpose()
}

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for Session {
    type Rejection = Error;

    async fn from_request_parts(
        parts: &mut http::request::Parts,
        _: &S,
    ) -> Result<Self, Self::Rejection> {
        parse(parts)?
            .map(Self)
            .ok_or_else(|| SessionError::Missing.into())
    }
}

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for MaybeSession {
    type Rejection = Error;

    async fn from_request_parts(
        parts: &mut http::request::Parts,
        _: &S,
    ) -> Result<Self, Self::Rejection> {
        parse(parts).map(Self)
    }
}

define_error! {
    enum SessionError {
        #[code = "SESSION_REQUIRED"]
        #[status = UNAUTHORIZED]
        #[message = "`X-Booking-Session` header is required"]
        Missing,

        #[code = "SESSION_MALFORMED"]
        #[status = BAD_REQUEST]
        #[message = "`X-Booking-Session` header is not a valid UUID"]
        Malformed,
    }
}
