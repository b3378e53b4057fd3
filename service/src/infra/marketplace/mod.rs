//! Marketplace collaborator implementations.

#[cfg(feature = "http")]
pub mod http;

use derive_more::{Display, Error as StdError, From};

use crate::read;

#[cfg(feature = "http")]
pub use self::http::Http;

/// Marketplace collaborator operation.
pub use common::Handler as Marketplace;

/// [`Marketplace`] error.
#[derive(Debug, Display, From, StdError)]
pub enum Error {
    #[cfg(feature = "http")]
    /// [`Http`] client error.
    Http(http::Error),

    /// Venue payload failed normalization.
    #[display("venue payload failed normalization: {_0}")]
    BadVenue(read::venue::NormalizeError),

    /// Submission rejected, because the requested dates are already taken.
    #[display("requested dates are already taken")]
    #[from(ignore)]
    Conflict,
}

#[cfg(feature = "http")]
impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Self::Http(e.into())
    }
}
