//! HTTP implementation of the [`Marketplace`] collaborator.

use std::time::Duration;

use common::operations::{By, Insert, Perform, Select};
use derive_more::{Display, Error as StdError, From};
use tracerr::Traced;

use crate::{
    domain::{venue, Venue},
    read::{
        availability::{Probe, ProbeBody, Verdict},
        booking::{list, PageDto, Receipt, Submission},
        venue::VenueDto,
    },
};

use super::Marketplace;

/// Configuration of an [`Http`] client.
#[derive(Clone, Debug)]
pub struct Config {
    /// Base URL of the marketplace REST API.
    pub base_url: String,

    /// Timeout of a single request.
    pub timeout: Duration,
}

/// [`Marketplace`] collaborator over its REST API.
#[derive(Clone, Debug)]
pub struct Http {
    /// Underlying HTTP client.
    client: reqwest::Client,

    /// Base URL requests are resolved against.
    base_url: reqwest::Url,
}

impl Http {
    /// Creates a new [`Http`] client out of the provided [`Config`].
    ///
    /// # Errors
    ///
    /// If the [`Config::base_url`] is malformed, or the underlying client
    /// cannot be initialized.
    pub fn new(config: &Config) -> Result<Self, Traced<Error>> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(tracerr::from_and_wrap!(=> Error))?;
        let base_url = config
            .base_url
            .parse::<reqwest::Url>()
            .map_err(|e| Error::InvalidBaseUrl(e.to_string()))
            .map_err(tracerr::wrap!())?;
        Ok(Self { client, base_url })
    }

    /// Resolves the provided `path` against the base URL.
    fn endpoint(&self, path: &str) -> Result<reqwest::Url, Traced<Error>> {
        self.base_url
            .join(path)
            .map_err(|e| Error::InvalidBaseUrl(e.to_string()))
            .map_err(tracerr::wrap!())
    }
}

/// `GET /listings/{id or slug}`, with a 404 meaning no such venue.
impl Marketplace<Select<By<Option<Venue>, venue::Selector>>> for Http {
    type Ok = Option<Venue>;
    type Err = Traced<super::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Venue>, venue::Selector>>,
    ) -> Result<Self::Ok, Self::Err> {
        let selector = by.into_inner();

        let url = self
            .endpoint(&format!("listings/{selector}"))
            .map_err(tracerr::map_from_and_wrap!(=> super::Error))?;
        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(tracerr::from_and_wrap!(=> super::Error))?;
        if resp.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let dto: VenueDto = resp
            .error_for_status()
            .map_err(tracerr::from_and_wrap!(=> super::Error))?
            .json()
            .await
            .map_err(tracerr::from_and_wrap!(=> super::Error))?;

        Venue::try_from(dto)
            .map(Some)
            .map_err(tracerr::from_and_wrap!(=> super::Error))
    }
}

/// `GET /bookings?listingId={id}&page={n}`.
impl Marketplace<Select<By<list::Page, list::Selector>>> for Http {
    type Ok = list::Page;
    type Err = Traced<super::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<list::Page, list::Selector>>,
    ) -> Result<Self::Ok, Self::Err> {
        let selector = by.into_inner();

        let url = self
            .endpoint("bookings")
            .map_err(tracerr::map_from_and_wrap!(=> super::Error))?;
        let dto: PageDto = self
            .client
            .get(url)
            .query(&[
                ("listingId", selector.filter.venue.to_string()),
                ("page", selector.number.get().to_string()),
            ])
            .send()
            .await
            .map_err(tracerr::from_and_wrap!(=> super::Error))?
            .error_for_status()
            .map_err(tracerr::from_and_wrap!(=> super::Error))?
            .json()
            .await
            .map_err(tracerr::from_and_wrap!(=> super::Error))?;

        Ok(dto.into_page(selector.number))
    }
}

/// `POST /bookings/availability`.
impl Marketplace<Perform<Probe>> for Http {
    type Ok = Verdict;
    type Err = Traced<super::Error>;

    async fn execute(
        &self,
        Perform(probe): Perform<Probe>,
    ) -> Result<Self::Ok, Self::Err> {
        let url = self
            .endpoint("bookings/availability")
            .map_err(tracerr::map_from_and_wrap!(=> super::Error))?;
        self.client
            .post(url)
            .json(&ProbeBody::from(probe))
            .send()
            .await
            .map_err(tracerr::from_and_wrap!(=> super::Error))?
            .error_for_status()
            .map_err(tracerr::from_and_wrap!(=> super::Error))?
            .json()
            .await
            .map_err(tracerr::from_and_wrap!(=> super::Error))
    }
}

/// `POST /bookings`, with a 409 meaning the dates were taken concurrently.
impl Marketplace<Insert<Submission>> for Http {
    type Ok = Receipt;
    type Err = Traced<super::Error>;

    async fn execute(
        &self,
        Insert(submission): Insert<Submission>,
    ) -> Result<Self::Ok, Self::Err> {
        let url = self
            .endpoint("bookings")
            .map_err(tracerr::map_from_and_wrap!(=> super::Error))?;
        let resp = self
            .client
            .post(url)
            .json(&submission)
            .send()
            .await
            .map_err(tracerr::from_and_wrap!(=> super::Error))?;
        if resp.status() == reqwest::StatusCode::CONFLICT {
            return Err(tracerr::new!(super::Error::Conflict));
        }
        resp.error_for_status()
            .map_err(tracerr::from_and_wrap!(=> super::Error))?
            .json()
            .await
            .map_err(tracerr::from_and_wrap!(=> super::Error))
    }
}

/// [`Http`] client error.
#[derive(Debug, Display, From, StdError)]
pub enum Error {
    /// Base URL is malformed, or a path cannot be resolved against it.
    #[display("invalid base URL: {_0}")]
    #[from(ignore)]
    InvalidBaseUrl(#[error(not(source))] String),

    /// Transport-level or decoding failure of a request.
    Transport(reqwest::Error),
}
