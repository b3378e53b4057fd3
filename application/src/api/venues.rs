//! Venue-facing API handlers.

use axum::{
    extract::{Path, Query as Params},
    Extension, Json,
};
use common::{operations::By, Date, Money};
use serde::{Deserialize, Serialize};
use service::{
    domain::{
        range::DateRange,
        venue::{self, Venue},
        PriceBreakdown,
    },
    query,
    Query as _,
};

use crate::{AsError as _, Error, Service};

use super::{RangeError, VenueError};

/// Date range query parameters.
#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RangeParams {
    /// First date of the range.
    pub start_date: Date,

    /// Last date of the range, inclusive, if any.
    #[serde(default)]
    pub end_date: Option<Date>,
}

impl TryFrom<RangeParams> for DateRange {
    type Error = Error;

    fn try_from(params: RangeParams) -> Result<Self, Self::Error> {
        Self::new(params.start_date, params.end_date, Date::today())
            .map_err(|_| RangeError::Invalid.into())
    }
}

fn selector(raw: &str) -> Result<venue::Selector, Error> {
    raw.parse().map_err(|_| VenueError::SelectorMalformed.into())
}

/// Venue representation of the API.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VenueResponse {
    /// ID of the venue.
    pub id: venue::Id,

    /// URL slug of the venue, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<venue::Slug>,

    /// Display name of the venue.
    pub name: venue::Name,

    /// Address of the venue.
    pub address: venue::Address,

    /// Cover image URL of the venue, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<venue::ImageUrl>,

    /// "Starting from" daily rate of the venue.
    pub start_price: Money,

    /// Add-ons offered by the venue.
    pub add_ons: Vec<venue::AddOn>,
}

impl From<Venue> for VenueResponse {
    fn from(venue: Venue) -> Self {
        Self {
            id: venue.id,
            slug: venue.slug,
            name: venue.name,
            address: venue.address,
            image_url: venue.image,
            start_price: venue.pricing.starting_rate(),
            add_ons: venue.add_ons,
        }
    }
}

async fn resolve(
    service: &Service,
    raw_selector: &str,
) -> Result<Venue, Error> {
    service
        .execute(query::FromMarketplace(By::<Option<Venue>, _>::new(
            selector(raw_selector)?,
        )))
        .await
        .map_err(|e| e.as_error())?
        .ok_or_else(|| VenueError::NotFound.into())
}

/// `GET /venues/{selector}` handler.
///
/// # Errors
///
/// See [`VenueError`].
pub async fn show(
    Extension(service): Extension<Service>,
    Path(raw): Path<String>,
) -> Result<Json<VenueResponse>, Error> {
    resolve(&service, &raw).await.map(|v| Json(v.into()))
}

/// Blocked dates representation of the API.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockedDatesResponse {
    /// Dates that cannot be booked, in ascending order.
    pub blocked_dates: Vec<Date>,
}

/// `GET /venues/{selector}/blocked-dates` handler.
///
/// # Errors
///
/// See [`VenueError`].
pub async fn blocked_dates(
    Extension(service): Extension<Service>,
    Path(raw): Path<String>,
) -> Result<Json<BlockedDatesResponse>, Error> {
    let venue = resolve(&service, &raw).await?;
    let index = service
        .execute(query::availability::BlockedDates { venue: venue.id })
        .await
        .map_err(|e| e.as_error())?;
    Ok(Json(BlockedDatesResponse {
        blocked_dates: index.blocked_dates().iter().copied().collect(),
    }))
}

/// Availability representation of the API.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct AvailabilityResponse {
    /// Indicator whether the requested range can be booked.
    pub available: bool,
}

/// `GET /venues/{selector}/availability` handler.
///
/// # Errors
///
/// See [`VenueError`] and [`RangeError`].
pub async fn availability(
    Extension(service): Extension<Service>,
    Path(raw): Path<String>,
    Params(params): Params<RangeParams>,
) -> Result<Json<AvailabilityResponse>, Error> {
    let venue = resolve(&service, &raw).await?;
    let range = params.try_into()?;
    let confirmation = service
        .execute(query::availability::CheckRange {
            venue: venue.id,
            range,
        })
        .await
        .map_err(|e| e.as_error())?;
    Ok(Json(AvailabilityResponse {
        available: confirmation.available,
    }))
}

/// Quote query parameters.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteParams {
    /// First date of the range.
    pub start_date: Date,

    /// Last date of the range, inclusive, if any.
    #[serde(default)]
    pub end_date: Option<Date>,

    /// Comma-separated selected add-on IDs.
    #[serde(default)]
    pub add_ons: Option<String>,
}

/// `GET /venues/{selector}/quote` handler.
///
/// # Errors
///
/// See [`VenueError`], [`RangeError`] and [`QuoteError`].
pub async fn quote(
    Extension(service): Extension<Service>,
    Path(raw): Path<String>,
    Params(params): Params<QuoteParams>,
) -> Result<Json<PriceBreakdown>, Error> {
    let QuoteParams {
        start_date,
        end_date,
        add_ons,
    } = params;

    let range = RangeParams {
        start_date,
        end_date,
    }
    .try_into()?;
    let add_ons = add_ons
        .as_deref()
        .unwrap_or_default()
        .split(',')
        .filter(|s| !s.is_empty())
        .map(|s| s.parse().map_err(|_| QuoteError::AddOnMalformed.into()))
        .collect::<Result<Vec<_>, Error>>()?;

    service
        .execute(query::quote::Quote {
            venue: selector(&raw)?,
            range,
            add_ons,
        })
        .await
        .map(Json)
        .map_err(|e| e.as_error())
}

impl crate::AsError for query::quote::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        use query::quote::ExecutionError as E;

        match self {
            E::VenueNotExists(_) => Some(VenueError::NotFound.into()),
            E::Price(_) => Some(QuoteError::ForeignAddOn.into()),
            E::Marketplace(_) => None,
        }
    }
}

crate::define_error! {
    enum QuoteError {
        #[code = "ADD_ON_MALFORMED"]
        #[status = BAD_REQUEST]
        #[message = "Add-on ID is not a valid UUID"]
        AddOnMalformed,

        #[code = "FOREIGN_ADD_ON"]
        #[status = UNPROCESSABLE_ENTITY]
        #[message = "Selected add-on is not offered by this venue"]
        ForeignAddOn,
    }
}
