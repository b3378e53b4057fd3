//! [`Venue`] wire definitions.

use common::{money::Currency, Money};
use derive_more::{Display, Error};
use rust_decimal::Decimal;
use serde::Deserialize;
use uuid::Uuid;

use crate::domain::venue::{self, AddOn, Pricing, Venue};

/// Venue payload as returned by `GET /listings/{id or slug}`.
///
/// The aliases cover the fallback field names observed in collaborator
/// responses.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VenueDto {
    /// ID of the venue.
    pub id: Uuid,

    /// URL slug of the venue, if any.
    #[serde(default)]
    pub slug: Option<String>,

    /// Display name of the venue.
    #[serde(alias = "venueName", alias = "title")]
    pub name: String,

    /// Address of the venue.
    #[serde(alias = "venueAddress", alias = "location")]
    pub address: String,

    /// Cover image URL of the venue, if any.
    #[serde(default, alias = "image", alias = "coverImage")]
    pub image_url: Option<String>,

    /// Base daily price of the venue.
    #[serde(alias = "startPrice", alias = "pricePerDay")]
    pub base_price: Decimal,

    /// Currency all prices of the venue are expressed in.
    pub currency: Currency,

    /// Monday-Thursday daily rate, if the venue prices per day kind.
    #[serde(default)]
    pub weekday_price: Option<Decimal>,

    /// Friday-Sunday daily rate, if the venue prices per day kind.
    #[serde(default)]
    pub weekend_price: Option<Decimal>,

    /// Add-ons offered by the venue.
    #[serde(default, alias = "amenities")]
    pub add_ons: Vec<AddOnDto>,
}

/// Add-on payload nested in a [`VenueDto`].
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddOnDto {
    /// ID of the add-on.
    pub id: Uuid,

    /// Display name of the add-on.
    #[serde(alias = "title", alias = "label")]
    pub name: String,

    /// Price of the add-on, in the venue's currency.
    #[serde(alias = "amount", alias = "cost")]
    pub price: Decimal,
}

impl TryFrom<VenueDto> for Venue {
    type Error = NormalizeError;

    fn try_from(dto: VenueDto) -> Result<Self, Self::Error> {
        use NormalizeError as E;

        let VenueDto {
            id,
            slug,
            name,
            address,
            image_url,
            base_price,
            currency,
            weekday_price,
            weekend_price,
            add_ons,
        } = dto;

        if base_price.is_sign_negative() {
            return Err(E::NegativePrice);
        }

        let pricing = match (weekday_price, weekend_price) {
            (Some(weekday), Some(weekend)) => {
                if weekday.is_sign_negative() || weekend.is_sign_negative() {
                    return Err(E::NegativePrice);
                }
                Pricing::PerDay {
                    weekday: Money::new(weekday, currency),
                    weekend: Money::new(weekend, currency),
                }
            }
            (None, None) => Pricing::Flat(Money::new(base_price, currency)),
            (Some(_), None) | (None, Some(_)) => {
                // Half-specified per-day pricing cannot be priced per day.
                tracing::warn!(
                    venue = %id,
                    "per-day pricing is half-specified, \
                     falling back to the flat base price",
                );
                Pricing::Flat(Money::new(base_price, currency))
            }
        };

        let add_ons = add_ons
            .into_iter()
            .map(|a| {
                if a.price.is_sign_negative() {
                    return Err(E::NegativeAddOnPrice(a.id));
                }
                Ok(AddOn {
                    id: a.id.into(),
                    name: a
                        .name
                        .parse()
                        .map_err(|_| E::InvalidAddOnName(a.id))?,
                    price: Money::new(a.price, currency),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            id: id.into(),
            slug: slug
                .map(|s| venue::Slug::new(s).ok_or(E::InvalidSlug))
                .transpose()?,
            name: name.parse().map_err(|_| E::InvalidName)?,
            address: address.parse().map_err(|_| E::InvalidAddress)?,
            image: image_url
                .map(|u| venue::ImageUrl::new(u).ok_or(E::InvalidImage))
                .transpose()?,
            pricing,
            add_ons,
        })
    }
}

/// Error of normalizing a [`VenueDto`] into a [`Venue`].
#[derive(Clone, Copy, Debug, Display, Error)]
pub enum NormalizeError {
    /// Venue name is missing or malformed.
    #[display("venue name is malformed")]
    InvalidName,

    /// Venue address is malformed.
    #[display("venue address is malformed")]
    InvalidAddress,

    /// Venue slug is malformed.
    #[display("venue slug is malformed")]
    InvalidSlug,

    /// Venue image URL is malformed.
    #[display("venue image URL is malformed")]
    InvalidImage,

    /// A price of the venue is negative.
    #[display("venue price is negative")]
    NegativePrice,

    /// An add-on price of the venue is negative.
    #[display("`AddOn(id: {_0})` price is negative")]
    NegativeAddOnPrice(#[error(not(source))] Uuid),

    /// An add-on name of the venue is malformed.
    #[display("`AddOn(id: {_0})` name is malformed")]
    InvalidAddOnName(#[error(not(source))] Uuid),
}

#[cfg(test)]
mod spec {
    use crate::domain::venue::{Pricing, Venue};

    use super::VenueDto;

    #[test]
    fn normalizes_fallback_field_names() {
        let dto: VenueDto = serde_json::from_value(serde_json::json!({
            "id": "7b3d9a60-0c3f-4a3e-9a4e-2f8a3b6c1d05",
            "title": "Eko Hall",
            "location": "12 Marina Rd, Lagos",
            "startPrice": 100_000,
            "currency": "NGN",
            "amenities": [{
                "id": "3f8a3b6c-1d05-4a3e-9a4e-7b3d9a600c3f",
                "label": "Catering",
                "cost": 350_000,
            }],
        }))
        .unwrap();

        let venue = Venue::try_from(dto).unwrap();
        assert_eq!(AsRef::<str>::as_ref(&venue.name), "Eko Hall");
        assert_eq!(venue.add_ons.len(), 1);
        assert!(matches!(venue.pricing, Pricing::Flat(_)));
    }

    #[test]
    fn rejects_negative_price() {
        let dto: VenueDto = serde_json::from_value(serde_json::json!({
            "id": "7b3d9a60-0c3f-4a3e-9a4e-2f8a3b6c1d05",
            "name": "Eko Hall",
            "address": "12 Marina Rd, Lagos",
            "basePrice": -1,
            "currency": "NGN",
        }))
        .unwrap();

        assert!(Venue::try_from(dto).is_err());
    }

    #[test]
    fn half_specified_per_day_pricing_falls_back_to_flat() {
        let dto: VenueDto = serde_json::from_value(serde_json::json!({
            "id": "7b3d9a60-0c3f-4a3e-9a4e-2f8a3b6c1d05",
            "name": "Eko Hall",
            "address": "12 Marina Rd, Lagos",
            "basePrice": 100_000,
            "weekendPrice": 150_000,
            "currency": "NGN",
        }))
        .unwrap();

        let venue = Venue::try_from(dto).unwrap();
        assert!(matches!(venue.pricing, Pricing::Flat(_)));
    }
}
