//! [`Venue`] definitions.

use common::{money::Currency, Date, Money};
use derive_more::{AsRef, Display, From, FromStr, Into};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Venue listed on the marketplace.
#[derive(Clone, Debug)]
pub struct Venue {
    /// ID of this [`Venue`].
    pub id: Id,

    /// URL [`Slug`] of this [`Venue`], if any.
    pub slug: Option<Slug>,

    /// [`Name`] of this [`Venue`].
    pub name: Name,

    /// [`Address`] of this [`Venue`].
    pub address: Address,

    /// [`ImageUrl`] of this [`Venue`], if any.
    pub image: Option<ImageUrl>,

    /// [`Pricing`] of this [`Venue`].
    pub pricing: Pricing,

    /// [`AddOn`]s offered by this [`Venue`].
    pub add_ons: Vec<AddOn>,
}

impl Venue {
    /// Returns the [`Currency`] all prices of this [`Venue`] are expressed
    /// in.
    #[must_use]
    pub fn currency(&self) -> Currency {
        self.pricing.currency()
    }

    /// Looks up the [`AddOn`] offered by this [`Venue`] under the provided
    /// [`add_on::Id`].
    #[must_use]
    pub fn add_on(&self, id: add_on::Id) -> Option<&AddOn> {
        self.add_ons.iter().find(|a| a.id == id)
    }
}

/// ID of a [`Venue`].
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Deserialize,
    Display,
    Eq,
    From,
    FromStr,
    Hash,
    Into,
    PartialEq,
    Serialize,
)]
pub struct Id(Uuid);

impl Id {
    /// Creates a new random [`Id`].
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

/// URL slug of a [`Venue`].
#[derive(
    AsRef, Clone, Debug, Deserialize, Display, Eq, Hash, PartialEq, Serialize,
)]
#[as_ref(forward)]
#[serde(try_from = "String")]
pub struct Slug(String);

impl TryFrom<String> for Slug {
    type Error = &'static str;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s).ok_or("invalid `Slug`")
    }
}

impl Slug {
    /// Creates a new [`Slug`] without performing any validation.
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `slug` matches the format.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(slug: impl Into<String>) -> Self {
        Self(slug.into())
    }

    /// Creates a new [`Slug`] if the given `slug` is valid.
    #[must_use]
    pub fn new(slug: impl Into<String>) -> Option<Self> {
        let slug = slug.into();
        Self::check(&slug).then_some(Self(slug))
    }

    /// Checks whether the given `slug` is a valid [`Slug`].
    fn check(slug: impl AsRef<str>) -> bool {
        let slug = slug.as_ref();
        !slug.is_empty()
            && slug.len() <= 256
            && slug
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    }
}

impl FromStr for Slug {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Slug`")
    }
}

/// Name of a [`Venue`].
#[derive(
    AsRef, Clone, Debug, Deserialize, Display, Eq, Hash, PartialEq, Serialize,
)]
#[as_ref(forward)]
#[serde(try_from = "String")]
pub struct Name(String);

impl TryFrom<String> for Name {
    type Error = &'static str;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s).ok_or("invalid `Name`")
    }
}

impl Name {
    /// Creates a new [`Name`] without performing any validation.
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `name` matches the format.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Creates a new [`Name`] if the given `name` is valid.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Option<Self> {
        let name = name.into();
        Self::check(&name).then_some(Self(name))
    }

    /// Checks whether the given `name` is a valid [`Name`].
    fn check(name: impl AsRef<str>) -> bool {
        let name = name.as_ref();
        name.trim() == name && !name.is_empty() && name.len() <= 512
    }
}

impl FromStr for Name {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Name`")
    }
}

/// Address of a [`Venue`].
#[derive(
    AsRef, Clone, Debug, Deserialize, Display, Eq, Hash, PartialEq, Serialize,
)]
#[as_ref(forward)]
#[serde(try_from = "String")]
pub struct Address(String);

impl TryFrom<String> for Address {
    type Error = &'static str;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s).ok_or("invalid `Address`")
    }
}

impl Address {
    /// Creates a new [`Address`] without performing any validation.
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `address` matches the format.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(address: impl Into<String>) -> Self {
        Self(address.into())
    }

    /// Creates a new [`Address`] if the given `address` is valid.
    #[must_use]
    pub fn new(address: impl Into<String>) -> Option<Self> {
        let address = address.into();
        Self::check(&address).then_some(Self(address))
    }

    /// Checks whether the given `address` is a valid [`Address`].
    fn check(address: impl AsRef<str>) -> bool {
        let address = address.as_ref();
        address.trim() == address
            && !address.is_empty()
            && address.len() <= 1024
    }
}

impl FromStr for Address {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Address`")
    }
}

/// URL of a [`Venue`] image.
#[derive(
    AsRef, Clone, Debug, Deserialize, Display, Eq, Hash, PartialEq, Serialize,
)]
#[as_ref(forward)]
#[serde(try_from = "String")]
pub struct ImageUrl(String);

impl TryFrom<String> for ImageUrl {
    type Error = &'static str;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s).ok_or("invalid `ImageUrl`")
    }
}

impl ImageUrl {
    /// Creates a new [`ImageUrl`] if the given `url` is valid.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Option<Self> {
        let url = url.into();
        (!url.is_empty() && url.len() <= 2048).then_some(Self(url))
    }
}

impl FromStr for ImageUrl {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `ImageUrl`")
    }
}

/// Selector of a single [`Venue`].
#[derive(Clone, Debug, Display, Eq, From, Hash, PartialEq)]
pub enum Selector {
    /// Selection by [`Id`].
    Id(Id),

    /// Selection by [`Slug`].
    Slug(Slug),
}

impl FromStr for Selector {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Ok(id) = Id::from_str(s) {
            return Ok(Self::Id(id));
        }
        Slug::from_str(s).map(Self::Slug)
    }
}

/// Pricing of a [`Venue`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Pricing {
    /// Flat daily rate, regardless of the weekday.
    Flat(Money),

    /// Daily rate varying between weekdays and weekends.
    PerDay {
        /// Rate for Monday through Thursday.
        weekday: Money,

        /// Rate for Friday through Sunday.
        weekend: Money,
    },
}

impl Pricing {
    /// Returns the [`Currency`] of this [`Pricing`].
    #[must_use]
    pub fn currency(&self) -> Currency {
        match *self {
            Self::Flat(rate) | Self::PerDay { weekday: rate, .. } => {
                rate.currency
            }
        }
    }

    /// Returns the daily rate of this [`Pricing`] for the provided [`Date`].
    #[must_use]
    pub fn rate_for(&self, date: Date) -> Money {
        match *self {
            Self::Flat(rate) => rate,
            Self::PerDay { weekday, weekend } => {
                if date.is_weekend() {
                    weekend
                } else {
                    weekday
                }
            }
        }
    }

    /// Returns the lowest daily rate of this [`Pricing`], suitable as a
    /// "starting from" display price.
    #[must_use]
    pub fn starting_rate(&self) -> Money {
        match *self {
            Self::Flat(rate) => rate,
            Self::PerDay { weekday, weekend } => {
                if weekday.amount <= weekend.amount {
                    weekday
                } else {
                    weekend
                }
            }
        }
    }
}

pub mod add_on {
    //! [`AddOn`] definitions.

    use common::Money;
    use derive_more::{AsRef, Display, From, FromStr, Into};
    use serde::{Deserialize, Serialize};
    use uuid::Uuid;

    #[cfg(doc)]
    use super::Venue;

    /// Add-on service offered by a [`Venue`].
    #[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
    pub struct AddOn {
        /// ID of this [`AddOn`].
        pub id: Id,

        /// [`Name`] of this [`AddOn`].
        pub name: Name,

        /// Price of this [`AddOn`], in the owning [`Venue`]'s currency.
        pub price: Money,
    }

    /// ID of an [`AddOn`].
    #[derive(
        Clone,
        Copy,
        Debug,
        Default,
        Deserialize,
        Display,
        Eq,
        From,
        FromStr,
        Hash,
        Into,
        Ord,
        PartialEq,
        PartialOrd,
        Serialize,
    )]
    pub struct Id(Uuid);

    impl Id {
        /// Creates a new random [`Id`].
        #[must_use]
        pub fn new() -> Self {
            Self(Uuid::new_v4())
        }
    }

    /// Name of an [`AddOn`].
    #[derive(
        AsRef,
        Clone,
        Debug,
        Deserialize,
        Display,
        Eq,
        Hash,
        PartialEq,
        Serialize,
    )]
    #[as_ref(forward)]
    #[serde(try_from = "String")]
    pub struct Name(String);

    impl TryFrom<String> for Name {
        type Error = &'static str;

        fn try_from(s: String) -> Result<Self, Self::Error> {
            Self::new(s).ok_or("invalid `Name`")
        }
    }

    impl Name {
        /// Creates a new [`Name`] if the given `name` is valid.
        #[must_use]
        pub fn new(name: impl Into<String>) -> Option<Self> {
            let name = name.into();
            let valid =
                name.trim() == name && !name.is_empty() && name.len() <= 512;
            valid.then_some(Self(name))
        }
    }

    impl FromStr for Name {
        type Err = &'static str;

        fn from_str(s: &str) -> Result<Self, Self::Err> {
            Self::new(s).ok_or("invalid `Name`")
        }
    }
}

pub use self::add_on::AddOn;
