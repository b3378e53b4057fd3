//! [`BookingDraft`] definitions.

use common::{unit::Creation, DateTimeOf, Money};
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};

use super::{
    price::PriceBreakdown,
    range::DateRange,
    venue::{self, add_on},
};

#[cfg(doc)]
use super::Venue;

/// In-progress booking selection, handed off between the listing, summary
/// and confirmation pages through a session slot.
///
/// A draft is a client-side cache, not an authoritative financial record:
/// everything in it is revalidated and its breakdown recomputed before
/// submission.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingDraft {
    /// Display snapshot of the booked [`Venue`].
    pub venue: VenueCard,

    /// Selected [`DateRange`].
    pub range: DateRange,

    /// Selected add-ons, denormalized for display.
    pub add_ons: Vec<SelectedAddOn>,

    /// Expected [`Guests`].
    pub guests: Guests,

    /// [`PriceBreakdown`] computed when this draft was last (re)priced.
    pub breakdown: PriceBreakdown,

    /// [`Stage`] of this draft in the booking flow.
    pub stage: Stage,

    /// When this draft was created.
    #[serde(with = "common::datetime::serde::rfc3339")]
    pub created_at: CreationDateTime,
}

impl BookingDraft {
    /// Transitions this draft into the [`Stage::UnderReview`] stage.
    ///
    /// # Errors
    ///
    /// [`StageError`] if the draft has already been submitted.
    pub fn into_review(mut self) -> Result<Self, StageError> {
        match self.stage {
            Stage::Staged | Stage::UnderReview => {
                self.stage = Stage::UnderReview;
                Ok(self)
            }
            Stage::Submitted => Err(StageError {
                from: self.stage,
                to: Stage::UnderReview,
            }),
        }
    }

    /// Transitions this draft into the terminal [`Stage::Submitted`] stage.
    ///
    /// Only a reviewed draft may be submitted: the summary page must have
    /// reconciled the price first.
    ///
    /// # Errors
    ///
    /// [`StageError`] if the draft hasn't been reviewed, or has already been
    /// submitted.
    pub fn into_submitted(mut self) -> Result<Self, StageError> {
        match self.stage {
            Stage::UnderReview => {
                self.stage = Stage::Submitted;
                Ok(self)
            }
            Stage::Staged | Stage::Submitted => Err(StageError {
                from: self.stage,
                to: Stage::Submitted,
            }),
        }
    }
}

/// [`DateTimeOf`] a [`BookingDraft`] creation.
pub type CreationDateTime = DateTimeOf<Creation>;

/// Stage of a [`BookingDraft`] in the booking flow.
#[derive(
    Clone,
    Copy,
    Debug,
    Deserialize,
    Eq,
    PartialEq,
    Serialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum Stage {
    /// Written when the user proceeded from the venue page.
    Staged = 1,

    /// Loaded and reconciled by the summary page.
    UnderReview = 2,

    /// Handed to the payment flow. Terminal.
    Submitted = 3,
}

/// Error of an illegal [`Stage`] transition.
#[derive(Clone, Copy, Debug, Display, Error)]
#[display("illegal draft transition: {from} -> {to}")]
pub struct StageError {
    /// [`Stage`] the transition was attempted from.
    pub from: Stage,

    /// [`Stage`] the transition was attempted to.
    pub to: Stage,
}

/// Display snapshot of a booked [`Venue`], denormalized into a
/// [`BookingDraft`] for display continuity across pages.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VenueCard {
    /// ID of the [`Venue`].
    pub id: venue::Id,

    /// [`venue::Name`] of the [`Venue`].
    pub name: venue::Name,

    /// [`venue::Address`] of the [`Venue`].
    pub address: venue::Address,

    /// [`venue::ImageUrl`] of the [`Venue`], if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<venue::ImageUrl>,

    /// "Starting from" daily rate of the [`Venue`].
    pub start_price: Money,
}

/// Add-on selected into a [`BookingDraft`], denormalized for display.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct SelectedAddOn {
    /// ID of the add-on.
    pub id: add_on::Id,

    /// [`add_on::Name`] of the add-on.
    pub name: add_on::Name,

    /// Price of the add-on at selection time.
    pub price: Money,
}

/// Expected guests of a booking: either a headcount, or a free-text
/// override.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(untagged)]
pub enum Guests {
    /// Exact headcount.
    Count(Headcount),

    /// Free-text override, e.g. `"150-200 guests"`.
    Note(Note),
}

/// Guest headcount of a booking. At least 1.
#[derive(
    Clone, Copy, Debug, Deserialize, Display, Eq, PartialEq, Serialize,
)]
#[serde(try_from = "u32", into = "u32")]
pub struct Headcount(u32);

impl Headcount {
    /// Creates a new [`Headcount`] if the given `count` is at least 1.
    #[must_use]
    pub fn new(count: u32) -> Option<Self> {
        (count >= 1).then_some(Self(count))
    }
}

impl TryFrom<u32> for Headcount {
    type Error = &'static str;

    fn try_from(count: u32) -> Result<Self, Self::Error> {
        Self::new(count).ok_or("guest count must be at least 1")
    }
}

impl From<Headcount> for u32 {
    fn from(c: Headcount) -> Self {
        c.0
    }
}

/// Free-text guests override of a booking.
#[derive(Clone, Debug, Deserialize, Display, Eq, PartialEq, Serialize)]
#[serde(try_from = "String")]
pub struct Note(String);

impl Note {
    /// Creates a new [`Note`] if the given `note` is valid.
    #[must_use]
    pub fn new(note: impl Into<String>) -> Option<Self> {
        let note = note.into();
        let valid =
            note.trim() == note && !note.is_empty() && note.len() <= 256;
        valid.then_some(Self(note))
    }
}

impl TryFrom<String> for Note {
    type Error = &'static str;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s).ok_or("invalid guests note")
    }
}

#[cfg(test)]
mod spec {
    use super::{Guests, Headcount, Stage};

    #[test]
    fn headcount_rejects_zero() {
        assert!(Headcount::new(0).is_none());
        assert_eq!(Headcount::new(1).map(u32::from), Some(1));
    }

    #[test]
    fn guests_deserialize_untagged() {
        let count: Guests = serde_json::from_str("3").unwrap();
        assert!(matches!(count, Guests::Count(c) if u32::from(c) == 3));

        let note: Guests = serde_json::from_str("\"150-200 guests\"").unwrap();
        assert!(matches!(note, Guests::Note(_)));

        assert!(serde_json::from_str::<Guests>("0").is_err());
    }

    #[test]
    fn stage_is_screaming_snake_case() {
        assert_eq!(
            serde_json::to_string(&Stage::UnderReview).unwrap(),
            "\"UNDER_REVIEW\"",
        );
    }
}
