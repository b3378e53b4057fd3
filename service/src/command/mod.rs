//! [`Command`] definitions.

pub mod abandon_draft;
pub mod review_draft;
pub mod stage_draft;
pub mod submit_draft;

use std::collections::BTreeSet;

use crate::domain::{
    draft::SelectedAddOn,
    venue::{add_on, Venue},
};

/// [`Command`] of a [`Service`], mutating its state.
///
/// [`Service`]: crate::Service
pub use common::Handler as Command;

pub use self::{
    abandon_draft::AbandonDraft,
    review_draft::{Reconciled, ReviewDraft},
    stage_draft::{StageDraft, Staged},
    submit_draft::{SubmitDraft, Submitted},
};

/// Denormalizes the `selected` add-ons of the `venue` for display.
///
/// Duplicates count once, keeping the first-seen order. Every ID is expected
/// to be validated against the `venue` already.
pub(crate) fn denormalize_add_ons(
    venue: &Venue,
    selected: &[add_on::Id],
) -> Vec<SelectedAddOn> {
    let mut seen = BTreeSet::new();
    selected
        .iter()
        .copied()
        .filter(|id| seen.insert(*id))
        .filter_map(|id| venue.add_on(id))
        .map(|a| SelectedAddOn {
            id: a.id,
            name: a.name.clone(),
            price: a.price,
        })
        .collect()
}
