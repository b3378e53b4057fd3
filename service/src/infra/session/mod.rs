//! Draft-session store implementations.

pub mod memory;

use derive_more::{Display, Error as StdError, From, FromStr, Into};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::BookingDraft;

pub use self::memory::InMemory;

/// Draft-session store operation.
pub use common::Handler as Sessions;

/// ID of a booking session owning a draft [`Slot`].
///
/// Minted server-side on the first staging and echoed back by the client in
/// every subsequent request of the flow.
#[derive(
    Clone,
    Copy,
    Debug,
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

impl Default for Id {
    fn default() -> Self {
        Self::new()
    }
}

/// Slot pairing a booking session with its single active [`BookingDraft`].
///
/// A session holds at most one draft: writing a slot replaces whatever draft
/// the session held before.
#[derive(Clone, Debug)]
pub struct Slot {
    /// Owning session [`Id`].
    pub session: Id,

    /// [`BookingDraft`] held in this [`Slot`].
    pub draft: BookingDraft,
}

/// [`Sessions`] store error.
#[derive(Clone, Copy, Debug, Display, StdError)]
pub enum Error {
    /// Updated [`Slot`] no longer exists, e.g. the draft was abandoned
    /// concurrently.
    #[display("`Slot(session: {_0})` no longer exists")]
    LostSlot(#[error(not(source))] Id),
}
