//! Availability-check wire definitions.

use common::Date;
use serde::{Deserialize, Serialize};

use crate::domain::{range::DateRange, venue};

/// Authoritative availability check of a candidate [`DateRange`], performed
/// as `POST /bookings/availability`.
///
/// The client-side [`AvailabilityIndex`] answer is advisory only; this
/// probe's [`Verdict`] is final and wins on disagreement.
///
/// [`AvailabilityIndex`]: crate::domain::AvailabilityIndex
#[derive(Clone, Copy, Debug)]
pub struct Probe {
    /// [`venue::Id`] to check.
    pub venue: venue::Id,

    /// Candidate [`DateRange`].
    pub range: DateRange,
}

/// Wire body of a [`Probe`].
#[derive(Clone, Copy, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProbeBody {
    /// ID of the probed venue.
    pub listing_id: venue::Id,

    /// First date of the candidate range.
    pub start_date: Date,

    /// Last date of the candidate range, inclusive.
    pub end_date: Date,
}

impl From<Probe> for ProbeBody {
    fn from(probe: Probe) -> Self {
        Self {
            listing_id: probe.venue,
            start_date: probe.range.start(),
            end_date: probe.range.end_inclusive(),
        }
    }
}

/// Verdict of a [`Probe`].
#[derive(Clone, Copy, Debug, Deserialize)]
pub struct Verdict {
    /// Indicator whether the probed range is available.
    #[serde(alias = "isAvailable")]
    pub available: bool,
}
