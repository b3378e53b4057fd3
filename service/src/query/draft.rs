//! [`BookingDraft`] queries.

use common::operations::By;

use crate::{domain::BookingDraft, infra::session};

use super::FromSessions;

/// [`Query`] of the current [`BookingDraft`] of a session.
///
/// Resolves to [`None`] if the session holds no draft.
///
/// [`Query`]: super::Query
pub type Current = FromSessions<By<Option<BookingDraft>, session::Id>>;
