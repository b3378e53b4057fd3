//! [`Venue`] queries.

use common::operations::By;

use crate::domain::{venue, Venue};

use super::FromMarketplace;

/// [`Query`] of a single [`Venue`] by its [`venue::Selector`].
///
/// Resolves to [`None`] if no such venue is listed.
///
/// [`Query`]: super::Query
pub type BySelector = FromMarketplace<By<Option<Venue>, venue::Selector>>;
