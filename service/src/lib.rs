//! Service contains the business logic of the booking flow.
//!
//! List of available Cargo features:
#![doc = document_features::document_features!()]
#![deny(
    nonstandard_style,
    rust_2018_idioms,
    rustdoc::all,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code
)]
#![forbid(non_ascii_idents)]
#![warn(
    clippy::allow_attributes,
    clippy::allow_attributes_without_reason,
    clippy::pedantic,
    clippy::wildcard_enum_match_arm,
    deprecated_in_future,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unreachable_pub,
    unused_crate_dependencies,
    unused_import_braces,
    unused_labels,
    unused_lifetimes,
    unused_qualifications,
    unused_results
)]

pub mod command;
pub mod domain;
pub mod infra;
pub mod query;
pub mod read;

use domain::price::FeeSchedule;

pub use self::{command::Command, query::Query};

#[cfg(test)]
mod stub;

/// [`Service`] configuration.
#[derive(Clone, Copy, Debug, Default)]
pub struct Config {
    /// [`FeeSchedule`] applied to every priced booking.
    pub fees: FeeSchedule,
}

/// Domain service of the booking flow.
///
/// Generic over its `Mp` marketplace collaborator backend and its `St`
/// draft-session store.
#[derive(Clone, Debug)]
pub struct Service<Mp, St> {
    /// Configuration of this [`Service`].
    config: Config,

    /// Marketplace collaborator of this [`Service`].
    marketplace: Mp,

    /// Draft-session store of this [`Service`].
    sessions: St,
}

impl<Mp, St> Service<Mp, St> {
    /// Creates a new [`Service`] with the provided parameters.
    pub fn new(config: Config, marketplace: Mp, sessions: St) -> Self {
        Self {
            config,
            marketplace,
            sessions,
        }
    }

    /// Returns [`Config`] of this [`Service`].
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns the marketplace collaborator of this [`Service`].
    #[must_use]
    pub fn marketplace(&self) -> &Mp {
        &self.marketplace
    }

    /// Returns the draft-session store of this [`Service`].
    #[must_use]
    pub fn sessions(&self) -> &St {
        &self.sessions
    }
}
