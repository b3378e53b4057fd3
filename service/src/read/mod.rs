//! Wire (read-model) definitions of the marketplace collaborator.
//!
//! Collaborator payloads are loosely shaped in the wild; they are
//! normalized into validated domain values here, at the network boundary,
//! instead of being defensively re-parsed at every call site.

pub mod availability;
pub mod booking;
pub mod venue;
