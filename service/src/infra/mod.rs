//! Infrastructure layer.

pub mod marketplace;
pub mod session;

pub use self::{
    marketplace::Marketplace,
    session::{InMemory, Sessions},
};
#[cfg(feature = "http")]
pub use self::marketplace::Http;
