//! [`Query`] definitions.

pub mod availability;
pub mod draft;
pub mod quote;
pub mod venue;

use common::operations::{By, Select};
use tracerr::Traced;

use crate::{
    infra::{marketplace, session, Marketplace, Sessions},
    Service,
};

/// Read [`Query`] of a [`Service`].
pub use common::Handler as Query;

/// [`Query`] piping a [`Select`] straight through to the marketplace
/// collaborator.
#[derive(Clone, Copy, Debug)]
pub struct FromMarketplace<T>(pub T);

impl<Mp, St, W, B> Query<FromMarketplace<By<W, B>>> for Service<Mp, St>
where
    Mp: Marketplace<
        Select<By<W, B>>,
        Ok = W,
        Err = Traced<marketplace::Error>,
    >,
{
    type Ok = W;
    type Err = Traced<marketplace::Error>;

    async fn execute(
        &self,
        FromMarketplace(by): FromMarketplace<By<W, B>>,
    ) -> Result<Self::Ok, Self::Err> {
        self.marketplace()
            .execute(Select(by))
            .await
            .map_err(tracerr::wrap!())
    }
}

/// [`Query`] piping a [`Select`] straight through to the draft-session
/// store.
#[derive(Clone, Copy, Debug)]
pub struct FromSessions<T>(pub T);

impl<Mp, St, W, B> Query<FromSessions<By<W, B>>> for Service<Mp, St>
where
    St: Sessions<Select<By<W, B>>, Ok = W, Err = Traced<session::Error>>,
{
    type Ok = W;
    type Err = Traced<session::Error>;

    async fn execute(
        &self,
        FromSessions(by): FromSessions<By<W, B>>,
    ) -> Result<Self::Ok, Self::Err> {
        self.sessions()
            .execute(Select(by))
            .await
            .map_err(tracerr::wrap!())
    }
}
