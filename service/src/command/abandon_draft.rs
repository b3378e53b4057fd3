//! [`AbandonDraft`] [`Command`] definition.

use common::operations::Delete;
use tracerr::Traced;

use crate::{
    infra::{session, Sessions},
    Service,
};

use super::Command;

/// [`Command`] abandoning the session's [`BookingDraft`], if any.
///
/// Resolves to whether a draft actually existed. Abandoning an empty
/// session is not an error.
///
/// [`BookingDraft`]: crate::domain::BookingDraft
#[derive(Clone, Copy, Debug)]
pub struct AbandonDraft {
    /// [`session::Id`] to abandon the draft of.
    pub session: session::Id,
}

impl<Mp, St> Command<AbandonDraft> for Service<Mp, St>
where
    St: Sessions<Delete<session::Id>, Ok = bool, Err = Traced<session::Error>>,
{
    type Ok = bool;
    type Err = Traced<session::Error>;

    async fn execute(
        &self,
        cmd: AbandonDraft,
    ) -> Result<Self::Ok, Self::Err> {
        self.sessions()
            .execute(Delete(cmd.session))
            .await
            .map_err(tracerr::wrap!())
    }
}

#[cfg(test)]
mod spec {
    use common::operations::Insert;

    use crate::{
        domain::draft::Stage,
        infra::{session, Sessions as _},
        stub,
    };

    use super::{AbandonDraft, Command as _};

    #[tokio::test]
    async fn reports_whether_a_draft_existed() {
        let service = stub::service(stub::Marketplace::default());
        let session = session::Id::new();
        service
            .sessions()
            .execute(Insert(session::Slot {
                session,
                draft: stub::draft(Stage::Staged),
            }))
            .await
            .unwrap();

        assert!(service.execute(AbandonDraft { session }).await.unwrap());
        assert!(!service.execute(AbandonDraft { session }).await.unwrap());
    }
}
