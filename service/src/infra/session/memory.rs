//! In-memory implementation of the [`Sessions`] store.

use std::{collections::HashMap, sync::Arc};

use common::operations::{By, Delete, Insert, Select, Update};
use tokio::sync::RwLock;
use tracerr::Traced;

use crate::domain::BookingDraft;

use super::{Error, Id, Sessions, Slot};

/// In-memory [`Sessions`] store keeping at most one [`BookingDraft`] per
/// session.
#[derive(Clone, Debug, Default)]
pub struct InMemory {
    /// Stored [`Slot`]s, keyed by the owning session.
    slots: Arc<RwLock<HashMap<Id, BookingDraft>>>,
}

impl Sessions<Select<By<Option<BookingDraft>, Id>>> for InMemory {
    type Ok = Option<BookingDraft>;
    type Err = Traced<Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<BookingDraft>, Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        Ok(self.slots.read().await.get(&by.into_inner()).cloned())
    }
}

/// Replaces whatever draft the session held before.
impl Sessions<Insert<Slot>> for InMemory {
    type Ok = ();
    type Err = Traced<Error>;

    async fn execute(
        &self,
        Insert(slot): Insert<Slot>,
    ) -> Result<Self::Ok, Self::Err> {
        let Slot { session, draft } = slot;
        drop(self.slots.write().await.insert(session, draft));
        Ok(())
    }
}

/// Unlike [`Insert`], requires the [`Slot`] to still exist.
impl Sessions<Update<Slot>> for InMemory {
    type Ok = ();
    type Err = Traced<Error>;

    async fn execute(
        &self,
        Update(slot): Update<Slot>,
    ) -> Result<Self::Ok, Self::Err> {
        let Slot { session, draft } = slot;
        match self.slots.write().await.get_mut(&session) {
            Some(stored) => {
                *stored = draft;
                Ok(())
            }
            None => Err(tracerr::new!(Error::LostSlot(session))),
        }
    }
}

impl Sessions<Delete<Id>> for InMemory {
    type Ok = bool;
    type Err = Traced<Error>;

    async fn execute(
        &self,
        Delete(session): Delete<Id>,
    ) -> Result<Self::Ok, Self::Err> {
        Ok(self.slots.write().await.remove(&session).is_some())
    }
}

#[cfg(test)]
mod spec {
    use common::operations::{By, Delete, Insert, Select, Update};

    use crate::{domain::draft::Stage, stub};

    use super::{Id, InMemory, Sessions as _, Slot};

    #[tokio::test]
    async fn insert_overwrites_prior_draft() {
        let store = InMemory::default();
        let session = Id::new();

        store
            .execute(Insert(Slot {
                session,
                draft: stub::draft(Stage::Staged),
            }))
            .await
            .unwrap();
        store
            .execute(Insert(Slot {
                session,
                draft: stub::draft(Stage::UnderReview),
            }))
            .await
            .unwrap();

        let stored = store
            .execute(Select(By::<Option<_>, _>::new(session)))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.stage, Stage::UnderReview);
    }

    #[tokio::test]
    async fn update_requires_existing_slot() {
        let store = InMemory::default();
        let session = Id::new();

        let result = store
            .execute(Update(Slot {
                session,
                draft: stub::draft(Stage::UnderReview),
            }))
            .await;

        assert!(result.is_err());
    }

    #[tokio::test]
    async fn delete_reports_whether_a_draft_existed() {
        let store = InMemory::default();
        let session = Id::new();

        store
            .execute(Insert(Slot {
                session,
                draft: stub::draft(Stage::Staged),
            }))
            .await
            .unwrap();

        assert!(store.execute(Delete(session)).await.unwrap());
        assert!(!store.execute(Delete(session)).await.unwrap());
    }
}
