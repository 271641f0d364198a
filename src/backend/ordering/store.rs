//! Transactional sibling operations
//!
//! [`SiblingStore`] wraps each `ops` primitive in its own transaction and
//! checks the density of every scope it touched before committing. Entity
//! modules that need extra writes in the same transaction (inserting the row
//! itself, updating a home-page flag) call `ops` directly instead.

use std::marker::PhantomData;

use sqlx::SqliteConnection;
use uuid::Uuid;

use crate::backend::db::Database;
use crate::backend::error::BackendError;
use crate::backend::ordering::kind::{Placement, SiblingKind, SiblingRecord};
use crate::backend::ordering::ops;

/// Ordered sibling list operations for one kind of entity
pub struct SiblingStore<K> {
    db: Database,
    kind: PhantomData<fn() -> K>,
}

impl<K> Clone for SiblingStore<K> {
    fn clone(&self) -> Self {
        Self {
            db: self.db.clone(),
            kind: PhantomData,
        }
    }
}

impl<K> std::fmt::Debug for SiblingStore<K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SiblingStore").field("db", &self.db).finish()
    }
}

impl<K: SiblingKind> SiblingStore<K> {
    pub fn new(db: Database) -> Self {
        Self {
            db,
            kind: PhantomData,
        }
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    /// Move `id` to `new_order` among its siblings
    ///
    /// # Arguments
    /// * `id` - Item to move
    /// * `new_order` - Target position, clamped to `[0, N-1]`
    ///
    /// # Returns
    /// The item's placement afterwards (unchanged when already there)
    pub async fn reorder(&self, id: Uuid, new_order: i64) -> Result<Placement<K::Scope>, BackendError> {
        let placement = self
            .db
            .transaction("reorder", move |conn| Box::pin(reorder_tx::<K>(conn, id, new_order)))
            .await?;

        tracing::info!("Reordered {} {}", K::LABEL, placement);
        Ok(placement)
    }

    /// Delete `id`; later siblings move up by one
    ///
    /// # Returns
    /// Where the item was
    pub async fn delete(&self, id: Uuid) -> Result<Placement<K::Scope>, BackendError> {
        let removed = self
            .db
            .transaction("delete", move |conn| {
                Box::pin(async move {
                    let removed = ops::remove_in::<K>(conn, id).await?;
                    ops::verify_density::<K>(conn, removed.scope).await?;
                    Ok(removed)
                })
            })
            .await?;

        tracing::info!("Deleted {} {}", K::LABEL, removed);
        Ok(removed)
    }

    /// Copy `id` into the position right after it
    ///
    /// # Returns
    /// Placement of the new copy
    pub async fn duplicate(&self, id: Uuid) -> Result<Placement<K::Scope>, BackendError> {
        let copy = self
            .db
            .transaction("duplicate", move |conn| Box::pin(duplicate_tx::<K>(conn, id)))
            .await?;

        tracing::info!("Duplicated {} {} as {}", K::LABEL, id, copy);
        Ok(copy)
    }

    /// Move `id` under another parent, appending unless `new_order` is given
    ///
    /// Moving within the same parent behaves like [`reorder`](Self::reorder)
    /// with a default target of the last position.
    pub async fn move_to_scope(
        &self,
        id: Uuid,
        target: K::Scope,
        new_order: Option<i64>,
    ) -> Result<Placement<K::Scope>, BackendError> {
        let moved = self
            .db
            .transaction("move", move |conn| Box::pin(move_tx::<K>(conn, id, target, new_order)))
            .await?;

        tracing::info!("Moved {} {}", K::LABEL, moved);
        Ok(moved)
    }

    /// Ids and positions of the siblings in `scope`, in order
    pub async fn siblings(&self, scope: K::Scope) -> Result<Vec<(Uuid, i64)>, BackendError> {
        let mut conn = self.db.pool().acquire().await?;
        ops::list_in::<K>(&mut *conn, scope).await
    }
}

impl<K: SiblingRecord> SiblingStore<K> {
    /// [`reorder`](Self::reorder), returning the item as committed
    pub async fn reorder_and_fetch(&self, id: Uuid, new_order: i64) -> Result<K::Record, BackendError> {
        let (placement, record) = self
            .db
            .transaction("reorder", move |conn| {
                Box::pin(async move {
                    let placement = reorder_tx::<K>(conn, id, new_order).await?;
                    let record = K::fetch(conn, placement.id).await?;
                    Ok((placement, record))
                })
            })
            .await?;

        tracing::info!("Reordered {} {}", K::LABEL, placement);
        Ok(record)
    }

    /// [`duplicate`](Self::duplicate), returning the new copy as committed
    pub async fn duplicate_and_fetch(&self, id: Uuid) -> Result<K::Record, BackendError> {
        let (copy, record) = self
            .db
            .transaction("duplicate", move |conn| {
                Box::pin(async move {
                    let copy = duplicate_tx::<K>(conn, id).await?;
                    let record = K::fetch(conn, copy.id).await?;
                    Ok((copy, record))
                })
            })
            .await?;

        tracing::info!("Duplicated {} {} as {}", K::LABEL, id, copy);
        Ok(record)
    }

    /// [`move_to_scope`](Self::move_to_scope), returning the item as committed
    pub async fn move_and_fetch(
        &self,
        id: Uuid,
        target: K::Scope,
        new_order: Option<i64>,
    ) -> Result<K::Record, BackendError> {
        let (moved, record) = self
            .db
            .transaction("move", move |conn| {
                Box::pin(async move {
                    let moved = move_tx::<K>(conn, id, target, new_order).await?;
                    let record = K::fetch(conn, moved.id).await?;
                    Ok((moved, record))
                })
            })
            .await?;

        tracing::info!("Moved {} {}", K::LABEL, moved);
        Ok(record)
    }
}

async fn reorder_tx<K: SiblingKind>(
    conn: &mut SqliteConnection,
    id: Uuid,
    new_order: i64,
) -> Result<Placement<K::Scope>, BackendError> {
    let placement = ops::reorder_in::<K>(conn, id, new_order).await?;
    ops::verify_density::<K>(conn, placement.scope).await?;
    Ok(placement)
}

async fn duplicate_tx<K: SiblingKind>(conn: &mut SqliteConnection, id: Uuid) -> Result<Placement<K::Scope>, BackendError> {
    let copy = ops::duplicate_in::<K>(conn, id).await?;
    ops::verify_density::<K>(conn, copy.scope).await?;
    Ok(copy)
}

async fn move_tx<K: SiblingKind>(
    conn: &mut SqliteConnection,
    id: Uuid,
    target: K::Scope,
    new_order: Option<i64>,
) -> Result<Placement<K::Scope>, BackendError> {
    let from = ops::locate::<K>(conn, id).await?;
    let moved = ops::move_in::<K>(conn, id, target, new_order).await?;
    ops::verify_density::<K>(conn, from.scope).await?;
    if moved.scope != from.scope {
        ops::verify_density::<K>(conn, moved.scope).await?;
    }
    Ok(moved)
}
