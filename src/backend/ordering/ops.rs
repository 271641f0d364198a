//! Sibling operations over an open transaction
//!
//! Every function here takes the transaction's connection and performs its
//! reads and range updates on it; none of them commits. Callers compose them
//! inside `Database::transaction`, together with any entity-specific writes,
//! so the whole change lands atomically or not at all.

use chrono::Utc;
use sqlx::{Row, SqliteConnection};
use uuid::Uuid;

use crate::backend::error::BackendError;
use crate::backend::ordering::kind::{ParentScope, Placement, SiblingKind, POSITION_COLUMN};
use crate::backend::ordering::range::Shift;

/// Current scope and position of `id`
///
/// # Errors
/// `NotFound` when no such row exists
pub async fn locate<K: SiblingKind>(
    conn: &mut SqliteConnection,
    id: Uuid,
) -> Result<Placement<K::Scope>, BackendError> {
    let sql = format!(
        "SELECT {}, {} FROM {} WHERE id = ?",
        K::PARENT_COLUMNS.join(", "),
        POSITION_COLUMN,
        K::TABLE
    );

    let row = sqlx::query(&sql)
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?
        .ok_or_else(|| BackendError::not_found(K::LABEL, id))?;

    Ok(Placement {
        id,
        scope: K::scope_from_row(&row)?,
        order: row.try_get(POSITION_COLUMN)?,
    })
}

/// Fail with `NotFound` unless the parent row of `scope` exists
pub async fn require_parent<S: ParentScope>(conn: &mut SqliteConnection, scope: S) -> Result<(), BackendError> {
    let sql = format!("SELECT 1 FROM {} WHERE id = ?", scope.parent_table());
    let found: Option<i64> = sqlx::query_scalar(&sql)
        .bind(scope.key())
        .fetch_optional(&mut *conn)
        .await?;

    match found {
        Some(_) => Ok(()),
        None => Err(BackendError::not_found(scope.parent_label(), scope.key())),
    }
}

/// Number of siblings in `scope`
pub async fn count<K: SiblingKind>(conn: &mut SqliteConnection, scope: K::Scope) -> Result<i64, BackendError> {
    let sql = format!("SELECT COUNT(*) FROM {} WHERE {} = ?", K::TABLE, scope.column());
    let count: i64 = sqlx::query_scalar(&sql)
        .bind(scope.key())
        .fetch_one(&mut *conn)
        .await?;
    Ok(count)
}

/// Position one past the last sibling (0 for an empty scope)
pub async fn next_order<K: SiblingKind>(conn: &mut SqliteConnection, scope: K::Scope) -> Result<i64, BackendError> {
    let sql = format!(
        "SELECT COALESCE(MAX({pos}) + 1, 0) FROM {table} WHERE {col} = ?",
        pos = POSITION_COLUMN,
        table = K::TABLE,
        col = scope.column()
    );
    let next: i64 = sqlx::query_scalar(&sql)
        .bind(scope.key())
        .fetch_one(&mut *conn)
        .await?;
    Ok(next)
}

/// Apply one range shift inside `scope`
///
/// # Returns
/// Number of siblings moved
pub async fn shift<K: SiblingKind>(
    conn: &mut SqliteConnection,
    scope: K::Scope,
    shift: Shift,
) -> Result<u64, BackendError> {
    let (predicate, bounds) = shift.range.predicate(POSITION_COLUMN);
    let sql = format!(
        "UPDATE {table} SET {pos} = {pos} + ?, updated_at = ? WHERE {col} = ? AND {predicate}",
        table = K::TABLE,
        pos = POSITION_COLUMN,
        col = scope.column(),
        predicate = predicate
    );

    let mut query = sqlx::query(&sql)
        .bind(shift.delta)
        .bind(Utc::now())
        .bind(scope.key());
    for bound in bounds {
        query = query.bind(bound);
    }

    let moved = query.execute(&mut *conn).await?.rows_affected();
    tracing::debug!(
        "Shifted {} {} sibling(s) by {} in {:?} ({:?}..{:?})",
        moved,
        K::LABEL,
        shift.delta,
        scope,
        shift.range.start,
        shift.range.end
    );
    Ok(moved)
}

/// Pick the position for a sibling about to be inserted into `scope`
///
/// Without a desired position the item goes last and nothing moves. With one,
/// the position is clamped to `[0, N]` and siblings at or after it move back
/// by one, leaving the slot free for the caller's INSERT.
pub async fn reserve_slot<K: SiblingKind>(
    conn: &mut SqliteConnection,
    scope: K::Scope,
    desired: Option<i64>,
) -> Result<i64, BackendError> {
    match desired {
        None => next_order::<K>(conn, scope).await,
        Some(desired) => {
            let len = count::<K>(conn, scope).await?;
            let order = desired.clamp(0, len);
            if order < len {
                shift::<K>(conn, scope, Shift::open_slot_at(order)).await?;
            }
            Ok(order)
        }
    }
}

async fn set_order<K: SiblingKind>(conn: &mut SqliteConnection, id: Uuid, order: i64) -> Result<(), BackendError> {
    let sql = format!(
        "UPDATE {} SET {} = ?, updated_at = ? WHERE id = ?",
        K::TABLE,
        POSITION_COLUMN
    );
    sqlx::query(&sql)
        .bind(order)
        .bind(Utc::now())
        .bind(id)
        .execute(&mut *conn)
        .await?;
    Ok(())
}

async fn set_placement<K: SiblingKind>(
    conn: &mut SqliteConnection,
    id: Uuid,
    scope: K::Scope,
    order: i64,
) -> Result<(), BackendError> {
    let assignments = scope.assignments();
    let parents: Vec<String> = assignments.iter().map(|(col, _)| format!("{} = ?", col)).collect();
    let sql = format!(
        "UPDATE {} SET {}, {} = ?, updated_at = ? WHERE id = ?",
        K::TABLE,
        parents.join(", "),
        POSITION_COLUMN
    );

    let mut query = sqlx::query(&sql);
    for (_, key) in assignments {
        query = query.bind(key);
    }
    query
        .bind(order)
        .bind(Utc::now())
        .bind(id)
        .execute(&mut *conn)
        .await?;
    Ok(())
}

/// Move `id` to `new_order` within its scope
///
/// The target is clamped to `[0, N-1]`. Moving to the current position
/// changes nothing.
pub async fn reorder_in<K: SiblingKind>(
    conn: &mut SqliteConnection,
    id: Uuid,
    new_order: i64,
) -> Result<Placement<K::Scope>, BackendError> {
    let current = locate::<K>(conn, id).await?;
    let len = count::<K>(conn, current.scope).await?;
    let target = new_order.clamp(0, (len - 1).max(0));

    let Some(passed_over) = Shift::for_reorder(current.order, target) else {
        return Ok(current);
    };

    shift::<K>(conn, current.scope, passed_over).await?;
    set_order::<K>(conn, id, target).await?;

    Ok(Placement {
        order: target,
        ..current
    })
}

/// Delete `id` and close the gap it leaves
///
/// Rows referencing the item are removed by the schema's cascades.
///
/// # Returns
/// Where the item was before deletion
pub async fn remove_in<K: SiblingKind>(
    conn: &mut SqliteConnection,
    id: Uuid,
) -> Result<Placement<K::Scope>, BackendError> {
    let removed = locate::<K>(conn, id).await?;

    let sql = format!("DELETE FROM {} WHERE id = ?", K::TABLE);
    sqlx::query(&sql).bind(id).execute(&mut *conn).await?;

    shift::<K>(conn, removed.scope, Shift::close_gap_at(removed.order)).await?;
    Ok(removed)
}

/// Copy `id` into the slot directly behind it
///
/// The copy gets a fresh id and timestamps and the same parent and payload.
pub async fn duplicate_in<K: SiblingKind>(
    conn: &mut SqliteConnection,
    id: Uuid,
) -> Result<Placement<K::Scope>, BackendError> {
    let source = locate::<K>(conn, id).await?;
    shift::<K>(conn, source.scope, Shift::open_slot_after(source.order)).await?;

    let copy_id = Uuid::new_v4();
    let now = Utc::now();
    let copied: Vec<&str> = K::PARENT_COLUMNS
        .iter()
        .chain(K::PAYLOAD_COLUMNS.iter())
        .copied()
        .collect();
    let copied = copied.join(", ");
    let sql = format!(
        "INSERT INTO {table} (id, {copied}, {pos}, created_at, updated_at) \
         SELECT ?, {copied}, ?, ?, ? FROM {table} WHERE id = ?",
        table = K::TABLE,
        copied = copied,
        pos = POSITION_COLUMN
    );

    sqlx::query(&sql)
        .bind(copy_id)
        .bind(source.order + 1)
        .bind(now)
        .bind(now)
        .bind(id)
        .execute(&mut *conn)
        .await?;

    Ok(Placement {
        id: copy_id,
        scope: source.scope,
        order: source.order + 1,
    })
}

/// Move `id` into `target`, optionally at `new_order`
///
/// Leaving the old scope closes the gap there; entering the new one either
/// appends or opens a slot (clamped to `[0, N]`). When `target` is the
/// item's current scope this is a reorder, defaulting to the last position.
///
/// # Errors
/// `NotFound` for a missing item or a missing target parent
pub async fn move_in<K: SiblingKind>(
    conn: &mut SqliteConnection,
    id: Uuid,
    target: K::Scope,
    new_order: Option<i64>,
) -> Result<Placement<K::Scope>, BackendError> {
    let current = locate::<K>(conn, id).await?;

    if current.scope == target {
        let last = count::<K>(conn, target).await? - 1;
        return reorder_in::<K>(conn, id, new_order.unwrap_or(last)).await;
    }

    require_parent(conn, target).await?;
    shift::<K>(conn, current.scope, Shift::close_gap_at(current.order)).await?;
    let order = reserve_slot::<K>(conn, target, new_order).await?;
    set_placement::<K>(conn, id, target, order).await?;

    Ok(Placement {
        id,
        scope: target,
        order,
    })
}

/// Sibling ids of `scope` in position order, with their positions
pub async fn list_in<K: SiblingKind>(
    conn: &mut SqliteConnection,
    scope: K::Scope,
) -> Result<Vec<(Uuid, i64)>, BackendError> {
    let sql = format!(
        "SELECT id, {pos} FROM {table} WHERE {col} = ? ORDER BY {pos}, created_at",
        pos = POSITION_COLUMN,
        table = K::TABLE,
        col = scope.column()
    );
    let rows = sqlx::query(&sql).bind(scope.key()).fetch_all(&mut *conn).await?;

    rows.iter()
        .map(|row| -> Result<(Uuid, i64), BackendError> {
            Ok((row.try_get("id")?, row.try_get(POSITION_COLUMN)?))
        })
        .collect()
}

/// Check that the positions in `scope` are exactly `0..N`
///
/// # Errors
/// `InvariantViolation` describing the positions found
pub async fn verify_density<K: SiblingKind>(conn: &mut SqliteConnection, scope: K::Scope) -> Result<(), BackendError> {
    let siblings = list_in::<K>(conn, scope).await?;
    let dense = siblings
        .iter()
        .enumerate()
        .all(|(expected, (_, order))| *order == expected as i64);

    if !dense {
        let found: Vec<i64> = siblings.iter().map(|(_, order)| *order).collect();
        return Err(BackendError::invariant(format!(
            "{} positions in {:?} are {:?}, expected 0..{}",
            K::LABEL,
            scope,
            found,
            siblings.len()
        )));
    }
    Ok(())
}
