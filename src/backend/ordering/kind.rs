//! Sibling kinds and their scopes
//!
//! A *kind* describes one table of ordered siblings: its name, the columns
//! that hold the parent key, and the payload columns copied by `duplicate`.
//! A *scope* identifies one parent; siblings are ordered within it.

use std::fmt;

use futures_util::future::BoxFuture;
use sqlx::sqlite::SqliteRow;
use sqlx::SqliteConnection;
use uuid::Uuid;

use crate::backend::error::BackendError;

/// Column holding the zero-based sibling position in every ordered table
pub const POSITION_COLUMN: &str = "position";

/// One parent of a sibling list
pub trait ParentScope: Copy + Eq + fmt::Debug + Send + Sync + 'static {
    /// Column that identifies this parent
    fn column(&self) -> &'static str;

    /// Key stored in `column()`
    fn key(&self) -> Uuid;

    /// Table holding the parent row
    fn parent_table(&self) -> &'static str;

    /// Parent entity name used in not-found errors
    fn parent_label(&self) -> &'static str;

    /// Value of every parent column of the kind for an item in this scope
    ///
    /// Kinds with several optional parents (sections: page or template)
    /// list all of them so moving an item clears the old parent.
    fn assignments(&self) -> Vec<(&'static str, Option<Uuid>)> {
        vec![(self.column(), Some(self.key()))]
    }
}

/// A table of ordered siblings
pub trait SiblingKind: Send + Sync + 'static {
    type Scope: ParentScope;

    /// Table name
    const TABLE: &'static str;

    /// Entity name used in errors and logs ("Page", "Section", ...)
    const LABEL: &'static str;

    /// Every column that can hold a parent key
    const PARENT_COLUMNS: &'static [&'static str];

    /// Columns copied verbatim when an item is duplicated
    const PAYLOAD_COLUMNS: &'static [&'static str];

    /// Read the scope from a row selecting `PARENT_COLUMNS`
    fn scope_from_row(row: &SqliteRow) -> Result<Self::Scope, sqlx::Error>;
}

/// A sibling kind whose API representation can be read on the writing connection
pub trait SiblingRecord: SiblingKind {
    /// What handlers return for one item (a row, or a row with its children)
    type Record: Send + 'static;

    /// Read `id` on `conn`, failing with `NotFound`
    fn fetch<'c>(conn: &'c mut SqliteConnection, id: Uuid) -> BoxFuture<'c, Result<Self::Record, BackendError>>;
}

/// Where one sibling currently sits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement<S> {
    pub id: Uuid,
    pub scope: S,
    pub order: i64,
}

impl<S: fmt::Debug> fmt::Display for Placement<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {} in {:?}", self.id, self.order, self.scope)
    }
}
