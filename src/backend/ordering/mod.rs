//! Ordered Sibling Engine
//!
//! Pages (per website), sections (per page or template) and components (per
//! section) each carry a zero-based `order`. This module keeps those
//! positions dense: within one parent, N siblings always sit at exactly
//! `0..N`, with no duplicates, and no operation touches another parent's
//! siblings.
//!
//! # Module Structure
//!
//! ```text
//! ordering/
//! ├── mod.rs   - Module exports and documentation
//! ├── kind.rs  - SiblingKind / SiblingRecord / ParentScope traits, Placement
//! ├── range.rs - Position ranges and shifts (pure)
//! ├── ops.rs   - Operations over an open transaction
//! └── store.rs - SiblingStore: one transaction per operation
//! ```
//!
//! # Operations
//!
//! | Operation | Shift applied | Final write |
//! |-----------|---------------|-------------|
//! | insert at k | `[k, ∞) += 1` | row at k (k clamped to `[0, N]`) |
//! | append | none | row at `max + 1` |
//! | reorder old → new, new < old | `[new, old) += 1` | item at new |
//! | reorder old → new, new > old | `(old, new] -= 1` | item at new |
//! | delete at k | `(k, ∞) -= 1` | row removed |
//! | duplicate at k | `(k, ∞) += 1` | copy at k + 1 |
//! | move to other scope | old `(k, ∞) -= 1`, new as insert | parent and position |
//!
//! Each operation runs inside one transaction; a missing item fails with
//! `NotFound` before anything is written.

pub mod kind;
pub mod ops;
pub mod range;
pub mod store;

pub use kind::{ParentScope, Placement, SiblingKind, SiblingRecord, POSITION_COLUMN};
pub use range::{OrderRange, Shift};
pub use store::SiblingStore;
