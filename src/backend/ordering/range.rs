//! Position ranges and shifts
//!
//! Every multi-sibling change is one range update: "add `delta` to the
//! position of every sibling whose position lies in `range`". This module
//! computes those updates; `ops` turns them into SQL.

use std::ops::{Bound, RangeBounds};

/// A contiguous range of sibling positions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderRange {
    pub start: Bound<i64>,
    pub end: Bound<i64>,
}

impl OrderRange {
    /// `position >= order`
    pub fn at_or_after(order: i64) -> Self {
        Self {
            start: Bound::Included(order),
            end: Bound::Unbounded,
        }
    }

    /// `position > order`
    pub fn after(order: i64) -> Self {
        Self {
            start: Bound::Excluded(order),
            end: Bound::Unbounded,
        }
    }

    /// SQL predicate over `column` plus the values to bind, in order
    pub fn predicate(&self, column: &str) -> (String, Vec<i64>) {
        let mut clauses = Vec::with_capacity(2);
        let mut binds = Vec::with_capacity(2);

        match self.start {
            Bound::Included(v) => {
                clauses.push(format!("{} >= ?", column));
                binds.push(v);
            }
            Bound::Excluded(v) => {
                clauses.push(format!("{} > ?", column));
                binds.push(v);
            }
            Bound::Unbounded => {}
        }
        match self.end {
            Bound::Included(v) => {
                clauses.push(format!("{} <= ?", column));
                binds.push(v);
            }
            Bound::Excluded(v) => {
                clauses.push(format!("{} < ?", column));
                binds.push(v);
            }
            Bound::Unbounded => {}
        }

        if clauses.is_empty() {
            ("1 = 1".to_string(), binds)
        } else {
            (clauses.join(" AND "), binds)
        }
    }
}

impl RangeBounds<i64> for OrderRange {
    fn start_bound(&self) -> Bound<&i64> {
        self.start.as_ref()
    }

    fn end_bound(&self) -> Bound<&i64> {
        self.end.as_ref()
    }
}

/// Add `delta` to every sibling position inside `range`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shift {
    pub range: OrderRange,
    pub delta: i64,
}

impl Shift {
    /// Make room for a new sibling at `order`
    pub fn open_slot_at(order: i64) -> Self {
        Self {
            range: OrderRange::at_or_after(order),
            delta: 1,
        }
    }

    /// Make room directly behind `order` (duplicate)
    pub fn open_slot_after(order: i64) -> Self {
        Self {
            range: OrderRange::after(order),
            delta: 1,
        }
    }

    /// Close the hole left by a sibling that was at `order`
    pub fn close_gap_at(order: i64) -> Self {
        Self {
            range: OrderRange::after(order),
            delta: -1,
        }
    }

    /// Shift of the siblings passed over when one sibling moves from `from` to `to`
    ///
    /// Moving up (`to < from`) pushes `[to, from)` down by one; moving down
    /// pulls `(from, to]` up by one. `None` when nothing moves.
    pub fn for_reorder(from: i64, to: i64) -> Option<Self> {
        if from == to {
            return None;
        }
        let shift = if to < from {
            Self {
                range: OrderRange {
                    start: Bound::Included(to),
                    end: Bound::Excluded(from),
                },
                delta: 1,
            }
        } else {
            Self {
                range: OrderRange {
                    start: Bound::Excluded(from),
                    end: Bound::Included(to),
                },
                delta: -1,
            }
        };
        Some(shift)
    }

    /// Position after the shift
    pub fn apply(&self, order: i64) -> i64 {
        if self.range.contains(&order) {
            order + self.delta
        } else {
            order
        }
    }
}
