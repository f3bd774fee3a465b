//! Circular doubly-linked rings addressed by arena indices.
//!
//! Heap nodes that live in an arena cannot hold pointers to each other, so the
//! sibling rings of a Fibonacci heap are expressed in terms of node ids instead.
//! The storage that owns the nodes implements [`RingLinks`] and the ring
//! manipulation itself lives in [`RingOps`].
//!
//! In a circular ring:
//! - A single node points to itself (both `next` and `prev`)
//! - There is no head or tail - any node can be the entry point
//! - Splicing two rings together is O(1)
//! - Iteration wraps around, so it must remember where it started
//!
//! # Example
//!
//! ```rust
//! use index_ring::{RingLinks, RingOps};
//!
//! struct Table {
//!     next: Vec<usize>,
//!     prev: Vec<usize>,
//! }
//!
//! impl RingLinks<usize> for Table {
//!     fn next(&self, id: usize) -> usize { self.next[id] }
//!     fn prev(&self, id: usize) -> usize { self.prev[id] }
//!     fn set_next(&mut self, id: usize, next: usize) { self.next[id] = next; }
//!     fn set_prev(&mut self, id: usize, prev: usize) { self.prev[id] = prev; }
//! }
//!
//! let mut table = Table { next: vec![0; 3], prev: vec![0; 3] };
//! let ops = RingOps::new();
//! for id in 0..3 {
//!     ops.make_singleton(&mut table, id);
//! }
//! ops.insert_after(&mut table, 0, 1);
//! ops.insert_after(&mut table, 1, 2);
//!
//! let order: Vec<usize> = ops.iter(&table, 0).collect();
//! assert_eq!(order, vec![0, 1, 2]);
//! assert_eq!(ops.remove(&mut table, 1), Some(2));
//! assert_eq!(ops.iter(&table, 0).count(), 2);
//! ```

#![no_std]

use core::fmt;

// =============================================================================
// RingLinks
// =============================================================================

/// Access to the `next`/`prev` link fields of the nodes of a ring.
///
/// Implementors are usually the arena that owns the nodes. Every id passed to
/// these methods must refer to a live node; implementations are free to panic
/// otherwise.
pub trait RingLinks<Id: Copy + Eq> {
    /// Returns the successor of `id` in its ring.
    fn next(&self, id: Id) -> Id;

    /// Returns the predecessor of `id` in its ring.
    fn prev(&self, id: Id) -> Id;

    /// Overwrites the successor link of `id`.
    fn set_next(&mut self, id: Id, next: Id);

    /// Overwrites the predecessor link of `id`.
    fn set_prev(&mut self, id: Id, prev: Id);
}

// =============================================================================
// RingError
// =============================================================================

/// A structural defect found by [`RingOps::check`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RingError<Id> {
    /// `prev(next(at)) != at`, the ring is not consistently doubly linked.
    BrokenLink {
        /// The node whose successor does not point back to it.
        at: Id,
    },
    /// Walking `next` links did not return to the start within the limit.
    Unterminated {
        /// The number of nodes walked before giving up.
        walked: usize,
    },
}

impl<Id: fmt::Debug> fmt::Display for RingError<Id> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RingError::BrokenLink { at } => {
                write!(f, "ring link broken at {at:?}: successor does not point back")
            }
            RingError::Unterminated { walked } => {
                write!(f, "ring did not close after walking {walked} nodes")
            }
        }
    }
}

// =============================================================================
// RingOps
// =============================================================================

/// Operations for manipulating circular doubly-linked rings.
///
/// All operations except [`iter`](RingOps::iter) and [`check`](RingOps::check)
/// are O(1).
#[derive(Debug, Clone, Copy, Default)]
pub struct RingOps;

impl RingOps {
    /// Creates a new `RingOps`.
    #[inline]
    pub const fn new() -> Self {
        RingOps
    }

    /// Makes `id` a ring of one element: `next(id) == prev(id) == id`.
    #[inline]
    pub fn make_singleton<Id, L>(&self, links: &mut L, id: Id)
    where
        Id: Copy + Eq,
        L: RingLinks<Id>,
    {
        links.set_next(id, id);
        links.set_prev(id, id);
    }

    /// Returns true if `id` is alone in its ring.
    #[inline]
    pub fn is_singleton<Id, L>(&self, links: &L, id: Id) -> bool
    where
        Id: Copy + Eq,
        L: RingLinks<Id>,
    {
        links.next(id) == id
    }

    /// Inserts the singleton `new` right after `at`.
    #[inline]
    pub fn insert_after<Id, L>(&self, links: &mut L, at: Id, new: Id)
    where
        Id: Copy + Eq,
        L: RingLinks<Id>,
    {
        debug_assert!(self.is_singleton(links, new), "inserted node is still linked");
        let next = links.next(at);
        links.set_next(at, new);
        links.set_prev(new, at);
        links.set_next(new, next);
        links.set_prev(next, new);
    }

    /// Inserts the singleton `new` right before `at`.
    #[inline]
    pub fn insert_before<Id, L>(&self, links: &mut L, at: Id, new: Id)
    where
        Id: Copy + Eq,
        L: RingLinks<Id>,
    {
        debug_assert!(self.is_singleton(links, new), "inserted node is still linked");
        let prev = links.prev(at);
        links.set_prev(at, new);
        links.set_next(new, at);
        links.set_prev(new, prev);
        links.set_next(prev, new);
    }

    /// Unlinks `id` from its ring, leaving it as a singleton.
    ///
    /// Returns the former successor of `id`, or `None` if `id` was the only
    /// element and the ring is now gone.
    #[inline]
    pub fn remove<Id, L>(&self, links: &mut L, id: Id) -> Option<Id>
    where
        Id: Copy + Eq,
        L: RingLinks<Id>,
    {
        let next = links.next(id);
        if next == id {
            return None;
        }
        let prev = links.prev(id);
        links.set_next(prev, next);
        links.set_prev(next, prev);
        self.make_singleton(links, id);
        Some(next)
    }

    /// Joins the ring containing `a` with the ring containing `b`.
    ///
    /// Returns an entry point into the merged ring, or `None` if both were empty.
    /// If either is `None`, returns the other.
    pub fn splice<Id, L>(&self, links: &mut L, a: Option<Id>, b: Option<Id>) -> Option<Id>
    where
        Id: Copy + Eq,
        L: RingLinks<Id>,
    {
        match (a, b) {
            (None, None) => None,
            (Some(a), None) => Some(a),
            (None, Some(b)) => Some(b),
            (Some(a), Some(b)) => {
                // Before:
                //   Ring A: ... <-> a_prev <-> a <-> ...
                //   Ring B: ... <-> b_prev <-> b <-> ...
                //
                // After:
                //   ... <-> a_prev <-> b <-> ... <-> b_prev <-> a <-> ...
                let a_prev = links.prev(a);
                let b_prev = links.prev(b);

                links.set_next(a_prev, b);
                links.set_prev(b, a_prev);

                links.set_next(b_prev, a);
                links.set_prev(a, b_prev);

                Some(a)
            }
        }
    }

    /// Iterates the ring in `next` order, beginning at `start`.
    ///
    /// The ring must not be modified while the iterator is alive; collect the
    /// ids first if the walk needs to relink nodes.
    pub fn iter<'a, Id, L>(&self, links: &'a L, start: Id) -> RingIter<'a, Id, L>
    where
        Id: Copy + Eq,
        L: RingLinks<Id>,
    {
        RingIter {
            links,
            start,
            current: Some(start),
        }
    }

    /// Verifies that the ring containing `start` is closed and consistently
    /// doubly linked, walking at most `limit` nodes.
    ///
    /// Returns the number of elements on success.
    pub fn check<Id, L>(&self, links: &L, start: Id, limit: usize) -> Result<usize, RingError<Id>>
    where
        Id: Copy + Eq,
        L: RingLinks<Id>,
    {
        let mut walked = 0;
        let mut current = start;
        loop {
            let next = links.next(current);
            if links.prev(next) != current {
                return Err(RingError::BrokenLink { at: current });
            }
            walked += 1;
            if next == start {
                return Ok(walked);
            }
            if walked >= limit {
                return Err(RingError::Unterminated { walked });
            }
            current = next;
        }
    }
}

// =============================================================================
// RingIter
// =============================================================================

/// Iterator over the ids of one ring, see [`RingOps::iter`].
pub struct RingIter<'a, Id, L> {
    links: &'a L,
    start: Id,
    current: Option<Id>,
}

impl<Id, L> Iterator for RingIter<'_, Id, L>
where
    Id: Copy + Eq,
    L: RingLinks<Id>,
{
    type Item = Id;

    fn next(&mut self) -> Option<Id> {
        let current = self.current?;
        let next = self.links.next(current);
        self.current = if next == self.start { None } else { Some(next) };
        Some(current)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use std::vec;
    use std::vec::Vec;

    struct Table {
        next: Vec<usize>,
        prev: Vec<usize>,
    }

    impl Table {
        fn singletons(n: usize) -> Self {
            Table {
                next: (0..n).collect(),
                prev: (0..n).collect(),
            }
        }
    }

    impl RingLinks<usize> for Table {
        fn next(&self, id: usize) -> usize {
            self.next[id]
        }

        fn prev(&self, id: usize) -> usize {
            self.prev[id]
        }

        fn set_next(&mut self, id: usize, next: usize) {
            self.next[id] = next;
        }

        fn set_prev(&mut self, id: usize, prev: usize) {
            self.prev[id] = prev;
        }
    }

    #[test]
    fn test_make_singleton() {
        let mut table = Table {
            next: vec![3],
            prev: vec![7],
        };
        let ops = RingOps::new();
        ops.make_singleton(&mut table, 0);
        assert!(ops.is_singleton(&table, 0));
        assert_eq!(table.prev(0), 0);
    }

    #[test]
    fn test_insert_after() {
        let mut table = Table::singletons(2);
        let ops = RingOps::new();
        ops.insert_after(&mut table, 0, 1);

        // Now: 0 <-> 1 <-> 0
        assert_eq!(table.next(0), 1);
        assert_eq!(table.next(1), 0);
        assert_eq!(table.prev(0), 1);
        assert_eq!(table.prev(1), 0);
    }

    #[test]
    fn test_insert_before_keeps_order() {
        let mut table = Table::singletons(3);
        let ops = RingOps::new();
        ops.insert_before(&mut table, 0, 1);
        ops.insert_before(&mut table, 0, 2);

        // Inserting before the entry point appends at the "end" of the walk
        let order: Vec<usize> = ops.iter(&table, 0).collect();
        assert_eq!(order, vec![0, 1, 2]);
        assert_eq!(ops.check(&table, 0, 10), Ok(3));
    }

    #[test]
    fn test_remove_single() {
        let mut table = Table::singletons(1);
        let ops = RingOps::new();
        assert_eq!(ops.remove(&mut table, 0), None);
        assert!(ops.is_singleton(&table, 0));
    }

    #[test]
    fn test_remove_middle() {
        let mut table = Table::singletons(3);
        let ops = RingOps::new();
        ops.insert_after(&mut table, 0, 1);
        ops.insert_after(&mut table, 1, 2);

        assert_eq!(ops.remove(&mut table, 1), Some(2));
        assert!(ops.is_singleton(&table, 1));

        // Now: 0 <-> 2 <-> 0
        assert_eq!(table.next(0), 2);
        assert_eq!(table.next(2), 0);
        assert_eq!(ops.check(&table, 2, 10), Ok(2));
    }

    #[test]
    fn test_splice_empty_sides() {
        let mut table = Table::singletons(1);
        let ops = RingOps::new();
        assert_eq!(ops.splice(&mut table, None, None), None);
        assert_eq!(ops.splice(&mut table, Some(0), None), Some(0));
        assert_eq!(ops.splice(&mut table, None, Some(0)), Some(0));
        assert!(ops.is_singleton(&table, 0));
    }

    #[test]
    fn test_splice_two_pairs() {
        let mut table = Table::singletons(4);
        let ops = RingOps::new();
        ops.insert_after(&mut table, 0, 1);
        ops.insert_after(&mut table, 2, 3);

        assert_eq!(ops.splice(&mut table, Some(0), Some(2)), Some(0));
        assert_eq!(ops.check(&table, 0, 10), Ok(4));

        let order: Vec<usize> = ops.iter(&table, 0).collect();
        assert_eq!(order, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_length_from_any_node() {
        let mut table = Table::singletons(5);
        let ops = RingOps::new();
        for i in 1..5 {
            ops.insert_after(&mut table, i - 1, i);
        }
        assert_eq!(ops.iter(&table, 0).count(), 5);
        assert_eq!(ops.check(&table, 3, 5), Ok(5));
    }

    #[test]
    fn test_check_detects_broken_link() {
        let mut table = Table::singletons(3);
        let ops = RingOps::new();
        ops.insert_after(&mut table, 0, 1);
        ops.insert_after(&mut table, 1, 2);
        table.prev[2] = 0;

        assert_eq!(ops.check(&table, 0, 10), Err(RingError::BrokenLink { at: 1 }));
    }

    #[test]
    fn test_check_detects_open_ring() {
        let mut table = Table::singletons(3);
        let ops = RingOps::new();
        ops.insert_after(&mut table, 0, 1);
        ops.insert_after(&mut table, 1, 2);

        assert_eq!(ops.check(&table, 0, 2), Err(RingError::Unterminated { walked: 2 }));
    }
}
