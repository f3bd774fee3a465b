//! Common traits for heap data structures
//!
//! Both heap variants implement the same capability contract, split the usual
//! way into two traits:
//!
//! - [`Heap`]: insert, find-min, delete-min and merge
//! - [`DecreaseKeyHeap`]: the handle-based operations, decrease-key and
//!   arbitrary delete
//!
//! Elements are `(priority, item)` pairs; the priority is the ordering key.
//!
//! The variants share no runtime state and no node layout. To mix them behind
//! a single runtime type use [`DynHeap`](crate::dyn_heap::DynHeap).

use crate::storage::NodeId;
use std::fmt::Debug;
use std::hash::Hash;
use thiserror::Error;

/// Error type for heap operations
///
/// Every variant is an invalid-argument failure: the operation was rejected
/// before touching the heap, so no state was mutated.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum HeapError {
    /// The new priority is not less than the current priority
    #[error("new priority is not less than current priority")]
    PriorityNotDecreased,
    /// The handle is stale, was issued by another heap, or its element was removed
    #[error("handle is no longer valid (element was removed or belongs to another heap)")]
    InvalidHandle,
    /// The handle refers to a hollow (logically deleted) node
    #[error("handle refers to a hollow node")]
    HollowNode,
    /// The two heaps being merged are different variants
    #[error("cannot merge heaps of different kinds")]
    IncompatibleHeaps,
}

impl HeapError {
    /// Every variant belongs to the invalid-argument class, so this is
    /// always true.
    pub fn is_invalid_argument(&self) -> bool {
        true
    }
}

/// A structural defect found by `check_invariants`.
///
/// These never result from bad user input; seeing one means the heap
/// implementation has a bug.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvariantViolation {
    #[error("sibling ring around {node:?} is broken: {detail}")]
    BrokenRing { node: NodeId, detail: String },
    #[error("node {node:?} records degree {recorded} but has {actual} children")]
    DegreeMismatch {
        node: NodeId,
        recorded: usize,
        actual: usize,
    },
    #[error("node {node:?} has a wrong parent link")]
    ParentMismatch { node: NodeId },
    #[error("root {node:?} is marked")]
    MarkedRoot { node: NodeId },
    #[error("child {child:?} has a smaller key than its parent {parent:?}")]
    HeapOrder { parent: NodeId, child: NodeId },
    #[error("min does not point at the smallest root")]
    StaleMin,
    #[error("the root {node:?} is hollow or has siblings")]
    MalformedRoot { node: NodeId },
    #[error("full node {node:?} carries an extra parent")]
    ExtraParentOnFullNode { node: NodeId },
    #[error("item stored in {node:?} points back at another node")]
    ItemBackReference { node: NodeId },
    #[error("expected {expected} elements but found {found}")]
    CountMismatch { expected: usize, found: usize },
    #[error("{unreachable} allocated nodes are not reachable from the root")]
    Unreachable { unreachable: usize },
}

/// A handle to an element in the heap, used for `decrease_key` and `delete`
///
/// Handles are small `Copy` identifiers. A handle whose element has been
/// removed is detected and rejected with [`HeapError::InvalidHandle`]; it never
/// silently refers to a different element.
pub trait Handle: Copy + Eq + Hash + Debug {}

/// Base trait for the mergeable min-heaps
///
/// `T` is the stored item, `P` the priority it is ordered by. Every insert
/// hands back a [`Handle`]; the operations that take one live in
/// [`DecreaseKeyHeap`].
///
/// # Example
///
/// ```rust
/// use mergeable_heaps::Heap;
/// use mergeable_heaps::fibonacci::FibonacciHeap;
///
/// let mut heap = FibonacciHeap::new();
/// heap.insert(10, "ten");
/// heap.insert(5, "five");
/// heap.insert(7, "seven");
/// assert_eq!(heap.find_min(), Some((&5, &"five")));
/// assert_eq!(heap.delete_min(), Some((5, "five")));
/// assert_eq!(heap.len(), 2);
/// ```
pub trait Heap<T, P: Ord> {
    /// The handle type returned by `insert`
    type Handle: Handle;

    /// Creates a new empty heap
    fn new() -> Self
    where
        Self: Sized;

    /// Returns the number of elements in the heap
    fn len(&self) -> usize;

    /// Returns true if the heap is empty
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Inserts an element with the given priority, returning its handle
    ///
    /// # Time Complexity
    /// O(1) amortized
    fn insert(&mut self, priority: P, item: T) -> Self::Handle;

    /// Inserts an element whose item is the priority itself
    fn insert_key(&mut self, priority: P) -> Self::Handle
    where
        P: Clone,
        T: From<P>,
    {
        let item = T::from(priority.clone());
        self.insert(priority, item)
    }

    /// Returns the minimum priority and its item without removing it
    ///
    /// # Time Complexity
    /// O(1)
    fn find_min(&self) -> Option<(&P, &T)>;

    /// Returns the handle of the current minimum
    fn find_min_handle(&self) -> Option<Self::Handle>;

    /// Returns the priority and item behind a handle, if it is still live
    fn get(&self, handle: &Self::Handle) -> Option<(&P, &T)>;

    /// Removes and returns the minimum, or `None` if the heap is empty
    ///
    /// # Time Complexity
    /// O(log n) amortized
    fn delete_min(&mut self) -> Option<(P, T)>;

    /// Absorbs all elements of `other`
    ///
    /// Handles issued by either heap remain valid for the merged heap.
    ///
    /// # Time Complexity
    /// O(1) amortized
    fn merge(&mut self, other: Self)
    where
        Self: Sized;

    /// Alias for [`insert`](Heap::insert), mirroring `BinaryHeap::push`
    fn push(&mut self, priority: P, item: T) -> Self::Handle {
        self.insert(priority, item)
    }

    /// Alias for [`find_min`](Heap::find_min), mirroring `BinaryHeap::peek`
    fn peek(&self) -> Option<(&P, &T)> {
        self.find_min()
    }

    /// Alias for [`delete_min`](Heap::delete_min), mirroring `BinaryHeap::pop`
    fn pop(&mut self) -> Option<(P, T)> {
        self.delete_min()
    }
}

/// Extension trait for heaps that act on individual elements through handles
///
/// # Example
///
/// ```rust
/// use mergeable_heaps::{DecreaseKeyHeap, Heap};
/// use mergeable_heaps::fibonacci::FibonacciHeap;
///
/// let mut heap = FibonacciHeap::new();
/// heap.insert(10, "ten");
/// let five = heap.insert(5, "five");
/// let seven = heap.insert(7, "seven");
///
/// let five = heap.decrease_key(&five, 1).unwrap();
/// assert_eq!(heap.get(&five), Some((&1, &"five")));
/// assert_eq!(heap.delete(&seven), Ok((7, "seven")));
/// assert_eq!(heap.delete_min(), Some((1, "five")));
/// ```
pub trait DecreaseKeyHeap<T, P: Ord>: Heap<T, P> {
    /// Lowers the priority of the element behind `handle`
    ///
    /// Returns the handle that now holds the element. Depending on the variant
    /// this may be a new handle, in which case the old one stops resolving.
    ///
    /// # Errors
    /// - [`HeapError::PriorityNotDecreased`] if `new_priority` is not smaller
    /// - [`HeapError::InvalidHandle`] / [`HeapError::HollowNode`] if the handle
    ///   does not refer to a live element of this heap
    ///
    /// # Time Complexity
    /// O(1) amortized
    fn decrease_key(
        &mut self,
        handle: &Self::Handle,
        new_priority: P,
    ) -> Result<Self::Handle, HeapError>;

    /// Removes the element behind `handle` and returns it
    ///
    /// # Time Complexity
    /// O(log n) amortized
    fn delete(&mut self, handle: &Self::Handle) -> Result<(P, T), HeapError>;
}
