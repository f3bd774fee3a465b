//! Runtime choice between the heap variants
//!
//! [`DynHeap`] wraps either engine behind one concrete type so the variant can
//! be picked from configuration. Handles are tagged with the variant that issued
//! them, and merging two `DynHeap`s of different kinds is rejected.

use crate::fibonacci::{FibonacciHandle, FibonacciHeap};
use crate::hollow::{HollowHandle, HollowHeap};
use crate::traits::{DecreaseKeyHeap, Handle, Heap, HeapError, InvariantViolation};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// The available heap variants
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum HeapKind {
    #[default]
    Fibonacci,
    Hollow,
}

impl HeapKind {
    pub const ALL: [HeapKind; 2] = [HeapKind::Fibonacci, HeapKind::Hollow];

    pub fn name(&self) -> &'static str {
        match self {
            HeapKind::Fibonacci => "fibonacci",
            HeapKind::Hollow => "hollow",
        }
    }
}

impl fmt::Display for HeapKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing an unknown heap kind name
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown heap kind {0:?}, expected \"fibonacci\" or \"hollow\"")]
pub struct ParseHeapKindError(String);

impl FromStr for HeapKind {
    type Err = ParseHeapKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fibonacci" | "fib" => Ok(HeapKind::Fibonacci),
            "hollow" => Ok(HeapKind::Hollow),
            _ => Err(ParseHeapKindError(s.to_string())),
        }
    }
}

/// Handle issued by a [`DynHeap`], tagged with its variant
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum DynHandle {
    Fibonacci(FibonacciHandle),
    Hollow(HollowHandle),
}

impl Handle for DynHandle {}

impl DynHandle {
    pub fn kind(&self) -> HeapKind {
        match self {
            DynHandle::Fibonacci(_) => HeapKind::Fibonacci,
            DynHandle::Hollow(_) => HeapKind::Hollow,
        }
    }
}

/// A heap whose variant is chosen at runtime
///
/// Offers the same operations as [`Heap`], except that [`merge`](DynHeap::merge)
/// can fail: two `DynHeap`s of different kinds cannot be merged.
///
/// # Example
///
/// ```rust
/// use mergeable_heaps::{DynHeap, HeapError, HeapKind};
///
/// let mut a = DynHeap::new(HeapKind::Hollow);
/// let mut b = DynHeap::new(HeapKind::Fibonacci);
/// a.insert(2, "two");
/// b.insert(1, "one");
///
/// assert_eq!(a.merge(&mut b), Err(HeapError::IncompatibleHeaps));
/// assert_eq!((a.len(), b.len()), (1, 1));
/// ```
pub enum DynHeap<T, P: Ord> {
    Fibonacci(FibonacciHeap<T, P>),
    Hollow(HollowHeap<T, P>),
}

impl<T, P: Ord> fmt::Debug for DynHeap<T, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DynHeap::Fibonacci(heap) => f.debug_tuple("Fibonacci").field(heap).finish(),
            DynHeap::Hollow(heap) => f.debug_tuple("Hollow").field(heap).finish(),
        }
    }
}

impl<T, P: Ord> Default for DynHeap<T, P> {
    fn default() -> Self {
        DynHeap::new(HeapKind::default())
    }
}

fn wrong_kind(handle: &DynHandle, heap: HeapKind) -> HeapError {
    debug!(?handle, %heap, "rejected handle issued by another heap kind");
    HeapError::InvalidHandle
}

impl<T, P: Ord> DynHeap<T, P> {
    /// Creates an empty heap of the given variant
    pub fn new(kind: HeapKind) -> Self {
        match kind {
            HeapKind::Fibonacci => DynHeap::Fibonacci(FibonacciHeap::default()),
            HeapKind::Hollow => DynHeap::Hollow(HollowHeap::default()),
        }
    }

    pub fn kind(&self) -> HeapKind {
        match self {
            DynHeap::Fibonacci(_) => HeapKind::Fibonacci,
            DynHeap::Hollow(_) => HeapKind::Hollow,
        }
    }

    /// Verifies the structural invariants of the wrapped heap
    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        match self {
            DynHeap::Fibonacci(heap) => heap.check_invariants(),
            DynHeap::Hollow(heap) => heap.check_invariants(),
        }
    }
}

impl<T, P: Ord + Clone> DynHeap<T, P> {
    pub fn len(&self) -> usize {
        match self {
            DynHeap::Fibonacci(heap) => heap.len(),
            DynHeap::Hollow(heap) => heap.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn insert(&mut self, priority: P, item: T) -> DynHandle {
        match self {
            DynHeap::Fibonacci(heap) => DynHandle::Fibonacci(heap.insert(priority, item)),
            DynHeap::Hollow(heap) => DynHandle::Hollow(heap.insert(priority, item)),
        }
    }

    /// Inserts an element whose item is the priority itself
    pub fn insert_key(&mut self, priority: P) -> DynHandle
    where
        T: From<P>,
    {
        let item = T::from(priority.clone());
        self.insert(priority, item)
    }

    pub fn find_min(&self) -> Option<(&P, &T)> {
        match self {
            DynHeap::Fibonacci(heap) => heap.find_min(),
            DynHeap::Hollow(heap) => heap.find_min(),
        }
    }

    pub fn find_min_handle(&self) -> Option<DynHandle> {
        match self {
            DynHeap::Fibonacci(heap) => heap.find_min_handle().map(DynHandle::Fibonacci),
            DynHeap::Hollow(heap) => heap.find_min_handle().map(DynHandle::Hollow),
        }
    }

    pub fn get(&self, handle: &DynHandle) -> Option<(&P, &T)> {
        match (self, handle) {
            (DynHeap::Fibonacci(heap), DynHandle::Fibonacci(h)) => heap.get(h),
            (DynHeap::Hollow(heap), DynHandle::Hollow(h)) => heap.get(h),
            _ => None,
        }
    }

    pub fn decrease_key(
        &mut self,
        handle: &DynHandle,
        new_priority: P,
    ) -> Result<DynHandle, HeapError> {
        match (self, handle) {
            (DynHeap::Fibonacci(heap), DynHandle::Fibonacci(h)) => {
                heap.decrease_key(h, new_priority).map(DynHandle::Fibonacci)
            }
            (DynHeap::Hollow(heap), DynHandle::Hollow(h)) => {
                heap.decrease_key(h, new_priority).map(DynHandle::Hollow)
            }
            (heap, handle) => Err(wrong_kind(handle, heap.kind())),
        }
    }

    pub fn delete(&mut self, handle: &DynHandle) -> Result<(P, T), HeapError> {
        match (self, handle) {
            (DynHeap::Fibonacci(heap), DynHandle::Fibonacci(h)) => heap.delete(h),
            (DynHeap::Hollow(heap), DynHandle::Hollow(h)) => heap.delete(h),
            (heap, handle) => Err(wrong_kind(handle, heap.kind())),
        }
    }

    pub fn delete_min(&mut self) -> Option<(P, T)> {
        match self {
            DynHeap::Fibonacci(heap) => heap.delete_min(),
            DynHeap::Hollow(heap) => heap.delete_min(),
        }
    }

    /// Moves every element of `other` into `self`, leaving `other` empty.
    /// Handles issued by either heap stay valid for `self`.
    ///
    /// # Errors
    /// [`HeapError::IncompatibleHeaps`] when the variants differ, in which
    /// case neither heap is modified.
    pub fn merge(&mut self, other: &mut Self) -> Result<(), HeapError> {
        match (self, other) {
            (DynHeap::Fibonacci(a), DynHeap::Fibonacci(b)) => {
                a.merge(std::mem::take(b));
                Ok(())
            }
            (DynHeap::Hollow(a), DynHeap::Hollow(b)) => {
                a.merge(std::mem::take(b));
                Ok(())
            }
            (a, b) => {
                debug!(left = %a.kind(), right = %b.kind(), "merge rejected: heap kinds differ");
                Err(HeapError::IncompatibleHeaps)
            }
        }
    }
}
