//! Mergeable Heap Data Structures for Rust
//!
//! This crate provides two addressable, mergeable priority queues with efficient
//! `decrease_key` support, both implementing the same [`Heap`] trait.
//!
//! # Features
//!
//! - **Fibonacci Heap**: O(1) amortized insert, decrease_key, and merge; O(log n) amortized
//!   delete-min
//! - **Hollow Heap**: O(1) amortized insert, decrease_key, and merge; O(log n) amortized delete-min,
//!   using lazy deletion instead of cascading cuts
//!
//! Nodes are kept in generational arenas, so handles are plain `Copy` ids. A
//! handle whose element is gone, or that belongs to another heap, is rejected
//! with a [`HeapError`] instead of aliasing a different element. Handles stay
//! valid across `merge`.
//!
//! [`DynHeap`] selects the variant at runtime, and [`render`] draws the node
//! structure of either heap for debugging.
//!
//! # Cargo features
//!
//! - `invariant-checks`: run a full structural check after every mutating
//!   operation and panic on the first violation. Slow; meant for tests.
//!
//! # Example
//!
//! ```rust
//! use mergeable_heaps::fibonacci::FibonacciHeap;
//! use mergeable_heaps::hollow::HollowHeap;
//! use mergeable_heaps::{DecreaseKeyHeap, Heap};
//!
//! let mut heap = FibonacciHeap::new();
//! let handle1 = heap.insert(5, "item1");
//! heap.insert(3, "item2");
//! heap.decrease_key(&handle1, 1).unwrap();
//! assert_eq!(heap.find_min(), Some((&1, &"item1")));
//!
//! let mut a = HollowHeap::new();
//! let mut b = HollowHeap::new();
//! a.insert(20, ());
//! b.insert(5, ());
//! a.merge(b);
//! assert_eq!(a.find_min(), Some((&5, &())));
//! ```

pub mod dyn_heap;
pub mod fibonacci;
pub mod hollow;
pub mod inspect;
pub mod rank;
pub mod render;
pub mod storage;
pub mod traits;

// Re-export the main types for convenience
pub use dyn_heap::{DynHandle, DynHeap, HeapKind};
pub use inspect::{Inspect, NodeView};
pub use render::RenderOptions;
pub use traits::{DecreaseKeyHeap, Handle, Heap, HeapError, InvariantViolation};
