//! Helpers shared by the integration test binaries

#![allow(dead_code)]

use mergeable_heaps::fibonacci::FibonacciHeap;
use mergeable_heaps::hollow::HollowHeap;
use mergeable_heaps::InvariantViolation;

/// Access to the structural self-check of each engine
pub trait Validate {
    fn validate(&self) -> Result<(), InvariantViolation>;
}

impl<T, P: Ord> Validate for FibonacciHeap<T, P> {
    fn validate(&self) -> Result<(), InvariantViolation> {
        self.check_invariants()
    }
}

impl<T, P: Ord> Validate for HollowHeap<T, P> {
    fn validate(&self) -> Result<(), InvariantViolation> {
        self.check_invariants()
    }
}

/// Panics with the violation if the heap is structurally broken
pub fn assert_valid<H: Validate>(heap: &H) {
    if let Err(violation) = heap.validate() {
        panic!("invariant violated: {violation}");
    }
}
