//! Rank/degree type shared by both heaps.
//!
//! A Fibonacci heap node's *degree* is its number of children; a Hollow heap
//! node's *rank* is the label used to pair trees during reconstruction. Both are
//! bounded by `log_φ(n) ≈ 1.44 · log₂(n)`, so `u8` is plenty:
//!
//! - 2⁶⁴ elements → max rank ~93
//! - `u8::MAX` (255) → far more elements than fit in memory
//!
//! Using `u8` instead of `usize` keeps the per-node bookkeeping small.

/// Type alias for node rank/degree.
pub type Rank = u8;

/// Maximum valid rank value.
pub const MAX_RANK: Rank = u8::MAX;

/// Safely increment a rank value, panicking on overflow.
///
/// # Panics
///
/// Panics if `rank == MAX_RANK`, which would mean the heap's structural
/// invariants are broken.
///
/// # Example
///
/// ```rust
/// use mergeable_heaps::rank::{checked_increment, Rank};
///
/// let rank: Rank = 5;
/// assert_eq!(checked_increment(rank), 6);
/// ```
#[inline]
pub fn checked_increment(rank: Rank) -> Rank {
    rank.checked_add(1).expect(
        "rank overflow: max rank is log_φ(n) and u8::MAX (255) \
         covers any heap that fits in memory",
    )
}

/// Decrement a degree after a child was cut, stopping at 0.
///
/// # Example
///
/// ```rust
/// use mergeable_heaps::rank::saturating_decrement;
///
/// assert_eq!(saturating_decrement(5), 4);
/// assert_eq!(saturating_decrement(0), 0);
/// ```
#[inline]
pub fn saturating_decrement(rank: Rank) -> Rank {
    rank.saturating_sub(1)
}

/// Rank given to the node created by a Hollow heap `decrease_key`:
/// `max(rank - 2, 0)`.
///
/// # Example
///
/// ```rust
/// use mergeable_heaps::rank::decrease_key_rank;
///
/// assert_eq!(decrease_key_rank(5), 3);
/// assert_eq!(decrease_key_rank(1), 0);
/// ```
#[inline]
pub fn decrease_key_rank(rank: Rank) -> Rank {
    rank.saturating_sub(2)
}

/// Upper bound on the root degree of a Fibonacci heap holding `len` nodes,
/// used to size the consolidation table up front.
#[inline]
pub fn degree_bound(len: usize) -> usize {
    let log2 = (usize::BITS - len.leading_zeros()) as usize;
    // log_φ(n) = log₂(n) / log₂(φ) < 1.4405 · log₂(n)
    log2 + log2 / 2 + 2
}
