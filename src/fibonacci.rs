//! Fibonacci Heap implementation
//!
//! A Fibonacci heap is a data structure for priority queue operations with:
//! - O(1) amortized insert, decrease_key, and merge
//! - O(log n) amortized delete_min and delete
//!
//! The structure consists of a collection of heap-ordered trees. Roots are linked
//! in a circular doubly linked ring and the heap keeps a reference to the minimum
//! root. Children of a node form their own ring. Nodes live in a [`NodeArena`]
//! and the rings are threaded through node ids with [`index_ring`].
//!
//! Work is deferred to `delete_min`, which consolidates the root ring until all
//! root degrees are distinct. `decrease_key` cuts a node loose when it violates
//! heap order, and cascading cuts keep every tree bushy: a non-root node that
//! loses a second child is cut as well.

use crate::inspect::{Inspect, NodeView};
use crate::rank::{checked_increment, degree_bound, saturating_decrement, Rank};
use crate::storage::{NodeArena, NodeId};
use crate::traits::{DecreaseKeyHeap, Handle, Heap, HeapError, InvariantViolation};
use index_ring::{RingLinks, RingOps};
use smallvec::SmallVec;
use std::cmp::Ordering;
use tracing::{debug, trace};

/// Handle to an element in a Fibonacci heap
///
/// A Fibonacci heap never moves an element to another node, so the handle
/// returned by `insert` stays valid until the element is removed.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct FibonacciHandle {
    node: NodeId,
}

impl Handle for FibonacciHandle {}

/// Node key, extended with a value below every real priority.
///
/// `delete` lowers a node to `NegInfinity` so that the following `delete_min`
/// removes it, which works for any `P: Ord` without needing "minimum minus one".
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) enum SentinelKey<P> {
    NegInfinity,
    Finite(P),
}

impl<P> SentinelKey<P> {
    fn as_finite(&self) -> Option<&P> {
        match self {
            SentinelKey::Finite(p) => Some(p),
            SentinelKey::NegInfinity => None,
        }
    }

    fn into_finite(self) -> Option<P> {
        match self {
            SentinelKey::Finite(p) => Some(p),
            SentinelKey::NegInfinity => None,
        }
    }
}

pub(crate) struct Node<T, P> {
    key: SentinelKey<P>,
    item: T,
    parent: Option<NodeId>,
    child: Option<NodeId>,
    left: NodeId,
    right: NodeId,
    degree: Rank,
    marked: bool,
}

impl<T, P> RingLinks<NodeId> for NodeArena<Node<T, P>> {
    fn next(&self, id: NodeId) -> NodeId {
        self[id].right
    }

    fn prev(&self, id: NodeId) -> NodeId {
        self[id].left
    }

    fn set_next(&mut self, id: NodeId, next: NodeId) {
        self[id].right = next;
    }

    fn set_prev(&mut self, id: NodeId, prev: NodeId) {
        self[id].left = prev;
    }
}

const RING: RingOps = RingOps::new();

/// Fibonacci Heap
///
/// # Example
///
/// ```rust
/// use mergeable_heaps::fibonacci::FibonacciHeap;
/// use mergeable_heaps::{DecreaseKeyHeap, Heap};
///
/// let mut heap = FibonacciHeap::new();
/// let handle = heap.insert(5, "item");
/// heap.decrease_key(&handle, 1).unwrap();
/// assert_eq!(heap.find_min(), Some((&1, &"item")));
/// ```
pub struct FibonacciHeap<T, P: Ord> {
    nodes: NodeArena<Node<T, P>>,
    min: Option<NodeId>,
    len: usize,
}

impl<T, P: Ord> Default for FibonacciHeap<T, P> {
    fn default() -> Self {
        Self {
            nodes: NodeArena::new(),
            min: None,
            len: 0,
        }
    }
}

impl<T, P: Ord> std::fmt::Debug for FibonacciHeap<T, P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FibonacciHeap")
            .field("len", &self.len)
            .field("min", &self.min)
            .field("nodes", &self.nodes)
            .finish()
    }
}

impl<T, P: Ord> Heap<T, P> for FibonacciHeap<T, P> {
    type Handle = FibonacciHandle;

    fn new() -> Self {
        Self::default()
    }

    fn len(&self) -> usize {
        self.len
    }

    fn insert(&mut self, priority: P, item: T) -> Self::Handle {
        let node = self.nodes.insert_with(|id| Node {
            key: SentinelKey::Finite(priority),
            item,
            parent: None,
            child: None,
            left: id,
            right: id,
            degree: 0,
            marked: false,
        });

        self.add_root(node);
        self.len += 1;
        self.debug_validate();
        FibonacciHandle { node }
    }

    fn find_min(&self) -> Option<(&P, &T)> {
        let node = &self.nodes[self.min?];
        node.key.as_finite().map(|key| (key, &node.item))
    }

    fn find_min_handle(&self) -> Option<Self::Handle> {
        self.min.map(|node| FibonacciHandle { node })
    }

    fn get(&self, handle: &Self::Handle) -> Option<(&P, &T)> {
        let node = self.nodes.get(handle.node)?;
        node.key.as_finite().map(|key| (key, &node.item))
    }

    fn delete_min(&mut self) -> Option<(P, T)> {
        let (key, item) = self.extract_min()?;
        self.debug_validate();
        key.into_finite().map(|key| (key, item))
    }

    fn merge(&mut self, other: Self) {
        let FibonacciHeap { nodes, min, len } = other;
        self.nodes.absorb(nodes);

        match (self.min, min) {
            (_, None) => {}
            (None, Some(other_min)) => self.min = Some(other_min),
            (Some(self_min), Some(other_min)) => {
                RING.splice(&mut self.nodes, Some(self_min), Some(other_min));
                if self.nodes[other_min].key < self.nodes[self_min].key {
                    self.min = Some(other_min);
                }
            }
        }

        self.len += len;
        self.debug_validate();
    }
}

impl<T, P: Ord> DecreaseKeyHeap<T, P> for FibonacciHeap<T, P> {
    fn decrease_key(
        &mut self,
        handle: &Self::Handle,
        new_priority: P,
    ) -> Result<Self::Handle, HeapError> {
        let node = self.nodes.get(handle.node).ok_or_else(|| stale(handle))?;
        if node.key.as_finite().map_or(true, |current| new_priority >= *current) {
            debug!(?handle, "decrease_key rejected: priority not decreased");
            return Err(HeapError::PriorityNotDecreased);
        }

        self.decrease_to(handle.node, SentinelKey::Finite(new_priority));
        self.debug_validate();
        Ok(*handle)
    }

    fn delete(&mut self, handle: &Self::Handle) -> Result<(P, T), HeapError> {
        let node = self
            .nodes
            .get_mut(handle.node)
            .ok_or_else(|| stale(handle))?;
        let key = std::mem::replace(&mut node.key, SentinelKey::NegInfinity);

        self.decrease_to(handle.node, SentinelKey::NegInfinity);
        debug_assert_eq!(self.min, Some(handle.node));

        let (_, item) = self.extract_min().ok_or(HeapError::InvalidHandle)?;
        self.debug_validate();
        key.into_finite()
            .map(|key| (key, item))
            .ok_or(HeapError::InvalidHandle)
    }
}

fn stale(handle: &FibonacciHandle) -> HeapError {
    debug!(?handle, "rejected stale or foreign handle");
    HeapError::InvalidHandle
}

impl<T, P: Ord> FibonacciHeap<T, P> {
    /// Adds a singleton node to the root ring next to `min`
    fn add_root(&mut self, node: NodeId) {
        match self.min {
            None => self.min = Some(node),
            Some(min) => {
                RING.insert_after(&mut self.nodes, min, node);
                if self.nodes[node].key < self.nodes[min].key {
                    self.min = Some(node);
                }
            }
        }
    }

    /// Lowers the key of `node` and restores heap order around it
    fn decrease_to(&mut self, node: NodeId, key: SentinelKey<P>) {
        self.nodes[node].key = key;

        match self.nodes[node].parent {
            None => {
                if let Some(min) = self.min {
                    if self.nodes[node].key < self.nodes[min].key {
                        self.min = Some(node);
                    }
                }
            }
            Some(parent) => {
                if self.nodes[node].key < self.nodes[parent].key {
                    self.cut(node, parent);
                    self.cascading_cut(parent);
                }
            }
        }
    }

    /// Removes the minimum root, promotes its children and consolidates
    fn extract_min(&mut self) -> Option<(SentinelKey<P>, T)> {
        let min = self.min?;

        if let Some(child) = self.nodes[min].child.take() {
            let children: SmallVec<[NodeId; 16]> = RING.iter(&self.nodes, child).collect();
            for &c in &children {
                let node = &mut self.nodes[c];
                node.parent = None;
                node.marked = false;
            }
            RING.splice(&mut self.nodes, Some(min), Some(child));
            self.nodes[min].degree = 0;
        }

        let rest = RING.remove(&mut self.nodes, min);
        let removed = self.nodes.remove(min)?;
        self.len -= 1;

        match rest {
            None => self.min = None,
            Some(start) => {
                self.min = Some(start);
                self.consolidate(start);
            }
        }

        Some((removed.key, removed.item))
    }

    /// Links roots of equal degree until every root degree is distinct, then
    /// picks the new minimum among the survivors.
    fn consolidate(&mut self, start: NodeId) {
        let roots: SmallVec<[NodeId; 32]> = RING.iter(&self.nodes, start).collect();
        let mut by_degree: SmallVec<[Option<NodeId>; 64]> =
            SmallVec::from_elem(None, degree_bound(self.len));
        let mut links = 0usize;

        for root in roots.iter().copied() {
            let mut x = root;
            let mut d = self.nodes[x].degree as usize;

            loop {
                if d >= by_degree.len() {
                    by_degree.resize(d + 1, None);
                }
                let Some(mut y) = by_degree[d].take() else {
                    break;
                };
                if self.nodes[y].key < self.nodes[x].key {
                    std::mem::swap(&mut x, &mut y);
                }
                self.link(y, x);
                links += 1;
                d += 1;
            }

            by_degree[d] = Some(x);
        }

        let mut min: Option<NodeId> = None;
        let mut survivors = 0usize;
        for root in by_degree.into_iter().flatten() {
            survivors += 1;
            min = match min {
                Some(m) if self.nodes[m].key.cmp(&self.nodes[root].key) != Ordering::Greater => {
                    Some(m)
                }
                _ => Some(root),
            };
        }
        self.min = min;

        trace!(roots = roots.len(), links, survivors, "consolidated root ring");
    }

    /// Makes root `child` a child of root `parent`
    fn link(&mut self, child: NodeId, parent: NodeId) {
        RING.remove(&mut self.nodes, child);

        {
            let node = &mut self.nodes[child];
            node.parent = Some(parent);
            node.marked = false;
        }

        match self.nodes[parent].child {
            Some(first) => RING.insert_before(&mut self.nodes, first, child),
            None => self.nodes[parent].child = Some(child),
        }

        let degree = self.nodes[parent].degree;
        self.nodes[parent].degree = checked_increment(degree);
    }

    /// Detaches `node` from `parent` and moves it to the root ring
    fn cut(&mut self, node: NodeId, parent: NodeId) {
        let sibling = RING.remove(&mut self.nodes, node);
        if self.nodes[parent].child == Some(node) {
            self.nodes[parent].child = sibling;
        }
        let degree = self.nodes[parent].degree;
        self.nodes[parent].degree = saturating_decrement(degree);

        {
            let n = &mut self.nodes[node];
            n.parent = None;
            n.marked = false;
        }
        self.add_root(node);
    }

    /// Walks up from `node`, cutting marked ancestors until it finds an
    /// unmarked one, which it marks. Roots are never marked.
    fn cascading_cut(&mut self, mut node: NodeId) {
        let mut cuts = 0usize;
        while let Some(parent) = self.nodes[node].parent {
            if !self.nodes[node].marked {
                self.nodes[node].marked = true;
                break;
            }
            self.cut(node, parent);
            cuts += 1;
            node = parent;
        }
        if cuts > 0 {
            trace!(cuts, "cascading cut");
        }
    }

    /// Verifies every structural invariant of the heap.
    ///
    /// Checks ring consistency, parent links, degree counts, unmarked roots,
    /// heap order, that `min` is the smallest root, and the element count.
    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        let Some(min) = self.min else {
            return if self.len == 0 && self.nodes.is_empty() {
                Ok(())
            } else {
                Err(InvariantViolation::CountMismatch {
                    expected: self.len,
                    found: self.nodes.len(),
                })
            };
        };

        if !self.nodes.contains(min) {
            return Err(InvariantViolation::StaleMin);
        }

        let limit = self.nodes.len();
        let ring_check = |start: NodeId| {
            RING.check(&self.nodes, start, limit)
                .map_err(|e| InvariantViolation::BrokenRing {
                    node: start,
                    detail: e.to_string(),
                })
        };

        ring_check(min)?;
        let mut stack: Vec<NodeId> = Vec::new();
        for root in RING.iter(&self.nodes, min) {
            let node = &self.nodes[root];
            if node.parent.is_some() {
                return Err(InvariantViolation::ParentMismatch { node: root });
            }
            if node.marked {
                return Err(InvariantViolation::MarkedRoot { node: root });
            }
            if node.key < self.nodes[min].key {
                return Err(InvariantViolation::StaleMin);
            }
            stack.push(root);
        }

        let mut seen = 0usize;
        while let Some(id) = stack.pop() {
            seen += 1;
            let node = &self.nodes[id];
            let actual = match node.child {
                None => 0,
                Some(first) => {
                    let count = ring_check(first)?;
                    for child in RING.iter(&self.nodes, first) {
                        if self.nodes[child].parent != Some(id) {
                            return Err(InvariantViolation::ParentMismatch { node: child });
                        }
                        if self.nodes[child].key < node.key {
                            return Err(InvariantViolation::HeapOrder { parent: id, child });
                        }
                        stack.push(child);
                    }
                    count
                }
            };
            if actual != node.degree as usize {
                return Err(InvariantViolation::DegreeMismatch {
                    node: id,
                    recorded: node.degree as usize,
                    actual,
                });
            }
        }

        if seen != self.len || seen != self.nodes.len() {
            return Err(InvariantViolation::CountMismatch {
                expected: self.len,
                found: seen,
            });
        }
        Ok(())
    }

    #[inline]
    fn debug_validate(&self) {
        #[cfg(feature = "invariant-checks")]
        if let Err(violation) = self.check_invariants() {
            panic!("fibonacci heap invariant violated: {violation}");
        }
    }
}

impl<T, P: Ord> Inspect<T, P> for FibonacciHeap<T, P> {
    type Handle = FibonacciHandle;

    fn min_handle(&self) -> Option<Self::Handle> {
        self.find_min_handle()
    }

    fn root_handles(&self) -> Vec<Self::Handle> {
        match self.min {
            None => Vec::new(),
            Some(min) => RING
                .iter(&self.nodes, min)
                .map(|node| FibonacciHandle { node })
                .collect(),
        }
    }

    fn view(&self, handle: Self::Handle) -> Option<NodeView<'_, T, P, Self::Handle>> {
        let node = self.nodes.get(handle.node)?;
        let key = node.key.as_finite()?;
        let wrap = |node| FibonacciHandle { node };
        let children = match node.child {
            None => Vec::new(),
            Some(first) => RING.iter(&self.nodes, first).map(wrap).collect(),
        };
        Some(NodeView {
            handle,
            key,
            value: Some(&node.item),
            children,
            next_sibling: Some(wrap(node.right)).filter(|h| *h != handle),
            parent: node.parent.map(wrap),
            extra_parent: None,
            rank: node.degree,
            marked: node.marked,
        })
    }
}
