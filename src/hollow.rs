//! Hollow Heap implementation
//!
//! A hollow heap (Hansen, Kaplan, Tarjan, Zwick 2015) matches the Fibonacci heap
//! bounds with a much simpler structure:
//! - O(1) insert, find_min, decrease_key and merge
//! - O(log n) amortized delete_min and delete
//!
//! The heap is a single heap-ordered DAG. Elements are stored in nodes, but a
//! node can lose its element and become *hollow*:
//!
//! - `delete` of anything but the minimum just empties the node (lazy deletion)
//! - `decrease_key` moves the element into a fresh node and leaves the old one
//!   hollow, instead of cutting subtrees like a Fibonacci heap
//!
//! A hollow node produced by `decrease_key` keeps its children and gains the
//! new node as a second parent (`ep`), which is why the structure is a DAG
//! rather than a forest. Hollow nodes are only reclaimed by `delete_min`, which
//! destroys every hollow node it reaches and re-links the full ones by rank.
//!
//! Children of a node form a singly linked list through `right`. The child a
//! node acquired through `decrease_key` is always the last one in its list, and
//! its `right` continues into the list of its other parent.

use crate::inspect::{Inspect, NodeView};
use crate::rank::{checked_increment, decrease_key_rank, Rank};
use crate::storage::{NodeArena, NodeId};
use crate::traits::{DecreaseKeyHeap, Handle, Heap, HeapError, InvariantViolation};
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::{debug, trace};

/// Handle to an element in a Hollow heap
///
/// `decrease_key` moves the element to a new node and returns a new handle;
/// the previous handle then refers to a hollow node and is rejected with
/// [`HeapError::HollowNode`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct HollowHandle {
    node: NodeId,
}

impl Handle for HollowHandle {}

struct Item<T> {
    value: T,
    /// The node currently holding this item
    node: NodeId,
}

pub(crate) struct Node<T, P> {
    key: P,
    /// `None` once the node is hollow
    item: Option<Item<T>>,
    child: Option<NodeId>,
    right: Option<NodeId>,
    /// Extra parent, set only on a hollow node created by `decrease_key`
    ep: Option<NodeId>,
    rank: Rank,
}

impl<T, P> Node<T, P> {
    fn is_hollow(&self) -> bool {
        self.item.is_none()
    }
}

/// Hollow Heap
///
/// # Example
///
/// ```rust
/// use mergeable_heaps::hollow::HollowHeap;
/// use mergeable_heaps::{DecreaseKeyHeap, Heap};
///
/// let mut heap = HollowHeap::new();
/// heap.insert(3, "c");
/// let a = heap.insert(8, "a");
///
/// // The element moves: keep the returned handle
/// let a = heap.decrease_key(&a, 1).unwrap();
/// assert_eq!(heap.find_min(), Some((&1, &"a")));
/// assert_eq!(heap.delete(&a), Ok((1, "a")));
/// ```
pub struct HollowHeap<T, P: Ord> {
    nodes: NodeArena<Node<T, P>>,
    min: Option<NodeId>,
    len: usize,
}

impl<T, P: Ord> Default for HollowHeap<T, P> {
    fn default() -> Self {
        Self {
            nodes: NodeArena::new(),
            min: None,
            len: 0,
        }
    }
}

impl<T, P: Ord> std::fmt::Debug for HollowHeap<T, P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HollowHeap")
            .field("len", &self.len)
            .field("min", &self.min)
            .field("nodes", &self.nodes)
            .finish()
    }
}

impl<T, P: Ord> Heap<T, P> for HollowHeap<T, P> {
    type Handle = HollowHandle;

    fn new() -> Self {
        Self::default()
    }

    fn len(&self) -> usize {
        self.len
    }

    fn insert(&mut self, priority: P, item: T) -> Self::Handle {
        let node = self.nodes.insert_with(|id| Node {
            key: priority,
            item: Some(Item { value: item, node: id }),
            child: None,
            right: None,
            ep: None,
            rank: 0,
        });

        self.min = self.meld(Some(node), self.min);
        self.len += 1;
        self.debug_validate();
        HollowHandle { node }
    }

    fn find_min(&self) -> Option<(&P, &T)> {
        self.entry(self.min?)
    }

    fn find_min_handle(&self) -> Option<Self::Handle> {
        self.min.map(|node| HollowHandle { node })
    }

    fn get(&self, handle: &Self::Handle) -> Option<(&P, &T)> {
        self.entry(handle.node)
    }

    fn delete_min(&mut self) -> Option<(P, T)> {
        let root = self.min.take()?;
        let Item { value, .. } = self.nodes[root].item.take()?;
        self.len -= 1;

        let removed = self.rebuild(root);
        self.debug_validate();
        removed.map(|node| (node.key, value))
    }

    fn merge(&mut self, other: Self) {
        let HollowHeap { nodes, min, len } = other;
        self.nodes.absorb(nodes);
        self.min = self.meld(self.min, min);
        self.len += len;
        self.debug_validate();
    }
}

/// Lazy deletion keeps the key of a removed element in its hollow node, so
/// `delete` hands back a clone.
impl<T, P: Ord + Clone> DecreaseKeyHeap<T, P> for HollowHeap<T, P> {
    fn decrease_key(
        &mut self,
        handle: &Self::Handle,
        new_priority: P,
    ) -> Result<Self::Handle, HeapError> {
        let u = self.full_node(handle)?;
        if new_priority >= self.nodes[u].key {
            debug!(?handle, "decrease_key rejected: priority not decreased");
            return Err(HeapError::PriorityNotDecreased);
        }

        if self.min == Some(u) {
            self.nodes[u].key = new_priority;
            self.debug_validate();
            return Ok(*handle);
        }

        let Some(Item { value, .. }) = self.nodes[u].item.take() else {
            unreachable!("full_node only returns full nodes");
        };
        let rank = decrease_key_rank(self.nodes[u].rank);
        let v = self.nodes.insert_with(|id| Node {
            key: new_priority,
            item: Some(Item { value, node: id }),
            child: Some(u),
            right: None,
            ep: None,
            rank,
        });
        self.nodes[u].ep = Some(v);
        self.min = self.meld(Some(v), self.min);

        self.debug_validate();
        Ok(HollowHandle { node: v })
    }

    fn delete(&mut self, handle: &Self::Handle) -> Result<(P, T), HeapError> {
        let u = self.full_node(handle)?;
        if self.min == Some(u) {
            return self.delete_min().ok_or(HeapError::InvalidHandle);
        }

        // Lazy deletion: the node stays in place, hollow, until a
        // delete_min reaches it
        let node = &mut self.nodes[u];
        let Some(Item { value, .. }) = node.item.take() else {
            unreachable!("full_node only returns full nodes");
        };
        let key = node.key.clone();
        self.len -= 1;
        self.debug_validate();
        Ok((key, value))
    }
}

impl<T, P: Ord> HollowHeap<T, P> {
    /// Number of nodes, full and hollow, still allocated
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    fn entry(&self, node: NodeId) -> Option<(&P, &T)> {
        let node = self.nodes.get(node)?;
        node.item.as_ref().map(|item| (&node.key, &item.value))
    }

    /// Resolves a handle to a node that still holds an element
    fn full_node(&self, handle: &HollowHandle) -> Result<NodeId, HeapError> {
        match self.nodes.get(handle.node) {
            None => {
                debug!(?handle, "rejected stale or foreign handle");
                Err(HeapError::InvalidHandle)
            }
            Some(node) if node.is_hollow() => {
                debug!(?handle, "rejected handle to hollow node");
                Err(HeapError::HollowNode)
            }
            Some(_) => Ok(handle.node),
        }
    }

    fn meld(&mut self, a: Option<NodeId>, b: Option<NodeId>) -> Option<NodeId> {
        match (a, b) {
            (None, b) => b,
            (a, None) => a,
            (Some(a), Some(b)) => Some(self.link(a, b)),
        }
    }

    /// Makes the root with the larger key a child of the other and returns
    /// the winner. Ties go to `b`.
    fn link(&mut self, a: NodeId, b: NodeId) -> NodeId {
        if self.nodes[b].key > self.nodes[a].key {
            self.add_child(a, b);
            a
        } else {
            self.add_child(b, a);
            b
        }
    }

    fn add_child(&mut self, parent: NodeId, child: NodeId) {
        self.nodes[child].right = self.nodes[parent].child;
        self.nodes[parent].child = Some(child);
    }

    /// Destroys the hollow root and every hollow node reachable only through
    /// destroyed nodes, then links the surviving full roots, first by rank and
    /// then unconditionally, into a single tree.
    ///
    /// Returns the removed root node.
    fn rebuild(&mut self, root: NodeId) -> Option<Node<T, P>> {
        let mut buckets: FxHashMap<Rank, NodeId> = FxHashMap::default();
        let mut removed_root = None;
        let mut destroyed = 0usize;
        let mut links = 0usize;

        self.nodes[root].right = None;
        let mut pending = Some(root);

        while let Some(v) = pending {
            pending = self.nodes[v].right;
            let mut w = self.nodes[v].child;

            while let Some(mut u) = w {
                w = self.nodes[u].right;

                if self.nodes[u].is_hollow() {
                    match self.nodes[u].ep {
                        None => {
                            self.nodes[u].right = pending;
                            pending = Some(u);
                        }
                        Some(ep) => {
                            if ep == v {
                                // u is the last child of v
                                w = None;
                            } else {
                                self.nodes[u].right = None;
                            }
                            self.nodes[u].ep = None;
                        }
                    }
                    continue;
                }

                while let Some(other) = buckets.remove(&self.nodes[u].rank) {
                    u = self.link(u, other);
                    let rank = self.nodes[u].rank;
                    self.nodes[u].rank = checked_increment(rank);
                    links += 1;
                }
                buckets.insert(self.nodes[u].rank, u);
            }

            let node = self.nodes.remove(v);
            destroyed += 1;
            if v == root {
                removed_root = node;
            }
        }

        let survivors = buckets.len();
        let mut min = None;
        for (_, u) in buckets {
            min = self.meld(min, Some(u));
        }
        if let Some(min) = min {
            self.nodes[min].right = None;
        }
        self.min = min;

        trace!(destroyed, links, survivors, "rebuilt after delete_min");
        removed_root
    }

    /// Verifies every structural invariant of the heap.
    ///
    /// Checks that the root is full and alone, heap order along every edge,
    /// that full nodes have a single parent and a correct item back reference,
    /// the element count, and that no allocated node is unreachable.
    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        let Some(root) = self.min else {
            return if self.len == 0 && self.nodes.is_empty() {
                Ok(())
            } else {
                Err(InvariantViolation::CountMismatch {
                    expected: self.len,
                    found: self.nodes.len(),
                })
            };
        };

        let root_node = self
            .nodes
            .get(root)
            .ok_or(InvariantViolation::MalformedRoot { node: root })?;
        if root_node.is_hollow() || root_node.right.is_some() || root_node.ep.is_some() {
            return Err(InvariantViolation::MalformedRoot { node: root });
        }

        let limit = self.nodes.len();
        let mut seen: FxHashSet<NodeId> = FxHashSet::default();
        let mut stack = vec![root];
        let mut full = 0usize;

        while let Some(id) = stack.pop() {
            if !seen.insert(id) {
                continue;
            }
            let node = &self.nodes[id];
            if let Some(item) = &node.item {
                full += 1;
                if item.node != id {
                    return Err(InvariantViolation::ItemBackReference { node: id });
                }
                if node.ep.is_some() {
                    return Err(InvariantViolation::ExtraParentOnFullNode { node: id });
                }
            }

            let mut walked = 0usize;
            let mut next = node.child;
            while let Some(c) = next {
                let child = self.nodes.get(c).ok_or_else(|| InvariantViolation::BrokenRing {
                    node: id,
                    detail: format!("dangling child link {c:?}"),
                })?;
                if child.key < node.key {
                    return Err(InvariantViolation::HeapOrder { parent: id, child: c });
                }
                stack.push(c);

                walked += 1;
                if walked > limit {
                    return Err(InvariantViolation::BrokenRing {
                        node: id,
                        detail: "child list does not terminate".to_string(),
                    });
                }
                next = if child.ep == Some(id) { None } else { child.right };
            }
        }

        if full != self.len {
            return Err(InvariantViolation::CountMismatch {
                expected: self.len,
                found: full,
            });
        }
        let unreachable = self.nodes.iter().filter(|(id, _)| !seen.contains(id)).count();
        if unreachable > 0 {
            return Err(InvariantViolation::Unreachable { unreachable });
        }
        Ok(())
    }

    #[inline]
    fn debug_validate(&self) {
        #[cfg(feature = "invariant-checks")]
        if let Err(violation) = self.check_invariants() {
            panic!("hollow heap invariant violated: {violation}");
        }
    }
}

impl<T, P: Ord> Inspect<T, P> for HollowHeap<T, P> {
    type Handle = HollowHandle;

    fn min_handle(&self) -> Option<Self::Handle> {
        self.min.map(|node| HollowHandle { node })
    }

    fn root_handles(&self) -> Vec<Self::Handle> {
        self.min_handle().into_iter().collect()
    }

    fn view(&self, handle: Self::Handle) -> Option<NodeView<'_, T, P, Self::Handle>> {
        let node = self.nodes.get(handle.node)?;
        let wrap = |node| HollowHandle { node };

        let mut children = Vec::new();
        let mut next = node.child;
        while let Some(c) = next {
            children.push(wrap(c));
            let child = self.nodes.get(c)?;
            next = if child.ep == Some(handle.node) { None } else { child.right };
        }

        Some(NodeView {
            handle,
            key: &node.key,
            value: node.item.as_ref().map(|item| &item.value),
            children,
            next_sibling: node.right.map(wrap),
            parent: None,
            extra_parent: node.ep.map(wrap),
            rank: node.rank,
            marked: false,
        })
    }
}
