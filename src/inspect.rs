//! Read-only structural view of a heap
//!
//! Both heaps expose their node graph through [`Inspect`], which is what the
//! renderers in [`crate::render`] and the structural tests are written against.
//! A view never lets a caller mutate the heap.

use crate::rank::Rank;
use crate::traits::Handle;
use rustc_hash::FxHashSet;

/// Snapshot of one node and its links
#[derive(Debug, Clone)]
pub struct NodeView<'a, T, P, H> {
    pub handle: H,
    pub key: &'a P,
    /// `None` for hollow nodes
    pub value: Option<&'a T>,
    /// Children in sibling order
    pub children: Vec<H>,
    pub next_sibling: Option<H>,
    pub parent: Option<H>,
    /// Second parent of a hollow node (Hollow heap only)
    pub extra_parent: Option<H>,
    /// Degree for a Fibonacci node, rank for a Hollow node
    pub rank: Rank,
    /// Fibonacci cascading-cut mark; always false in a Hollow heap
    pub marked: bool,
}

impl<T, P, H> NodeView<'_, T, P, H> {
    pub fn is_hollow(&self) -> bool {
        self.value.is_none()
    }
}

/// Structural access to the node graph of a heap
pub trait Inspect<T, P> {
    type Handle: Handle;

    /// Handle of the minimum node
    fn min_handle(&self) -> Option<Self::Handle>;

    /// Every root, starting with the minimum
    fn root_handles(&self) -> Vec<Self::Handle>;

    /// Looks a node up, returning `None` for ids that do not resolve
    fn view(&self, handle: Self::Handle) -> Option<NodeView<'_, T, P, Self::Handle>>;
}

/// Every node reachable from the roots, each listed once, in depth-first
/// preorder.
///
/// Hollow heap nodes can have two parents, so a node is emitted the first time
/// it is reached.
pub fn reachable<T, P, I: Inspect<T, P>>(heap: &I) -> Vec<I::Handle> {
    let mut seen = FxHashSet::default();
    let mut order = Vec::new();
    let mut stack: Vec<I::Handle> = heap.root_handles().into_iter().rev().collect();

    while let Some(handle) = stack.pop() {
        if !seen.insert(handle) {
            continue;
        }
        order.push(handle);
        if let Some(view) = heap.view(handle) {
            stack.extend(view.children.into_iter().rev());
        }
    }
    order
}
