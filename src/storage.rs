//! Arena storage for heap nodes
//!
//! Both heaps keep their nodes in a [`NodeArena`] and link them through
//! [`NodeId`]s instead of pointers. Slots are generational (`slotmap`), so an id
//! that outlives its node is detected instead of aliasing whatever node reuses
//! the slot later.
//!
//! # Segments
//!
//! Merging two heaps must not copy nodes (merge is O(1) amortized) and must not
//! invalidate the handles callers already hold. An arena is therefore made of
//! segments: every arena starts with a fresh, globally unique *home* segment that
//! receives its inserts, and [`NodeArena::absorb`] adopts the segments of another
//! arena wholesale. A [`NodeId`] names its segment, so it keeps resolving after
//! the merge. Segments that become empty are dropped.
//!
//! A `NodeId` from an unrelated heap names a segment this arena does not own and
//! simply fails to resolve.

use rustc_hash::FxHashMap;
use slotmap::{new_key_type, SlotMap};
use std::fmt;
use std::ops::{Index, IndexMut};
use std::sync::atomic::{AtomicU64, Ordering};

new_key_type! {
    /// Generational slot key inside one segment
    pub struct SlotKey;
}

static NEXT_SEGMENT: AtomicU64 = AtomicU64::new(0);

/// Globally unique identifier of an arena segment
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SegmentId(u64);

impl SegmentId {
    fn fresh() -> Self {
        SegmentId(NEXT_SEGMENT.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Debug for SegmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "s{}", self.0)
    }
}

/// Stable identifier of a node: its segment plus a generational slot key
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId {
    segment: SegmentId,
    slot: SlotKey,
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}:{:?}", self.segment, self.slot)
    }
}

type Segment<N> = SlotMap<SlotKey, N>;

/// Segmented generational arena owning the nodes of one heap
pub struct NodeArena<N> {
    home_id: SegmentId,
    home: Segment<N>,
    absorbed: FxHashMap<SegmentId, Segment<N>>,
    len: usize,
}

impl<N> Default for NodeArena<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N> fmt::Debug for NodeArena<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeArena")
            .field("home", &self.home_id)
            .field("segments", &self.segment_count())
            .field("len", &self.len)
            .finish()
    }
}

impl<N> NodeArena<N> {
    /// Creates an empty arena with a fresh home segment
    pub fn new() -> Self {
        Self {
            home_id: SegmentId::fresh(),
            home: SlotMap::with_key(),
            absorbed: FxHashMap::default(),
            len: 0,
        }
    }

    /// Number of live nodes across all segments
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of segments currently owned, including the home segment
    pub fn segment_count(&self) -> usize {
        1 + self.absorbed.len()
    }

    /// Allocates a node in the home segment. The node is built by `f`, which
    /// receives the new id for self-links and back-references.
    pub fn insert_with(&mut self, f: impl FnOnce(NodeId) -> N) -> NodeId {
        let segment = self.home_id;
        let slot = self.home.insert_with_key(|slot| f(NodeId { segment, slot }));
        self.len += 1;
        NodeId { segment, slot }
    }

    /// Frees a node, returning it if the id was still live
    pub fn remove(&mut self, id: NodeId) -> Option<N> {
        let node = if id.segment == self.home_id {
            self.home.remove(id.slot)
        } else {
            let segment = self.absorbed.get_mut(&id.segment)?;
            let node = segment.remove(id.slot);
            if segment.is_empty() {
                self.absorbed.remove(&id.segment);
            }
            node
        };
        if node.is_some() {
            self.len -= 1;
        }
        node
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.get(id).is_some()
    }

    pub fn get(&self, id: NodeId) -> Option<&N> {
        if id.segment == self.home_id {
            self.home.get(id.slot)
        } else {
            self.absorbed.get(&id.segment)?.get(id.slot)
        }
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut N> {
        if id.segment == self.home_id {
            self.home.get_mut(id.slot)
        } else {
            self.absorbed.get_mut(&id.segment)?.get_mut(id.slot)
        }
    }

    /// Takes ownership of every segment of `other`.
    ///
    /// Ids issued by either arena stay valid. Cost is proportional to the
    /// number of segments of the smaller side.
    pub fn absorb(&mut self, other: NodeArena<N>) {
        let NodeArena {
            home_id,
            home,
            mut absorbed,
            len,
        } = other;

        if absorbed.len() > self.absorbed.len() {
            std::mem::swap(&mut self.absorbed, &mut absorbed);
        }
        self.absorbed.extend(absorbed.into_iter().filter(|(_, s)| !s.is_empty()));
        if !home.is_empty() {
            self.absorbed.insert(home_id, home);
        }
        self.len += len;
    }

    /// Iterates over every live node, in no particular order
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &N)> + '_ {
        let home_id = self.home_id;
        let home = self
            .home
            .iter()
            .map(move |(slot, node)| (NodeId { segment: home_id, slot }, node));
        let rest = self.absorbed.iter().flat_map(|(&segment, nodes)| {
            nodes
                .iter()
                .map(move |(slot, node)| (NodeId { segment, slot }, node))
        });
        home.chain(rest)
    }
}

impl<N> Index<NodeId> for NodeArena<N> {
    type Output = N;

    fn index(&self, id: NodeId) -> &N {
        match self.get(id) {
            Some(node) => node,
            None => panic!("dangling node id {id:?}"),
        }
    }
}

impl<N> IndexMut<NodeId> for NodeArena<N> {
    fn index_mut(&mut self, id: NodeId) -> &mut N {
        match self.get_mut(id) {
            Some(node) => node,
            None => panic!("dangling node id {id:?}"),
        }
    }
}
