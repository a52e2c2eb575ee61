// =============================================================================
// Node identifiers
// =============================================================================

/// Index of a node inside a [`NodeArena`].
///
/// Slot 0 is reserved for the sentinel ([`BOTTOM`]), which stands in for every
/// absent child and for the missing parent of the root.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) struct NodeId(u32);

pub(crate) const BOTTOM: NodeId = NodeId(0);

/// Largest slot index the arena hands out.
const MAX_SLOT: usize = (u32::MAX - 1) as usize;

impl NodeId {
    #[inline]
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub(crate) fn is_bottom(self) -> bool {
        self == BOTTOM
    }
}

// =============================================================================
// Nodes
// =============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Side {
    Left,
    Right,
}

#[derive(Clone, Debug)]
pub(crate) struct Node<T> {
    /// `None` for the sentinel and for slots sitting on the free list.
    pub(crate) value: Option<T>,
    /// 0 only for the sentinel.
    pub(crate) level: u8,
    pub(crate) left: NodeId,
    pub(crate) right: NodeId,
    pub(crate) parent: NodeId,
}

impl<T> Node<T> {
    fn sentinel() -> Self {
        Self {
            value: None,
            level: 0,
            left: BOTTOM,
            right: BOTTOM,
            parent: BOTTOM,
        }
    }

    fn leaf(value: T, parent: NodeId) -> Self {
        Self {
            value: Some(value),
            level: 1,
            left: BOTTOM,
            right: BOTTOM,
            parent,
        }
    }
}

// =============================================================================
// Arena
// =============================================================================

/// Node storage with a free list of recycled slots.
///
/// The arena never touches slot 0 after construction, so the sentinel's links
/// keep pointing at itself for the arena's whole life.
#[derive(Clone, Debug)]
pub(crate) struct NodeArena<T> {
    nodes: Vec<Node<T>>,
    free: Vec<NodeId>,
}

impl<T> NodeArena<T> {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        let mut nodes = Vec::with_capacity(capacity.saturating_add(1));
        nodes.push(Node::sentinel());
        Self {
            nodes,
            free: Vec::new(),
        }
    }

    /// Number of live nodes, excluding the sentinel.
    #[inline]
    pub(crate) fn live(&self) -> usize {
        self.nodes.len() - 1 - self.free.len()
    }

    pub(crate) fn capacity_bytes(&self) -> usize {
        self.nodes.capacity() * std::mem::size_of::<Node<T>>()
            + self.free.capacity() * std::mem::size_of::<NodeId>()
    }

    pub(crate) fn shrink_to_fit(&mut self) {
        self.nodes.shrink_to_fit();
        self.free.shrink_to_fit();
    }

    pub(crate) fn clear(&mut self) {
        self.nodes.truncate(1);
        self.free.clear();
    }

    /// Allocates a level-1 leaf holding `value` under `parent`.
    pub(crate) fn alloc(&mut self, value: T, parent: NodeId) -> NodeId {
        if let Some(id) = self.free.pop() {
            self.nodes[id.index()] = Node::leaf(value, parent);
            return id;
        }
        let idx = self.nodes.len();
        assert!(idx <= MAX_SLOT, "NodeArena::alloc: too many items");
        self.nodes.push(Node::leaf(value, parent));
        NodeId(idx as u32)
    }

    /// Returns `id` to the free list and hands back whatever value it held.
    pub(crate) fn free(&mut self, id: NodeId) -> Option<T> {
        debug_assert!(!id.is_bottom(), "the sentinel is never freed");
        let node = &mut self.nodes[id.index()];
        let value = node.value.take();
        debug_assert!(value.is_some(), "double free of {id:?}");
        node.level = 0;
        node.left = BOTTOM;
        node.right = BOTTOM;
        node.parent = BOTTOM;
        self.free.push(id);
        value
    }

    #[inline]
    pub(crate) fn get(&self, id: NodeId) -> &Node<T> {
        &self.nodes[id.index()]
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, id: NodeId) -> &mut Node<T> {
        debug_assert!(!id.is_bottom(), "the sentinel is immutable");
        &mut self.nodes[id.index()]
    }

    /// Rebuilds the arena without holes.
    ///
    /// Live nodes keep their relative slot order. Returns the new id of `root`
    /// and the number of nodes that changed slot.
    pub(crate) fn compact(&mut self, root: NodeId) -> (NodeId, usize) {
        if self.free.is_empty() {
            return (root, 0);
        }

        let mut remap = vec![BOTTOM; self.nodes.len()];
        let mut next = 1u32;
        let mut moved = 0usize;
        for (idx, node) in self.nodes.iter().enumerate().skip(1) {
            if node.value.is_some() {
                remap[idx] = NodeId(next);
                if next as usize != idx {
                    moved += 1;
                }
                next += 1;
            }
        }

        let old = std::mem::replace(&mut self.nodes, Vec::with_capacity(next as usize));
        self.free.clear();
        for node in old {
            if node.value.is_none() && !self.nodes.is_empty() {
                continue;
            }
            let relink = |id: NodeId| remap[id.index()];
            self.nodes.push(Node {
                value: node.value,
                level: node.level,
                left: relink(node.left),
                right: relink(node.right),
                parent: relink(node.parent),
            });
        }
        debug_assert_eq!(self.nodes.len(), next as usize);

        (remap[root.index()], moved)
    }
}
