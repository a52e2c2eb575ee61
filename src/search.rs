use std::cmp::Ordering;

use crate::node::{NodeId, Side, BOTTOM};
use crate::order::Comparator;
use crate::SortedSet;

/// Outcome of a tree-order descent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Located {
    /// A node holding an equal value.
    Found(NodeId),
    /// The value is absent; a new leaf belongs in this side of this node.
    Vacant(NodeId, Side),
}

// =============================================================================
// Navigation
// =============================================================================

impl<T, C> SortedSet<T, C> {
    pub(crate) fn leftmost(&self, mut id: NodeId) -> NodeId {
        while !self.left(id).is_bottom() {
            id = self.left(id);
        }
        id
    }

    pub(crate) fn rightmost(&self, mut id: NodeId) -> NodeId {
        while !self.right(id).is_bottom() {
            id = self.right(id);
        }
        id
    }

    /// In-order successor of `id`, or `BOTTOM` if `id` holds the maximum.
    pub(crate) fn successor(&self, mut id: NodeId) -> NodeId {
        let r = self.right(id);
        if !r.is_bottom() {
            return self.leftmost(r);
        }
        loop {
            let p = self.parent(id);
            if p.is_bottom() || self.right(p) != id {
                return p;
            }
            id = p;
        }
    }

    /// In-order predecessor of `id`, or `BOTTOM` if `id` holds the minimum.
    pub(crate) fn predecessor(&self, mut id: NodeId) -> NodeId {
        let l = self.left(id);
        if !l.is_bottom() {
            return self.rightmost(l);
        }
        loop {
            let p = self.parent(id);
            if p.is_bottom() || self.left(p) != id {
                return p;
            }
            id = p;
        }
    }
}

// =============================================================================
// Search and mutation
// =============================================================================

impl<T, C: Comparator<T>> SortedSet<T, C> {
    /// Descends from `from` (never `BOTTOM`) following the set's order.
    pub(crate) fn locate(&self, from: NodeId, x: &T) -> Located {
        debug_assert!(!from.is_bottom());
        let mut at = from;
        loop {
            match self.order.compare(x, self.value(at)) {
                Ordering::Less => {
                    let l = self.left(at);
                    if l.is_bottom() {
                        return Located::Vacant(at, Side::Left);
                    }
                    at = l;
                }
                Ordering::Greater => {
                    let r = self.right(at);
                    if r.is_bottom() {
                        return Located::Vacant(at, Side::Right);
                    }
                    at = r;
                }
                Ordering::Equal => return Located::Found(at),
            }
        }
    }

    /// Smallest node whose value is `>= x`, or `BOTTOM` if there is none.
    pub(crate) fn locate_ceiling(&self, from: NodeId, x: &T) -> NodeId {
        match self.locate(from, x) {
            Located::Found(id) | Located::Vacant(id, Side::Left) => id,
            Located::Vacant(id, Side::Right) => self.successor(id),
        }
    }

    /// Inserts `x` by descending from `from`, which must be an ancestor of the
    /// slot `x` belongs in (the root always is).
    ///
    /// Returns the node holding `x` and whether it was newly added.
    pub(crate) fn insert_from(&mut self, from: NodeId, x: T) -> (NodeId, bool) {
        if self.root.is_bottom() {
            let id = self.nodes.alloc(x, BOTTOM);
            self.root = id;
            self.len += 1;
            return (id, true);
        }

        let (last, side) = match self.locate(from, &x) {
            Located::Found(id) => return (id, false),
            Located::Vacant(last, side) => (last, side),
        };
        let id = self.nodes.alloc(x, last);
        let slot = self.nodes.get_mut(last);
        match side {
            Side::Left => slot.left = id,
            Side::Right => slot.right = id,
        }
        self.len += 1;
        debug_assert_eq!(self.len, self.nodes.live());
        self.rebalance_after_insert(last);
        (id, true)
    }

    /// Walks from `t` towards the root applying skew then split. Two
    /// consecutive ancestors without a split end the walk: nothing above them
    /// can have changed.
    fn rebalance_after_insert(&mut self, mut t: NodeId) {
        let mut calm = 0;
        while !t.is_bottom() && calm < 2 {
            t = self.skew(t);
            let (top, rotated) = self.split(t);
            calm = if rotated { 0 } else { calm + 1 };
            t = self.parent(top);
        }
    }

    /// Removes the element equal to `x`, returning it.
    pub(crate) fn remove_value(&mut self, x: &T) -> Option<T> {
        if self.root.is_bottom() {
            return None;
        }
        let found = match self.locate(self.root, x) {
            Located::Found(id) => id,
            Located::Vacant(..) => return None,
        };

        // An internal node keeps its slot and takes over its successor's value;
        // the successor, always a level-1 node, is unlinked instead.
        let doomed = if self.level(found) > 1 {
            self.leftmost(self.right(found))
        } else {
            found
        };
        debug_assert_eq!(self.level(doomed), 1);
        debug_assert!(self.left(doomed).is_bottom());

        let parent = self.parent(doomed);
        let right = self.right(doomed);
        self.set_parent(right, parent);
        self.replace_child(parent, doomed, right);
        let mut removed = self.nodes.free(doomed);
        if doomed != found {
            std::mem::swap(&mut self.nodes.get_mut(found).value, &mut removed);
        }
        self.len -= 1;
        debug_assert_eq!(self.len, self.nodes.live());

        let mut t = parent;
        while !t.is_bottom() {
            let (top, changed) = self.decrease_level(t);
            if !changed {
                break;
            }
            t = self.parent(top);
        }

        removed
    }
}
