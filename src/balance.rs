//! AA-tree rebalancing primitives.
//!
//! `skew`, `split` and `decrease_level` are the only code that changes the
//! shape of the tree. Each keeps parent links and the grandparent's child slot
//! (or the set's root) consistent with the rotation it performs.

use crate::node::NodeId;
use crate::SortedSet;

impl<T, C> SortedSet<T, C> {
    #[inline]
    pub(crate) fn level(&self, id: NodeId) -> u8 {
        self.nodes.get(id).level
    }

    #[inline]
    pub(crate) fn left(&self, id: NodeId) -> NodeId {
        self.nodes.get(id).left
    }

    #[inline]
    pub(crate) fn right(&self, id: NodeId) -> NodeId {
        self.nodes.get(id).right
    }

    #[inline]
    pub(crate) fn parent(&self, id: NodeId) -> NodeId {
        self.nodes.get(id).parent
    }

    #[inline]
    pub(crate) fn value(&self, id: NodeId) -> &T {
        self.nodes
            .get(id)
            .value
            .as_ref()
            .expect("live node holds a value")
    }

    /// Points `child`'s parent link at `parent`. No-op for the sentinel.
    #[inline]
    pub(crate) fn set_parent(&mut self, child: NodeId, parent: NodeId) {
        if !child.is_bottom() {
            self.nodes.get_mut(child).parent = parent;
        }
    }

    /// Makes whichever slot of `parent` held `old` hold `new` instead. A
    /// `BOTTOM` parent means `old` was the root.
    pub(crate) fn replace_child(&mut self, parent: NodeId, old: NodeId, new: NodeId) {
        if parent.is_bottom() {
            self.root = new;
            return;
        }
        let p = self.nodes.get_mut(parent);
        if p.left == old {
            p.left = new;
        } else {
            debug_assert_eq!(p.right, old);
            p.right = new;
        }
    }

    /// Removes a left horizontal link by rotating right.
    ///
    /// ```text
    ///       t            l
    ///      / \          / \
    ///     l   r   =>   a   t
    ///    / \              / \
    ///   a   b            b   r
    /// ```
    pub(crate) fn skew(&mut self, t: NodeId) -> NodeId {
        if t.is_bottom() {
            return t;
        }
        let l = self.left(t);
        if self.level(l) != self.level(t) {
            return t;
        }

        let p = self.parent(t);
        let b = self.right(l);
        self.replace_child(p, t, l);

        self.nodes.get_mut(t).left = b;
        self.set_parent(b, t);

        self.nodes.get_mut(l).right = t;
        self.nodes.get_mut(t).parent = l;
        self.nodes.get_mut(l).parent = p;
        l
    }

    /// Removes two consecutive right horizontal links by rotating left and
    /// promoting the middle node one level.
    ///
    /// ```text
    ///     t                  r
    ///    / \                / \
    ///   a   r      =>      t   x
    ///      / \            / \
    ///     b   x          a   b
    /// ```
    ///
    /// Returns the subtree root and whether a rotation happened.
    pub(crate) fn split(&mut self, t: NodeId) -> (NodeId, bool) {
        if t.is_bottom() {
            return (t, false);
        }
        let r = self.right(t);
        if self.level(self.right(r)) != self.level(t) {
            return (t, false);
        }

        let p = self.parent(t);
        let b = self.left(r);
        self.replace_child(p, t, r);

        self.nodes.get_mut(t).right = b;
        self.set_parent(b, t);

        let promoted = self.nodes.get_mut(r);
        promoted.left = t;
        promoted.parent = p;
        promoted.level += 1;
        self.nodes.get_mut(t).parent = r;
        (r, true)
    }

    /// Deletion step: lowers `t` if one of its children sits more than one
    /// level below it, then repairs the horizontal links that exposes.
    ///
    /// Returns the subtree root and whether anything changed.
    pub(crate) fn decrease_level(&mut self, t: NodeId) -> (NodeId, bool) {
        let level = self.level(t);
        let lowest_child = self.level(self.left(t)).min(self.level(self.right(t)));
        if level <= lowest_child + 1 {
            return (t, false);
        }

        let lowered = level - 1;
        self.nodes.get_mut(t).level = lowered;
        let r = self.right(t);
        if self.level(r) > lowered {
            self.nodes.get_mut(r).level = lowered;
        }

        let t = self.skew(t);
        self.skew(self.right(t));
        self.skew(self.right(self.right(t)));
        let (t, _) = self.split(t);
        let r = self.right(t);
        if !r.is_bottom() {
            self.split(r);
        }
        (t, true)
    }
}
