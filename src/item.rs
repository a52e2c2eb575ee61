use std::cmp::Ordering;
use std::fmt;

use crate::node::NodeId;
use crate::order::{Comparator, Natural};
use crate::SortedSet;

// =============================================================================
// Shared handle
// =============================================================================

/// A position in a [`SortedSet`], borrowed from it.
///
/// The borrow ties the handle to its set: it cannot outlive the set and the
/// set cannot be mutated while the handle exists.
pub struct Item<'a, T, C = Natural> {
    set: &'a SortedSet<T, C>,
    id: NodeId,
}

impl<T, C> Clone for Item<'_, T, C> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, C> Copy for Item<'_, T, C> {}

impl<'a, T, C> Item<'a, T, C> {
    pub(crate) fn new(set: &'a SortedSet<T, C>, id: NodeId) -> Option<Self> {
        (!id.is_bottom()).then_some(Self { set, id })
    }

    #[inline]
    pub fn value(&self) -> &'a T {
        self.set.value(self.id)
    }

    /// The next larger item, or `None` if this is the largest.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&self) -> Option<Self> {
        Self::new(self.set, self.set.successor(self.id))
    }

    /// The next smaller item, or `None` if this is the smallest.
    pub fn prev(&self) -> Option<Self> {
        Self::new(self.set, self.set.predecessor(self.id))
    }
}

impl<T, C> PartialEq for Item<'_, T, C> {
    /// Two handles are equal when they name the same node of the same set.
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.set, other.set) && self.id == other.id
    }
}

impl<T, C> Eq for Item<'_, T, C> {}

impl<T: fmt::Debug, C> fmt::Debug for Item<'_, T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Item")
            .field("value", self.value())
            .field("level", &self.set.level(self.id))
            .finish()
    }
}

// =============================================================================
// Exclusive cursor
// =============================================================================

/// A position in a [`SortedSet`] that holds the set exclusively, so it can
/// insert next to itself.
///
/// ```rust
/// use aa_sorted::SortedSet;
///
/// let mut s = SortedSet::new();
/// s.insert(1);
/// let mut at = s.first_mut().unwrap();
/// for i in 2..=5 {
///     let (next, added) = at.insert_nearby(i);
///     assert!(added);
///     at = next;
/// }
/// assert_eq!(s.iter().copied().collect::<Vec<_>>(), [1, 2, 3, 4, 5]);
/// ```
pub struct ItemMut<'a, T, C = Natural> {
    set: &'a mut SortedSet<T, C>,
    id: NodeId,
}

impl<'a, T, C> ItemMut<'a, T, C> {
    pub(crate) fn new(set: &'a mut SortedSet<T, C>, id: NodeId) -> Option<Self> {
        if id.is_bottom() {
            return None;
        }
        Some(Self { set, id })
    }

    #[inline]
    pub fn value(&self) -> &T {
        self.set.value(self.id)
    }

    /// A shared view of the current position.
    pub fn as_item(&self) -> Item<'_, T, C> {
        Item {
            set: &*self.set,
            id: self.id,
        }
    }

    /// Gives up exclusive access, keeping the position.
    pub fn into_item(self) -> Item<'a, T, C> {
        let set: &'a SortedSet<T, C> = self.set;
        Item { set, id: self.id }
    }

    /// Steps to the next larger item. Returns `false`, staying put, if this is
    /// the largest.
    pub fn move_next(&mut self) -> bool {
        let next = self.set.successor(self.id);
        if next.is_bottom() {
            return false;
        }
        self.id = next;
        true
    }

    /// Steps to the next smaller item. Returns `false`, staying put, if this is
    /// the smallest.
    pub fn move_prev(&mut self) -> bool {
        let prev = self.set.predecessor(self.id);
        if prev.is_bottom() {
            return false;
        }
        self.id = prev;
        true
    }
}

impl<'a, T, C: Comparator<T>> ItemMut<'a, T, C> {
    /// Inserts `x` into the set, using this position as a search hint.
    ///
    /// Cheaper than [`SortedSet::insert`] when `x` lands right before or after
    /// this item; otherwise falls back to a search from the root. Returns a
    /// cursor at the item equal to `x` and whether it was newly added.
    pub fn insert_nearby(self, x: T) -> (Self, bool) {
        let (id, added) = self.set.insert_nearby(self.id, x);
        (Self { set: self.set, id }, added)
    }
}

impl<T: fmt::Debug, C> fmt::Debug for ItemMut<'_, T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.as_item(), f)
    }
}

// =============================================================================
// Locality insert
// =============================================================================

impl<T, C: Comparator<T>> SortedSet<T, C> {
    pub(crate) fn insert_nearby(&mut self, near: NodeId, x: T) -> (NodeId, bool) {
        let ord = self.order.compare(&x, self.value(near));
        let neighbour = match ord {
            Ordering::Equal => return (near, false),
            Ordering::Greater => self.successor(near),
            Ordering::Less => self.predecessor(near),
        };
        // `near` is the extreme on this side, so `x` hangs off it directly.
        if neighbour.is_bottom() {
            return self.insert_from(near, x);
        }
        match self.order.compare(&x, self.value(neighbour)) {
            Ordering::Equal => (neighbour, false),
            // `x` sits strictly between `near` and `neighbour`.
            o if o != ord => {
                let from = self.lower(near, neighbour);
                self.insert_from(from, x)
            }
            // The hint was not adjacent.
            _ => self.insert_from(self.root, x),
        }
    }

    /// Of two in-order neighbours, the one at the lower level; on a tie (a
    /// horizontal link) the child. That node is an ancestor of the empty slot
    /// between them.
    fn lower(&self, a: NodeId, b: NodeId) -> NodeId {
        match self.level(a).cmp(&self.level(b)) {
            Ordering::Less => a,
            Ordering::Greater => b,
            Ordering::Equal if self.parent(a) == b => a,
            Ordering::Equal => b,
        }
    }
}
