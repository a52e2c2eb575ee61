//! # aa-sorted
//!
//! An ordered set backed by an AA-tree (Andersson's level-balanced binary
//! search tree) whose nodes live in an arena and carry parent links.
//!
//! Parent links give O(1) amortized in-order stepping from any element, and
//! let an insertion start from an element the caller already holds
//! ([`ItemMut::insert_nearby`]) instead of from the root.
//!
//! ## Example
//!
//! ```rust
//! use aa_sorted::SortedSet;
//!
//! let mut set = SortedSet::new();
//! for x in [2, 4, 6, 1, 7, 8] {
//!     set.insert(x);
//! }
//! assert!(set.remove(&4));
//!
//! assert_eq!(set.iter().copied().collect::<Vec<_>>(), [1, 2, 6, 7, 8]);
//! assert_eq!(set.find_greater_or_equal(&3).map(|it| *it.value()), Some(6));
//! assert_eq!(set.backward().next(), Some(&8));
//! ```
//!
//! ## Mutation and iteration
//!
//! Iterators and [`Item`] handles borrow the set, so the set cannot change
//! underneath them:
//!
//! ```compile_fail
//! use aa_sorted::SortedSet;
//!
//! let mut set: SortedSet<i32> = (0..10).collect();
//! for x in set.iter() {
//!     set.insert(x + 100);
//! }
//! ```
//!
//! Sharing one set between threads follows the usual rules: `&SortedSet` can
//! be read from many threads at once, mutation needs `&mut` (for example via
//! a `Mutex`).

#![deny(unsafe_op_in_unsafe_fn)]

mod balance;
mod item;
mod iter;
mod node;
mod order;
mod search;

use std::cmp::Ordering;
use std::fmt;

pub use item::{Item, ItemMut};
pub use iter::Iter;
pub use order::{Comparator, Natural, OrderBy};

use node::{NodeArena, NodeId, BOTTOM};
use search::Located;

// =============================================================================
// SortedSet
// =============================================================================

/// A set of unique elements kept in the order given by `C`.
///
/// Insertion of an element equal to one already present is a no-op.
#[derive(Clone)]
pub struct SortedSet<T, C = Natural> {
    nodes: NodeArena<T>,
    root: NodeId,
    len: usize,
    order: C,
}

impl<T: Ord> SortedSet<T> {
    /// An empty set ordered by `T`'s [`Ord`] implementation.
    pub fn new() -> Self {
        Self::with_order(Natural)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_order(capacity, Natural)
    }
}

impl<T, F> SortedSet<T, OrderBy<F>>
where
    F: Fn(&T, &T) -> Ordering,
{
    /// An empty set ordered by `cmp`, which must be a strict total order.
    pub fn with_comparator(cmp: F) -> Self {
        Self::with_order(OrderBy(cmp))
    }
}

impl<T, C> SortedSet<T, C> {
    pub fn with_order(order: C) -> Self {
        Self::with_capacity_and_order(0, order)
    }

    pub fn with_capacity_and_order(capacity: usize, order: C) -> Self {
        Self {
            nodes: NodeArena::with_capacity(capacity),
            root: BOTTOM,
            len: 0,
            order,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn comparator(&self) -> &C {
        &self.order
    }

    /// Bytes reserved by the node arena.
    pub fn memory_usage(&self) -> usize {
        self.nodes.capacity_bytes()
    }

    pub fn shrink_to_fit(&mut self) {
        self.nodes.shrink_to_fit();
    }

    /// Compact the node arena by moving live nodes into the holes left by
    /// removals.
    ///
    /// Follow with [`shrink_to_fit`](Self::shrink_to_fit) to hand the freed
    /// memory back. Returns the number of nodes that moved.
    pub fn compact(&mut self) -> usize {
        let (root, moved) = self.nodes.compact(self.root);
        self.root = root;
        moved
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.root = BOTTOM;
        self.len = 0;
    }

    /// The smallest item, or `None` if the set is empty.
    pub fn first(&self) -> Option<Item<'_, T, C>> {
        if self.root.is_bottom() {
            return None;
        }
        Item::new(self, self.leftmost(self.root))
    }

    /// The largest item, or `None` if the set is empty.
    pub fn last(&self) -> Option<Item<'_, T, C>> {
        if self.root.is_bottom() {
            return None;
        }
        Item::new(self, self.rightmost(self.root))
    }

    pub fn first_mut(&mut self) -> Option<ItemMut<'_, T, C>> {
        if self.root.is_bottom() {
            return None;
        }
        let id = self.leftmost(self.root);
        ItemMut::new(self, id)
    }

    pub fn last_mut(&mut self) -> Option<ItemMut<'_, T, C>> {
        if self.root.is_bottom() {
            return None;
        }
        let id = self.rightmost(self.root);
        ItemMut::new(self, id)
    }

    pub fn min(&self) -> Option<&T> {
        self.first().map(|it| it.value())
    }

    pub fn max(&self) -> Option<&T> {
        self.last().map(|it| it.value())
    }

    /// Iterates over the elements in ascending order.
    pub fn iter(&self) -> Iter<'_, T, C> {
        Iter::new(self)
    }

    /// Iterates over the elements in descending order.
    pub fn backward(&self) -> std::iter::Rev<Iter<'_, T, C>> {
        self.iter().rev()
    }
}

impl<T, C: Comparator<T>> SortedSet<T, C> {
    /// Adds `x` to the set. Returns `false`, dropping `x`, if an equal element
    /// is already present.
    pub fn insert(&mut self, x: T) -> bool {
        let root = self.root;
        self.insert_from(root, x).1
    }

    /// Removes the element equal to `x`. Returns whether one was present.
    pub fn remove(&mut self, x: &T) -> bool {
        self.remove_value(x).is_some()
    }

    /// Removes and returns the element equal to `x`.
    pub fn take(&mut self, x: &T) -> Option<T> {
        self.remove_value(x)
    }

    pub fn contains(&self, x: &T) -> bool {
        self.find(x).is_some()
    }

    /// The stored element equal to `x`.
    pub fn get(&self, x: &T) -> Option<&T> {
        self.find(x).map(|id| self.value(id))
    }

    /// A cursor at the element equal to `x`.
    pub fn find_mut(&mut self, x: &T) -> Option<ItemMut<'_, T, C>> {
        let id = self.find(x)?;
        ItemMut::new(self, id)
    }

    /// The item holding the smallest element `>= x`, or `None` if every
    /// element is smaller than `x`.
    pub fn find_greater_or_equal(&self, x: &T) -> Option<Item<'_, T, C>> {
        if self.root.is_bottom() {
            return None;
        }
        Item::new(self, self.locate_ceiling(self.root, x))
    }

    pub fn find_greater_or_equal_mut(&mut self, x: &T) -> Option<ItemMut<'_, T, C>> {
        if self.root.is_bottom() {
            return None;
        }
        let id = self.locate_ceiling(self.root, x);
        ItemMut::new(self, id)
    }

    fn find(&self, x: &T) -> Option<NodeId> {
        if self.root.is_bottom() {
            return None;
        }
        match self.locate(self.root, x) {
            Located::Found(id) => Some(id),
            Located::Vacant(..) => None,
        }
    }
}

impl<T, C: Default> Default for SortedSet<T, C> {
    fn default() -> Self {
        Self::with_order(C::default())
    }
}

impl<T: fmt::Debug, C> fmt::Debug for SortedSet<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T: PartialEq, C> PartialEq for SortedSet<T, C> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<T: Eq, C> Eq for SortedSet<T, C> {}

impl<T, C: Comparator<T>> Extend<T> for SortedSet<T, C> {
    /// Each element is inserted next to the previous one, so already sorted
    /// input skips the descent from the root.
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let mut hint = BOTTOM;
        for x in iter {
            hint = if hint.is_bottom() {
                let root = self.root;
                self.insert_from(root, x).0
            } else {
                self.insert_nearby(hint, x).0
            };
        }
    }
}

impl<'a, T: Copy + 'a, C: Comparator<T>> Extend<&'a T> for SortedSet<T, C> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied());
    }
}

impl<T: Ord> FromIterator<T> for SortedSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}


#[cfg(test)]
mod proptests;
