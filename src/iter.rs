use std::iter::FusedIterator;

use crate::node::NodeId;
use crate::order::Natural;
use crate::SortedSet;

/// Iterator over the elements of a [`SortedSet`] in ascending order.
///
/// Created by [`SortedSet::iter`]. Double-ended: `.rev()` walks the set from
/// the largest element down, which is what [`SortedSet::backward`] returns.
pub struct Iter<'a, T, C = Natural> {
    set: &'a SortedSet<T, C>,
    front: NodeId,
    back: NodeId,
    remaining: usize,
}

impl<'a, T, C> Iter<'a, T, C> {
    pub(crate) fn new(set: &'a SortedSet<T, C>) -> Self {
        let (front, back) = if set.root.is_bottom() {
            (set.root, set.root)
        } else {
            (set.leftmost(set.root), set.rightmost(set.root))
        };
        Self {
            set,
            front,
            back,
            remaining: set.len,
        }
    }
}

impl<T, C> Clone for Iter<'_, T, C> {
    fn clone(&self) -> Self {
        Self {
            set: self.set,
            front: self.front,
            back: self.back,
            remaining: self.remaining,
        }
    }
}

impl<'a, T, C> Iterator for Iter<'a, T, C> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        let id = self.front;
        if self.remaining > 0 {
            self.front = self.set.successor(id);
        }
        Some(self.set.value(id))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T, C> DoubleEndedIterator for Iter<'_, T, C> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        let id = self.back;
        if self.remaining > 0 {
            self.back = self.set.predecessor(id);
        }
        Some(self.set.value(id))
    }
}

impl<T, C> ExactSizeIterator for Iter<'_, T, C> {}

impl<T, C> FusedIterator for Iter<'_, T, C> {}

impl<'a, T, C> IntoIterator for &'a SortedSet<T, C> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T, C>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
