use std::cmp::Ordering;

/// Comparison strategy used by a [`SortedSet`](crate::SortedSet).
///
/// Implementations must describe a strict total order. If they don't, the set
/// stays memory safe but may lose elements, report wrong answers, or never
/// terminate a search.
pub trait Comparator<T> {
    fn compare(&self, a: &T, b: &T) -> Ordering;
}

/// Orders elements by their [`Ord`] implementation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Natural;

impl<T: Ord> Comparator<T> for Natural {
    #[inline]
    fn compare(&self, a: &T, b: &T) -> Ordering {
        a.cmp(b)
    }
}

/// Orders elements with a caller-supplied function.
///
/// ```rust
/// use aa_sorted::SortedSet;
///
/// let mut s = SortedSet::with_comparator(|a: &i32, b: &i32| b.cmp(a));
/// s.extend([1, 3, 2]);
/// assert_eq!(s.iter().copied().collect::<Vec<_>>(), [3, 2, 1]);
/// ```
#[derive(Clone, Copy)]
pub struct OrderBy<F>(pub F);

impl<T, F> Comparator<T> for OrderBy<F>
where
    F: Fn(&T, &T) -> Ordering,
{
    #[inline]
    fn compare(&self, a: &T, b: &T) -> Ordering {
        (self.0)(a, b)
    }
}

impl<F> std::fmt::Debug for OrderBy<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("OrderBy(..)")
    }
}
