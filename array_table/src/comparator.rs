use std::cmp::Ordering;

/// A three-way comparison of keys.
///
/// [`ArrayTable`](crate::ArrayTable) only distinguishes [`Ordering::Equal`] from the other
/// outcomes, but keeping the full ordering lets comparators written for ordered collections be
/// reused as is.
///
/// Implemented for every `Fn(&K, &K) -> Ordering`.
pub trait Comparator<K: ?Sized> {
    /// Compares two keys.
    fn compare(&self, left: &K, right: &K) -> Ordering;

    /// Returns `true` if both keys compare equal.
    #[inline]
    fn equal(&self, left: &K, right: &K) -> bool {
        self.compare(left, right).is_eq()
    }
}

impl<K: ?Sized, F: Fn(&K, &K) -> Ordering> Comparator<K> for F {
    #[inline]
    fn compare(&self, left: &K, right: &K) -> Ordering {
        self(left, right)
    }
}

/// Compares keys using their [`Ord`] implementation.
#[derive(Clone, Copy, Debug, Default)]
pub struct OrdComparator;

impl<K: Ord + ?Sized> Comparator<K> for OrdComparator {
    #[inline]
    fn compare(&self, left: &K, right: &K) -> Ordering {
        left.cmp(right)
    }

    #[inline]
    fn equal(&self, left: &K, right: &K) -> bool {
        left == right
    }
}

/// Adapts a comparison function returning a negative, zero or positive integer for less, equal
/// or greater.
#[derive(Clone, Copy, Debug, Default)]
pub struct SignComparator<F>(pub F);

impl<K: ?Sized, F: Fn(&K, &K) -> i32> Comparator<K> for SignComparator<F> {
    #[inline]
    fn compare(&self, left: &K, right: &K) -> Ordering {
        (self.0)(left, right).cmp(&0)
    }
}
