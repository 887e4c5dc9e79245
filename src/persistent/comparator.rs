//! Key ordering for the persistent tree.
//!
//! The tree never orders keys by itself. Every descent asks a [`Comparator`]
//! whether one key sorts strictly before another, so the same node type can
//! hold keys in natural order, reversed order, or any caller-defined order.
//!
//! A comparator must define a strict total order. When it does not, the tree
//! shape and lookup results are unspecified.
//!
//! # Examples
//!
//! ```rust
//! use persistent_llrb::persistent::{Comparator, NaturalOrder, ReverseOrder};
//! use std::cmp::Ordering;
//!
//! assert!(NaturalOrder.less(&1, &2));
//! assert!(ReverseOrder::new(NaturalOrder).less(&2, &1));
//!
//! let by_length = |left: &&str, right: &&str| left.len() < right.len();
//! assert_eq!(by_length.compare(&"ab", &"cd"), Ordering::Equal);
//! ```

use std::cmp::Ordering;

/// A strict-weak "sorts before" predicate over keys of type `K`.
pub trait Comparator<K: ?Sized> {
    /// Returns `true` if `left` sorts strictly before `right`.
    fn less(&self, left: &K, right: &K) -> bool;

    /// Three-way comparison derived from [`less`](Self::less).
    ///
    /// Keys for which neither sorts before the other are `Equal`.
    fn compare(&self, left: &K, right: &K) -> Ordering {
        if self.less(left, right) {
            Ordering::Less
        } else if self.less(right, left) {
            Ordering::Greater
        } else {
            Ordering::Equal
        }
    }
}

impl<K: ?Sized, F> Comparator<K> for F
where
    F: Fn(&K, &K) -> bool,
{
    #[inline]
    fn less(&self, left: &K, right: &K) -> bool {
        self(left, right)
    }
}

/// Orders keys by their [`Ord`] implementation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct NaturalOrder;

impl<K: Ord + ?Sized> Comparator<K> for NaturalOrder {
    #[inline]
    fn less(&self, left: &K, right: &K) -> bool {
        left < right
    }

    #[inline]
    fn compare(&self, left: &K, right: &K) -> Ordering {
        left.cmp(right)
    }
}

/// Reverses the order defined by another comparator.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ReverseOrder<C> {
    inner: C,
}

impl<C> ReverseOrder<C> {
    /// Wraps `inner` so that it sorts in the opposite direction.
    #[inline]
    #[must_use]
    pub const fn new(inner: C) -> Self {
        Self { inner }
    }

    /// Returns the wrapped comparator.
    #[inline]
    pub const fn inner(&self) -> &C {
        &self.inner
    }
}

impl<K: ?Sized, C: Comparator<K>> Comparator<K> for ReverseOrder<C> {
    #[inline]
    fn less(&self, left: &K, right: &K) -> bool {
        self.inner.less(right, left)
    }
}
