//! Persistent (immutable) sorted map based on a left-leaning red-black tree.
//!
//! This module provides [`TreeSortedMap`], an ordered map whose updates
//! return new maps while every earlier version stays valid.
//!
//! # Overview
//!
//! - O(log N) get, insert, and `find_index`
//! - O(log N) min/max
//! - O(1) len and `is_empty`
//! - O(1) clone
//!
//! Keys are ordered by a [`Comparator`], [`NaturalOrder`] unless another one is
//! supplied through [`TreeSortedMap::with_comparator`].
//!
//! # Examples
//!
//! ```rust
//! use persistent_llrb::persistent::TreeSortedMap;
//!
//! let map = TreeSortedMap::new()
//!     .insert(3, "three")
//!     .insert(1, "one")
//!     .insert(2, "two");
//!
//! // Entries are always in sorted order
//! let keys: Vec<&i32> = map.keys().collect();
//! assert_eq!(keys, vec![&1, &2, &3]);
//!
//! // The original map is preserved
//! let updated = map.insert(1, "ONE");
//! assert_eq!(map.get(&1), Some(&"one"));
//! assert_eq!(updated.get(&1), Some(&"ONE"));
//! ```

use super::comparator::{Comparator, NaturalOrder};
use super::invariants::{InvariantViolation, check_invariants};
use super::llrb_node::LlrbNode;
use super::llrb_node_iterator::LlrbNodeIterator;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

// =============================================================================
// TreeSortedMap Definition
// =============================================================================

/// A persistent ordered map backed by an [`LlrbNode`] tree.
///
/// # Time Complexity
///
/// | Operation      | Complexity        |
/// |----------------|-------------------|
/// | `new`          | O(1)              |
/// | `get`          | O(log N)          |
/// | `insert`       | O(log N)          |
/// | `contains_key` | O(log N)          |
/// | `find_index`   | O(log N)          |
/// | `min`/`max`    | O(log N)          |
/// | `iter_from`    | O(log N) to start |
/// | `len`          | O(1)              |
/// | `clone`        | O(1)              |
///
/// # Examples
///
/// ```rust
/// use persistent_llrb::persistent::{NaturalOrder, ReverseOrder, TreeSortedMap};
///
/// let descending = TreeSortedMap::with_comparator(ReverseOrder::new(NaturalOrder))
///     .insert(1, "one")
///     .insert(2, "two");
///
/// let keys: Vec<&i32> = descending.keys().collect();
/// assert_eq!(keys, vec![&2, &1]);
/// ```
pub struct TreeSortedMap<K, V, C = NaturalOrder> {
    root: LlrbNode<K, V>,
    comparator: C,
}

impl<K, V> TreeSortedMap<K, V> {
    /// Creates an empty map ordered by [`NaturalOrder`].
    ///
    /// # Examples
    ///
    /// ```rust
    /// use persistent_llrb::persistent::TreeSortedMap;
    ///
    /// let map: TreeSortedMap<i32, String> = TreeSortedMap::new();
    /// assert!(map.is_empty());
    /// ```
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self::with_comparator(NaturalOrder)
    }
}

impl<K: Clone + Ord, V: Clone> TreeSortedMap<K, V> {
    /// Creates a map containing a single key-value pair.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use persistent_llrb::persistent::TreeSortedMap;
    ///
    /// let map = TreeSortedMap::singleton(42, "answer");
    /// assert_eq!(map.len(), 1);
    /// assert_eq!(map.get(&42), Some(&"answer"));
    /// ```
    #[inline]
    #[must_use]
    pub fn singleton(key: K, value: V) -> Self {
        Self::new().insert(key, value)
    }
}

impl<K, V, C> TreeSortedMap<K, V, C> {
    /// Creates an empty map ordered by `comparator`.
    #[inline]
    #[must_use]
    pub const fn with_comparator(comparator: C) -> Self {
        Self {
            root: LlrbNode::new(),
            comparator,
        }
    }

    /// Returns the number of entries in the map.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.root.size()
    }

    /// Returns `true` if the map contains no entries.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    /// Returns the root node of the underlying tree.
    #[inline]
    #[must_use]
    pub const fn root(&self) -> &LlrbNode<K, V> {
        &self.root
    }

    /// Returns the comparator that orders the keys.
    #[inline]
    #[must_use]
    pub const fn comparator(&self) -> &C {
        &self.comparator
    }

    /// Returns the entry with the smallest key.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use persistent_llrb::persistent::TreeSortedMap;
    ///
    /// let map = TreeSortedMap::new()
    ///     .insert(3, "three")
    ///     .insert(1, "one");
    /// assert_eq!(map.min(), Some((&1, &"one")));
    /// ```
    #[must_use]
    pub fn min(&self) -> Option<(&K, &V)> {
        let mut node = &self.root;
        while !node.left().is_empty() {
            node = node.left();
        }
        node.entry().map(|(key, value)| (key, value))
    }

    /// Returns the entry with the largest key.
    #[must_use]
    pub fn max(&self) -> Option<(&K, &V)> {
        let mut node = &self.root;
        while !node.right().is_empty() {
            node = node.right();
        }
        node.entry().map(|(key, value)| (key, value))
    }

    /// Returns an iterator over entries in sorted key order.
    #[must_use]
    pub fn iter(&self) -> LlrbNodeIterator<'_, K, V> {
        LlrbNodeIterator::begin(&self.root)
    }

    /// Returns an iterator over keys in sorted order.
    pub fn keys(&self) -> impl ExactSizeIterator<Item = &K> {
        self.iter().map(|(key, _)| key)
    }

    /// Returns an iterator over values in key order.
    pub fn values(&self) -> impl ExactSizeIterator<Item = &V> {
        self.iter().map(|(_, value)| value)
    }
}

impl<K, V, C: Comparator<K>> TreeSortedMap<K, V, C> {
    /// Returns a reference to the value stored for `key`.
    ///
    /// # Complexity
    ///
    /// O(log N)
    #[must_use]
    pub fn get(&self, key: &K) -> Option<&V> {
        self.find_node(key).value()
    }

    /// Returns `true` if the map contains `key`.
    #[must_use]
    pub fn contains_key(&self, key: &K) -> bool {
        !self.find_node(key).is_empty()
    }

    /// Returns the position of `key` in sorted order, or `None` if absent.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use persistent_llrb::persistent::TreeSortedMap;
    ///
    /// let map: TreeSortedMap<i32, ()> = [(10, ()), (20, ()), (30, ())].into_iter().collect();
    /// assert_eq!(map.find_index(&20), Some(1));
    /// assert_eq!(map.find_index(&25), None);
    /// ```
    #[must_use]
    pub fn find_index(&self, key: &K) -> Option<usize> {
        let mut node = &self.root;
        let mut preceding = 0;

        while let Some(node_key) = node.key() {
            match self.comparator.compare(key, node_key) {
                Ordering::Less => node = node.left(),
                Ordering::Greater => {
                    preceding += node.left().size() + 1;
                    node = node.right();
                }
                Ordering::Equal => return Some(preceding + node.left().size()),
            }
        }
        None
    }

    /// Returns an iterator over entries whose key does not sort before `key`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use persistent_llrb::persistent::TreeSortedMap;
    ///
    /// let map: TreeSortedMap<i32, &str> =
    ///     [(1, "one"), (3, "three"), (5, "five")].into_iter().collect();
    /// let keys: Vec<&i32> = map.iter_from(&2).map(|(key, _)| key).collect();
    /// assert_eq!(keys, vec![&3, &5]);
    /// ```
    #[must_use]
    pub fn iter_from(&self, key: &K) -> LlrbNodeIterator<'_, K, V> {
        LlrbNodeIterator::lower_bound(&self.root, key, &self.comparator)
    }

    /// Returns an iterator over keys that do not sort before `key`.
    ///
    /// The iterator borrows only the map, so `key` may be a temporary.
    pub fn keys_from<'a>(
        &'a self,
        key: &K,
    ) -> impl ExactSizeIterator<Item = &'a K> + use<'a, K, V, C> {
        self.iter_from(key).map(|(key, _)| key)
    }

    /// Checks the red-black invariants of the underlying tree.
    ///
    /// # Errors
    ///
    /// Returns the first [`InvariantViolation`] found, which can only happen
    /// when the comparator is not a strict total order.
    pub fn validate(&self) -> Result<usize, InvariantViolation> {
        check_invariants(&self.root, &self.comparator)
    }

    /// Descends to the node holding `key`, or to the empty node.
    fn find_node(&self, key: &K) -> &LlrbNode<K, V> {
        let mut node = &self.root;
        while let Some(node_key) = node.key() {
            match self.comparator.compare(key, node_key) {
                Ordering::Less => node = node.left(),
                Ordering::Greater => node = node.right(),
                Ordering::Equal => break,
            }
        }
        node
    }
}

impl<K: Clone, V: Clone, C: Comparator<K> + Clone> TreeSortedMap<K, V, C> {
    /// Inserts a key-value pair into the map.
    ///
    /// If the map already contains the key, the value is replaced.
    ///
    /// # Complexity
    ///
    /// O(log N)
    ///
    /// # Examples
    ///
    /// ```rust
    /// use persistent_llrb::persistent::TreeSortedMap;
    ///
    /// let map1 = TreeSortedMap::new().insert(1, "one");
    /// let map2 = map1.insert(1, "ONE");
    ///
    /// assert_eq!(map1.get(&1), Some(&"one")); // Original unchanged
    /// assert_eq!(map2.get(&1), Some(&"ONE")); // New version
    /// assert_eq!(map2.len(), 1);
    /// ```
    #[must_use]
    pub fn insert(&self, key: K, value: V) -> Self {
        let root = self.root.insert(key, value, &self.comparator);

        #[cfg(feature = "tracing")]
        tracing::trace!(
            size = root.size(),
            updated = root.size() == self.len(),
            "inserted entry"
        );

        Self {
            root,
            comparator: self.comparator.clone(),
        }
    }
}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<K, V, C: Clone> Clone for TreeSortedMap<K, V, C> {
    #[inline]
    fn clone(&self) -> Self {
        Self {
            root: self.root.clone(),
            comparator: self.comparator.clone(),
        }
    }
}

impl<K, V, C: Default> Default for TreeSortedMap<K, V, C> {
    #[inline]
    fn default() -> Self {
        Self::with_comparator(C::default())
    }
}

impl<K, V, C> FromIterator<(K, V)> for TreeSortedMap<K, V, C>
where
    K: Clone,
    V: Clone,
    C: Comparator<K> + Clone + Default,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::default();
        map.extend(iter);
        map
    }
}

impl<K, V, C> Extend<(K, V)> for TreeSortedMap<K, V, C>
where
    K: Clone,
    V: Clone,
    C: Comparator<K>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.root = self.root.insert(key, value, &self.comparator);
        }
    }
}

impl<'a, K, V, C> IntoIterator for &'a TreeSortedMap<K, V, C> {
    type Item = (&'a K, &'a V);
    type IntoIter = LlrbNodeIterator<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K: PartialEq, V: PartialEq, C> PartialEq for TreeSortedMap<K, V, C> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<K: Eq, V: Eq, C> Eq for TreeSortedMap<K, V, C> {}

/// Hashes the length followed by every entry in key order, so equal maps
/// hash equally regardless of insertion order.
impl<K: Hash, V: Hash, C> Hash for TreeSortedMap<K, V, C> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.len().hash(state);
        for (key, value) in self {
            key.hash(state);
            value.hash(state);
        }
    }
}

impl<K: fmt::Debug, V: fmt::Debug, C> fmt::Debug for TreeSortedMap<K, V, C> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_map().entries(self.iter()).finish()
    }
}

impl<K: fmt::Display, V: fmt::Display, C> fmt::Display for TreeSortedMap<K, V, C> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{{")?;
        let mut first = true;
        for (key, value) in self {
            if first {
                first = false;
            } else {
                write!(formatter, ", ")?;
            }
            write!(formatter, "{key}: {value}")?;
        }
        write!(formatter, "}}")
    }
}

// =============================================================================
// Tests
// =============================================================================
