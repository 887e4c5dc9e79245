//! In-order traversal of [`LlrbNode`] trees.
//!
//! The iterator keeps the chain of ancestors still to be visited on a stack,
//! so it needs O(log N) space and each step costs O(1) amortized. It only
//! relies on the public accessors of [`LlrbNode`].

use super::comparator::Comparator;
use super::llrb_node::LlrbNode;
use smallvec::SmallVec;
use std::iter::FusedIterator;

/// Inline stack capacity. A red-black tree of height 32 holds more than
/// 65,000 entries, so most traversals never touch the heap.
const INLINE_DEPTH: usize = 32;

/// An iterator over the entries of an [`LlrbNode`] tree in ascending key order.
///
/// # Examples
///
/// ```rust
/// use persistent_llrb::persistent::{LlrbNode, LlrbNodeIterator, NaturalOrder};
///
/// let root = [5, 3, 8]
///     .into_iter()
///     .fold(LlrbNode::new(), |node, key| node.insert(key, (), &NaturalOrder));
///
/// let keys: Vec<i32> = LlrbNodeIterator::begin(&root).map(|(key, _)| *key).collect();
/// assert_eq!(keys, vec![3, 5, 8]);
///
/// let from_four: Vec<i32> = LlrbNodeIterator::lower_bound(&root, &4, &NaturalOrder)
///     .map(|(key, _)| *key)
///     .collect();
/// assert_eq!(from_four, vec![5, 8]);
/// ```
pub struct LlrbNodeIterator<'a, K, V> {
    /// Nodes whose entry and right subtree are still pending. Top is next.
    stack: SmallVec<[&'a LlrbNode<K, V>; INLINE_DEPTH]>,
    remaining: usize,
}

impl<'a, K, V> LlrbNodeIterator<'a, K, V> {
    /// Creates an iterator positioned at the smallest key of `root`.
    #[must_use]
    pub fn begin(root: &'a LlrbNode<K, V>) -> Self {
        let mut iterator = Self {
            stack: SmallVec::new(),
            remaining: root.size(),
        };
        iterator.push_left_spine(root);
        iterator
    }

    /// Creates an iterator positioned at the first key that does not sort
    /// before `key`.
    ///
    /// Only ancestors whose key is not less than `key` are recorded; everything
    /// left of the target is skipped without being visited.
    ///
    /// # Complexity
    ///
    /// O(log N)
    #[must_use]
    pub fn lower_bound<C>(root: &'a LlrbNode<K, V>, key: &K, comparator: &C) -> Self
    where
        C: Comparator<K> + ?Sized,
    {
        let mut stack = SmallVec::new();
        let mut remaining = 0;
        let mut node = root;

        while let Some(node_key) = node.key() {
            if comparator.less(node_key, key) {
                node = node.right();
            } else {
                // This entry and its right subtree all come at or after `key`.
                remaining += 1 + node.right().size();
                stack.push(node);
                node = node.left();
            }
        }

        Self { stack, remaining }
    }

    /// Returns the entry that the next call to `next` yields.
    #[must_use]
    pub fn peek(&self) -> Option<(&'a K, &'a V)> {
        self.stack
            .last()
            .and_then(|node| node.entry())
            .map(|(key, value)| (key, value))
    }

    fn push_left_spine(&mut self, mut node: &'a LlrbNode<K, V>) {
        while !node.is_empty() {
            self.stack.push(node);
            node = node.left();
        }
    }
}

impl<'a, K, V> Iterator for LlrbNodeIterator<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left_spine(node.right());
        self.remaining = self.remaining.saturating_sub(1);
        node.entry().map(|(key, value)| (key, value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for LlrbNodeIterator<'_, K, V> {
    fn len(&self) -> usize {
        self.remaining
    }
}

impl<K, V> FusedIterator for LlrbNodeIterator<'_, K, V> {}

impl<K, V> Clone for LlrbNodeIterator<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            stack: self.stack.clone(),
            remaining: self.remaining,
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
