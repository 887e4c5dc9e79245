//! Persistent left-leaning red-black tree nodes.
//!
//! This module provides [`LlrbNode`], the building block behind
//! [`TreeSortedMap`](super::TreeSortedMap). A node is a cheap handle to an
//! immutable representation holding one entry, a color, the size of its
//! subtree, and two shared children.
//!
//! # Overview
//!
//! - O(log N) insert, with path copying: only the nodes on the search path
//!   are copied, every other subtree is shared with the previous tree
//! - O(1) size of any subtree
//! - O(1) clone of a whole tree (one reference count increment)
//!
//! # Examples
//!
//! ```rust
//! use persistent_llrb::persistent::{Color, LlrbNode, NaturalOrder};
//!
//! let empty: LlrbNode<i32, &str> = LlrbNode::new();
//! let one = empty.insert(1, "one", &NaturalOrder);
//! let two = one.insert(2, "two", &NaturalOrder);
//!
//! assert_eq!(one.size(), 1); // Original unchanged
//! assert_eq!(two.size(), 2);
//! assert_eq!(two.color(), Color::Black);
//! ```
//!
//! # Internal Structure
//!
//! Every tree returned by [`LlrbNode::insert`] satisfies:
//! 1. `size == left.size + 1 + right.size` at every node
//! 2. Red links lean left: a right child is never red
//! 3. No red node has a red left child
//! 4. Every path down to the empty node crosses the same number of black nodes
//! 5. The root is black
//!
//! The empty node is the handle without a representation. It is black, has
//! size 0, and its children are itself, so descent through an empty subtree
//! never has to special-case a missing child.

use super::ReferenceCounter;
use super::comparator::Comparator;
use std::fmt;
use std::mem;

// =============================================================================
// Color Definition
// =============================================================================

/// The color of a node in a red-black tree.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum Color {
    /// Black nodes count towards the black height.
    Black,
    /// Red nodes are glued to their parent, forming 3-nodes and 4-nodes.
    Red,
}

impl Color {
    /// Returns the other color.
    #[inline]
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Black => Self::Red,
            Self::Red => Self::Black,
        }
    }

    /// Returns `true` for [`Color::Red`].
    #[inline]
    #[must_use]
    pub const fn is_red(self) -> bool {
        matches!(self, Self::Red)
    }
}

// =============================================================================
// Node Definition
// =============================================================================

/// A node of a persistent left-leaning red-black tree.
///
/// The node is either the empty node or a shared pointer to an immutable
/// representation. Once a node has been returned to a caller it is never
/// mutated again, so any number of trees may share it.
pub struct LlrbNode<K, V> {
    rep: Option<ReferenceCounter<Rep<K, V>>>,
}

/// The payload of a non-empty node.
///
/// A `Rep` is only mutated while it is a private value inside an insert call.
/// Wrapping it in a [`ReferenceCounter`] publishes it.
#[derive(Clone)]
struct Rep<K, V> {
    entry: (K, V),
    color: Color,
    size: usize,
    left: LlrbNode<K, V>,
    right: LlrbNode<K, V>,
}

impl<K, V> Rep<K, V> {
    /// Creates a representation whose size is derived from its children.
    fn new(entry: (K, V), color: Color, left: LlrbNode<K, V>, right: LlrbNode<K, V>) -> Self {
        Self {
            entry,
            color,
            size: left.size() + 1 + right.size(),
            left,
            right,
        }
    }
}

impl<K, V> LlrbNode<K, V> {
    /// Returns the empty node.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use persistent_llrb::persistent::LlrbNode;
    ///
    /// let empty: LlrbNode<i32, i32> = LlrbNode::new();
    /// assert!(empty.is_empty());
    /// assert!(empty.left().is_empty());
    /// ```
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self { rep: None }
    }

    fn from_rep(rep: Rep<K, V>) -> Self {
        Self {
            rep: Some(ReferenceCounter::new(rep)),
        }
    }

    /// Returns the number of entries at this node or beneath it.
    #[inline]
    #[must_use]
    pub fn size(&self) -> usize {
        self.rep.as_ref().map_or(0, |rep| rep.size)
    }

    /// Returns `true` if this is the empty node.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.rep.is_none()
    }

    /// Returns `true` if this node is red. The empty node is black.
    #[inline]
    #[must_use]
    pub fn is_red(&self) -> bool {
        self.color().is_red()
    }

    /// Returns the color of this node.
    #[inline]
    #[must_use]
    pub fn color(&self) -> Color {
        self.rep.as_ref().map_or(Color::Black, |rep| rep.color)
    }

    /// Returns the key-value pair stored here, or `None` for the empty node.
    #[inline]
    #[must_use]
    pub fn entry(&self) -> Option<&(K, V)> {
        self.rep.as_deref().map(|rep| &rep.entry)
    }

    /// Returns the key stored here, or `None` for the empty node.
    #[inline]
    #[must_use]
    pub fn key(&self) -> Option<&K> {
        self.entry().map(|(key, _)| key)
    }

    /// Returns the value stored here, or `None` for the empty node.
    #[inline]
    #[must_use]
    pub fn value(&self) -> Option<&V> {
        self.entry().map(|(_, value)| value)
    }

    /// Returns the left child. The left child of the empty node is itself.
    #[inline]
    #[must_use]
    pub fn left(&self) -> &Self {
        self.rep.as_deref().map_or(self, |rep| &rep.left)
    }

    /// Returns the right child. The right child of the empty node is itself.
    #[inline]
    #[must_use]
    pub fn right(&self) -> &Self {
        self.rep.as_deref().map_or(self, |rep| &rep.right)
    }

    /// Returns `true` if both handles refer to the same node.
    ///
    /// All empty nodes are the same node.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        match (&self.rep, &other.rep) {
            (Some(this), Some(that)) => ReferenceCounter::ptr_eq(this, that),
            (None, None) => true,
            _ => false,
        }
    }

    /// Returns the number of nodes on the longest path down to the empty node.
    #[must_use]
    pub fn height(&self) -> usize {
        self.rep
            .as_deref()
            .map_or(0, |rep| 1 + rep.left.height().max(rep.right.height()))
    }
}

impl<K: Clone, V: Clone> LlrbNode<K, V> {
    /// Returns a tree with `key` set to `value`.
    ///
    /// When the comparator considers `key` equal to a stored key, only that
    /// entry's value is replaced and the shape of the tree is unchanged.
    /// Otherwise a new red leaf is added and the path back to the root is
    /// rebalanced. The returned root is always black.
    ///
    /// `self` and every node reachable from it are left untouched.
    ///
    /// # Complexity
    ///
    /// O(log N)
    ///
    /// # Examples
    ///
    /// ```rust
    /// use persistent_llrb::persistent::{LlrbNode, NaturalOrder};
    ///
    /// let first = LlrbNode::new().insert(5, "a", &NaturalOrder);
    /// let second = first.insert(5, "b", &NaturalOrder);
    ///
    /// assert_eq!(first.value(), Some(&"a"));
    /// assert_eq!(second.value(), Some(&"b"));
    /// assert_eq!(second.size(), 1);
    /// ```
    #[must_use]
    pub fn insert<C>(&self, key: K, value: V, comparator: &C) -> Self
    where
        C: Comparator<K> + ?Sized,
    {
        let mut root = self.inner_insert(key, value, comparator);
        root.color = Color::Black;
        Self::from_rep(root)
    }

    /// Recursive helper for insert. Returns the unpublished replacement for `self`.
    fn inner_insert<C>(&self, key: K, value: V, comparator: &C) -> Rep<K, V>
    where
        C: Comparator<K> + ?Sized,
    {
        let Some(rep) = self.rep.as_deref() else {
            return Rep::new((key, value), Color::Red, Self::new(), Self::new());
        };

        // One copy per level, fixed up in place before it is published.
        let mut result = rep.clone();
        if comparator.less(&key, &result.entry.0) {
            result.left = Self::from_rep(result.left.inner_insert(key, value, comparator));
            result.fix_up();
        } else if comparator.less(&result.entry.0, &key) {
            result.right = Self::from_rep(result.right.inner_insert(key, value, comparator));
            result.fix_up();
        } else {
            result.entry.1 = value;
        }
        result
    }

    /// Returns a copy of this node with a different color.
    fn recolored(&self, color: Color) -> Self {
        self.rep.as_deref().map_or_else(Self::new, |rep| {
            let mut copy = rep.clone();
            copy.color = color;
            Self::from_rep(copy)
        })
    }
}

impl<K: Clone, V: Clone> Rep<K, V> {
    /// Restores the left-leaning invariants after one child was replaced.
    fn fix_up(&mut self) {
        self.size = self.left.size() + 1 + self.right.size();

        if self.right.is_red() && !self.left.is_red() {
            self.rotate_left();
        }
        if self.left.is_red() && self.left.left().is_red() {
            self.rotate_right();
        }
        if self.left.is_red() && self.right.is_red() {
            self.flip_color();
        }
    }

    /// Rotates left:
    ///
    /// ```text
    ///      X              R
    ///    /   \          /   \
    ///   L     R   =>   X    RR
    ///        / \      / \
    ///       RL RR     L RL
    /// ```
    ///
    /// Size and color of the top position are unchanged. `X` becomes red.
    fn rotate_left(&mut self) {
        let Some(right) = self.right.rep.clone() else {
            return;
        };

        let entry = mem::replace(&mut self.entry, right.entry.clone());
        let new_left = Self::new(
            entry,
            Color::Red,
            mem::take(&mut self.left),
            right.left.clone(),
        );

        self.left = LlrbNode::from_rep(new_left);
        self.right = right.right.clone();
    }

    /// Rotates right:
    ///
    /// ```text
    ///      X              L
    ///    /   \          /   \
    ///   L     R   =>   LL    X
    ///  / \                  / \
    /// LL LR                LR  R
    /// ```
    ///
    /// Size and color of the top position are unchanged. `X` becomes red.
    fn rotate_right(&mut self) {
        let Some(left) = self.left.rep.clone() else {
            return;
        };

        let entry = mem::replace(&mut self.entry, left.entry.clone());
        let new_right = Self::new(
            entry,
            Color::Red,
            left.right.clone(),
            mem::take(&mut self.right),
        );

        self.left = left.left.clone();
        self.right = LlrbNode::from_rep(new_right);
    }

    /// Splits a 4-node: both children and this node switch color.
    fn flip_color(&mut self) {
        self.left = self.left.recolored(self.left.color().opposite());
        self.right = self.right.recolored(self.right.color().opposite());
        self.color = self.color.opposite();
    }
}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<K, V> Clone for LlrbNode<K, V> {
    #[inline]
    fn clone(&self) -> Self {
        Self {
            rep: self.rep.clone(),
        }
    }
}

impl<K, V> Default for LlrbNode<K, V> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for LlrbNode<K, V> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.rep.as_deref() {
            None => formatter.write_str("Empty"),
            Some(rep) => formatter
                .debug_struct("LlrbNode")
                .field("key", &rep.entry.0)
                .field("value", &rep.entry.1)
                .field("color", &rep.color)
                .field("size", &rep.size)
                .field("left", &rep.left)
                .field("right", &rep.right)
                .finish(),
        }
    }
}

#[cfg(feature = "arc")]
static_assertions::assert_impl_all!(LlrbNode<i32, String>: Send, Sync);

#[cfg(not(feature = "arc"))]
static_assertions::assert_not_impl_any!(LlrbNode<i32, String>: Send, Sync);

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistent::NaturalOrder;
    use rstest::rstest;

    fn build(keys: &[i32]) -> LlrbNode<i32, i32> {
        keys.iter().fold(LlrbNode::new(), |node, &key| {
            node.insert(key, key * 10, &NaturalOrder)
        })
    }

    fn leaf(key: i32, color: Color) -> LlrbNode<i32, i32> {
        let rep = Rep::new((key, key * 10), color, LlrbNode::new(), LlrbNode::new());
        LlrbNode::from_rep(rep)
    }

    // =========================================================================
    // Empty Node Tests
    // =========================================================================

    #[rstest]
    fn test_empty_node_accessors() {
        let empty: LlrbNode<i32, i32> = LlrbNode::new();
        assert!(empty.is_empty());
        assert_eq!(empty.size(), 0);
        assert_eq!(empty.color(), Color::Black);
        assert!(!empty.is_red());
        assert_eq!(empty.entry(), None);
        assert_eq!(empty.key(), None);
        assert_eq!(empty.value(), None);
        assert_eq!(empty.height(), 0);
    }

    #[rstest]
    fn test_empty_node_children_are_itself() {
        let empty: LlrbNode<i32, i32> = LlrbNode::new();
        assert!(std::ptr::eq(empty.left(), &empty));
        assert!(std::ptr::eq(empty.right(), &empty));
        assert!(empty.left().left().right().is_empty());
    }

    #[rstest]
    fn test_empty_nodes_are_identical() {
        let first: LlrbNode<i32, i32> = LlrbNode::new();
        let second = LlrbNode::default();
        assert!(first.ptr_eq(&second));
        assert!(!first.ptr_eq(&build(&[1])));
    }

    // =========================================================================
    // Insert Tests
    // =========================================================================

    #[rstest]
    fn test_insert_into_empty_creates_black_leaf() {
        let node = LlrbNode::new().insert(1, "one", &NaturalOrder);
        assert_eq!(node.size(), 1);
        assert_eq!(node.color(), Color::Black);
        assert_eq!(node.entry(), Some(&(1, "one")));
        assert!(node.left().is_empty());
        assert!(node.right().is_empty());
    }

    #[rstest]
    fn test_insert_greater_key_leans_left() {
        let node = build(&[1, 2]);
        assert_eq!(node.key(), Some(&2));
        assert_eq!(node.left().key(), Some(&1));
        assert_eq!(node.left().color(), Color::Red);
        assert!(node.right().is_empty());
    }

    #[rstest]
    fn test_insert_descending_splits_four_node() {
        let node = build(&[3, 2, 1]);
        assert_eq!(node.key(), Some(&2));
        assert_eq!(node.color(), Color::Black);
        assert_eq!(node.left().key(), Some(&1));
        assert_eq!(node.left().color(), Color::Black);
        assert_eq!(node.right().key(), Some(&3));
        assert_eq!(node.right().color(), Color::Black);
        assert_eq!(node.size(), 3);
    }

    #[rstest]
    fn test_insert_existing_key_replaces_value_only() {
        let node = build(&[4, 2, 6, 1]);
        let updated = node.insert(2, 999, &NaturalOrder);

        assert_eq!(updated.size(), node.size());
        assert_eq!(updated.left().value(), Some(&999));
        assert_eq!(node.left().value(), Some(&20));
        // Shape is the same and untouched subtrees are shared.
        assert!(updated.right().ptr_eq(node.right()));
        assert!(updated.left().left().ptr_eq(node.left().left()));
        assert_eq!(updated.left().color(), node.left().color());
    }

    #[rstest]
    fn test_insert_shares_off_path_subtrees() {
        let node = build(&[50, 25, 75, 10, 30, 60, 90]);
        let updated = node.insert(95, 950, &NaturalOrder);
        assert!(updated.left().ptr_eq(node.left()));
    }

    #[rstest]
    fn test_insert_with_closure_comparator() {
        let descending = |left: &i32, right: &i32| left > right;
        let mut node = LlrbNode::new();
        for key in [1, 2, 3] {
            node = node.insert(key, (), &descending);
        }
        assert_eq!(node.key(), Some(&2));
        assert_eq!(node.left().key(), Some(&3));
        assert_eq!(node.right().key(), Some(&1));
    }

    // =========================================================================
    // Rebalancing Tests
    // =========================================================================

    #[rstest]
    fn test_rotate_left_preserves_size_and_top_color() {
        let mut rep = Rep::new(
            (2, 20),
            Color::Black,
            leaf(1, Color::Black),
            leaf(3, Color::Red),
        );
        rep.rotate_left();

        assert_eq!(rep.entry.0, 3);
        assert_eq!(rep.color, Color::Black);
        assert_eq!(rep.size, 3);
        assert_eq!(rep.left.key(), Some(&2));
        assert_eq!(rep.left.color(), Color::Red);
        assert_eq!(rep.left.size(), 2);
        assert_eq!(rep.left.left().key(), Some(&1));
        assert!(rep.right.is_empty());
    }

    #[rstest]
    fn test_rotate_right_preserves_size_and_top_color() {
        let left = Rep::new((2, 20), Color::Red, leaf(1, Color::Red), LlrbNode::new());
        let mut rep = Rep::new(
            (3, 30),
            Color::Black,
            LlrbNode::from_rep(left),
            LlrbNode::new(),
        );
        rep.rotate_right();

        assert_eq!(rep.entry.0, 2);
        assert_eq!(rep.color, Color::Black);
        assert_eq!(rep.size, 3);
        assert_eq!(rep.left.key(), Some(&1));
        assert_eq!(rep.right.key(), Some(&3));
        assert_eq!(rep.right.color(), Color::Red);
    }

    #[rstest]
    fn test_flip_color_toggles_node_and_children() {
        let left = leaf(1, Color::Red);
        let right = leaf(3, Color::Red);
        let mut rep = Rep::new((2, 20), Color::Black, left.clone(), right.clone());
        rep.flip_color();

        assert_eq!(rep.color, Color::Red);
        assert_eq!(rep.left.color(), Color::Black);
        assert_eq!(rep.right.color(), Color::Black);
        // The published children keep their colors.
        assert_eq!(left.color(), Color::Red);
        assert_eq!(right.color(), Color::Red);
    }

    #[rstest]
    fn test_fix_up_recomputes_size() {
        let mut rep = Rep::new((2, 20), Color::Black, LlrbNode::new(), LlrbNode::new());
        rep.left = leaf(1, Color::Black);
        rep.fix_up();
        assert_eq!(rep.size, 2);
    }

    #[rstest]
    #[case(&[1, 2, 3, 4, 5, 6, 7])]
    #[case(&[7, 6, 5, 4, 3, 2, 1])]
    #[case(&[4, 2, 6, 1, 3, 5, 7])]
    fn test_seven_keys_stay_shallow(#[case] keys: &[i32]) {
        let node = build(keys);
        assert_eq!(node.size(), 7);
        assert!(node.height() <= 6);
    }

    #[rstest]
    fn test_color_opposite() {
        assert_eq!(Color::Red.opposite(), Color::Black);
        assert_eq!(Color::Black.opposite(), Color::Red);
    }

    #[rstest]
    fn test_debug_format() {
        let empty: LlrbNode<i32, i32> = LlrbNode::new();
        assert_eq!(format!("{empty:?}"), "Empty");
        let node = build(&[1]);
        assert_eq!(
            format!("{node:?}"),
            "LlrbNode { key: 1, value: 10, color: Black, size: 1, left: Empty, right: Empty }"
        );
    }
}
