//! Structural checks for [`LlrbNode`] trees.
//!
//! [`check_invariants`] walks a whole tree and reports the first broken
//! red-black rule. Insert never produces such a tree on its own; a violation
//! means the comparator is not a strict total order.

use super::comparator::Comparator;
use super::llrb_node::LlrbNode;

/// A red-black rule that does not hold for a tree.
///
/// # Examples
///
/// ```rust
/// use persistent_llrb::persistent::InvariantViolation;
///
/// let error = InvariantViolation::BlackHeightMismatch { left: 2, right: 3 };
/// assert_eq!(
///     format!("{error}"),
///     "black height differs between subtrees: left 2, right 3"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvariantViolation {
    /// The root of the tree is red.
    RedRoot,
    /// A right child is red.
    RedRightChild,
    /// A red node has a red left child.
    ConsecutiveRedLinks,
    /// Two sibling subtrees have different black heights.
    BlackHeightMismatch {
        /// Black height of the left subtree.
        left: usize,
        /// Black height of the right subtree.
        right: usize,
    },
    /// A stored size does not match the number of entries beneath it.
    SizeMismatch {
        /// `left.size + 1 + right.size`.
        expected: usize,
        /// The size stored in the node.
        actual: usize,
    },
    /// An in-order neighbour does not sort strictly after its predecessor.
    OutOfOrder,
}

impl std::fmt::Display for InvariantViolation {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::RedRoot => write!(formatter, "root node is red"),
            Self::RedRightChild => write!(formatter, "right child is red"),
            Self::ConsecutiveRedLinks => write!(formatter, "red node has a red left child"),
            Self::BlackHeightMismatch { left, right } => write!(
                formatter,
                "black height differs between subtrees: left {left}, right {right}"
            ),
            Self::SizeMismatch { expected, actual } => write!(
                formatter,
                "subtree size is {actual} but children account for {expected}"
            ),
            Self::OutOfOrder => write!(formatter, "keys are not in strictly ascending order"),
        }
    }
}

impl std::error::Error for InvariantViolation {}

/// Checks every red-black rule on the tree rooted at `root`.
///
/// Returns the black height of the tree (the number of black nodes on any
/// path from `root` down to the empty node, not counting the empty node).
///
/// # Errors
///
/// Returns the first [`InvariantViolation`] found.
///
/// # Examples
///
/// ```rust
/// use persistent_llrb::persistent::{check_invariants, LlrbNode, NaturalOrder};
///
/// let root = (0..100).fold(LlrbNode::new(), |node, key| node.insert(key, (), &NaturalOrder));
/// assert!(check_invariants(&root, &NaturalOrder).is_ok());
/// ```
pub fn check_invariants<K, V, C>(
    root: &LlrbNode<K, V>,
    comparator: &C,
) -> Result<usize, InvariantViolation>
where
    C: Comparator<K> + ?Sized,
{
    let result = if root.is_red() {
        Err(InvariantViolation::RedRoot)
    } else {
        check_node(root, comparator, &mut None)
    };

    #[cfg(feature = "tracing")]
    if let Err(violation) = &result {
        tracing::debug!(%violation, size = root.size(), "red-black invariant violated");
    }

    result
}

/// Recursive helper for `check_invariants`.
///
/// `previous` carries the last key visited in order.
fn check_node<'a, K, V, C>(
    node: &'a LlrbNode<K, V>,
    comparator: &C,
    previous: &mut Option<&'a K>,
) -> Result<usize, InvariantViolation>
where
    C: Comparator<K> + ?Sized,
{
    let Some(key) = node.key() else {
        return Ok(0);
    };
    let (left, right) = (node.left(), node.right());

    if right.is_red() {
        return Err(InvariantViolation::RedRightChild);
    }
    if node.is_red() && left.is_red() {
        return Err(InvariantViolation::ConsecutiveRedLinks);
    }

    let expected = left.size() + 1 + right.size();
    if node.size() != expected {
        return Err(InvariantViolation::SizeMismatch {
            expected,
            actual: node.size(),
        });
    }

    let left_height = check_node(left, comparator, previous)?;

    if let Some(previous_key) = *previous
        && !comparator.less(previous_key, key)
    {
        return Err(InvariantViolation::OutOfOrder);
    }
    *previous = Some(key);

    let right_height = check_node(right, comparator, previous)?;

    if left_height != right_height {
        return Err(InvariantViolation::BlackHeightMismatch {
            left: left_height,
            right: right_height,
        });
    }

    Ok(left_height + usize::from(!node.is_red()))
}
