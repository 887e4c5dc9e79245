//! Persistent (immutable) sorted containers.
//!
//! This module provides a left-leaning red-black tree that uses structural
//! sharing to minimize copying:
//!
//! - [`LlrbNode`]: Tree node with path-copying insert and rebalancing
//! - [`LlrbNodeIterator`]: In-order traversal and key seeking over nodes
//! - [`TreeSortedMap`]: Persistent ordered map over an [`LlrbNode`] root
//! - [`Comparator`]: Key ordering used by every descent
//!
//! # Structural Sharing
//!
//! An insert copies only the nodes on the path from the root to the inserted
//! key. Every other subtree is shared between the old and the new tree, and
//! the old tree stays fully usable.
//!
//! # Examples
//!
//! ```rust
//! use persistent_llrb::persistent::TreeSortedMap;
//!
//! let map: TreeSortedMap<i32, &str> = [(5, "five"), (3, "three"), (8, "eight")]
//!     .into_iter()
//!     .collect();
//!
//! // Structural sharing: the original map is preserved
//! let updated = map.insert(6, "six");
//! assert_eq!(map.len(), 3);     // Original unchanged
//! assert_eq!(updated.len(), 4); // New version
//!
//! let keys: Vec<&i32> = updated.keys().collect();
//! assert_eq!(keys, vec![&3, &5, &6, &8]);
//! ```

// =============================================================================
// Reference Counter Type Alias
// =============================================================================

/// Reference-counted smart pointer type.
///
/// When the `arc` feature is enabled (default), this is `std::sync::Arc`,
/// so trees can be shared and updated from several threads at once.
///
/// When the `arc` feature is disabled, this is `std::rc::Rc`,
/// which is faster but not thread-safe.
#[cfg(feature = "arc")]
pub(crate) type ReferenceCounter<T> = std::sync::Arc<T>;

#[cfg(not(feature = "arc"))]
pub(crate) type ReferenceCounter<T> = std::rc::Rc<T>;

mod comparator;
mod invariants;
mod llrb_node;
mod llrb_node_iterator;
mod tree_sorted_map;

pub use comparator::Comparator;
pub use comparator::NaturalOrder;
pub use comparator::ReverseOrder;
pub use invariants::InvariantViolation;
pub use invariants::check_invariants;
pub use llrb_node::Color;
pub use llrb_node::LlrbNode;
pub use llrb_node_iterator::LlrbNodeIterator;
pub use tree_sorted_map::TreeSortedMap;

// =============================================================================
// Tests
// =============================================================================
