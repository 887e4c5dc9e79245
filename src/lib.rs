//! # persistent-llrb
//!
//! An immutable, persistent sorted map built on a left-leaning red-black tree.
//!
//! ## Overview
//!
//! Every update returns a new tree and leaves the previous one untouched.
//! Only the nodes on the search path are copied; all other subtrees are shared
//! between versions through reference counting.
//!
//! - **Nodes**: [`persistent::LlrbNode`] with path-copying insert and rebalancing
//! - **Traversal**: [`persistent::LlrbNodeIterator`] for ordered and seeking iteration
//! - **Map**: [`persistent::TreeSortedMap`], a key-value map over a node root
//! - **Ordering**: [`persistent::Comparator`] for natural, reversed, or custom key order
//!
//! ## Feature Flags
//!
//! - `arc` (default): share nodes through `Arc`, making trees `Send + Sync`
//! - `tracing`: emit `tracing` events from map updates and invariant checks
//!
//! ## Example
//!
//! ```rust
//! use persistent_llrb::prelude::*;
//!
//! let map = TreeSortedMap::new()
//!     .insert(5, "five")
//!     .insert(3, "three")
//!     .insert(8, "eight");
//!
//! assert_eq!(map.min(), Some((&3, &"three")));
//! assert!(map.validate().is_ok());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Prelude module for convenient imports.
///
/// Re-exports commonly used types and traits.
///
/// # Usage
///
/// ```rust
/// use persistent_llrb::prelude::*;
/// ```
pub mod prelude {
    pub use crate::persistent::*;
}

pub mod persistent;
