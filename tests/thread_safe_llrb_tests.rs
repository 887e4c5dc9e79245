//! Integration tests for sharing trees across threads.
//!
//! These tests verify that snapshots can be read from several threads and
//! that independent inserts from a shared root do not observe each other,
//! with the `arc` feature enabled.

#![cfg(feature = "arc")]

use persistent_llrb::persistent::{LlrbNode, LlrbNodeIterator, NaturalOrder, TreeSortedMap};
use rstest::rstest;
use std::sync::Arc;
use std::thread;

#[rstest]
fn test_concurrent_readers_see_same_snapshot() {
    let map: Arc<TreeSortedMap<i32, i32>> = Arc::new((0..1000).map(|key| (key, key * 2)).collect());

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let map_clone = Arc::clone(&map);
            thread::spawn(move || map_clone.values().copied().sum::<i32>())
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().expect("Thread panicked"), 999_000);
    }
}

#[rstest]
fn test_cross_thread_inserts_from_shared_root() {
    let original: LlrbNode<i32, String> = (0..100).fold(LlrbNode::new(), |node, key| {
        node.insert(key, key.to_string(), &NaturalOrder)
    });

    let handles: Vec<_> = (0..4)
        .map(|index| {
            // Cloning the root only bumps its reference count.
            let root = original.clone();
            thread::spawn(move || {
                let mut updated = root.clone();
                for key in (1000 * (index + 1))..(1000 * (index + 1) + 50) {
                    updated = updated.insert(key, format!("thread-{index}"), &NaturalOrder);
                }
                // The starting root is unchanged
                assert_eq!(root.size(), 100);
                updated
            })
        })
        .collect();

    let results: Vec<LlrbNode<i32, String>> = handles
        .into_iter()
        .map(|handle| handle.join().expect("Thread panicked"))
        .collect();

    for (index, result) in results.iter().enumerate() {
        assert_eq!(result.size(), 150);
        let foreign = LlrbNodeIterator::begin(result)
            .filter(|(key, _)| **key >= 1000)
            .all(|(_, value)| *value == format!("thread-{index}"));
        assert!(foreign);
    }

    assert_eq!(original.size(), 100);
    let keys: Vec<i32> = LlrbNodeIterator::begin(&original)
        .map(|(key, _)| *key)
        .collect();
    assert_eq!(keys, (0..100).collect::<Vec<_>>());
}

#[rstest]
fn test_dropping_versions_on_other_threads() {
    let map: TreeSortedMap<i32, Vec<u8>> = (0..200).map(|key| (key, vec![0; 16])).collect();

    let handles: Vec<_> = (0..8)
        .map(|index| {
            let version = map.insert(index, vec![1; 16]);
            thread::spawn(move || {
                assert_eq!(version.len(), 200);
                drop(version);
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("Thread panicked");
    }

    assert!(map.values().all(|value| value == &vec![0; 16]));
}
