//! # In-Memory Engine
//!
//! Sharded hash-map backend for the ephemeral store.
//!
//! ## Design Principles
//! 1. **Sharded Locks**: Per-shard `RwLock`s reduce contention between
//!    concurrent connections.
//! 2. **Cheap Value Handoff**: Keys and values are `Bytes`, so a `get` clone
//!    is a refcount bump, not a copy.
//! 3. **No Policy**: No TTL, no eviction, no capacity accounting; the store
//!    lives as long as the test that launched it.

use std::hash::BuildHasher;

use ahash::RandomState;
use bytes::Bytes;
use hashbrown::HashMap;
use parking_lot::RwLock;

/// Shard count; power of two so selection is a mask, not a modulo.
const SHARD_COUNT: usize = 16;

/// Sharded in-memory key-value store.
#[derive(Debug)]
pub struct Store {
    shards: Vec<RwLock<HashMap<Bytes, Bytes, RandomState>>>,
    /// Hash state used for shard selection, shared so placement is stable.
    hash_state: RandomState,
    shard_mask: usize,
}

impl Store {
    pub fn new() -> Self {
        let hash_state = RandomState::new();
        let shards = (0..SHARD_COUNT)
            .map(|_| RwLock::new(HashMap::with_hasher(hash_state.clone())))
            .collect();
        Store {
            shards,
            hash_state,
            shard_mask: SHARD_COUNT - 1,
        }
    }

    fn shard(&self, key: &[u8]) -> &RwLock<HashMap<Bytes, Bytes, RandomState>> {
        let hash = self.hash_state.hash_one(key) as usize;
        &self.shards[hash & self.shard_mask]
    }

    /// Returns the value under `key`, if any.
    pub fn get(&self, key: &[u8]) -> Option<Bytes> {
        self.shard(key).read().get(key).cloned()
    }

    /// Stores `value` under `key`, replacing any previous value.
    pub fn set(&self, key: &[u8], value: Bytes) {
        self.shard(key)
            .write()
            .insert(Bytes::copy_from_slice(key), value);
    }

    /// Removes `key`. Returns true when a value was present.
    pub fn del(&self, key: &[u8]) -> bool {
        self.shard(key).write().remove(key).is_some()
    }

    /// Drops every entry in every shard.
    pub fn flush_all(&self) {
        for shard in &self.shards {
            shard.write().clear();
        }
    }

    /// Total number of live entries across shards.
    pub fn len(&self) -> usize {
        self.shards.iter().map(|shard| shard.read().len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for Store {
    fn default() -> Self {
        Store::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_get_overwrites() {
        let store = Store::new();
        store.set(b"key", Bytes::from_static(b"1234"));
        store.set(b"key", Bytes::from_static(b"1235"));
        assert_eq!(store.get(b"key"), Some(Bytes::from_static(b"1235")));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn get_missing_is_none() {
        let store = Store::new();
        assert_eq!(store.get(b"nope"), None);
    }

    #[test]
    fn del_reports_presence() {
        let store = Store::new();
        store.set(b"key", Bytes::from_static(b"v"));
        assert!(store.del(b"key"));
        assert!(!store.del(b"key"));
        assert!(store.get(b"key").is_none());
    }

    #[test]
    fn flush_all_clears_every_shard() {
        let store = Store::new();
        // Enough keys to land in multiple shards.
        for i in 0..100 {
            store.set(format!("key-{i}").as_bytes(), Bytes::from_static(b"v"));
        }
        assert_eq!(store.len(), 100);
        store.flush_all();
        assert!(store.is_empty());
    }

    #[test]
    fn values_are_binary_safe() {
        let store = Store::new();
        let raw = Bytes::from_static(&[0xB1, 0x4B, 0x00, 0xFF]);
        store.set(b"bin", raw.clone());
        assert_eq!(store.get(b"bin"), Some(raw));
    }
}
