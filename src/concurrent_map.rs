//! Sharded concurrent accumulator map.
//!
//! Keys hash to one of a fixed number of shards, each an independent
//! `HashMap` behind its own [`parking_lot::Mutex`]. Every operation locks at
//! most one shard, and [`ConcurrentMap::build_ordinary_map`] locks shards one
//! at a time in index order, so the map cannot deadlock against itself.

use parking_lot::{Mutex, MutexGuard};
use std::collections::hash_map::DefaultHasher;
use std::collections::{BTreeMap, HashMap};
use std::hash::{Hash, Hasher};
use std::ops::{Deref, DerefMut};

/// A write handle to a single entry, returned by [`ConcurrentMap::access`].
///
/// Holds the shard lock for its whole lifetime and dereferences to the value,
/// so `*map.access(key) += delta` is a single atomic update.
pub struct ValueAccess<'a, K: Eq + Hash, V> {
    guard: MutexGuard<'a, HashMap<K, V>>,
    key: K,
}

impl<K: Eq + Hash, V> Deref for ValueAccess<'_, K, V> {
    type Target = V;

    fn deref(&self) -> &V {
        &self.guard[&self.key]
    }
}

impl<K: Eq + Hash, V> DerefMut for ValueAccess<'_, K, V> {
    fn deref_mut(&mut self) -> &mut V {
        // The entry is inserted before the handle is constructed.
        self.guard
            .get_mut(&self.key)
            .expect("entry inserted on access")
    }
}

/// Sharded key-value map for concurrent accumulation.
#[derive(Debug)]
pub struct ConcurrentMap<K, V> {
    shards: Vec<Mutex<HashMap<K, V>>>,
}

impl<K, V> ConcurrentMap<K, V>
where
    K: Eq + Hash + Clone,
    V: Default,
{
    /// Creates a map with `shard_count` shards.
    ///
    /// # Panics
    ///
    /// Panics if `shard_count` is zero.
    pub fn new(shard_count: usize) -> Self {
        assert!(shard_count > 0, "shard count must be positive");
        Self {
            shards: (0..shard_count).map(|_| Mutex::new(HashMap::new())).collect(),
        }
    }

    fn shard_for(&self, key: &K) -> usize {
        let mut hasher = DefaultHasher::new();
        key.hash(&mut hasher);
        (hasher.finish() as usize) % self.shards.len()
    }

    /// Locks the key's shard and returns a write handle to its value,
    /// inserting `V::default()` if the key is absent.
    pub fn access(&self, key: K) -> ValueAccess<'_, K, V> {
        let mut guard = self.shards[self.shard_for(&key)].lock();
        guard.entry(key.clone()).or_default();
        ValueAccess { guard, key }
    }

    /// Removes the entry for `key` if present.
    pub fn erase(&self, key: &K) {
        self.shards[self.shard_for(key)].lock().remove(key);
    }

    /// Snapshots all shards into one ordered map.
    pub fn build_ordinary_map(&self) -> BTreeMap<K, V>
    where
        K: Ord,
        V: Clone,
    {
        let mut map = BTreeMap::new();
        for shard in &self.shards {
            for (key, value) in shard.lock().iter() {
                map.insert(key.clone(), value.clone());
            }
        }
        map
    }
}
