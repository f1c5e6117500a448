use foldhash::fast::RandomState;
use parking_lot::RwLock;
use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;

/// A single partition of a `ShardedMap`.
///
/// This struct wraps a `HashMap` protected by its own `RwLock`. The map is only
/// reachable through the lock, and guards are released on every exit path,
/// unwinding included. The lock does not poison.
#[derive(Debug)]
pub struct Shard<K, V> {
    /// The partition's entries, guarded by this shard's lock only.
    map: RwLock<HashMap<K, V, RandomState>>,
}

impl<K, V> Shard<K, V>
where
    K: Eq + Hash,
{
    /// Creates a new `Shard` with the specified initial capacity.
    ///
    /// The inner map is seeded independently of the routing hasher.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            map: RwLock::new(HashMap::with_capacity_and_hasher(
                capacity,
                RandomState::default(),
            )),
        }
    }

    pub fn len(&self) -> usize {
        self.map.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.read().is_empty()
    }

    /// Inserts `value` under `key`, overwriting any previous value.
    pub fn set(&self, key: K, value: V) {
        self.map.write().insert(key, value);
    }

    /// Runs `func` against the value stored under `key` while holding shared access.
    ///
    /// `func` must not touch this shard again: a nested read waits behind any
    /// queued writer, which is itself waiting for this read to end.
    pub fn get_with<Q, F, R>(&self, key: &Q, func: F) -> R
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
        F: FnOnce(Option<&V>) -> R,
    {
        let map = self.map.read();
        func(map.get(key))
    }

    pub fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
        V: Clone,
    {
        self.get_with(key, |v| v.cloned())
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.map.read().contains_key(key)
    }

    /// Removes `key` and returns its value. A missing key is a no-op.
    pub fn remove<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.map.write().remove(key)
    }
}
