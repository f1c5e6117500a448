use crate::{Result, Shard, ShardHasher};
use foldhash::fast::FixedState;
use std::borrow::Borrow;
use std::hash::{BuildHasher, Hash};
use std::num::NonZeroUsize;

/// A thread-safe hashmap partitioned into independently locked shards.
///
/// Every operation routes its key to exactly one shard through a
/// [`ShardHasher`] and holds only that shard's lock for its whole duration.
/// No call ever holds two shard locks at once, so operations cannot deadlock
/// against each other. The shard count is fixed at construction.
///
/// # Examples
/// ```
/// use rwshard::ShardedMap;
///
/// let map = ShardedMap::<String, u32>::new(10).unwrap();
/// map.set("key1".to_string(), 1);
/// map.set("key2".to_string(), 2);
/// assert_eq!(map.get("key1"), Some(1));
/// assert_eq!(map.get("key2"), Some(2));
/// assert_eq!(map.get("key3"), None);
///
/// map.delete("key1");
/// assert_eq!(map.get("key1"), None);
/// ```
#[derive(Debug)]
pub struct ShardedMap<K, V, S = FixedState> {
    shards: Box<[Shard<K, V>]>,
    hasher: ShardHasher<S>,
}

impl<K: Eq + Hash, V> Default for ShardedMap<K, V> {
    fn default() -> Self {
        let hasher =
            ShardHasher::with_nonzero_shard_count(default_shard_amount(), FixedState::default());
        Self::from_hasher(0, hasher)
    }
}

/// Returns the default number of shards: four per available core, rounded up
/// to a power of two.
fn default_shard_amount() -> NonZeroUsize {
    let amount =
        (std::thread::available_parallelism().map_or(1, usize::from) * 4).next_power_of_two();
    NonZeroUsize::MIN.saturating_add(amount - 1)
}

impl<K: Eq + Hash, V> ShardedMap<K, V> {
    /// Creates a new `ShardedMap` with `shard_count` shards.
    ///
    /// # Errors
    /// Returns [`Error::InvalidConfiguration`](crate::Error::InvalidConfiguration)
    /// if `shard_count` is zero.
    ///
    /// # Examples
    /// ```
    /// use rwshard::{Error, ShardedMap};
    ///
    /// assert!(ShardedMap::<u32, u32>::new(4).is_ok());
    /// assert_eq!(
    ///     ShardedMap::<u32, u32>::new(0).err(),
    ///     Some(Error::InvalidConfiguration { shard_count: 0 })
    /// );
    /// ```
    pub fn new(shard_count: usize) -> Result<Self> {
        Self::with_capacity_and_shard_amount(0, shard_count)
    }

    /// Creates a new `ShardedMap` with the specified total capacity and number of shards.
    ///
    /// The capacity is split evenly across the shards.
    pub fn with_capacity_and_shard_amount(capacity: usize, shard_count: usize) -> Result<Self> {
        Self::with_capacity_shard_amount_and_hasher(capacity, shard_count, FixedState::default())
    }
}

impl<K, V, S> ShardedMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    /// Creates a new `ShardedMap` that routes keys with a caller-supplied hasher.
    ///
    /// Shard indices are stable for the lifetime of the map whatever the
    /// builder. They are only identical across maps if the builder is
    /// deterministic, as the default `FixedState` is.
    pub fn with_hasher(shard_count: usize, build_hasher: S) -> Result<Self> {
        Self::with_capacity_shard_amount_and_hasher(0, shard_count, build_hasher)
    }

    pub fn with_capacity_shard_amount_and_hasher(
        capacity: usize,
        shard_count: usize,
        build_hasher: S,
    ) -> Result<Self> {
        let hasher = ShardHasher::new(shard_count, build_hasher).inspect_err(|err| {
            tracing::warn!(shard_count, capacity, "rejected sharded map: {err}");
        })?;
        Ok(Self::from_hasher(capacity, hasher))
    }

    fn from_hasher(capacity: usize, hasher: ShardHasher<S>) -> Self {
        let shard_count = hasher.shard_count();
        let shard_capacity = capacity / shard_count;
        tracing::debug!(shard_count, shard_capacity, "created sharded map");
        Self {
            shards: (0..shard_count)
                .map(|_| Shard::with_capacity(shard_capacity))
                .collect(),
            hasher,
        }
    }

    /// Returns the fixed number of shards.
    pub fn shard_count(&self) -> usize {
        self.shards.len()
    }

    /// Returns the index of the shard that owns `key`.
    ///
    /// The index depends only on the key's value and the routing hasher.
    pub fn shard_index<Q>(&self, key: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.hasher.shard_index(key)
    }

    /// Sets `value` under `key`, overwriting any previous value.
    ///
    /// Blocks only on the owning shard's exclusive lock.
    pub fn set(&self, key: K, value: V) {
        self.shard(&key).set(key, value);
    }

    /// Gets a clone of the value associated with the given key.
    ///
    /// # Returns
    /// * `Some(V)` if the key exists
    /// * `None` if the key doesn't exist
    pub fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
        V: Clone,
    {
        self.shard(key).get(key)
    }

    /// Runs `func` on the value associated with the given key under the
    /// owning shard's shared lock, without cloning it.
    ///
    /// **Locking behaviour:** Deadlock if `func` accesses any key of the same
    /// shard, reads included: the lock is fair, so a nested read queues behind
    /// any writer already waiting on the shard. Keys routed to other shards
    /// are safe to access.
    ///
    /// # Examples
    /// ```
    /// use rwshard::ShardedMap;
    ///
    /// let map = ShardedMap::<u32, Vec<u8>>::new(4).unwrap();
    /// map.set(1, vec![0; 1024]);
    /// assert_eq!(map.get_with(&1, |v| v.map(Vec::len)), Some(1024));
    /// assert_eq!(map.get_with(&2, |v| v.map(Vec::len)), None);
    /// ```
    pub fn get_with<Q, F, R>(&self, key: &Q, func: F) -> R
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
        F: FnOnce(Option<&V>) -> R,
    {
        self.shard(key).get_with(key, func)
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.shard(key).contains_key(key)
    }

    /// Deletes `key` from the map. Deleting a missing key is a no-op.
    pub fn delete<Q>(&self, key: &Q)
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.remove(key);
    }

    /// Removes `key` from the map, returning its value if it was present.
    pub fn remove<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.shard(key).remove(key)
    }

    /// Returns the number of entries.
    ///
    /// Shards are read one after another and each lock is released before the
    /// next is taken, so this is not a snapshot. It is exact when no writer
    /// runs concurrently.
    pub fn len(&self) -> usize {
        self.shards.iter().map(|s| s.len()).sum()
    }

    /// Returns `true` if every shard is empty. Same consistency as [`len`](Self::len).
    pub fn is_empty(&self) -> bool {
        self.shards.iter().all(|s| s.is_empty())
    }

    #[inline(always)]
    fn shard<Q>(&self, key: &Q) -> &Shard<K, V>
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        &self.shards[self.hasher.shard_index(key)]
    }
}
