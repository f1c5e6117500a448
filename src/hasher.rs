use crate::{Error, Result};
use foldhash::fast::FixedState;
use std::hash::{BuildHasher, Hash};
use std::num::NonZeroUsize;

/// Routes keys to shard indices by the value of the key.
///
/// The index is computed from the key's `Hash` implementation through a
/// `BuildHasher`, so it depends only on what the key contains and never on
/// where the key lives in memory. Two keys that compare equal always share a
/// shard. With the default `FixedState` builder the seed is fixed, which makes
/// the index identical for every `ShardHasher` with the same shard count.
///
/// # Examples
/// ```
/// use rwshard::ShardHasher;
///
/// let a = ShardHasher::with_shard_count(8).unwrap();
/// let b = ShardHasher::with_shard_count(8).unwrap();
/// assert_eq!(a.shard_index("key1"), b.shard_index(&"key1".to_string()));
/// assert!(a.shard_index(&42u64) < 8);
/// ```
#[derive(Debug, Clone)]
pub struct ShardHasher<S = FixedState> {
    build_hasher: S,
    shard_count: NonZeroUsize,
}

impl ShardHasher<FixedState> {
    /// Creates a router over `shard_count` shards using the fixed-seed hasher.
    ///
    /// Fails with [`Error::InvalidConfiguration`] if `shard_count` is zero.
    pub fn with_shard_count(shard_count: usize) -> Result<Self> {
        Self::new(shard_count, FixedState::default())
    }
}

impl<S: BuildHasher> ShardHasher<S> {
    /// Creates a router over `shard_count` shards using a caller-supplied hasher.
    ///
    /// Fails with [`Error::InvalidConfiguration`] if `shard_count` is zero.
    pub fn new(shard_count: usize, build_hasher: S) -> Result<Self> {
        let shard_count =
            NonZeroUsize::new(shard_count).ok_or(Error::InvalidConfiguration { shard_count })?;
        Ok(Self::with_nonzero_shard_count(shard_count, build_hasher))
    }

    /// Creates a router over a shard count that is known to be positive.
    pub fn with_nonzero_shard_count(shard_count: NonZeroUsize, build_hasher: S) -> Self {
        Self {
            build_hasher,
            shard_count,
        }
    }

    #[inline]
    pub fn shard_count(&self) -> usize {
        self.shard_count.get()
    }

    /// Returns the index in `[0, shard_count)` of the shard owning `key`.
    ///
    /// The reduction is done on the full 64-bit hash, so the result does not
    /// depend on the target's pointer width.
    #[inline(always)]
    pub fn shard_index<Q>(&self, key: &Q) -> usize
    where
        Q: Hash + ?Sized,
    {
        let hash = self.build_hasher.hash_one(key);
        (hash % self.shard_count.get() as u64) as usize
    }
}
