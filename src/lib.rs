//! A thread-safe hashmap that reduces lock contention by partitioning entries into shards.
//!
//! # Overview
//! `rwshard` splits a map into a fixed number of shards, each holding its own
//! `HashMap` behind its own reader-writer lock. A key is routed to a shard by
//! hashing its value, so concurrent operations on keys in different shards
//! never contend.
//!
//! # Features
//! - Value-based shard routing, stable for the lifetime of the map and across
//!   maps with the same shard count
//! - Shared access for reads, exclusive access for writes, one shard at a time
//! - No operation holds more than one lock, so there is no lock ordering to get wrong
//! - No poisoning, a panic in one thread leaves every shard usable
//! - Key types are checked at compile time: they must implement `Eq + Hash`
//!
//! # Examples
//! ```
//! use rwshard::ShardedMap;
//!
//! let map = ShardedMap::<String, u32>::new(16).unwrap();
//!
//! // Basic operations
//! map.set("key1".into(), 42);
//! assert_eq!(map.get("key1"), Some(42));
//!
//! // Last write wins
//! map.set("key1".into(), 43);
//! assert_eq!(map.get("key1"), Some(43));
//!
//! // Delete a value, deleting a missing key is a no-op
//! map.delete("key1");
//! map.delete("key1");
//! assert_eq!(map.get("key1"), None);
//!
//! // Zero shards is rejected
//! assert!(ShardedMap::<String, u32>::new(0).is_err());
//! ```
mod error;
mod hasher;
mod shard;
mod sharded_map;

pub use error::*;
pub use hasher::*;
use shard::*;
pub use sharded_map::*;
