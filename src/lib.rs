//! # Chain Map
//!
//! A Rust implementation of a hash table with separate chaining.
//!
//! `ChainedHashMap` maps `String` keys to values of any type. Keys are hashed
//! with a polynomial rolling hash over their UTF-16 code units, collisions are
//! resolved with a singly-linked chain per bucket, and the bucket array
//! doubles (with a full rehash) once the map is more than 75% full.
//!
//! ## Basic Usage
//!
//! ```rust
//! use chain_map::{ChainedHashMap, HashMapExtensions};
//!
//! // Create a new hash map
//! let mut map = ChainedHashMap::new();
//!
//! // Insert values
//! map.set("apple", "red");
//! map.set("banana", "yellow");
//! assert_eq!(map.len(), 2);
//!
//! // Update values
//! map.set("banana", "orange");
//! assert_eq!(map.len(), 2);
//! assert_eq!(map.get("banana"), Some(&"orange"));
//!
//! // Remove values
//! assert!(map.remove("apple"));
//! assert_eq!(map.get("apple"), None);
//! assert_eq!(map.len(), 1);
//!
//! // Copy out the contents
//! assert_eq!(map.keys(), vec!["banana".to_string()]);
//! ```
//!
//! ## Growth
//!
//! ```rust
//! use chain_map::{ChainedHashMap, INITIAL_CAPACITY};
//!
//! let mut map = ChainedHashMap::new();
//! assert_eq!(map.capacity(), INITIAL_CAPACITY);
//!
//! // The 13th key takes a 16-bucket map past its 75% load factor.
//! for i in 0..13 {
//!     map.set(i.to_string(), i);
//! }
//! assert_eq!(map.capacity(), 32);
//! assert_eq!(map.len(), 13);
//! ```

/// Module implementing the separate-chaining hash map and its string hash
mod chained_hashmap;
/// Utility traits for the hash map
mod utils;

pub use chained_hashmap::{ChainedHashMap, INITIAL_CAPACITY, Iter, LOAD_FACTOR_PERCENT, hash_key};
pub use utils::HashMapExtensions;
