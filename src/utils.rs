//! Bulk extraction helpers for `ChainedHashMap`

use crate::ChainedHashMap;

/// Extension trait that copies the contents of a map out into owned `Vec`s.
///
/// Every method visits each bucket once and walks its chain front to back, so
/// the order is bucket order, then insertion order within a bucket. Callers
/// should not rely on it beyond that.
pub trait HashMapExtensions<V> {
    /// Returns the keys of the hash map as a Vec
    fn keys(&self) -> Vec<String>;

    /// Returns the values of the hash map as a Vec
    fn values(&self) -> Vec<V>;

    /// Returns the key-value pairs of the hash map as a Vec
    fn entries(&self) -> Vec<(String, V)>;
}

impl<V: Clone> HashMapExtensions<V> for ChainedHashMap<V> {
    fn keys(&self) -> Vec<String> {
        self.iter().map(|(k, _)| k.to_owned()).collect()
    }

    fn values(&self) -> Vec<V> {
        self.iter().map(|(_, v)| v.clone()).collect()
    }

    fn entries(&self) -> Vec<(String, V)> {
        self.iter().map(|(k, v)| (k.to_owned(), v.clone())).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_and_values() {
        let mut map = ChainedHashMap::new();
        map.set("a", 1);
        map.set("b", 2);
        map.set("c", 3);

        let mut keys = map.keys();
        keys.sort(); // Sort for predictable comparison

        let mut values = map.values();
        values.sort_unstable();

        assert_eq!(keys, vec!["a".to_string(), "b".to_string(), "c".to_string()]);
        assert_eq!(values, vec![1, 2, 3]);
    }

    #[test]
    fn test_entries() {
        let map: ChainedHashMap<i32> = vec![("x", 10), ("y", 20)].into_iter().collect();

        let mut entries = map.entries();
        entries.sort();

        assert_eq!(entries, vec![("x".to_string(), 10), ("y".to_string(), 20)]);
    }

    #[test]
    fn test_empty_map_extracts_nothing() {
        let map: ChainedHashMap<i32> = ChainedHashMap::new();

        assert!(map.keys().is_empty());
        assert!(map.values().is_empty());
        assert!(map.entries().is_empty());
    }

    #[test]
    fn test_extraction_follows_buckets_then_chains() {
        let mut map = ChainedHashMap::new();
        // "banana" lands in bucket 5; "a" and "A" share bucket 1.
        map.set("banana", 0);
        map.set("a", 1);
        map.set("A", 2);

        assert_eq!(map.keys(), vec!["a", "A", "banana"]);
        assert_eq!(map.values(), vec![1, 2, 0]);
    }

    #[test]
    fn test_extraction_after_resize_and_remove() {
        let mut map = ChainedHashMap::new();
        for i in 0..40 {
            map.set(format!("key-{i}"), i);
        }
        for i in (0..40).step_by(2) {
            map.remove(&format!("key-{i}"));
        }

        let mut values = map.values();
        values.sort_unstable();
        assert_eq!(values, (1..40).step_by(2).collect::<Vec<_>>());
        assert_eq!(map.keys().len(), map.len());
    }
}
