use std::{fmt, iter::FusedIterator, mem, slice};

/// Number of buckets a fresh (or cleared) map starts with
pub const INITIAL_CAPACITY: usize = 16;

/// Load factor threshold as a percentage (0-100). The map grows once
/// `len * 100 > capacity * LOAD_FACTOR_PERCENT`.
pub const LOAD_FACTOR_PERCENT: usize = 75;

/// Multiplier of the polynomial rolling hash
const HASH_MULTIPLIER: u128 = 31;

/// Hashes `key` into a bucket index in `[0, capacity)`.
///
/// This is a polynomial rolling hash over the UTF-16 code units of the key.
/// The accumulator is reduced modulo `capacity` after every code unit rather
/// than once at the end, so the result differs from a conventional
/// polynomial hash followed by a single reduction. The empty key hashes to 0.
///
/// A `capacity` of zero is treated as one, so the result is always 0.
#[must_use]
#[allow(clippy::arithmetic_side_effects, clippy::cast_possible_truncation)]
pub fn hash_key(key: &str, capacity: usize) -> usize {
    // The accumulator stays below `capacity`, so `acc * 31 + u16::MAX` fits
    // in a u128 for any usize capacity.
    let modulus = capacity.max(1) as u128;
    let hash = key
        .encode_utf16()
        .fold(0_u128, |acc, unit| (acc * HASH_MULTIPLIER + u128::from(unit)) % modulus);
    hash as usize
}

/// Owning link to the next entry of a chain; `None` terminates the chain
type Link<V> = Option<Box<Entry<V>>>;

/// A single key-value pair in a bucket chain
struct Entry<V> {
    /// The key in the key-value pair
    key: String,
    /// The value associated with the key
    value: V,
    /// The entry that follows this one in the same bucket
    next: Link<V>,
}

/// Walks the chain starting at `link` and returns the link slot that holds
/// the entry for `key`, or the empty tail slot if the key is not in the chain.
///
/// Every mutating operation goes through this cursor: overwriting, appending
/// and unlinking are all done by writing to the returned slot.
fn seek<'a, V>(mut link: &'a mut Link<V>, key: &str) -> &'a mut Link<V> {
    // Testing with a shared borrow first lets the loop hand back `link` itself
    // on a match; the `if let` below always matches.
    while link.as_ref().is_some_and(|entry| entry.key != key) {
        if let Some(entry) = link {
            link = &mut entry.next;
        }
    }
    link
}

/// Frees a chain one entry at a time so long chains do not recurse in drop
fn unlink_chain<V>(mut link: Link<V>) {
    while let Some(mut entry) = link {
        link = entry.next.take();
    }
}

/// Builds `capacity` empty buckets
fn empty_buckets<V>(capacity: usize) -> Vec<Link<V>> {
    let mut buckets = Vec::with_capacity(capacity);
    buckets.resize_with(capacity, || None);
    buckets
}

/// A hash map from `String` keys to values of type `V`, resolving collisions
/// with a singly-linked chain per bucket.
///
/// The bucket array starts at [`INITIAL_CAPACITY`] and doubles (with a full
/// rehash) whenever a new key pushes the map above the load factor. It never
/// shrinks, except that [`clear`](Self::clear) returns it to the initial size.
///
/// Within a bucket, entries keep their insertion order. Across buckets, the
/// iteration order follows the bucket array and carries no other meaning.
///
/// Note: This implementation is not thread-safe.
pub struct ChainedHashMap<V> {
    /// Chain heads, one per bucket; the length of this vector is the capacity
    buckets: Vec<Link<V>>,
    /// Number of distinct keys currently stored
    length: usize,
}

impl<V: Clone> Clone for ChainedHashMap<V> {
    fn clone(&self) -> Self {
        let buckets = self
            .buckets
            .iter()
            .map(|head| {
                let mut cloned: Link<V> = None;
                let mut tail = &mut cloned;
                let mut link = head;
                while let Some(entry) = link.as_deref() {
                    let copy = tail.insert(Box::new(Entry {
                        key: entry.key.clone(),
                        value: entry.value.clone(),
                        next: None,
                    }));
                    tail = &mut copy.next;
                    link = &entry.next;
                }
                cloned
            })
            .collect();

        Self { buckets, length: self.length }
    }
}

impl<V: fmt::Debug> fmt::Debug for ChainedHashMap<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

#[allow(clippy::missing_fields_in_debug)]
impl<V: fmt::Debug> fmt::Debug for Entry<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entry")
            .field("key", &self.key)
            .field("value", &self.value)
            .finish_non_exhaustive()
    }
}

impl<V> Drop for ChainedHashMap<V> {
    fn drop(&mut self) {
        for head in &mut self.buckets {
            unlink_chain(head.take());
        }
    }
}

impl<V> Default for ChainedHashMap<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> ChainedHashMap<V> {
    /// Creates an empty map with [`INITIAL_CAPACITY`] buckets
    #[must_use]
    pub fn new() -> Self {
        Self { buckets: empty_buckets(INITIAL_CAPACITY), length: 0 }
    }

    /// Gets the bucket a key belongs to under the current capacity
    fn bucket_index(&self, key: &str) -> usize {
        hash_key(key, self.buckets.len())
    }

    /// Finds the entry for `key`, if present
    fn find(&self, key: &str) -> Option<&Entry<V>> {
        let mut link = self.buckets.get(self.bucket_index(key))?;
        while let Some(entry) = link.as_deref() {
            if entry.key == key {
                return Some(entry);
            }
            link = &entry.next;
        }
        None
    }

    /// Returns the link slot for `key` in its bucket; see [`seek`]
    fn slot_mut(&mut self, key: &str) -> Option<&mut Link<V>> {
        let index = self.bucket_index(key);
        self.buckets.get_mut(index).map(|head| seek(head, key))
    }

    /// Inserts a key-value pair.
    ///
    /// If the key is already present its value is overwritten in place and
    /// the previous value is returned; the length is unchanged and no resize
    /// is considered. Otherwise the entry is appended to the tail of its
    /// bucket chain, and the map grows if it is now above the load factor.
    pub fn set(&mut self, key: impl Into<String>, value: V) -> Option<V> {
        let key = key.into();
        let link = self.slot_mut(&key)?;

        if let Some(entry) = link.as_mut() {
            return Some(mem::replace(&mut entry.value, value));
        }

        log::trace!("appending {key:?} to its bucket chain");
        *link = Some(Box::new(Entry { key, value, next: None }));
        self.length = self.length.saturating_add(1);

        if self.exceeds_load_factor() {
            self.resize();
        }

        None
    }

    /// Retrieves the value for a given key
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&V> {
        self.find(key).map(|entry| &entry.value)
    }

    /// Gets a mutable reference to the value for a given key
    pub fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        self.slot_mut(key)?.as_mut().map(|entry| &mut entry.value)
    }

    /// Returns true if the map holds an entry for the given key
    #[must_use]
    pub fn has(&self, key: &str) -> bool {
        self.find(key).is_some()
    }

    /// Removes the entry for `key` and returns its value.
    ///
    /// Only the matching entry is unlinked; its successor takes its place in
    /// the chain (or in the bucket slot, when the entry was the head).
    pub fn take(&mut self, key: &str) -> Option<V> {
        let link = self.slot_mut(key)?;
        let entry = link.take()?;
        let Entry { value, next, .. } = *entry;
        *link = next;
        self.length = self.length.saturating_sub(1);
        Some(value)
    }

    /// Removes the entry for `key`. Returns false, leaving the map untouched,
    /// if there was no such entry.
    pub fn remove(&mut self, key: &str) -> bool {
        self.take(key).is_some()
    }

    /// Removes every entry and shrinks the bucket array back to
    /// [`INITIAL_CAPACITY`]
    pub fn clear(&mut self) {
        log::debug!("clearing map of {} entries across {} buckets", self.length, self.capacity());
        let old_buckets = mem::replace(&mut self.buckets, empty_buckets(INITIAL_CAPACITY));
        self.length = 0;
        for head in old_buckets {
            unlink_chain(head);
        }
    }

    /// Returns the number of entries in the map
    #[must_use]
    pub fn len(&self) -> usize {
        self.length
    }

    /// Returns true if the map holds no entries
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Returns the number of buckets in the map
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    /// Returns the current load factor of the map
    #[must_use]
    #[allow(clippy::arithmetic_side_effects, clippy::cast_precision_loss)]
    pub fn load_factor(&self) -> f64 {
        self.length as f64 / self.buckets.len() as f64
    }

    /// Returns the length of every bucket chain, in bucket order. Empty
    /// buckets report 0.
    pub fn chain_lengths(&self) -> impl Iterator<Item = usize> {
        self.buckets.iter().map(|head| {
            let mut count: usize = 0;
            let mut link = head;
            while let Some(entry) = link.as_deref() {
                count = count.saturating_add(1);
                link = &entry.next;
            }
            count
        })
    }

    /// Returns an iterator over the key-value pairs, bucket by bucket
    #[must_use]
    pub fn iter(&self) -> Iter<'_, V> {
        Iter { buckets: self.buckets.iter(), chain: None, remaining: self.length }
    }

    /// Checks whether the map has gone above its load factor threshold
    fn exceeds_load_factor(&self) -> bool {
        self.length.saturating_mul(100) > self.buckets.len().saturating_mul(LOAD_FACTOR_PERCENT)
    }

    /// Doubles the bucket array and rehashes every entry into it.
    ///
    /// Entries are re-inserted through [`set`](Self::set) with the length
    /// reset to 0, so the length is rebuilt as they land. The doubled
    /// capacity keeps the re-insertions below the threshold.
    fn resize(&mut self) {
        let new_capacity = self.buckets.len().saturating_mul(2);
        log::debug!(
            "resizing map with {} entries from {} to {} buckets",
            self.length,
            self.buckets.len(),
            new_capacity
        );

        let old_buckets = mem::replace(&mut self.buckets, empty_buckets(new_capacity));
        self.length = 0;

        for mut link in old_buckets {
            while let Some(entry) = link {
                let Entry { key, value, next } = *entry;
                link = next;
                self.set(key, value);
            }
        }
    }
}

impl<K: Into<String>, V> Extend<(K, V)> for ChainedHashMap<V> {
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (key, value) in iter {
            self.set(key, value);
        }
    }
}

impl<K: Into<String>, V> FromIterator<(K, V)> for ChainedHashMap<V> {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

impl<'a, V> IntoIterator for &'a ChainedHashMap<V> {
    type Item = (&'a str, &'a V);
    type IntoIter = Iter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the key-value pairs of a [`ChainedHashMap`]
#[derive(Debug, Clone)]
pub struct Iter<'a, V> {
    /// Buckets not yet visited
    buckets: slice::Iter<'a, Link<V>>,
    /// Next entry of the chain currently being walked
    chain: Option<&'a Entry<V>>,
    /// Entries not yet yielded
    remaining: usize,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (&'a str, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(entry) = self.chain {
                self.chain = entry.next.as_deref();
                self.remaining = self.remaining.saturating_sub(1);
                return Some((entry.key.as_str(), &entry.value));
            }
            self.chain = self.buckets.next()?.as_deref();
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<V> ExactSizeIterator for Iter<'_, V> {}

impl<V> FusedIterator for Iter<'_, V> {}
