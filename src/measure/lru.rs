//! Bounded memo of text measurements.
//!
//! Sampled values repeat heavily between batches and renders (the same
//! column is re-sampled on every force recalculation), so both measurement
//! surfaces memoize `text -> width` here.

use std::collections::{HashMap, VecDeque};
use std::hash::Hash;

/// Default number of memoized measurements per surface.
pub const MEASURE_CACHE_CAP: usize = 4096;

/// Insertion-order LRU with a fixed capacity.
///
/// Lookups do not promote entries; once full, the oldest insertion is
/// evicted first.
pub struct LruCache<K: Hash + Eq + Clone, V> {
    entries: HashMap<K, V>,
    order: VecDeque<K>,
    capacity: usize,
}

impl<K: Hash + Eq + Clone, V: Copy> LruCache<K, V> {
    /// Create a cache holding at most `capacity` entries. 0 disables it.
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: HashMap::new(),
            order: VecDeque::new(),
            capacity,
        }
    }

    /// Look up a memoized value.
    pub fn get(&self, key: &K) -> Option<V> {
        if self.capacity == 0 {
            return None;
        }
        self.entries.get(key).copied()
    }

    /// Return the memoized value for `key`, computing and storing it on a miss.
    pub fn get_or_insert_with(&mut self, key: &K, compute: impl FnOnce() -> V) -> V {
        if let Some(value) = self.get(key) {
            return value;
        }
        let value = compute();
        self.insert(key.clone(), value);
        value
    }

    /// Store a value. Existing keys are left untouched.
    pub fn insert(&mut self, key: K, value: V) -> bool {
        if self.capacity == 0 || self.entries.contains_key(&key) {
            return false;
        }
        self.entries.insert(key.clone(), value);
        self.order.push_back(key);
        while self.entries.len() > self.capacity {
            match self.order.pop_front() {
                Some(oldest) => {
                    self.entries.remove(&oldest);
                }
                None => break,
            }
        }
        true
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }
}
