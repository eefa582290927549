use fxhash::FxHashMap;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::hash::Hash;
use std::sync::Arc;
use tracing::debug;

/// Bounded map evicting in strict insertion order.
///
/// Reads do not refresh an entry. Values are shared as [`Arc`] so callers can rely on
/// pointer identity for repeated lookups.
#[derive(Debug)]
pub struct FifoCache<K, V> {
    capacity: usize,
    slots: Mutex<Slots<K, V>>,
}

#[derive(Debug)]
struct Slots<K, V> {
    map: FxHashMap<K, Arc<V>>,
    order: VecDeque<K>,
}

impl<K, V> FifoCache<K, V>
where
    K: Eq + Hash + Clone,
{
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            slots: Mutex::new(Slots { map: FxHashMap::default(), order: VecDeque::new() }),
        }
    }

    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn get(&self, key: &K) -> Option<Arc<V>> {
        self.slots.lock().map.get(key).cloned()
    }

    /// Stores `value` unless `key` is already present, and returns whichever instance is cached.
    ///
    /// When the insert pushes the cache over capacity, the oldest insertion is dropped.
    pub fn insert(&self, key: K, value: Arc<V>) -> Arc<V> {
        let mut slots = self.slots.lock();
        if let Some(existing) = slots.map.get(&key) {
            return Arc::clone(existing);
        }

        slots.map.insert(key.clone(), Arc::clone(&value));
        slots.order.push_back(key);

        while slots.order.len() > self.capacity {
            let Some(oldest) = slots.order.pop_front() else {
                break;
            };
            slots.map.remove(&oldest);
            debug!(capacity = self.capacity, "Descriptor cache evicted oldest entry");
        }
        value
    }

    pub fn contains(&self, key: &K) -> bool {
        self.slots.lock().map.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.slots.lock().map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        let mut slots = self.slots.lock();
        slots.map.clear();
        slots.order.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn evicts_oldest_insertion_not_least_recent_use() {
        let cache = FifoCache::new(2);
        cache.insert("a", Arc::new(1));
        cache.insert("b", Arc::new(2));

        // Reading "a" does not protect it.
        assert_eq!(cache.get(&"a").as_deref(), Some(&1));
        cache.insert("c", Arc::new(3));

        assert!(!cache.contains(&"a"));
        assert!(cache.contains(&"b"));
        assert!(cache.contains(&"c"));
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn first_insert_wins() {
        let cache = FifoCache::new(4);
        let first = cache.insert("k", Arc::new(String::from("first")));
        let second = cache.insert("k", Arc::new(String::from("second")));

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn zero_capacity_stores_nothing() {
        let cache = FifoCache::new(0);
        let value = cache.insert("k", Arc::new(7));
        assert_eq!(*value, 7);
        assert!(cache.is_empty());
    }

    #[test]
    fn clear_resets_order() {
        let cache = FifoCache::new(1);
        cache.insert(1, Arc::new("one"));
        cache.clear();
        cache.insert(2, Arc::new("two"));
        cache.insert(3, Arc::new("three"));
        assert_eq!(cache.len(), 1);
        assert!(cache.contains(&3));
    }
}
