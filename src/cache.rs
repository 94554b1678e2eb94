//! The computed table: a direct-mapped operation cache.

use crate::utils::MyHash;

/// Hit and miss counters for one cache.
#[derive(Debug, Clone, Copy, Default)]
pub struct CacheStats {
    pub hits: usize,
    pub misses: usize,
}

/// A lossy, fixed-size cache of operation results.
///
/// Every key owns exactly one slot, chosen by hash; an insert simply
/// forgets whatever lived there before. A lookup therefore answers either
/// with the exact result recorded for that key or with nothing, and memory
/// stays bounded no matter how many operations a build performs.
pub struct OpCache<K, V> {
    slots: Vec<Option<(K, V)>>,
    mask: usize,
    stats: CacheStats,
}

impl<K, V> OpCache<K, V> {
    /// Creates a cache with at least `capacity` slots, rounded up to a
    /// power of two so that slot selection is a single mask.
    pub fn with_capacity(capacity: usize) -> Self {
        let size = capacity.max(2).next_power_of_two();
        Self {
            slots: std::iter::repeat_with(|| None).take(size).collect(),
            mask: size - 1,
            stats: CacheStats::default(),
        }
    }

    /// Counters accumulated since creation.
    pub fn stats(&self) -> CacheStats {
        self.stats
    }
}

impl<K, V> OpCache<K, V>
where
    K: MyHash + Eq,
    V: Copy,
{
    fn slot_of(&self, key: &K) -> usize {
        key.hash() as usize & self.mask
    }

    /// Returns the result recorded for `key`, unless another key has since
    /// claimed its slot.
    pub fn lookup(&mut self, key: &K) -> Option<V> {
        match self.slots[self.slot_of(key)] {
            Some((ref cached, value)) if cached == key => {
                self.stats.hits += 1;
                Some(value)
            }
            _ => {
                self.stats.misses += 1;
                None
            }
        }
    }

    /// Records a result for `key`, evicting whatever shared its slot.
    pub fn insert(&mut self, key: K, value: V) {
        let slot = self.slot_of(&key);
        self.slots[slot] = Some((key, value));
    }
}
