use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Arc;

use crate::glyph_key::GlyphKey;

/// Default number of glyph bitmaps kept alive by a [`RasterCache`].
pub const DEFAULT_RASTER_CAPACITY: usize = 1024;

/// Alpha coverage bitmap of one rasterized glyph.
#[derive(Clone, Debug, PartialEq)]
pub struct RasterizedGlyph {
    pub width: usize,
    pub height: usize,
    /// `width * height` coverage values, row-major.
    pub data: Vec<u8>,
}

/// Cache of rasterized glyph bitmaps keyed by [`GlyphKey`].
pub type RasterCache = LruMap<GlyphKey, Arc<RasterizedGlyph>>;

/// Bounded map with least-recently-used eviction.
///
/// Recency is tracked with a monotonic clock stamp per entry; eviction
/// scans for the stalest stamp. The scan is linear, which is fine at the
/// capacities glyph caching needs.
pub struct LruMap<K, V> {
    entries: HashMap<K, Slot<V>, fxhash::FxBuildHasher>,
    capacity: usize,
    clock: u64,
}

struct Slot<V> {
    value: V,
    last_used: u64,
}

impl<K: Eq + Hash + Clone, V: Clone> LruMap<K, V> {
    /// Creates a map that holds at most `capacity` entries.
    ///
    /// # Panics
    /// Panics if `capacity` is zero.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "LruMap capacity must be non-zero");
        Self {
            entries: HashMap::with_capacity_and_hasher(
                capacity,
                fxhash::FxBuildHasher::default(),
            ),
            capacity,
            clock: 0,
        }
    }

    /// Returns the cached value and marks it most recently used.
    pub fn get(&mut self, key: &K) -> Option<V> {
        self.clock += 1;
        let slot = self.entries.get_mut(key)?;
        slot.last_used = self.clock;
        Some(slot.value.clone())
    }

    /// Inserts a value, evicting the least recently used entry when full.
    pub fn insert(&mut self, key: K, value: V) {
        self.clock += 1;
        if !self.entries.contains_key(&key) && self.entries.len() >= self.capacity {
            self.evict_stalest();
        }
        self.entries.insert(
            key,
            Slot {
                value,
                last_used: self.clock,
            },
        );
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.entries.contains_key(key)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    fn evict_stalest(&mut self) {
        let stalest = self
            .entries
            .iter()
            .min_by_key(|(_, slot)| slot.last_used)
            .map(|(key, _)| key.clone());
        if let Some(key) = stalest {
            self.entries.remove(&key);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_insert_and_get() {
        let mut map: LruMap<u32, u8> = LruMap::new(2);

        map.insert(1, 10);
        assert_eq!(map.get(&1), Some(10));
        assert_eq!(map.get(&2), None);
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_insert_overwrites_without_eviction() {
        let mut map: LruMap<u32, u8> = LruMap::new(2);

        map.insert(1, 10);
        map.insert(2, 20);
        map.insert(1, 11);

        assert_eq!(map.len(), 2);
        assert_eq!(map.get(&1), Some(11));
        assert_eq!(map.get(&2), Some(20));
    }

    #[test]
    fn test_eviction_removes_stalest() {
        let mut map: LruMap<u32, u8> = LruMap::new(2);

        map.insert(1, 10);
        map.insert(2, 20);
        // Insert 3 (should evict key 1, which is stalest)
        map.insert(3, 30);

        assert_eq!(map.len(), 2);
        assert!(!map.contains_key(&1));
        assert!(map.contains_key(&2));
        assert!(map.contains_key(&3));
    }

    #[test]
    fn test_get_refreshes_recency() {
        let mut map: LruMap<u32, u8> = LruMap::new(2);

        map.insert(1, 10);
        map.insert(2, 20);
        // Touch key 1 so key 2 becomes the stalest.
        assert_eq!(map.get(&1), Some(10));
        map.insert(3, 30);

        assert!(map.contains_key(&1));
        assert!(!map.contains_key(&2));
        assert!(map.contains_key(&3));
    }

    #[test]
    fn test_capacity_one() {
        let mut map: LruMap<u32, u8> = LruMap::new(1);

        map.insert(1, 10);
        map.insert(2, 20);

        assert_eq!(map.len(), 1);
        assert_eq!(map.get(&1), None);
        assert_eq!(map.get(&2), Some(20));
    }

    #[test]
    fn test_clear() {
        let mut map: LruMap<u32, u8> = LruMap::new(4);
        map.insert(1, 10);
        map.insert(2, 20);
        map.clear();
        assert!(map.is_empty());
        assert_eq!(map.get(&1), None);
    }
}
