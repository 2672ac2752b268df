/// Stores BFS hop sequences between vertex pairs, keyed in one canonical
/// direction (lower id to higher id) to halve the storage and make the
/// invariant "populate once, read many times" cheap to check.
///
/// Row `i` holds `order - 1 - i` entries; entry `j` in row `i` is the path
/// between vertex `i` and vertex `i + 1 + j`.
#[derive(Debug, Clone)]
pub struct HopsCache {
    order: usize,
    data: Vec<Vec<Option<Vec<usize>>>>,
}

impl HopsCache {
    pub fn new(order: usize) -> Self {
        let data = (0..order.saturating_sub(1))
            .map(|i| vec![None; order - 1 - i])
            .collect();
        Self { order, data }
    }

    fn cell(lo: usize, hi: usize) -> (usize, usize) {
        debug_assert!(lo < hi);
        (lo, hi - lo - 1)
    }

    /// Hops strictly between `a` and `b`, in that order, or `None` if not cached.
    pub fn get(&self, a: usize, b: usize) -> Option<Vec<usize>> {
        debug_assert_ne!(a, b);
        let (lo, hi, reversed) = if a < b { (a, b, false) } else { (b, a, true) };
        let (row, col) = Self::cell(lo, hi);
        self.data[row][col].as_ref().map(|hops| {
            if reversed {
                hops.iter().rev().copied().collect()
            } else {
                hops.clone()
            }
        })
    }

    /// Stores `hops` as the path from `a` to `b`. Panics in debug builds if an
    /// entry already exists for this pair; callers must `clear()` first.
    pub fn set(&mut self, a: usize, b: usize, hops: Vec<usize>) {
        debug_assert_ne!(a, b);
        let (lo, hi, reversed) = if a < b { (a, b, false) } else { (b, a, true) };
        let (row, col) = Self::cell(lo, hi);
        debug_assert!(
            self.data[row][col].is_none(),
            "overwriting populated hops cache entry for ({lo}, {hi})"
        );
        let stored = if reversed {
            hops.into_iter().rev().collect()
        } else {
            hops
        };
        self.data[row][col] = Some(stored);
    }

    pub fn clear(&mut self) {
        for row in &mut self.data {
            for entry in row.iter_mut() {
                *entry = None;
            }
        }
    }

    /// Exports cached paths as plain vertex ids, for duplication or persistence.
    pub fn export_ids(&self) -> Vec<Vec<Option<Vec<usize>>>> {
        self.data.clone()
    }

    pub fn import_ids(order: usize, data: Vec<Vec<Option<Vec<usize>>>>) -> Self {
        debug_assert_eq!(data.len(), order.saturating_sub(1));
        Self { order, data }
    }

    pub fn order(&self) -> usize {
        self.order
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_returns_none_for_unset_pair() {
        let cache = HopsCache::new(4);
        assert_eq!(cache.get(0, 3), None);
    }

    #[test]
    fn set_then_get_round_trips_forward() {
        let mut cache = HopsCache::new(5);
        cache.set(0, 4, vec![1, 2, 3]);
        assert_eq!(cache.get(0, 4), Some(vec![1, 2, 3]));
    }

    #[test]
    fn get_reverses_when_queried_backwards() {
        let mut cache = HopsCache::new(5);
        cache.set(0, 4, vec![1, 2, 3]);
        assert_eq!(cache.get(4, 0), Some(vec![3, 2, 1]));
    }

    #[test]
    fn set_stores_canonically_regardless_of_argument_order() {
        let mut cache = HopsCache::new(5);
        cache.set(4, 0, vec![3, 2, 1]);
        assert_eq!(cache.get(0, 4), Some(vec![1, 2, 3]));
    }

    #[test]
    fn clear_removes_all_entries() {
        let mut cache = HopsCache::new(4);
        cache.set(0, 3, vec![1, 2]);
        cache.clear();
        assert_eq!(cache.get(0, 3), None);
    }

    #[test]
    fn export_import_round_trips() {
        let mut cache = HopsCache::new(4);
        cache.set(0, 3, vec![1, 2]);
        let ids = cache.export_ids();
        let restored = HopsCache::import_ids(4, ids);
        assert_eq!(restored.get(0, 3), Some(vec![1, 2]));
    }

    #[test]
    #[should_panic(expected = "overwriting populated hops cache entry")]
    fn set_twice_without_clear_panics() {
        let mut cache = HopsCache::new(4);
        cache.set(0, 3, vec![1, 2]);
        cache.set(0, 3, vec![1]);
    }
}
