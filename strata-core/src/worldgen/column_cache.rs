//! Sliding window of coarse density columns.

use std::sync::Arc;

/// Coarse columns for a contiguous run of coarse x positions.
///
/// Slot `i` holds the column at coarse x `offset + i`. Columns are created on
/// first use and never change until the window is replaced.
#[derive(Debug, Default)]
pub struct ColumnCache {
    offset: i32,
    columns: Vec<Option<Arc<[f64]>>>,
}

impl ColumnCache {
    /// An empty window covering `offset..offset + width`.
    #[must_use]
    pub fn new(offset: i32, width: usize) -> Self {
        Self {
            offset,
            columns: vec![None; width],
        }
    }

    /// Return the column at coarse `x`, computing and storing it first if needed.
    ///
    /// # Panics
    /// Panics if `x` lies outside the window.
    pub fn get_or_insert_with<F>(&mut self, x: i32, compute: F) -> Arc<[f64]>
    where
        F: FnOnce() -> Arc<[f64]>,
    {
        let slot = self.slot(x);
        Arc::clone(self.columns[slot].get_or_insert_with(compute))
    }

    /// The cached column at coarse `x`, if it has been filled.
    ///
    /// # Panics
    /// Panics if `x` lies outside the window.
    #[must_use]
    pub fn get(&self, x: i32) -> Option<&Arc<[f64]>> {
        self.columns[self.slot(x)].as_ref()
    }

    /// Number of filled slots.
    #[must_use]
    pub fn filled(&self) -> usize {
        self.columns.iter().filter(|column| column.is_some()).count()
    }

    fn slot(&self, x: i32) -> usize {
        let index = i64::from(x) - i64::from(self.offset);
        match usize::try_from(index) {
            Ok(slot) if slot < self.columns.len() => slot,
            _ => panic!(
                "coarse column {x} is outside the sampling window {}..{}",
                self.offset,
                i64::from(self.offset) + self.columns.len() as i64
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_computes_once_per_slot() {
        let mut cache = ColumnCache::new(-2, 4);
        let mut computed = 0;

        let first = cache.get_or_insert_with(-1, || {
            computed += 1;
            Arc::from([1.0, 2.0])
        });
        let second = cache.get_or_insert_with(-1, || {
            computed += 1;
            Arc::from([3.0, 4.0])
        });

        assert_eq!(computed, 1);
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.filled(), 1);
        assert!(cache.get(-2).is_none());
        assert!(cache.get(-1).is_some());
    }

    #[test]
    #[should_panic(expected = "outside the sampling window")]
    fn test_rejects_columns_left_of_window() {
        let mut cache = ColumnCache::new(3, 2);
        cache.get_or_insert_with(2, || Arc::from([0.0]));
    }

    #[test]
    #[should_panic(expected = "outside the sampling window")]
    fn test_rejects_columns_right_of_window() {
        let cache = ColumnCache::new(3, 2);
        let _ = cache.get(5);
    }
}
