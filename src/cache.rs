//! This module provides an in-memory cache of the years that have already been loaded

use std::collections::HashMap;
use std::sync::Arc;

use crate::year::YearEventSet;


/// Parsed years, so that repeated queries do not read the disk again
#[derive(Debug, Default)]
pub struct YearCache {
    years: HashMap<i32, Arc<YearEventSet>>,
}

impl YearCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, year: i32) -> Option<Arc<YearEventSet>> {
        self.years.get(&year).cloned()
    }

    pub fn contains(&self, year: i32) -> bool {
        self.years.contains_key(&year)
    }

    /// Store a year, replacing any previous version of it
    pub fn put(&mut self, year: i32, events: YearEventSet) -> Arc<YearEventSet> {
        let events = Arc::new(events);
        self.years.insert(year, Arc::clone(&events));
        events
    }

    /// Store a year that is already shared
    pub fn put_shared(&mut self, year: i32, events: Arc<YearEventSet>) {
        self.years.insert(year, events);
    }

    /// Forget a year (e.g. because it has just been downloaded again)
    pub fn invalidate(&mut self, year: i32) {
        if self.years.remove(&year).is_some() {
            log::debug!("Year {} removed from the cache", year);
        }
    }

    pub fn clear(&mut self) {
        self.years.clear();
    }

    pub fn len(&self) -> usize {
        self.years.len()
    }

    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
    }
}


#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_cache() {
        let mut cache = YearCache::new();
        assert!(cache.get(2024).is_none());

        let stored = cache.put(2024, YearEventSet::new());
        assert!(cache.contains(2024));
        assert!(Arc::ptr_eq(&stored, &cache.get(2024).unwrap()));

        cache.put_shared(2025, Arc::new(YearEventSet::new()));
        cache.invalidate(2024);
        assert!(cache.contains(2024) == false);
        assert_eq!(cache.len(), 1);

        cache.clear();
        assert!(cache.is_empty());
    }
}
