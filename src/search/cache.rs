use std::num::NonZeroUsize;

use lru::LruCache;

const DEFAULT_MAX_ENTRIES: usize = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CacheCounters {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
}

/// Response bodies keyed by the full backend request URL.
#[derive(Debug)]
pub struct ResultCache {
    max_entries: usize,
    entries: LruCache<String, String>,
    counters: CacheCounters,
}

impl Default for ResultCache {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ENTRIES)
    }
}

impl ResultCache {
    pub fn new(max_entries: usize) -> Self {
        let max_entries = max_entries.max(1);
        Self {
            max_entries,
            entries: LruCache::new(
                NonZeroUsize::new(max_entries).expect("max entries is non-zero"),
            ),
            counters: CacheCounters::default(),
        }
    }

    pub fn get(&mut self, url: &str) -> Option<String> {
        match self.entries.get(url) {
            Some(body) => {
                self.counters.hits += 1;
                Some(body.clone())
            }
            None => {
                self.counters.misses += 1;
                None
            }
        }
    }

    pub fn insert(&mut self, url: impl Into<String>, body: impl Into<String>) {
        let url = url.into();
        let evicting = self.entries.len() >= self.max_entries && !self.entries.contains(&url);
        self.entries.put(url, body.into());
        if evicting {
            self.counters.evictions += 1;
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn max_entries(&self) -> usize {
        self.max_entries
    }

    pub fn counters(&self) -> CacheCounters {
        self.counters
    }
}

#[cfg(test)]
mod tests {
    use super::{CacheCounters, ResultCache};

    #[test]
    fn get_counts_hits_and_misses() {
        let mut cache = ResultCache::new(4);
        assert_eq!(cache.get("/ui_snippets?q=a"), None);
        cache.insert("/ui_snippets?q=a", "body-a");
        assert_eq!(cache.get("/ui_snippets?q=a").as_deref(), Some("body-a"));
        assert_eq!(
            cache.counters(),
            CacheCounters {
                hits: 1,
                misses: 1,
                evictions: 0,
            }
        );
    }

    #[test]
    fn least_recently_used_entry_is_evicted() {
        let mut cache = ResultCache::new(2);
        cache.insert("a", "1");
        cache.insert("b", "2");
        let _ = cache.get("a");
        cache.insert("c", "3");

        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get("b"), None);
        assert!(cache.get("a").is_some());
        assert_eq!(cache.counters().evictions, 1);
    }

    #[test]
    fn overwriting_a_key_does_not_evict() {
        let mut cache = ResultCache::new(1);
        cache.insert("a", "1");
        cache.insert("a", "2");
        assert_eq!(cache.get("a").as_deref(), Some("2"));
        assert_eq!(cache.counters().evictions, 0);
        assert_eq!(ResultCache::new(0).max_entries(), 1);
    }
}
