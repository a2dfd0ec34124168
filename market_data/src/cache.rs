//! Explicit memoization for repeated loads.
//!
//! A load is pure with respect to `(symbol, start, end)`, which makes the
//! result safe to reuse within a session. [`CachedLoader`] is the optional
//! wrapper that does so: a bounded LRU over an insertion-ordered map. Only
//! successful loads are memoized; a failed load always re-queries so a
//! transient outage is never pinned in cache. Correctness never depends on
//! the cache being present.

use chrono::NaiveDate;
use indexmap::IndexMap;
use log::debug;
use tokio::sync::Mutex;

use crate::errors::Error;
use crate::loader::Loader;
use crate::models::{query::BarsQuery, time_series::TimeSeries};

/// Default number of distinct queries kept.
pub const DEFAULT_CACHE_CAPACITY: usize = 32;

type CacheKey = (String, NaiveDate, NaiveDate);

/// A [`Loader`] wrapper memoizing successful loads in a bounded LRU.
pub struct CachedLoader {
    loader: Loader,
    capacity: usize,
    entries: Mutex<IndexMap<CacheKey, TimeSeries>>,
}

impl CachedLoader {
    /// Wraps a loader with an LRU of the given capacity (minimum 1).
    pub fn new(loader: Loader, capacity: usize) -> Self {
        Self {
            loader,
            capacity: capacity.max(1),
            entries: Mutex::new(IndexMap::new()),
        }
    }

    /// Wraps a loader with [`DEFAULT_CACHE_CAPACITY`].
    pub fn with_default_capacity(loader: Loader) -> Self {
        Self::new(loader, DEFAULT_CACHE_CAPACITY)
    }

    /// Loads through the cache; identical queries within a session hit the
    /// stored series without re-querying the provider.
    pub async fn load(&self, query: &BarsQuery) -> Result<TimeSeries, Error> {
        let key = (query.symbol.clone(), query.start, query.end);

        {
            let mut entries = self.entries.lock().await;
            // Re-inserting bumps the entry to most-recently-used position.
            if let Some(series) = entries.shift_remove(&key) {
                debug!("cache hit for {} {}..{}", key.0, key.1, key.2);
                entries.insert(key, series.clone());
                return Ok(series);
            }
        }

        let series = self.loader.load(query).await?;

        let mut entries = self.entries.lock().await;
        if entries.len() >= self.capacity && !entries.contains_key(&key) {
            if let Some((evicted, _)) = entries.shift_remove_index(0) {
                debug!("cache evicted {} {}..{}", evicted.0, evicted.1, evicted.2);
            }
        }
        entries.insert(key, series.clone());
        Ok(series)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use chrono::NaiveDate;

    use crate::models::bar::Bar;
    use crate::providers::{ApiSnafu, DataProvider, ProviderError};

    use super::*;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn query(symbol: &str) -> BarsQuery {
        BarsQuery::new(symbol, date("2024-01-01"), date("2024-01-31"))
    }

    struct CountingProvider {
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl DataProvider for CountingProvider {
        async fn fetch_daily_bars(&self, query: &BarsQuery) -> Result<TimeSeries, ProviderError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(TimeSeries::new(
                &query.symbol,
                vec![Bar {
                    date: date("2024-01-02"),
                    open: 1.0,
                    high: 2.0,
                    low: 0.5,
                    close: 1.5,
                    volume: 100,
                }],
            ))
        }
    }

    struct FlakyProvider {
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl DataProvider for FlakyProvider {
        async fn fetch_daily_bars(&self, query: &BarsQuery) -> Result<TimeSeries, ProviderError> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            if call == 0 {
                ApiSnafu {
                    message: "first call fails",
                }
                .fail()
            } else {
                Ok(TimeSeries::new(&query.symbol, Vec::new()))
            }
        }
    }

    fn counting_cache(capacity: usize) -> (CachedLoader, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let provider = CountingProvider {
            calls: Arc::clone(&calls),
        };
        let cache = CachedLoader::new(Loader::new(Box::new(provider)), capacity);
        (cache, calls)
    }

    #[tokio::test]
    async fn repeated_query_hits_cache() {
        let (cache, calls) = counting_cache(8);

        let first = cache.load(&query("AAPL")).await.unwrap();
        let second = cache.load(&query("AAPL")).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn distinct_queries_fetch_separately() {
        let (cache, calls) = counting_cache(8);

        cache.load(&query("AAPL")).await.unwrap();
        cache.load(&query("TSLA")).await.unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn oldest_entry_is_evicted_at_capacity() {
        let (cache, calls) = counting_cache(1);

        cache.load(&query("AAPL")).await.unwrap();
        cache.load(&query("TSLA")).await.unwrap();
        // AAPL was evicted by TSLA, so this is a fresh fetch.
        cache.load(&query("AAPL")).await.unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn hit_refreshes_recency_order() {
        let (cache, calls) = counting_cache(2);

        cache.load(&query("AAPL")).await.unwrap();
        cache.load(&query("TSLA")).await.unwrap();
        // Touch AAPL so TSLA becomes the eviction candidate.
        cache.load(&query("AAPL")).await.unwrap();
        cache.load(&query("MSFT")).await.unwrap();
        cache.load(&query("AAPL")).await.unwrap();

        // AAPL: 1 fetch. TSLA: 1 fetch. MSFT: 1 fetch. No refetch of AAPL.
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn errors_are_not_cached() {
        let calls = Arc::new(AtomicUsize::new(0));
        let provider = FlakyProvider {
            calls: Arc::clone(&calls),
        };
        let cache = CachedLoader::new(Loader::new(Box::new(provider)), 8);

        assert!(cache.load(&query("AAPL")).await.is_err());
        assert!(cache.load(&query("AAPL")).await.is_ok());
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }
}
