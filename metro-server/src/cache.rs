//! Caching layer for route queries.
//!
//! The network never changes while the process runs, so the answer to a
//! (source, destination) query never goes stale. The TTL and capacity only
//! bound memory use.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use moka::future::Cache as MokaCache;
use tracing::trace;

use crate::domain::StationName;
use crate::network::NetworkModel;
use crate::planner::{PlannerConfig, PlannerError, RoutePlanner, RouteResult};

/// Cache key: (source, destination).
type RouteKey = (StationName, StationName);

/// Configuration for the route cache.
#[derive(Debug, Clone)]
pub struct RouteCacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum number of cached entries.
    pub max_capacity: u64,
}

impl Default for RouteCacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(60 * 60),
            max_capacity: 1000,
        }
    }
}

/// Hit/miss counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
}

/// Route planner with a shared result cache.
///
/// Owns the network and planner configuration so that it can be shared
/// between request handlers behind an `Arc`.
pub struct CachedPlanner {
    network: Arc<NetworkModel>,
    config: Arc<PlannerConfig>,
    routes: MokaCache<RouteKey, Arc<RouteResult>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl CachedPlanner {
    /// Create a new cached planner.
    pub fn new(
        network: Arc<NetworkModel>,
        config: Arc<PlannerConfig>,
        cache_config: &RouteCacheConfig,
    ) -> Self {
        let routes = MokaCache::builder()
            .time_to_live(cache_config.ttl)
            .max_capacity(cache_config.max_capacity)
            .build();

        Self {
            network,
            config,
            routes,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// An uncached planner over the same network.
    pub fn planner(&self) -> RoutePlanner<'_> {
        RoutePlanner::new(&self.network, &self.config)
    }

    pub fn network(&self) -> &NetworkModel {
        &self.network
    }

    /// Find the shortest path, using the cache if available.
    ///
    /// Errors are never cached.
    pub async fn find_shortest_path(
        &self,
        source: &StationName,
        destination: &StationName,
    ) -> Result<Arc<RouteResult>, PlannerError> {
        let key = (source.clone(), destination.clone());

        if let Some(cached) = self.routes.get(&key).await {
            self.hits.fetch_add(1, Ordering::Relaxed);
            trace!(%source, %destination, "Route cache hit");
            return Ok(cached);
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        let result = Arc::new(
            self.planner()
                .find_shortest_path(source.as_str(), destination.as_str())?,
        );
        self.routes.insert(key, result.clone()).await;

        Ok(result)
    }

    /// Get cache statistics.
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }

    /// Number of cached routes (approximate until pending tasks run).
    pub fn cache_entry_count(&self) -> u64 {
        self.routes.entry_count()
    }

    /// Invalidate all cached entries.
    pub fn invalidate_cache(&self) {
        self.routes.invalidate_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::red_line;

    fn name(s: &str) -> StationName {
        StationName::parse(s).unwrap()
    }

    fn cached_planner() -> CachedPlanner {
        CachedPlanner::new(
            Arc::new(red_line().unwrap()),
            Arc::new(PlannerConfig::default()),
            &RouteCacheConfig::default(),
        )
    }

    #[test]
    fn default_config() {
        let config = RouteCacheConfig::default();
        assert_eq!(config.ttl, Duration::from_secs(3600));
        assert_eq!(config.max_capacity, 1000);
    }

    #[tokio::test]
    async fn second_query_hits_cache() {
        let planner = cached_planner();
        let from = name("Shaheed Sthal");
        let to = name("Arthala");

        let first = planner.find_shortest_path(&from, &to).await.unwrap();
        let second = planner.find_shortest_path(&from, &to).await.unwrap();

        assert_eq!(first, second);
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(planner.stats(), CacheStats { hits: 1, misses: 1 });
    }

    #[tokio::test]
    async fn direction_is_part_of_key() {
        let planner = cached_planner();
        let a = name("Shaheed Sthal");
        let b = name("Arthala");

        planner.find_shortest_path(&a, &b).await.unwrap();
        let back = planner.find_shortest_path(&b, &a).await.unwrap();

        assert_eq!(planner.stats().misses, 2);
        let route = back.route().unwrap();
        assert_eq!(route.origin(), &b);
    }

    #[tokio::test]
    async fn errors_not_cached() {
        let planner = cached_planner();
        let a = name("Shaheed Sthal");
        let nowhere = name("Nowhere");

        assert!(planner.find_shortest_path(&a, &nowhere).await.is_err());
        assert!(planner.find_shortest_path(&a, &nowhere).await.is_err());

        planner.routes.run_pending_tasks().await;
        assert_eq!(planner.cache_entry_count(), 0);
        assert_eq!(planner.stats().misses, 2);
    }

    #[tokio::test]
    async fn invalidate_clears_entries() {
        let planner = cached_planner();
        let a = name("Shaheed Sthal");
        let b = name("Raj Bagh");

        planner.find_shortest_path(&a, &b).await.unwrap();
        planner.routes.run_pending_tasks().await;
        assert_eq!(planner.cache_entry_count(), 1);

        planner.invalidate_cache();
        planner.find_shortest_path(&a, &b).await.unwrap();
        assert_eq!(planner.stats(), CacheStats { hits: 0, misses: 2 });
    }
}
