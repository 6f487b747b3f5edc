//! In-memory credential cache using moka

use std::time::{Duration, Instant};

use async_trait::async_trait;
use moka::Expiry;
use moka::future::Cache as MokaCache;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::domain::access_key::Fingerprint;
use crate::domain::cache::{CachedVerdict, CredentialCache};

/// Configuration for the in-memory credential cache
#[derive(Debug, Clone)]
pub struct InMemoryCacheConfig {
    /// Maximum number of entries
    pub max_capacity: u64,
    /// Lifetime of a validation result
    pub default_ttl: Duration,
    /// How often expired entries are reclaimed in the background
    pub sweep_interval: Duration,
}

impl Default for InMemoryCacheConfig {
    fn default() -> Self {
        Self {
            max_capacity: 100_000,
            default_ttl: Duration::from_secs(60),
            sweep_interval: Duration::from_secs(600),
        }
    }
}

impl InMemoryCacheConfig {
    /// Creates a new configuration with specified max capacity
    pub fn with_max_capacity(mut self, capacity: u64) -> Self {
        self.max_capacity = capacity;
        self
    }

    /// Sets the default TTL
    pub fn with_default_ttl(mut self, ttl: Duration) -> Self {
        self.default_ttl = ttl;
        self
    }

    /// Sets the background sweep interval
    pub fn with_sweep_interval(mut self, interval: Duration) -> Self {
        self.sweep_interval = interval;
        self
    }
}

/// Expires each entry after the ttl it was stored with
struct VerdictExpiry;

impl Expiry<Fingerprint, CachedVerdict> for VerdictExpiry {
    fn expire_after_create(
        &self,
        _key: &Fingerprint,
        value: &CachedVerdict,
        _created_at: Instant,
    ) -> Option<Duration> {
        Some(value.ttl())
    }

    fn expire_after_update(
        &self,
        _key: &Fingerprint,
        value: &CachedVerdict,
        _updated_at: Instant,
        _duration_until_expiry: Option<Duration>,
    ) -> Option<Duration> {
        Some(value.ttl())
    }
}

/// Thread-safe credential cache
///
/// Features:
/// - Independent expiry per entry
/// - Capacity bound with moka's eviction policy
/// - Periodic sweep of expired entries via [`InMemoryCredentialCache::spawn_sweeper`]
#[derive(Debug, Clone)]
pub struct InMemoryCredentialCache {
    cache: MokaCache<Fingerprint, CachedVerdict>,
    config: InMemoryCacheConfig,
}

impl InMemoryCredentialCache {
    /// Creates a new in-memory cache with default configuration
    pub fn new() -> Self {
        Self::with_config(InMemoryCacheConfig::default())
    }

    /// Creates a new in-memory cache with the given configuration
    pub fn with_config(config: InMemoryCacheConfig) -> Self {
        let cache = MokaCache::builder()
            .max_capacity(config.max_capacity)
            .expire_after(VerdictExpiry)
            .build();

        Self { cache, config }
    }

    pub fn config(&self) -> &InMemoryCacheConfig {
        &self.config
    }

    /// Starts a background task that reclaims expired entries every
    /// `sweep_interval`. The task runs until the runtime shuts down or the
    /// handle is aborted.
    pub fn spawn_sweeper(&self) -> JoinHandle<()> {
        let cache = self.cache.clone();
        let interval = self.config.sweep_interval;

        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            // first tick completes immediately
            ticker.tick().await;

            loop {
                ticker.tick().await;
                cache.run_pending_tasks().await;
                debug!(
                    entries = cache.entry_count(),
                    "Swept expired credential verdicts"
                );
            }
        })
    }
}

impl Default for InMemoryCredentialCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CredentialCache for InMemoryCredentialCache {
    async fn get(&self, fingerprint: &Fingerprint) -> Option<bool> {
        let entry = self.cache.get(fingerprint).await?;

        if entry.is_expired() {
            self.cache.remove(fingerprint).await;
            return None;
        }

        Some(entry.allowed())
    }

    async fn set(&self, fingerprint: Fingerprint, allowed: bool, ttl: Duration) {
        self.cache
            .insert(fingerprint, CachedVerdict::new(allowed, ttl))
            .await;
    }

    fn entry_count(&self) -> u64 {
        self.cache.entry_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn fp(account: &str) -> Fingerprint {
        Fingerprint::derive(account, "ci", "s3cret")
    }

    #[tokio::test]
    async fn test_set_and_get() {
        let cache = InMemoryCredentialCache::new();

        cache.set(fp("acme"), true, Duration::from_secs(60)).await;
        cache.set(fp("globex"), false, Duration::from_secs(60)).await;

        assert_eq!(cache.get(&fp("acme")).await, Some(true));
        assert_eq!(cache.get(&fp("globex")).await, Some(false));
    }

    #[tokio::test]
    async fn test_get_missing() {
        let cache = InMemoryCredentialCache::new();
        assert!(cache.get(&fp("missing")).await.is_none());
    }

    #[tokio::test]
    async fn test_ttl_expiration() {
        let cache = InMemoryCredentialCache::new();

        cache.set(fp("acme"), true, Duration::from_millis(50)).await;
        assert_eq!(cache.get(&fp("acme")).await, Some(true));

        tokio::time::sleep(Duration::from_millis(100)).await;

        assert!(cache.get(&fp("acme")).await.is_none());
    }

    #[tokio::test]
    async fn test_entries_expire_independently() {
        let cache = InMemoryCredentialCache::new();

        cache.set(fp("short"), true, Duration::from_millis(50)).await;
        cache.set(fp("long"), true, Duration::from_secs(60)).await;

        tokio::time::sleep(Duration::from_millis(100)).await;

        assert!(cache.get(&fp("short")).await.is_none());
        assert_eq!(cache.get(&fp("long")).await, Some(true));
    }

    #[tokio::test]
    async fn test_overwrite_after_expiry() {
        let cache = InMemoryCredentialCache::new();

        cache.set(fp("acme"), false, Duration::from_millis(50)).await;
        tokio::time::sleep(Duration::from_millis(100)).await;
        cache.set(fp("acme"), true, Duration::from_secs(60)).await;

        assert_eq!(cache.get(&fp("acme")).await, Some(true));
    }

    #[tokio::test]
    async fn test_concurrent_set_and_get() {
        let cache = Arc::new(InMemoryCredentialCache::new());
        let mut handles = Vec::new();

        for i in 0..32 {
            let cache = cache.clone();
            handles.push(tokio::spawn(async move {
                let key = fp(&format!("account-{}", i));
                cache.set(key.clone(), i % 2 == 0, Duration::from_secs(60)).await;
                cache.get(&key).await
            }));
        }

        for (i, handle) in handles.into_iter().enumerate() {
            assert_eq!(handle.await.unwrap(), Some(i % 2 == 0));
        }
    }

    #[tokio::test]
    async fn test_sweeper_keeps_running() {
        let cache = InMemoryCredentialCache::with_config(
            InMemoryCacheConfig::default().with_sweep_interval(Duration::from_millis(20)),
        );

        cache.set(fp("acme"), true, Duration::from_millis(10)).await;
        cache.set(fp("globex"), true, Duration::from_secs(60)).await;
        let sweeper = cache.spawn_sweeper();

        tokio::time::sleep(Duration::from_millis(100)).await;

        assert!(!sweeper.is_finished());
        assert!(cache.get(&fp("acme")).await.is_none());
        assert_eq!(cache.get(&fp("globex")).await, Some(true));
        sweeper.abort();
    }

    #[test]
    fn test_config_builders() {
        let config = InMemoryCacheConfig::default()
            .with_max_capacity(10)
            .with_default_ttl(Duration::from_secs(5))
            .with_sweep_interval(Duration::from_secs(30));

        assert_eq!(config.max_capacity, 10);
        assert_eq!(config.default_ttl, Duration::from_secs(5));
        assert_eq!(config.sweep_interval, Duration::from_secs(30));
    }
}
