//! Credential cache trait definition

use std::fmt::Debug;
use std::time::{Duration, Instant};

use async_trait::async_trait;

use crate::domain::access_key::Fingerprint;

#[cfg(test)]
use mockall::automock;

/// One cached validation result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CachedVerdict {
    allowed: bool,
    ttl: Duration,
    created_at: Instant,
    expires_at: Instant,
}

impl CachedVerdict {
    pub fn new(allowed: bool, ttl: Duration) -> Self {
        let created_at = Instant::now();

        Self {
            allowed,
            ttl,
            created_at,
            expires_at: created_at + ttl,
        }
    }

    pub fn allowed(&self) -> bool {
        self.allowed
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn created_at(&self) -> Instant {
        self.created_at
    }

    pub fn expires_at(&self) -> Instant {
        self.expires_at
    }

    pub fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }
}

/// Bounded-lifetime store of credential validation results
///
/// Implementations must be safe for concurrent readers and writers. A
/// `get` followed by a `set` for the same fingerprint is not atomic.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait CredentialCache: Send + Sync + Debug {
    /// Returns the cached verdict if the entry is still live
    async fn get(&self, fingerprint: &Fingerprint) -> Option<bool>;

    /// Stores a verdict that expires after `ttl`
    async fn set(&self, fingerprint: Fingerprint, allowed: bool, ttl: Duration);

    /// Approximate number of live entries
    fn entry_count(&self) -> u64;
}
