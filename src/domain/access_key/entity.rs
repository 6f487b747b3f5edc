//! Access key entity and credential fingerprint

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// API credential pair scoped to one account
///
/// Supplied by callers through basic authentication and sent to the
/// provisioning backend as the key-check body.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessKey {
    name: String,
    key: String,
}

impl AccessKey {
    pub fn new(name: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            key: key.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Derive the cache fingerprint for this key within an account
    pub fn fingerprint(&self, account_id: &str) -> Fingerprint {
        Fingerprint::derive(account_id, &self.name, &self.key)
    }
}

impl std::fmt::Debug for AccessKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessKey")
            .field("name", &self.name)
            .field("key", &"[REDACTED]")
            .finish()
    }
}

/// Cache key identifying one (account, key name, key secret) combination
///
/// SHA-256 over the length-prefixed triple, hex encoded. Only a short prefix
/// is ever printed.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Fingerprint(String);

impl Fingerprint {
    const DISPLAY_PREFIX: usize = 12;

    pub fn derive(account_id: &str, name: &str, secret: &str) -> Self {
        let mut hasher = Sha256::new();

        for part in [account_id, name, secret] {
            hasher.update((part.len() as u64).to_be_bytes());
            hasher.update(part.as_bytes());
        }

        Self(hex::encode(hasher.finalize()))
    }

    /// Full hex digest
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Truncated digest safe for logs
    pub fn short(&self) -> &str {
        &self.0[..Self::DISPLAY_PREFIX]
    }
}

impl std::fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}…", self.short())
    }
}

impl std::fmt::Debug for Fingerprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Fingerprint({})", self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_triple_same_fingerprint() {
        let a = AccessKey::new("ci", "s3cret").fingerprint("acme");
        let b = AccessKey::new("ci", "s3cret").fingerprint("acme");
        assert_eq!(a, b);
    }

    #[test]
    fn test_distinct_triples_differ() {
        let base = Fingerprint::derive("acme", "ci", "s3cret");

        assert_ne!(base, Fingerprint::derive("acme2", "ci", "s3cret"));
        assert_ne!(base, Fingerprint::derive("acme", "ci2", "s3cret"));
        assert_ne!(base, Fingerprint::derive("acme", "ci", "s3cret2"));
    }

    #[test]
    fn test_concatenation_boundaries_do_not_collide() {
        // plain concatenation would turn both into "acmecis3cret"
        let a = Fingerprint::derive("acme", "cis", "3cret");
        let b = Fingerprint::derive("acmec", "is", "3cret");
        assert_ne!(a, b);
    }

    #[test]
    fn test_fingerprint_display_is_truncated() {
        let fp = Fingerprint::derive("acme", "ci", "s3cret");

        assert_eq!(fp.as_str().len(), 64);
        assert!(!fp.to_string().contains(fp.as_str()));
        assert!(format!("{:?}", fp).starts_with("Fingerprint("));
    }

    #[test]
    fn test_access_key_serialization() {
        let key = AccessKey::new("ci", "s3cret");
        let json = serde_json::to_value(&key).unwrap();

        assert_eq!(json, serde_json::json!({ "name": "ci", "key": "s3cret" }));
    }

    #[test]
    fn test_access_key_debug_redacts_secret() {
        let key = AccessKey::new("ci", "s3cret");
        let debug = format!("{:?}", key);

        assert!(debug.contains("ci"));
        assert!(!debug.contains("s3cret"));
    }
}
