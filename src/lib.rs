//! Provision Gate
//!
//! Authorization gate in front of the provisioning backend:
//! - Per-account API keys validated upstream and cached for a short TTL
//! - Bearer user tokens for system operators
//! - Allowed requests forwarded verbatim to the backend

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use crate::config::AppConfig;

use std::sync::Arc;

use api::state::AppState;
use infrastructure::{
    access::AccessService,
    cache::{InMemoryCacheConfig, InMemoryCredentialCache},
    provision::{AccessKeyValidator, HttpProvisionClient},
    proxy::ProvisionProxy,
    token::{JwtConfig, JwtUserTokenResolver},
};
use tracing::info;

/// Create the credential cache described by the configuration
pub fn create_credential_cache(config: &AppConfig) -> InMemoryCredentialCache {
    InMemoryCredentialCache::with_config(
        InMemoryCacheConfig::default()
            .with_max_capacity(config.cache.max_capacity)
            .with_default_ttl(config.cache.ttl())
            .with_sweep_interval(config.cache.sweep_interval()),
    )
}

/// Create the application state around an already constructed cache
pub fn create_app_state_with_config(
    config: &AppConfig,
    cache: InMemoryCredentialCache,
) -> anyhow::Result<AppState> {
    let base_url = config.provision.base_url();
    let timeout = config.provision.timeout();

    info!(provision = %base_url, timeout = ?timeout, "Provisioning backend");

    let ttl = cache.config().default_ttl;
    let cache = Arc::new(cache);
    let client = HttpProvisionClient::new(base_url.clone(), timeout)?;
    let validator = AccessKeyValidator::new(cache.clone(), Arc::new(client), ttl);

    let resolver = JwtUserTokenResolver::new(JwtConfig::new(config.token.secret.clone())?);

    let access_service = AccessService::new(validator, Arc::new(resolver));
    let proxy = ProvisionProxy::new(base_url, timeout)?;

    Ok(AppState::new(access_service, proxy, cache))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credential_cache_follows_config() {
        let mut config = AppConfig::default();
        config.cache.ttl_secs = 5;
        config.cache.max_capacity = 10;

        let cache = create_credential_cache(&config);
        assert_eq!(cache.config().default_ttl.as_secs(), 5);
        assert_eq!(cache.config().max_capacity, 10);
    }

    #[tokio::test]
    async fn test_app_state_from_config() {
        let mut config = AppConfig::default();
        config.token.secret = "configured-secret".to_string();
        let cache = create_credential_cache(&config);

        let state = create_app_state_with_config(&config, cache).unwrap();
        assert_eq!(state.credential_cache.entry_count(), 0);
    }

    #[tokio::test]
    async fn test_app_state_requires_token_secret() {
        let config = AppConfig::default();
        let cache = create_credential_cache(&config);

        let err = create_app_state_with_config(&config, cache).unwrap_err();
        assert!(err.to_string().contains("token secret is not set"));
    }
}
