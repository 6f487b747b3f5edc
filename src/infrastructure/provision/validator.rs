//! Cache-through access key validation against the provisioning backend

use std::sync::Arc;
use std::time::Duration;

use axum::http::StatusCode;
use metrics::counter;
use tracing::{debug, warn};

use crate::domain::access_key::{AccessKey, Fingerprint};
use crate::domain::cache::CredentialCache;
use crate::domain::provision::ProvisionClient;
use crate::domain::DomainError;

/// Validates access keys, remembering every result for `ttl`
///
/// Failed validations are cached exactly like successful ones, so an
/// upstream outage keeps denying a key until its entry expires.
#[derive(Debug, Clone)]
pub struct AccessKeyValidator {
    cache: Arc<dyn CredentialCache>,
    client: Arc<dyn ProvisionClient>,
    ttl: Duration,
}

impl AccessKeyValidator {
    pub fn new(
        cache: Arc<dyn CredentialCache>,
        client: Arc<dyn ProvisionClient>,
        ttl: Duration,
    ) -> Self {
        Self { cache, client, ttl }
    }

    /// Returns whether `access_key` is valid for `account_id`
    ///
    /// A cache hit never reaches upstream and reports `Ok(verdict)`; the
    /// error text of a failed validation is only returned on the call that
    /// produced it.
    pub async fn validate(
        &self,
        account_id: &str,
        access_key: &AccessKey,
    ) -> Result<bool, DomainError> {
        let fingerprint = access_key.fingerprint(account_id);

        if let Some(allowed) = self.cache.get(&fingerprint).await {
            counter!("credential_cache_lookups_total", "result" => "hit").increment(1);
            debug!(fingerprint = %fingerprint, allowed, "Access key cache hit");
            return Ok(allowed);
        }

        counter!("credential_cache_lookups_total", "result" => "miss").increment(1);

        let body = match serde_json::to_vec(access_key) {
            Ok(body) => body,
            Err(e) => {
                return self
                    .resolve(fingerprint, Err(DomainError::encoding(e.to_string())))
                    .await;
            }
        };

        let url = self.client.key_check_url(account_id);

        let outcome = match self.client.key_check(account_id, body).await {
            Ok(StatusCode::OK) => Ok(true),
            Ok(StatusCode::NOT_FOUND) => Err(DomainError::account_not_found(account_id)),
            Ok(status) => Err(DomainError::unexpected_status(status.as_u16(), &url)),
            Err(e) => {
                warn!(url = %url, error = %e, "Provision service request failure.");
                Err(e)
            }
        };

        self.resolve(fingerprint, outcome).await
    }

    /// Caches the outcome of one upstream validation and hands it back
    async fn resolve(
        &self,
        fingerprint: Fingerprint,
        outcome: Result<bool, DomainError>,
    ) -> Result<bool, DomainError> {
        let allowed = matches!(outcome, Ok(true));

        debug!(fingerprint = %fingerprint, allowed, "Caching access key verdict");
        self.cache.set(fingerprint, allowed, self.ttl).await;

        outcome
    }
}
