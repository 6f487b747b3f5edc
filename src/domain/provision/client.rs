//! Provisioning backend client trait

use async_trait::async_trait;
use axum::http::StatusCode;

use crate::domain::DomainError;

#[cfg(test)]
use mockall::automock;

/// Client for the provisioning backend's key-check endpoint
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ProvisionClient: Send + Sync + std::fmt::Debug {
    /// POSTs a serialized access key to `/keyCheck/{account_id}` and returns
    /// the response status. Only transport failures are errors.
    async fn key_check(&self, account_id: &str, body: Vec<u8>) -> Result<StatusCode, DomainError>;

    /// Full key-check URL for an account, used in logs and error messages
    fn key_check_url(&self, account_id: &str) -> String;
}
