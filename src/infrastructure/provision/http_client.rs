//! HTTP client for the provisioning backend

use std::time::Duration;

use async_trait::async_trait;
use axum::http::{header, StatusCode};
use reqwest::{Client, Url};

use crate::domain::provision::ProvisionClient;
use crate::domain::DomainError;

/// reqwest-backed key-check client
#[derive(Debug, Clone)]
pub struct HttpProvisionClient {
    base_url: Url,
    http_client: Client,
}

impl HttpProvisionClient {
    /// Creates a client for `base_url` whose calls give up after `timeout`
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, DomainError> {
        let base_url: String = base_url.into();
        let base_url = Url::parse(&base_url)
            .ok()
            .filter(|url| !url.cannot_be_a_base())
            .ok_or_else(|| {
                DomainError::configuration(format!("Invalid provision base URL: {}", base_url))
            })?;

        let http_client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DomainError::configuration(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            base_url,
            http_client,
        })
    }
}

#[async_trait]
impl ProvisionClient for HttpProvisionClient {
    async fn key_check(&self, account_id: &str, body: Vec<u8>) -> Result<StatusCode, DomainError> {
        let url = self.key_check_url(account_id);

        let response = self
            .http_client
            .post(&url)
            .header(header::CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    DomainError::transport(format!("request to {} timed out", url))
                } else {
                    DomainError::transport(e.to_string())
                }
            })?;

        Ok(response.status())
    }

    /// The account is pushed as one escaped path segment, so `/` or `?`
    /// inside it cannot reach another endpoint
    fn key_check_url(&self, account_id: &str) -> String {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push("keyCheck").push(account_id);
        }
        url.to_string()
    }
}
