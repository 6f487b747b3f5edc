//! Reverse proxy to the provisioning backend

use std::time::Duration;

use axum::body::{Body, HttpBody};
use axum::http::{header, HeaderName, Method, Request, Response};
use reqwest::Client;
use tracing::debug;

use crate::domain::DomainError;


/// Forwards allowed requests verbatim to the provisioning backend
///
/// Bodies are streamed in both directions and never held in memory whole.
#[derive(Debug, Clone)]
pub struct ProvisionProxy {
    base_url: String,
    client: Client,
}

impl ProvisionProxy {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, DomainError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DomainError::configuration(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        })
    }

    /// Upstream URL for a raw (still percent-encoded) path remainder and
    /// optional query string
    pub fn target_url(&self, remainder: &str, query: Option<&str>) -> String {
        let remainder = remainder.trim_start_matches('/');
        let url = format!("{}/{}", self.base_url, remainder);

        match query {
            Some(query) => format!("{}?{}", url, query),
            None => url,
        }
    }

    /// Send `req` to `{base_url}/{remainder}` and relay the upstream answer
    pub async fn forward(
        &self,
        remainder: &str,
        req: Request<Body>,
    ) -> Result<Response<Body>, DomainError> {
        let target_url = self.target_url(remainder, req.uri().query());
        let (parts, body) = req.into_parts();

        debug!(method = %parts.method, target = %target_url, "Forwarding request");

        let mut proxy_req = self.client.request(parts.method, &target_url);

        for (key, value) in parts.headers.iter() {
            if !is_hop_header(key) {
                proxy_req = proxy_req.header(key, value);
            }
        }

        if !body.is_end_stream() {
            proxy_req = proxy_req.body(reqwest::Body::wrap_stream(body.into_data_stream()));
        }

        let response = proxy_req.send().await.map_err(|e| {
            if e.is_timeout() {
                DomainError::transport(format!("request to {} timed out", target_url))
            } else {
                DomainError::transport(e.to_string())
            }
        })?;

        let mut builder = Response::builder().status(response.status());

        for (key, value) in response.headers().iter() {
            if !is_hop_header(key) {
                builder = builder.header(key, value);
            }
        }

        builder
            .body(Body::from_stream(response.bytes_stream()))
            .map_err(|e| DomainError::internal(format!("Failed to build response: {}", e)))
    }

    /// Whether the backend answers at all; any HTTP status counts
    pub async fn reachable(&self) -> Result<(), DomainError> {
        self.client
            .request(Method::HEAD, self.target_url("", None))
            .send()
            .await
            .map(|_| ())
            .map_err(|e| DomainError::transport(e.to_string()))
    }
}

/// Connection-level headers that describe one hop, not the message
fn is_hop_header(name: &HeaderName) -> bool {
    *name == header::HOST || *name == header::CONNECTION || *name == header::TRANSFER_ENCODING
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use wiremock::matchers::{body_string, header as header_matcher, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn proxy(base_url: &str) -> ProvisionProxy {
        ProvisionProxy::new(base_url, Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn test_target_url() {
        let proxy = proxy("http://api-provision:8080/");

        assert_eq!(
            proxy.target_url("account/acme", None),
            "http://api-provision:8080/account/acme"
        );
        assert_eq!(
            proxy.target_url("/users", Some("limit=5")),
            "http://api-provision:8080/users?limit=5"
        );
        assert_eq!(proxy.target_url("", None), "http://api-provision:8080/");
    }

    #[tokio::test]
    async fn test_forward_preserves_request_and_response() {
        let server = MockServer::start().await;

        Mock::given(method("PUT"))
            .and(path("/account/acme"))
            .and(query_param("dry", "true"))
            .and(header_matcher("x-custom", "kept"))
            .and(body_string("{\"id\":\"acme\"}"))
            .respond_with(
                ResponseTemplate::new(201)
                    .insert_header("x-upstream", "provision")
                    .set_body_string("created"),
            )
            .expect(1)
            .mount(&server)
            .await;

        let req = Request::builder()
            .method(Method::PUT)
            .uri("/adm/acme/account/acme?dry=true")
            .header("x-custom", "kept")
            .body(Body::from("{\"id\":\"acme\"}"))
            .unwrap();

        let response = proxy(&server.uri())
            .forward("account/acme", req)
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(response.headers()["x-upstream"], "provision");

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&body[..], b"created");
    }

    #[tokio::test]
    async fn test_forward_relays_upstream_errors() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/missing"))
            .respond_with(ResponseTemplate::new(404).set_body_string("nope"))
            .mount(&server)
            .await;

        let req = Request::builder()
            .uri("/adm/acme/missing")
            .body(Body::empty())
            .unwrap();

        let response = proxy(&server.uri()).forward("missing", req).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_forward_streams_large_body() {
        let server = MockServer::start().await;
        let payload = "x".repeat(256 * 1024);

        Mock::given(method("POST"))
            .and(path("/bulk"))
            .and(body_string(payload.clone()))
            .respond_with(ResponseTemplate::new(200).set_body_string(payload.clone()))
            .expect(1)
            .mount(&server)
            .await;

        let req = Request::builder()
            .method(Method::POST)
            .uri("/adm/acme/bulk")
            .body(Body::from(payload.clone()))
            .unwrap();

        let response = proxy(&server.uri()).forward("bulk", req).await.unwrap();
        assert!(response.headers().get(header::TRANSFER_ENCODING).is_none());

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(body.len(), payload.len());
    }

    #[tokio::test]
    async fn test_reachable() {
        let server = MockServer::start().await;

        assert!(proxy(&server.uri()).reachable().await.is_ok());
        assert!(proxy("http://127.0.0.1:1").reachable().await.is_err());
    }

    #[tokio::test]
    async fn test_forward_unreachable_upstream() {
        let req = Request::builder().uri("/adm/acme/x").body(Body::empty()).unwrap();

        let result = proxy("http://127.0.0.1:1").forward("x", req).await;
        assert!(matches!(result, Err(DomainError::Transport { .. })));
    }
}
