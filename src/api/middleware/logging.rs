//! Request/response logging middleware with credential redaction

use std::time::Instant;

use axum::{
    body::Body,
    extract::MatchedPath,
    http::{header, HeaderMap, Request},
    middleware::Next,
    response::Response,
};
use tracing::info;

/// Headers worth logging verbatim
const LOGGED_HEADERS: [&str; 6] = [
    "content-type",
    "content-length",
    "user-agent",
    "x-forwarded-for",
    "x-real-ip",
    "x-dcp-account",
];

/// Log every request and its outcome. Span creation is left to `TraceLayer`.
pub async fn logging_middleware(request: Request<Body>, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let route = extract_route(&request);
    let request_id = extract_request_id(request.headers());
    let credentials = credential_scheme(request.headers());
    let headers_log = loggable_headers(request.headers());

    info!(
        method = %method,
        route = %route,
        uri = %request.uri(),
        request_id = %request_id,
        credentials = credentials,
        headers = %headers_log,
        "Incoming request"
    );

    let response = next.run(request).await;

    info!(
        method = %method,
        route = %route,
        status = %response.status().as_u16(),
        duration_ms = %start.elapsed().as_millis(),
        request_id = %request_id,
        "Request completed"
    );

    response
}

fn extract_route(request: &Request<Body>) -> String {
    request
        .extensions()
        .get::<MatchedPath>()
        .map(|mp| mp.as_str().to_string())
        .unwrap_or_else(|| request.uri().path().to_string())
}

fn extract_request_id(headers: &HeaderMap) -> String {
    headers
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-")
        .to_string()
}

/// Name of the credential scheme presented, never its value
fn credential_scheme(headers: &HeaderMap) -> &'static str {
    let Some(value) = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
    else {
        return "none";
    };

    let scheme = value.split_whitespace().next().unwrap_or_default();
    if scheme.eq_ignore_ascii_case("basic") {
        "basic"
    } else if scheme.eq_ignore_ascii_case("bearer") {
        "bearer"
    } else {
        "other"
    }
}

fn loggable_headers(headers: &HeaderMap) -> String {
    LOGGED_HEADERS
        .iter()
        .filter_map(|name| {
            headers
                .get(*name)
                .map(|value| format!("{}={}", name, value.to_str().unwrap_or("[invalid]")))
        })
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(pairs: &[(&'static str, &'static str)]) -> HeaderMap {
        let mut headers = HeaderMap::new();
        for (name, value) in pairs {
            headers.insert(*name, value.parse().unwrap());
        }
        headers
    }

    #[test]
    fn test_credential_scheme() {
        assert_eq!(credential_scheme(&HeaderMap::new()), "none");
        assert_eq!(
            credential_scheme(&headers(&[("authorization", "Basic Y2k6czNjcmV0")])),
            "basic"
        );
        assert_eq!(
            credential_scheme(&headers(&[("authorization", "bearer abc.def")])),
            "bearer"
        );
        assert_eq!(
            credential_scheme(&headers(&[("authorization", "Digest x")])),
            "other"
        );
    }

    #[test]
    fn test_loggable_headers_never_include_credentials() {
        let logged = loggable_headers(&headers(&[
            ("authorization", "Basic Y2k6czNjcmV0"),
            ("cookie", "session=1"),
            ("x-dcp-account", "acme"),
        ]));

        assert_eq!(logged, "x-dcp-account=acme");
    }

    #[test]
    fn test_missing_request_id() {
        assert_eq!(extract_request_id(&HeaderMap::new()), "-");
    }

    #[test]
    fn test_extract_route_falls_back_to_uri() {
        let request = Request::builder()
            .uri("/adm/acme/users")
            .body(Body::empty())
            .unwrap();

        assert_eq!(extract_route(&request), "/adm/acme/users");
    }
}
