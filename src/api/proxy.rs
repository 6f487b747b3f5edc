//! Forwarding handler for authorized account requests

use axum::{body::Body, extract::State, http::Request, response::Response};
use tracing::error;

use super::state::AppState;
use super::types::ApiError;

/// Prefix every account scoped route starts with
pub const ADM_PREFIX: &str = "/adm/";

/// Relay a request that passed the access middleware to the provisioning
/// backend
pub async fn forward_handler(
    State(state): State<AppState>,
    request: Request<Body>,
) -> Result<Response, ApiError> {
    let remainder = raw_remainder(request.uri().path()).to_string();

    state.proxy.forward(&remainder, request).await.map_err(|e| {
        error!(error = %e, remainder = %remainder, "Proxy error");
        ApiError::from(e)
    })
}

/// Path after `/adm/{parent_account}/`, still percent-encoded as received
///
/// Path parameters are decoded by the router, so `%2F` or `%3F` in the
/// remainder would change the upstream path or query if taken from them.
pub fn raw_remainder(path: &str) -> &str {
    path.strip_prefix(ADM_PREFIX)
        .and_then(|rest| rest.split_once('/'))
        .map(|(_, remainder)| remainder)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_remainder() {
        assert_eq!(raw_remainder("/adm/acme/users/7"), "users/7");
        assert_eq!(raw_remainder("/adm/acme/files/a%2Fb%3Fx"), "files/a%2Fb%3Fx");
        assert_eq!(raw_remainder("/adm/acme/"), "");
        assert_eq!(raw_remainder("/adm/acme"), "");
        assert_eq!(raw_remainder("/adm/ac%2Fme/users"), "users");
    }
}
