//! Health endpoints for Kubernetes
//!
//! `/health` and `/live` only show the process is serving. `/ready` also
//! requires the provisioning backend to answer.

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;
use tracing::warn;

use super::state::AppState;

#[derive(Debug, Serialize)]
pub struct Liveness {
    pub status: &'static str,
    pub version: &'static str,
}

#[derive(Debug, Serialize)]
pub struct Readiness {
    pub ready: bool,
    pub version: &'static str,
    /// `reachable`, or the transport error seen while probing
    pub provision: String,
    pub cached_verdicts: u64,
}

pub async fn health_check() -> impl IntoResponse {
    Json(Liveness {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

pub async fn live_check() -> impl IntoResponse {
    StatusCode::OK
}

/// 200 when the provisioning backend answers, 503 otherwise
pub async fn ready_check(State(state): State<AppState>) -> impl IntoResponse {
    let (ready, provision) = match state.proxy.reachable().await {
        Ok(()) => (true, "reachable".to_string()),
        Err(e) => {
            warn!(error = %e, "Provisioning backend unreachable");
            (false, e.to_string())
        }
    };

    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let body = Readiness {
        ready,
        version: env!("CARGO_PKG_VERSION"),
        provision,
        cached_verdicts: state.credential_cache.entry_count(),
    };

    (status, Json(body))
}
