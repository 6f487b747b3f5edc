//! Account access middleware
//!
//! Runs the access decision for every `/adm/{parent_account}` route before
//! the request reaches the forwarding handler.

use std::collections::HashMap;

use axum::{
    body::Body,
    extract::{Path, State},
    http::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::api::state::AppState;
use crate::api::types::{Ack, ApiError};
use crate::domain::Verdict;

/// Path parameter naming the account a request is scoped to
pub const PARENT_ACCOUNT_PARAM: &str = "parent_account";

pub async fn access_middleware(
    State(state): State<AppState>,
    Path(params): Path<HashMap<String, String>>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let parent_account = params
        .get(PARENT_ACCOUNT_PARAM)
        .map(String::as_str)
        .unwrap_or_default();

    match state
        .access_service
        .decide(parent_account, request.headers())
        .await
    {
        Verdict::Allow => next.run(request).await,
        Verdict::Respond(who) => Ack::from(who).into_response(),
        Verdict::Deny(denial) => ApiError::from(denial).into_response(),
    }
}
