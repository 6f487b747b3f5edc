//! API error types

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use super::ack::Ack;
use crate::domain::{Denial, DomainError, ErrorCode};

/// API error with status code, rendered as an error [`Ack`]
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub ack: Ack,
}

impl ApiError {
    /// Create a new API error
    pub fn new(
        status: StatusCode,
        code: ErrorCode,
        message: impl Into<String>,
        payload: impl Into<String>,
    ) -> Self {
        let payload: String = payload.into();

        Self {
            status,
            ack: Ack::error(status, code.as_str(), message, payload),
        }
    }

    /// Authentication error
    pub fn unauthorized(message: impl Into<String>, payload: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, ErrorCode::E401, message, payload)
    }

    /// The provisioning backend could not be reached while forwarding
    pub fn bad_gateway(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_GATEWAY, ErrorCode::E502, message, "ProxyError")
    }

    pub fn message(&self) -> &str {
        self.ack.error_message.as_deref().unwrap_or_default()
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        self.ack.into_response()
    }
}

impl From<Denial> for ApiError {
    fn from(denial: Denial) -> Self {
        Self::new(
            StatusCode::UNAUTHORIZED,
            denial.code(),
            denial.message(),
            denial.payload(),
        )
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match &err {
            DomainError::Transport { .. } => Self::bad_gateway(err.to_string()),
            _ => Self::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorCode::E502,
                err.to_string(),
                "ProxyError",
            ),
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.status, self.message())
    }
}

impl std::error::Error for ApiError {}
