//! Ack response envelope

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::domain::WhoAmI;

/// Envelope wrapping every response the gate writes itself
///
/// Forwarded responses are relayed from the backend untouched and never
/// wrapped.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ack {
    pub ack_uuid: Uuid,
    pub date_time: DateTime<Utc>,
    pub success: bool,
    pub server_code: u16,
    pub payload_type: String,
    pub payload: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl Ack {
    fn new(status: StatusCode, payload_type: impl Into<String>, payload: impl Into<Value>) -> Self {
        Self {
            ack_uuid: Uuid::new_v4(),
            date_time: Utc::now(),
            success: status.is_success(),
            server_code: status.as_u16(),
            payload_type: payload_type.into(),
            payload: payload.into(),
            error_code: None,
            error_message: None,
        }
    }

    /// Successful envelope with a 200 status
    pub fn ok(payload_type: impl Into<String>, payload: impl Into<Value>) -> Self {
        Self::new(StatusCode::OK, payload_type, payload)
    }

    /// Error envelope carrying a stable code and a human-readable message
    pub fn error(
        status: StatusCode,
        code: impl Into<String>,
        message: impl Into<String>,
        payload: impl Into<Value>,
    ) -> Self {
        let mut ack = Self::new(status, "ErrorMessage", payload);
        ack.error_code = Some(code.into());
        ack.error_message = Some(message.into());
        ack
    }

    pub fn status(&self) -> StatusCode {
        StatusCode::from_u16(self.server_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl IntoResponse for Ack {
    fn into_response(self) -> Response {
        (self.status(), Json(self)).into_response()
    }
}

impl From<WhoAmI> for Ack {
    fn from(who: WhoAmI) -> Self {
        Self::ok("WhoAmI", who.account())
    }
}
