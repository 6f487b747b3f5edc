//! Outcome of one access decision

use serde::{Deserialize, Serialize};

/// Stable error codes surfaced to callers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCode {
    E401,
    E502,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::E401 => "E401",
            Self::E502 => "E502",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A rejected request
///
/// `message` is the human-readable error text; `payload` is the short tag
/// describing which check failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Denial {
    code: ErrorCode,
    message: String,
    payload: String,
}

impl Denial {
    pub fn unauthorized(message: impl Into<String>, payload: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::E401,
            message: message.into(),
            payload: payload.into(),
        }
    }

    pub fn code(&self) -> ErrorCode {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn payload(&self) -> &str {
        &self.payload
    }
}

impl std::fmt::Display for Denial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}: {}", self.code, self.payload, self.message)
    }
}

/// Verdict of the access decision engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// Forward the request to the provisioning backend
    Allow,
    /// Answer directly with the caller's own account; nothing is forwarded
    Respond(WhoAmI),
    /// Reject; nothing is forwarded
    Deny(Denial),
}

impl Verdict {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allow)
    }

    /// Short label for logs and metrics
    pub fn outcome(&self) -> &'static str {
        match self {
            Self::Allow => "allow",
            Self::Respond(_) => "respond",
            Self::Deny(_) => "deny",
        }
    }
}

impl From<Denial> for Verdict {
    fn from(denial: Denial) -> Self {
        Self::Deny(denial)
    }
}

/// Self-identification answer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct WhoAmI(String);

impl WhoAmI {
    pub fn new(account: impl Into<String>) -> Self {
        Self(account.into())
    }

    pub fn account(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unauthorized_denial() {
        let denial = Denial::unauthorized("Invalid API Key", "APIKeyCheckError");

        assert_eq!(denial.code(), ErrorCode::E401);
        assert_eq!(denial.message(), "Invalid API Key");
        assert_eq!(denial.payload(), "APIKeyCheckError");
        assert_eq!(denial.to_string(), "E401 APIKeyCheckError: Invalid API Key");
    }

    #[test]
    fn test_verdict_outcome() {
        assert!(Verdict::Allow.is_allowed());
        assert_eq!(Verdict::Respond(WhoAmI::new("acme")).outcome(), "respond");

        let deny: Verdict = Denial::unauthorized("x", "y").into();
        assert!(!deny.is_allowed());
        assert_eq!(deny.outcome(), "deny");
    }

    #[test]
    fn test_whoami_serializes_as_string() {
        let json = serde_json::to_string(&WhoAmI::new("acme")).unwrap();
        assert_eq!(json, "\"acme\"");
    }
}
