//! Bearer token collaborator contract

use async_trait::async_trait;
use axum::http::HeaderMap;

use crate::domain::access::Denial;
use crate::domain::user::User;

#[cfg(test)]
use mockall::automock;

/// Identity resolved for one request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenContext {
    pub user: Option<User>,
}

impl TokenContext {
    pub fn with_user(user: User) -> Self {
        Self { user: Some(user) }
    }

    pub fn anonymous() -> Self {
        Self::default()
    }
}

/// Resolves the user behind a bearer token
///
/// An `Err` means the resolver rejected the request itself (missing,
/// malformed or expired token) and the denial must be returned as is.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait UserTokenResolver: Send + Sync + std::fmt::Debug {
    async fn resolve(&self, headers: &HeaderMap) -> Result<TokenContext, Denial>;
}
