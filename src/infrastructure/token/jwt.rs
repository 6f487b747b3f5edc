//! Bearer token resolution with HMAC-signed JWTs

use std::fmt::Debug;

use async_trait::async_trait;
use axum::http::{header, HeaderMap};
use jsonwebtoken::{decode, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::access::Denial;
use crate::domain::token::{TokenContext, UserTokenResolver};
use crate::domain::user::User;
use crate::domain::DomainError;

const TOKEN_ERROR: &str = "TokenError";

/// JWT claims structure
///
/// The user travels in `data`; a token without it resolves to no user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<User>,
    /// Issued at timestamp (Unix epoch)
    pub iat: i64,
    /// Expiration timestamp (Unix epoch)
    pub exp: i64,
}

/// Configuration for the token resolver
#[derive(Clone)]
pub struct JwtConfig {
    /// Shared secret the provisioning service signs tokens with
    pub secret: String,
}

impl JwtConfig {
    /// Fails on an empty secret, which would accept tokens anyone can sign
    pub fn new(secret: impl Into<String>) -> Result<Self, DomainError> {
        let secret = secret.into();
        if secret.trim().is_empty() {
            return Err(DomainError::configuration(
                "token secret is not set (TOKEN_KEY or APP__TOKEN__SECRET)",
            ));
        }

        Ok(Self { secret })
    }
}

/// Verifies `Authorization: Bearer <jwt>` headers and yields their user
#[derive(Clone)]
pub struct JwtUserTokenResolver {
    decoding_key: DecodingKey,
}

impl Debug for JwtUserTokenResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtUserTokenResolver")
            .field("decoding_key", &"[hidden]")
            .finish()
    }
}

impl JwtUserTokenResolver {
    pub fn new(config: JwtConfig) -> Self {
        Self {
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
        }
    }

    /// Validate a token and return its claims
    pub fn validate(&self, token: &str) -> Result<TokenClaims, DomainError> {
        let token_data = decode::<TokenClaims>(token, &self.decoding_key, &Validation::default())
            .map_err(|e| DomainError::token(format!("Invalid JWT: {}", e)))?;

        Ok(token_data.claims)
    }
}

#[async_trait]
impl UserTokenResolver for JwtUserTokenResolver {
    async fn resolve(&self, headers: &HeaderMap) -> Result<TokenContext, Denial> {
        let token = extract_bearer_token(headers)?;

        debug!("Validating bearer token");

        let claims = self
            .validate(&token)
            .map_err(|e| Denial::unauthorized(e.to_string(), TOKEN_ERROR))?;

        Ok(TokenContext { user: claims.data })
    }
}

/// Extract the bearer token from the Authorization header
///
/// The scheme is matched case-insensitively, like basic credentials.
pub fn extract_bearer_token(headers: &HeaderMap) -> Result<String, Denial> {
    if let Some(auth_header) = headers.get(header::AUTHORIZATION) {
        let auth_str = auth_header.to_str().map_err(|_| {
            Denial::unauthorized("Invalid Authorization header encoding", TOKEN_ERROR)
        })?;

        if let Some((scheme, token)) = auth_str.split_once(' ') {
            if scheme.eq_ignore_ascii_case("bearer") {
                return Ok(token.trim().to_string());
            }
        }
    }

    Err(Denial::unauthorized(
        "Authentication required. Provide an API key via basic auth or a token via 'Authorization: Bearer <token>'",
        TOKEN_ERROR,
    ))
}

/// Token minting for tests; the gate itself only verifies tokens
#[cfg(test)]
pub(crate) mod issue {
    use chrono::{Duration, Utc};
    use jsonwebtoken::{encode, EncodingKey, Header};

    use super::TokenClaims;
    use crate::domain::user::User;

    /// Sign claims carrying `user` that expire `ttl` from now
    pub fn sign(secret: &str, user: Option<&User>, ttl: Duration) -> String {
        let now = Utc::now();
        let claims = TokenClaims {
            data: user.cloned(),
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    /// Sign a one hour token for `user`
    pub fn token_for(secret: &str, user: &User) -> String {
        sign(secret, Some(user), Duration::hours(1))
    }
}
