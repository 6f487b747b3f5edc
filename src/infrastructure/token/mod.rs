//! Bearer token infrastructure

mod jwt;

pub use jwt::{extract_bearer_token, JwtConfig, JwtUserTokenResolver, TokenClaims};

#[cfg(test)]
pub(crate) use jwt::issue;
