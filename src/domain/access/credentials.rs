//! Credential extraction from request headers

use axum::http::{header, HeaderMap};
use base64::{engine::general_purpose::STANDARD, Engine};

use crate::domain::access_key::AccessKey;

/// Reserved parent account for self-identification requests
pub const WHOAMI_ACCOUNT: &str = "whoami";

/// Header carrying the caller's own account on `whoami` requests
pub const ACCOUNT_HEADER: &str = "x-dcp-account";

/// Read basic-auth credentials as an access key
///
/// Returns `None` when the header is missing, uses another scheme, or
/// cannot be decoded as `user:password`.
pub fn basic_access_key(headers: &HeaderMap) -> Option<AccessKey> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, encoded) = value.split_once(' ')?;

    if !scheme.eq_ignore_ascii_case("basic") {
        return None;
    }

    let decoded = STANDARD.decode(encoded.trim()).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let (name, key) = decoded.split_once(':')?;

    Some(AccessKey::new(name, key))
}

/// Whether `account` can stand alone as a single upstream path segment
pub fn is_plain_account(account: &str) -> bool {
    !account.is_empty() && account != "." && account != ".." && !account.contains('/')
}

/// Read the self-identification header, ignoring empty values
pub fn declared_account(headers: &HeaderMap) -> Option<String> {
    headers
        .get(ACCOUNT_HEADER)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .map(|v| v.to_string())
}
