//! Cache domain - credential validation results with per-entry expiry

mod repository;

pub use repository::{CachedVerdict, CredentialCache};

#[cfg(test)]
pub use repository::MockCredentialCache;
