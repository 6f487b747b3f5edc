//! Access key domain
//!
//! Per-account API credentials and the fingerprint used to cache their
//! validation results.

mod entity;

pub use entity::{AccessKey, Fingerprint};
