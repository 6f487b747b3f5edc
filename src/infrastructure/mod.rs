//! Infrastructure layer - provisioning backend, cache and token adapters

pub mod access;
pub mod cache;
pub mod logging;
pub mod observability;
pub mod provision;
pub mod proxy;
pub mod token;
