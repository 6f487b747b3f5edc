//! Provisioning backend domain
//!
//! The narrow contract the gate relies on: one key-check call per account.

mod client;

pub use client::ProvisionClient;

#[cfg(test)]
pub use client::MockProvisionClient;
