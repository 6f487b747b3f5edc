//! Request dispatch to the provisioning backend

mod forwarder;

pub use forwarder::ProvisionProxy;
