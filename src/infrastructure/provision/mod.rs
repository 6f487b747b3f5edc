//! Provisioning backend infrastructure

mod http_client;
mod validator;

pub use http_client::HttpProvisionClient;
pub use validator::AccessKeyValidator;
