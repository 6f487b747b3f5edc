//! Access decision infrastructure

mod service;

pub use service::AccessService;
