//! API response types

pub mod ack;
pub mod error;

pub use ack::Ack;
pub use error::ApiError;
