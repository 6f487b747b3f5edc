//! User domain
//!
//! Identity resolved from bearer tokens.

mod entity;

pub use entity::User;
