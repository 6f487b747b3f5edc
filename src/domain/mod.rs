//! Domain layer - Core entities and collaborator contracts

pub mod access;
pub mod access_key;
pub mod cache;
pub mod error;
pub mod provision;
pub mod token;
pub mod user;

pub use access::{Denial, ErrorCode, Verdict, WhoAmI};
pub use access_key::{AccessKey, Fingerprint};
pub use cache::{CachedVerdict, CredentialCache};
pub use error::DomainError;
pub use provision::ProvisionClient;
pub use token::{TokenContext, UserTokenResolver};
pub use user::User;
