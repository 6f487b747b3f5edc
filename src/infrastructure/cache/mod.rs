//! Cache infrastructure - Credential cache implementations

mod in_memory;

pub use in_memory::{InMemoryCacheConfig, InMemoryCredentialCache};
