//! Access decision domain

mod credentials;
mod verdict;

pub use credentials::{
    basic_access_key, declared_account, is_plain_account, ACCOUNT_HEADER, WHOAMI_ACCOUNT,
};
pub use verdict::{Denial, ErrorCode, Verdict, WhoAmI};
