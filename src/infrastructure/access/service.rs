//! Access decision engine
//!
//! Decides, per request, whether a caller may reach an account on the
//! provisioning backend. Paths are evaluated in order and the first that
//! applies produces the verdict:
//!
//! 1. `whoami`: answer with the `X-DCP-Account` header, no credential checks
//! 2. basic auth: validate the access key for the parent account
//! 3. bearer token: allow active sysops

use std::sync::Arc;

use axum::http::HeaderMap;
use metrics::counter;
use tracing::{debug, info};

use crate::domain::access::{
    basic_access_key, declared_account, is_plain_account, Denial, Verdict, WhoAmI,
    WHOAMI_ACCOUNT,
};
use crate::domain::access_key::AccessKey;
use crate::domain::token::UserTokenResolver;
use crate::infrastructure::provision::AccessKeyValidator;

const KEY_CHECK_ERROR: &str = "APIKeyCheckError";
const UNAUTHORIZED_ACCESS: &str = "UnauthorizedAccess";

/// Credential path a decision was made on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AccessPath {
    WhoAmI,
    AccessKey,
    Token,
}

impl AccessPath {
    fn as_str(&self) -> &'static str {
        match self {
            Self::WhoAmI => "whoami",
            Self::AccessKey => "access_key",
            Self::Token => "token",
        }
    }
}

/// Orchestrates the credential paths for account-scoped requests
#[derive(Debug, Clone)]
pub struct AccessService {
    validator: AccessKeyValidator,
    token_resolver: Arc<dyn UserTokenResolver>,
}

impl AccessService {
    pub fn new(validator: AccessKeyValidator, token_resolver: Arc<dyn UserTokenResolver>) -> Self {
        Self {
            validator,
            token_resolver,
        }
    }

    /// Decide whether a request for `parent_account` may proceed
    pub async fn decide(&self, parent_account: &str, headers: &HeaderMap) -> Verdict {
        info!(parent_id = %parent_account, "Parent account");

        let (path, verdict) = if parent_account == WHOAMI_ACCOUNT {
            (AccessPath::WhoAmI, Self::who_am_i(headers))
        } else if let Some(access_key) = basic_access_key(headers) {
            (
                AccessPath::AccessKey,
                self.check_access_key(parent_account, &access_key).await,
            )
        } else {
            (AccessPath::Token, self.check_token(headers).await)
        };

        counter!(
            "access_decisions_total",
            "path" => path.as_str(),
            "outcome" => verdict.outcome()
        )
        .increment(1);

        match &verdict {
            Verdict::Deny(denial) => info!(
                parent_id = %parent_account,
                path = path.as_str(),
                reason = %denial,
                "Access denied"
            ),
            _ => debug!(
                parent_id = %parent_account,
                path = path.as_str(),
                outcome = verdict.outcome(),
                "Access decided"
            ),
        }

        verdict
    }

    fn who_am_i(headers: &HeaderMap) -> Verdict {
        match declared_account(headers) {
            Some(account) => Verdict::Respond(WhoAmI::new(account)),
            None => Denial::unauthorized(
                "X-DCP-Account header was not sent to whoami",
                "No X-DCP-Account header.",
            )
            .into(),
        }
    }

    async fn check_access_key(&self, parent_account: &str, access_key: &AccessKey) -> Verdict {
        if !is_plain_account(parent_account) {
            return Denial::unauthorized("Invalid parent account", KEY_CHECK_ERROR).into();
        }

        match self.validator.validate(parent_account, access_key).await {
            Ok(true) => Verdict::Allow,
            Ok(false) => Denial::unauthorized("Invalid API Key", KEY_CHECK_ERROR).into(),
            Err(e) => Denial::unauthorized(e.to_string(), KEY_CHECK_ERROR).into(),
        }
    }

    async fn check_token(&self, headers: &HeaderMap) -> Verdict {
        let context = match self.token_resolver.resolve(headers).await {
            Ok(context) => context,
            Err(denial) => return denial.into(),
        };

        let Some(user) = context.user else {
            return Denial::unauthorized(UNAUTHORIZED_ACCESS, "missing user token").into();
        };

        if user.is_active_sysop() {
            return Verdict::Allow;
        }

        // TODO: allow tokens whose user is granted the parent account once the
        // provisioning service exposes account membership; sysop is the only
        // token grant until then.
        Denial::unauthorized(UNAUTHORIZED_ACCESS, "insufficient privileges").into()
    }
}
