//! Application state for shared services

use std::sync::Arc;

use crate::domain::cache::CredentialCache;
use crate::infrastructure::access::AccessService;
use crate::infrastructure::proxy::ProvisionProxy;

/// Application state shared by every request handler
#[derive(Clone, Debug)]
pub struct AppState {
    pub access_service: Arc<AccessService>,
    pub proxy: Arc<ProvisionProxy>,
    pub credential_cache: Arc<dyn CredentialCache>,
}

impl AppState {
    pub fn new(
        access_service: AccessService,
        proxy: ProvisionProxy,
        credential_cache: Arc<dyn CredentialCache>,
    ) -> Self {
        Self {
            access_service: Arc::new(access_service),
            proxy: Arc::new(proxy),
            credential_cache,
        }
    }
}
