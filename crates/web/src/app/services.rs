use std::sync::Arc;

use detailing_auth::AccessPolicy;
use detailing_client::ApiClient;

use crate::config::WebConfig;

/// Shared, read-only state for handlers.
#[derive(Debug, Clone)]
pub struct AppServices {
    pub api: ApiClient,
    pub config: WebConfig,
    pub policy: Arc<AccessPolicy>,
}

impl AppServices {
    pub fn new(api: ApiClient, config: WebConfig, policy: Arc<AccessPolicy>) -> Self {
        Self { api, config, policy }
    }

    pub fn secure_cookies(&self) -> bool {
        self.config.secure_cookies()
    }
}
