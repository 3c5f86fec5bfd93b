//! Shared handler state

use crate::adapters::database::traits::RecordStore;
use crate::config::AuthConfig;
use crate::core::auth::TokenService;
use crate::core::records::RecordService;
use std::sync::Arc;

/// State cloned into every handler
#[derive(Clone)]
pub struct AppState {
    pub records: RecordService,
    pub tokens: TokenService,
    /// When false, patient and handoff routes accept anonymous callers
    pub require_auth: bool,
}

impl AppState {
    pub fn new(store: Arc<dyn RecordStore>, auth: &AuthConfig) -> Self {
        Self {
            records: RecordService::new(store),
            tokens: TokenService::new(auth),
            require_auth: auth.require_auth,
        }
    }
}
