//! Application state for dependency injection.

use std::sync::Arc;

use auth_service_lib::TokenVerifier;
use resource_service_lib::service::ServiceContainer;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub services: Arc<dyn ServiceContainer>,
    pub verifier: Arc<dyn TokenVerifier>,
}

impl AppState {
    /// Create new app state.
    pub fn new(services: Arc<dyn ServiceContainer>, verifier: Arc<dyn TokenVerifier>) -> Self {
        Self { services, verifier }
    }
}
