use std::sync::Arc;

use crate::backend::ResumeBackend;
use crate::session::registry::SessionRegistry;
use crate::session::SessionSettings;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<SessionRegistry>,
    /// Persistence and AI collaborator. `HttpBackend` in production.
    pub backend: Arc<dyn ResumeBackend>,
    /// Applied to every session opened through the API.
    pub settings: SessionSettings,
}

impl AppState {
    pub fn new(backend: Arc<dyn ResumeBackend>, settings: SessionSettings) -> Self {
        Self {
            registry: Arc::new(SessionRegistry::new()),
            backend,
            settings,
        }
    }
}
