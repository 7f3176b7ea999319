use super::security_config::SecurityConfig;
use crate::uploads::UploadPolicy;

/// Application state shared (read-only) by every worker.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Signing settings used by the gate and the token issuer
    pub security: SecurityConfig,
    /// Upload storage policy (absent when the server runs without uploads)
    pub uploads: Option<UploadPolicy>,
}

impl AppState {
    pub fn new(security: SecurityConfig, uploads: UploadPolicy) -> Self {
        Self {
            security,
            uploads: Some(uploads),
        }
    }

    /// State without an upload directory (for tests and auth-only deployments)
    pub fn without_uploads(security: SecurityConfig) -> Self {
        Self {
            security,
            uploads: None,
        }
    }

    #[cfg(test)]
    pub fn for_tests() -> Self {
        Self::without_uploads(SecurityConfig::for_tests())
    }
}
