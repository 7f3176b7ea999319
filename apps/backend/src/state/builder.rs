use std::path::PathBuf;

use crate::error::AppError;
use crate::state::app_state::AppState;
use crate::state::security_config::SecurityConfig;
use crate::uploads::UploadPolicy;

/// Builder for creating AppState instances (used in both tests and main)
pub struct StateBuilder {
    security_config: SecurityConfig,
    upload_dir: Option<PathBuf>,
}

impl StateBuilder {
    pub fn new() -> Self {
        Self {
            security_config: SecurityConfig::without_secret(),
            upload_dir: None,
        }
    }

    pub fn with_security(mut self, security_config: SecurityConfig) -> Self {
        self.security_config = security_config;
        self
    }

    pub fn with_upload_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.upload_dir = Some(dir.into());
        self
    }

    /// Creates the upload directory when one was configured.
    pub fn build(self) -> Result<AppState, AppError> {
        match self.upload_dir {
            Some(dir) => {
                let uploads = UploadPolicy::from_dir(dir)?;
                Ok(AppState::new(self.security_config, uploads))
            }
            None => Ok(AppState::without_uploads(self.security_config)),
        }
    }
}

impl Default for StateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn build_state() -> StateBuilder {
    StateBuilder::new()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_without_upload_dir() {
        let state = build_state().build().unwrap();
        assert!(state.uploads.is_none());
        assert!(!state.security.has_secret());
    }

    #[test]
    fn build_creates_upload_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("nested").join("uploads");

        let state = build_state()
            .with_security(SecurityConfig::for_tests())
            .with_upload_dir(&dir)
            .build()
            .unwrap();

        assert!(dir.is_dir());
        assert_eq!(state.uploads.unwrap().dir(), dir.as_path());
        assert!(state.security.has_secret());
    }
}
