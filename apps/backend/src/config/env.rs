//! Process configuration, read once from the environment at startup.
//!
//! Environment variables must be set by the runtime environment:
//! - Docker: `env_file` in compose or `docker run --env-file`
//! - Local dev: source an env file manually (`set -a; . ./.env; set +a`)

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use tracing::{error, warn};

use crate::error::AppError;
use crate::state::security_config::{SecurityConfig, DEFAULT_TOKEN_TTL};
use crate::uploads::DEFAULT_UPLOAD_DIR;

pub const SECRET_KEY_ENV: &str = "SECRET_KEY";
const HOST_ENV: &str = "BACKEND_HOST";
const PORT_ENV: &str = "PORT";
const TOKEN_TTL_ENV: &str = "TOKEN_TTL_SECS";
const UPLOAD_DIR_ENV: &str = "UPLOAD_DIR";
const CORS_ENV: &str = "CORS_ALLOWED_ORIGINS";

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8000;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub security: SecurityConfig,
    pub upload_dir: PathBuf,
    pub cors_allowed_origins: Vec<String>,
}

impl ServerConfig {
    /// Read every setting from the process environment.
    ///
    /// A missing `SECRET_KEY` does not fail startup: it is logged here, once, and
    /// every protected request is answered with a server-misconfiguration error.
    /// Malformed values (port, TTL) do fail startup.
    pub fn from_env() -> Result<Self, AppError> {
        let host = env::var(HOST_ENV).unwrap_or_else(|_| DEFAULT_HOST.to_string());

        let port = match env::var(PORT_ENV) {
            Ok(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| AppError::config(format!("{PORT_ENV} must be a valid port number")))?,
            Err(_) => DEFAULT_PORT,
        };

        let token_ttl = match env::var(TOKEN_TTL_ENV) {
            Ok(raw) => {
                let secs = raw.trim().parse::<u64>().map_err(|_| {
                    AppError::config(format!("{TOKEN_TTL_ENV} must be a whole number of seconds"))
                })?;
                if secs == 0 {
                    return Err(AppError::config(format!("{TOKEN_TTL_ENV} must be positive")));
                }
                Duration::from_secs(secs)
            }
            Err(_) => DEFAULT_TOKEN_TTL,
        };

        let security =
            SecurityConfig::from_optional(env::var(SECRET_KEY_ENV).ok()).with_token_ttl(token_ttl);
        if !security.has_secret() {
            error!(
                event = "CONFIG_MISSING_SECRET",
                variable = SECRET_KEY_ENV,
                "signing secret is not set; protected routes will answer 500"
            );
        }

        let upload_dir = env::var(UPLOAD_DIR_ENV)
            .ok()
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_UPLOAD_DIR));

        let cors_allowed_origins = parse_origins(&env::var(CORS_ENV).unwrap_or_default());

        Ok(Self {
            host,
            port,
            security,
            upload_dir,
            cors_allowed_origins,
        })
    }
}

/// Comma-separated origins; empty, `null` and non-http(s) entries are dropped.
/// Falls back to the local frontend dev servers when nothing valid is left.
pub fn parse_origins(raw: &str) -> Vec<String> {
    let mut origins: Vec<String> = Vec::new();
    for entry in raw.split(',').map(str::trim) {
        if entry.is_empty() || entry == "null" {
            continue;
        }
        if !(entry.starts_with("http://") || entry.starts_with("https://")) {
            warn!(origin = entry, "ignoring CORS origin without http(s) scheme");
            continue;
        }
        origins.push(entry.trim_end_matches('/').to_string());
    }

    if origins.is_empty() {
        vec![
            "http://localhost:5173".to_string(),
            "http://localhost:3000".to_string(),
        ]
    } else {
        origins
    }
}
