#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod auth;
pub mod config;
pub mod error;
pub mod extractors;
pub mod logging;
pub mod middleware;
pub mod routes;
pub mod state;
pub mod telemetry;
pub mod test_support;
pub mod trace_ctx;
pub mod uploads;

#[cfg(test)]
pub mod test_bootstrap;

// Re-exports for public API
pub use auth::gate::{authenticate, AuthRejection, Identity, RejectionKind};
pub use auth::token::{mint_token, mint_token_with_expiry, verify_token};
pub use auth::Claims;
pub use config::ServerConfig;
pub use error::AppError;
pub use extractors::current_user::CurrentUser;
pub use middleware::auth_gate::AuthGate;
pub use middleware::cors::cors_middleware;
pub use middleware::request_trace::RequestTrace;
pub use middleware::structured_logger::StructuredLogger;
pub use middleware::trace_span::TraceSpan;
pub use state::app_state::AppState;
pub use state::security_config::SecurityConfig;
pub use uploads::UploadPolicy;

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    test_bootstrap::logging::init();
}
