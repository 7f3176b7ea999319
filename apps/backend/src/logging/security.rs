use tracing::{error, info};

use crate::auth::gate::AuthRejection;
use crate::trace_ctx;

/// Log a gate rejection.
///
/// Expected rejections are ordinary caller outcomes and go out at info level.
/// `InternalError` is logged at error level with its cause; the cause never
/// leaves the server.
pub fn auth_rejected(rejection: &AuthRejection, path: &str) {
    let trace_id = trace_ctx::trace_id();
    let kind = rejection.kind();

    match rejection {
        AuthRejection::InternalError { cause } => {
            error!(
                event = "SECURITY_AUTH_INTERNAL",
                %trace_id,
                %kind,
                path,
                cause = %cause,
                "Authentication failed unexpectedly"
            );
        }
        _ => {
            info!(
                event = "SECURITY_AUTH_REJECTED",
                %trace_id,
                %kind,
                path,
                "Authentication rejected"
            );
        }
    }
}

/// Log a successful gate pass at debug level.
pub fn auth_accepted(user_id: &str, path: &str) {
    let trace_id = trace_ctx::trace_id();

    tracing::debug!(
        event = "SECURITY_AUTH_ACCEPTED",
        %trace_id,
        user_id,
        path,
        "Authentication accepted"
    );
}
