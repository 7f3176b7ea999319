//! The authentication gate: decide whether a request may proceed.
//!
//! Checks run in a fixed order: credential presence, then signing-secret
//! configuration, then signature and expiry. The first failing check decides
//! the rejection.

use std::fmt;
use std::time::SystemTime;

use actix_web::http::StatusCode;
use serde::{Deserialize, Serialize};

use super::token::verify_token;
use crate::state::security_config::SecurityConfig;

/// Identity the gate attaches to the request context on success.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub user_id: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RejectionKind {
    Unauthenticated,
    InvalidToken,
    TokenExpired,
    ServerMisconfigured,
    InternalError,
}

impl RejectionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            RejectionKind::Unauthenticated => "unauthenticated",
            RejectionKind::InvalidToken => "invalid_token",
            RejectionKind::TokenExpired => "token_expired",
            RejectionKind::ServerMisconfigured => "server_misconfigured",
            RejectionKind::InternalError => "internal_error",
        }
    }
}

impl fmt::Display for RejectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why the gate refused a request.
///
/// Only `InternalError` carries a cause, and that cause is for server logs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthRejection {
    Unauthenticated,
    InvalidToken,
    TokenExpired,
    ServerMisconfigured,
    InternalError { cause: String },
}

impl AuthRejection {
    pub fn kind(&self) -> RejectionKind {
        match self {
            AuthRejection::Unauthenticated => RejectionKind::Unauthenticated,
            AuthRejection::InvalidToken => RejectionKind::InvalidToken,
            AuthRejection::TokenExpired => RejectionKind::TokenExpired,
            AuthRejection::ServerMisconfigured => RejectionKind::ServerMisconfigured,
            AuthRejection::InternalError { .. } => RejectionKind::InternalError,
        }
    }

    /// Message returned to the caller.
    pub fn message(&self) -> &'static str {
        match self {
            AuthRejection::Unauthenticated => "User not authenticated",
            AuthRejection::InvalidToken => "Invalid token",
            AuthRejection::TokenExpired => "Token has expired",
            AuthRejection::ServerMisconfigured => "Server misconfiguration: Missing SECRET_KEY",
            AuthRejection::InternalError { .. } => "Internal server error",
        }
    }

    /// 401 for caller errors, 500 for operator or server errors.
    pub fn status(&self) -> StatusCode {
        match self.kind() {
            RejectionKind::Unauthenticated
            | RejectionKind::InvalidToken
            | RejectionKind::TokenExpired => StatusCode::UNAUTHORIZED,
            RejectionKind::ServerMisconfigured | RejectionKind::InternalError => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

/// Run the gate over a credential pulled from the request.
///
/// `credential` is `None` when the request carried no usable token at all.
pub fn authenticate(
    credential: Option<&str>,
    security: &SecurityConfig,
    now: SystemTime,
) -> Result<Identity, AuthRejection> {
    let token = credential
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or(AuthRejection::Unauthenticated)?;

    if !security.has_secret() {
        return Err(AuthRejection::ServerMisconfigured);
    }

    let claims = verify_token(token, security, now)?;

    Ok(Identity {
        user_id: claims.user_id,
    })
}
