use std::time::{SystemTime, UNIX_EPOCH};

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};

use super::claims::Claims;
use super::gate::AuthRejection;
use crate::state::security_config::SecurityConfig;
use crate::AppError;

/// Mint an HS256 credential for `user_id`, valid for the configured TTL.
pub fn mint_token(
    user_id: &str,
    now: SystemTime,
    security: &SecurityConfig,
) -> Result<String, AppError> {
    let iat = epoch_secs(now).map_err(AppError::internal)?;
    let ttl = i64::try_from(security.token_ttl.as_secs())
        .map_err(|_| AppError::config("token TTL does not fit in i64 seconds"))?;

    mint_token_with_expiry(user_id, iat, iat.saturating_add(ttl), security)
}

/// Mint a credential with an explicit issued-at and expiry.
pub fn mint_token_with_expiry(
    user_id: &str,
    iat: i64,
    exp: i64,
    security: &SecurityConfig,
) -> Result<String, AppError> {
    let secret = security
        .secret()
        .ok_or_else(|| AppError::config("SECRET_KEY is not set; cannot sign credentials"))?;

    let claims = Claims {
        user_id: user_id.to_string(),
        iat,
        exp,
    };

    encode(
        &Header::new(security.algorithm),
        &claims,
        &EncodingKey::from_secret(secret),
    )
    .map_err(|e| AppError::internal(format!("Failed to encode JWT: {e}")))
}

/// Verify a credential's signature, then its expiry against `now`.
///
/// Errors:
/// - no secret configured → `ServerMisconfigured`
/// - bad signature or malformed token/payload → `InvalidToken`
/// - valid signature with `now >= exp` → `TokenExpired`
/// - anything else (key handling, crypto provider, clock) → `InternalError`
pub fn verify_token(
    token: &str,
    security: &SecurityConfig,
    now: SystemTime,
) -> Result<Claims, AuthRejection> {
    let secret = security
        .secret()
        .ok_or(AuthRejection::ServerMisconfigured)?;

    // Expiry is checked below with zero leeway; the library only checks the signature
    // and that `exp` is present.
    let mut validation = Validation::new(security.algorithm);
    validation.validate_exp = false;
    validation.leeway = 0;
    validation.set_required_spec_claims(&["exp"]);

    let claims = decode::<Claims>(token, &DecodingKey::from_secret(secret), &validation)
        .map(|data| data.claims)
        .map_err(|e| classify_decode_error(&e))?;

    let now_secs = epoch_secs(now).map_err(|cause| AuthRejection::InternalError { cause })?;
    if now_secs >= claims.exp {
        return Err(AuthRejection::TokenExpired);
    }

    Ok(claims)
}

fn classify_decode_error(e: &jsonwebtoken::errors::Error) -> AuthRejection {
    match e.kind() {
        ErrorKind::ExpiredSignature => AuthRejection::TokenExpired,
        ErrorKind::InvalidToken
        | ErrorKind::InvalidSignature
        | ErrorKind::InvalidAlgorithm
        | ErrorKind::InvalidAlgorithmName
        | ErrorKind::ImmatureSignature
        | ErrorKind::InvalidIssuer
        | ErrorKind::InvalidAudience
        | ErrorKind::InvalidSubject
        | ErrorKind::MissingRequiredClaim(_)
        | ErrorKind::Base64(_)
        | ErrorKind::Json(_)
        | ErrorKind::Utf8(_) => AuthRejection::InvalidToken,
        _ => AuthRejection::InternalError {
            cause: format!("jwt verification failed: {e}"),
        },
    }
}

fn epoch_secs(now: SystemTime) -> Result<i64, String> {
    let secs = now
        .duration_since(UNIX_EPOCH)
        .map_err(|e| format!("system clock is before the unix epoch: {e}"))?
        .as_secs();
    i64::try_from(secs).map_err(|_| "system clock out of range".to_string())
}
