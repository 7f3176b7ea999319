use actix_web::http::header;
use actix_web::HttpRequest;

use crate::auth::cookie::TOKEN_COOKIE;

/// Pull the raw credential off a request.
///
/// The `token` cookie wins; an `Authorization: Bearer <token>` header is the
/// fallback for non-browser clients. Empty or malformed values count as absent.
pub fn credential_from_request(req: &HttpRequest) -> Option<String> {
    if let Some(cookie) = req.cookie(TOKEN_COOKIE) {
        let value = cookie.value().trim();
        if !value.is_empty() {
            return Some(value.to_string());
        }
    }

    bearer_from_header(req)
}

fn bearer_from_header(req: &HttpRequest) -> Option<String> {
    let auth_str = req.headers().get(header::AUTHORIZATION)?.to_str().ok()?;

    let mut parts = auth_str.split_whitespace();
    match (parts.next(), parts.next(), parts.next()) {
        (Some("Bearer"), Some(token), None) => Some(token.to_string()),
        _ => None,
    }
}
