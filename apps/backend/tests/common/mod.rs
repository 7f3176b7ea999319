#![allow(dead_code)]

use actix_web::cookie::Cookie;
use actix_web::test::TestRequest;

// Logging is auto-installed for every test binary that includes this module
#[ctor::ctor]
fn init_logging() {
    backend_test_support::logging::init();
}

/// GET `uri` carrying `token` in the credential cookie.
pub fn get_with_cookie(uri: &str, token: &str) -> TestRequest {
    TestRequest::get()
        .uri(uri)
        .cookie(Cookie::new("token", token.to_string()))
}

/// Replace the first character of the JWT payload segment.
pub fn tamper_payload(token: &str) -> String {
    let mut parts: Vec<String> = token.split('.').map(str::to_string).collect();
    assert_eq!(parts.len(), 3, "not a JWT: {token}");
    let payload = &mut parts[1];
    let replacement = if payload.starts_with('A') { "B" } else { "A" };
    payload.replace_range(0..1, replacement);
    parts.join(".")
}

pub fn now_secs() -> i64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_secs() as i64
}
