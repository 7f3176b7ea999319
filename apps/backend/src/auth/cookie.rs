use actix_web::cookie::{Cookie, SameSite};

/// Name of the cookie that carries the credential.
pub const TOKEN_COOKIE: &str = "token";

/// Cookie delivering a freshly minted credential to the browser.
pub fn auth_cookie(token: impl Into<String>, ttl: std::time::Duration) -> Cookie<'static> {
    let max_age = i64::try_from(ttl.as_secs()).unwrap_or(i64::MAX);

    Cookie::build(TOKEN_COOKIE, token.into())
        .http_only(true)
        .same_site(SameSite::Strict)
        .path("/")
        .max_age(time::Duration::seconds(max_age))
        .finish()
}

/// Cookie that overwrites and immediately expires the credential.
pub fn logout_cookie() -> Cookie<'static> {
    Cookie::build(TOKEN_COOKIE, "")
        .http_only(true)
        .same_site(SameSite::Strict)
        .path("/")
        .max_age(time::Duration::ZERO)
        .finish()
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use actix_web::cookie::SameSite;

    use super::*;

    #[test]
    fn auth_cookie_is_http_only_and_strict() {
        let cookie = auth_cookie("abc.def.ghi", Duration::from_secs(86_400));

        assert_eq!(cookie.name(), "token");
        assert_eq!(cookie.value(), "abc.def.ghi");
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Strict));
        assert_eq!(cookie.max_age(), Some(time::Duration::seconds(86_400)));
    }

    #[test]
    fn logout_cookie_expires_immediately() {
        let cookie = logout_cookie();

        assert_eq!(cookie.value(), "");
        assert_eq!(cookie.max_age(), Some(time::Duration::ZERO));
        assert!(cookie.to_string().contains("Max-Age=0"));
    }
}
