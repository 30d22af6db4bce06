use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

use crate::auth::TokenPair;

pub const ACCESS_TOKEN_COOKIE: &str = "accessToken";
pub const REFRESH_TOKEN_COOKIE: &str = "refreshToken";

fn auth_cookie(name: &'static str, value: String, max_age: time::Duration) -> Cookie<'static> {
    Cookie::build((name, value))
        .path("/")
        .http_only(true)
        .secure(true)
        .same_site(SameSite::Lax)
        .max_age(max_age)
        .build()
}

/// Attaches both tokens as http-only cookies. Tokens are also returned in the
/// body for non-browser clients; this is the browser half of that dual delivery.
pub fn set_auth_cookies(jar: CookieJar, pair: &TokenPair, refresh_ttl_days: i64) -> CookieJar {
    jar.add(auth_cookie(
        ACCESS_TOKEN_COOKIE,
        pair.access_token.clone(),
        time::Duration::days(refresh_ttl_days),
    ))
    .add(auth_cookie(
        REFRESH_TOKEN_COOKIE,
        pair.refresh_token.clone(),
        time::Duration::days(refresh_ttl_days),
    ))
}

pub fn clear_auth_cookies(jar: CookieJar) -> CookieJar {
    let mut access = Cookie::from(ACCESS_TOKEN_COOKIE);
    access.set_path("/");
    let mut refresh = Cookie::from(REFRESH_TOKEN_COOKIE);
    refresh.set_path("/");
    jar.remove(access).remove(refresh)
}
