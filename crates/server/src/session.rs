//! Signed cookies carrying the logged-in user and the pending OAuth state.
//!
//! The session only records which provider the user came from and the
//! username the provider reported; tokens stay in the directory.

use api_types::{ProviderKind, user::SessionUser};
use axum_extra::extract::cookie::{Cookie, SameSite, SignedCookieJar};
use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};

pub(crate) const SESSION_COOKIE: &str = "session";
pub(crate) const STATE_COOKIE: &str = "oauth_state";

fn encode(user: &SessionUser) -> String {
    URL_SAFE_NO_PAD.encode(format!("{}:{}", user.provider, user.username))
}

fn decode(value: &str) -> Option<SessionUser> {
    let raw = String::from_utf8(URL_SAFE_NO_PAD.decode(value).ok()?).ok()?;
    let (provider, username) = raw.split_once(':')?;
    Some(SessionUser {
        provider: provider.parse().ok()?,
        username: username.to_string(),
    })
}

pub(crate) fn user(jar: &SignedCookieJar) -> Option<SessionUser> {
    decode(jar.get(SESSION_COOKIE)?.value())
}

/// Session user, only when it logged in through `provider`.
pub(crate) fn user_for(jar: &SignedCookieJar, provider: ProviderKind) -> Option<SessionUser> {
    user(jar).filter(|user| user.provider == provider)
}

pub(crate) fn login(jar: SignedCookieJar, user: &SessionUser) -> SignedCookieJar {
    jar.add(
        Cookie::build((SESSION_COOKIE, encode(user)))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .max_age(time::Duration::days(7)),
    )
}

pub(crate) fn logout(jar: SignedCookieJar) -> SignedCookieJar {
    jar.remove(Cookie::build(SESSION_COOKIE).path("/"))
}

pub(crate) fn remember_state(jar: SignedCookieJar, state: String) -> SignedCookieJar {
    jar.add(
        Cookie::build((STATE_COOKIE, state))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .max_age(time::Duration::minutes(10)),
    )
}

/// Removes the pending state and returns it. A state is good for one callback.
pub(crate) fn take_state(jar: SignedCookieJar) -> (SignedCookieJar, Option<String>) {
    let state = jar.get(STATE_COOKIE).map(|cookie| cookie.value().to_string());
    (jar.remove(Cookie::build(STATE_COOKIE).path("/")), state)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_value_survives_separators() {
        let user = SessionUser {
            provider: ProviderKind::Facebook,
            username: "Jane: the Doe; again".to_string(),
        };
        assert_eq!(decode(&encode(&user)), Some(user));
    }

    #[test]
    fn garbage_is_not_a_session() {
        assert_eq!(decode("not base64!"), None);
        assert_eq!(decode(&URL_SAFE_NO_PAD.encode("myspace:bob")), None);
        assert_eq!(decode(&URL_SAFE_NO_PAD.encode("no separator")), None);
    }
}
