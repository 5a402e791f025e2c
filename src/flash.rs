//! One-shot messages carried across a redirect in a `flash` cookie.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

pub const FLASH_COOKIE: &str = "flash";

pub fn set(jar: CookieJar, message: impl Into<String>) -> CookieJar {
    jar.add(
        Cookie::build((FLASH_COOKIE, message.into()))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .build(),
    )
}

/// Reads the pending message and schedules its removal.
pub fn take(jar: CookieJar) -> (CookieJar, Option<String>) {
    let message = jar.get(FLASH_COOKIE).map(|c| c.value().to_owned());
    match message {
        Some(_) => (jar.remove(Cookie::build(FLASH_COOKIE).path("/").build()), message),
        None => (jar, None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn take_consumes_the_message() {
        let jar = set(CookieJar::new(), "Account created! Please sign in.");
        let (jar, message) = take(jar);
        assert_eq!(message.as_deref(), Some("Account created! Please sign in."));
        assert!(jar.get(FLASH_COOKIE).is_none());
    }

    #[test]
    fn take_without_message_is_a_noop() {
        let (_, message) = take(CookieJar::new());
        assert!(message.is_none());
    }
}
