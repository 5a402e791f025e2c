//! Per-client session state.
//!
//! A session is a signed token naming one user id. It travels in the
//! `session` cookie (or an `Authorization: Bearer` header) and is never
//! written to the store. A missing, expired or forged token means "no
//! session", never an error.

use std::{convert::Infallible, time::Duration};

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use time::{Duration as TimeDuration, OffsetDateTime};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::{config::SessionConfig, error::AppError, state::AppState};

pub const SESSION_COOKIE: &str = "session";

/// Session token payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,   // user ID
    pub iat: usize,  // issued at (unix timestamp)
    pub exp: usize,  // expires at (unix timestamp)
    pub iss: String, // issuer
    pub aud: String, // audience
}

/// Signing and verification keys for session tokens.
#[derive(Clone)]
pub struct SessionKeys {
    pub encoding: EncodingKey,
    pub decoding: DecodingKey,
    pub issuer: String,
    pub audience: String,
    pub ttl: Duration,
}

impl FromRef<AppState> for SessionKeys {
    fn from_ref(state: &AppState) -> Self {
        let SessionConfig {
            secret,
            issuer,
            audience,
            ttl_minutes,
        } = state.config.session.clone();
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            issuer,
            audience,
            ttl: Duration::from_secs((ttl_minutes.max(0) as u64) * 60),
        }
    }
}

impl SessionKeys {
    pub fn sign(&self, user_id: Uuid) -> anyhow::Result<String> {
        let now = OffsetDateTime::now_utc();
        let exp = now + TimeDuration::seconds(self.ttl.as_secs() as i64);
        let claims = Claims {
            sub: user_id,
            iat: now.unix_timestamp() as usize,
            exp: exp.unix_timestamp() as usize,
            iss: self.issuer.clone(),
            aud: self.audience.clone(),
        };
        let token = encode(&Header::default(), &claims, &self.encoding)?;
        debug!(user_id = %user_id, "session token signed");
        Ok(token)
    }

    pub fn verify(&self, token: &str) -> anyhow::Result<Claims> {
        let mut validation = Validation::default();
        validation.set_audience(std::slice::from_ref(&self.audience));
        validation.set_issuer(std::slice::from_ref(&self.issuer));
        let data = decode::<Claims>(token, &self.decoding, &validation)?;
        Ok(data.claims)
    }

    /// Cookie carrying a freshly signed token for `user_id`.
    pub fn cookie(&self, user_id: Uuid) -> anyhow::Result<Cookie<'static>> {
        let token = self.sign(user_id)?;
        Ok(Cookie::build((SESSION_COOKIE, token))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .max_age(TimeDuration::seconds(self.ttl.as_secs() as i64))
            .build())
    }
}

/// Removal cookie for the session; path must match the one it was set with.
pub fn removal_cookie() -> Cookie<'static> {
    Cookie::build(SESSION_COOKIE).path("/").build()
}

fn token_from_parts(parts: &Parts) -> Option<String> {
    let bearer = parts
        .headers
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::to_owned);

    bearer.or_else(|| {
        CookieJar::from_headers(&parts.headers)
            .get(SESSION_COOKIE)
            .map(|c| c.value().to_owned())
    })
}

/// The current session's user id, if any.
#[derive(Debug, Clone, Copy)]
pub struct Session(pub Option<Uuid>);

#[async_trait]
impl<S> FromRequestParts<S> for Session
where
    S: Send + Sync,
    SessionKeys: FromRef<S>,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Some(token) = token_from_parts(parts) else {
            return Ok(Session(None));
        };

        let keys = SessionKeys::from_ref(state);
        match keys.verify(&token) {
            Ok(claims) => Ok(Session(Some(claims.sub))),
            Err(e) => {
                warn!(error = %e, "ignoring invalid session token");
                Ok(Session(None))
            }
        }
    }
}

/// Like [`Session`] but rejects the request when nobody is signed in.
#[derive(Debug, Clone, Copy)]
pub struct CurrentUser(pub Uuid);

#[async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
    SessionKeys: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Session(user_id) = match Session::from_request_parts(parts, state).await {
            Ok(session) => session,
            Err(never) => match never {},
        };
        user_id.map(CurrentUser).ok_or(AppError::Unauthorized)
    }
}
