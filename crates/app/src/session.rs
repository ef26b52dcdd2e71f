//! Signed-cookie session carrying the signed-in user and any running quiz.

use axum_extra::extract::SignedCookieJar;
use axum_extra::extract::cookie::{Cookie, Key, SameSite};
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::{Deserialize, Serialize};
use services::QuizState;
use sha2::{Digest, Sha512};
use tracing::debug;

pub const SESSION_COOKIE: &str = "session";

/// Derives the cookie signing key from the configured secret.
#[must_use]
pub fn signing_key(secret: &str) -> Key {
    let digest = Sha512::digest(secret.as_bytes());
    Key::from(digest.as_slice())
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionData {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub quiz: Option<QuizState>,
}

impl SessionData {
    /// A fresh session for `username`; nothing from a previous sign-in carries over.
    #[must_use]
    pub fn signed_in(username: &str) -> Self {
        Self {
            username: Some(username.to_string()),
            quiz: None,
        }
    }

    /// Reads the session; a missing, tampered or unreadable cookie is an empty session.
    #[must_use]
    pub fn from_jar(jar: &SignedCookieJar) -> Self {
        let Some(cookie) = jar.get(SESSION_COOKIE) else {
            return Self::default();
        };
        Self::decode(cookie.value()).unwrap_or_else(|| {
            debug!("discarding unreadable session cookie");
            Self::default()
        })
    }

    /// Stores the session, or removes the cookie once nothing is left in it.
    #[must_use]
    pub fn store(&self, jar: SignedCookieJar) -> SignedCookieJar {
        if *self == Self::default() {
            return Self::clear(jar);
        }
        match self.encode() {
            Some(value) => jar.add(
                Cookie::build((SESSION_COOKIE, value))
                    .path("/")
                    .http_only(true)
                    .same_site(SameSite::Lax),
            ),
            None => Self::clear(jar),
        }
    }

    #[must_use]
    pub fn clear(jar: SignedCookieJar) -> SignedCookieJar {
        jar.remove(Cookie::build(SESSION_COOKIE).path("/"))
    }

    fn encode(&self) -> Option<String> {
        let json = serde_json::to_vec(self).ok()?;
        Some(URL_SAFE_NO_PAD.encode(json))
    }

    fn decode(raw: &str) -> Option<Self> {
        let bytes = URL_SAFE_NO_PAD.decode(raw).ok()?;
        serde_json::from_slice(&bytes).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderMap;
    use quiz_core::model::{GradeTier, Operator, Question};

    #[test]
    fn payload_roundtrips_through_encoding() {
        let session = SessionData {
            username: Some("ada".into()),
            quiz: Some(QuizState::new(
                GradeTier::Grade3,
                vec![Question::arithmetic(2, Operator::Add, 3)],
            )),
        };
        let raw = session.encode().unwrap();
        assert!(!raw.contains('='));
        assert_eq!(SessionData::decode(&raw), Some(session));
    }

    #[test]
    fn garbage_decodes_to_nothing() {
        assert_eq!(SessionData::decode("%%%"), None);
        assert_eq!(SessionData::decode(&URL_SAFE_NO_PAD.encode(b"[1,2]")), None);
    }

    #[test]
    fn cookie_signed_with_another_key_is_ignored() {
        let session = SessionData {
            username: Some("ada".into()),
            quiz: None,
        };
        let jar = session.store(SignedCookieJar::new(signing_key("one")));
        let value = jar.get(SESSION_COOKIE).unwrap().value().to_owned();

        let mut headers = HeaderMap::new();
        headers.insert(
            axum::http::header::COOKIE,
            format!("{SESSION_COOKIE}={value}").parse().unwrap(),
        );
        let forged = SignedCookieJar::from_headers(&headers, signing_key("two"));
        assert_eq!(SessionData::from_jar(&forged), SessionData::default());
    }
}
