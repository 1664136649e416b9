//! Client-side session: a readable `user` cookie holding `{email, name}`.
//!
//! There is no server-side validation. Any syntactically valid email with a
//! non-empty password is accepted.

use std::convert::Infallible;

use axum::extract::{FromRequestParts, OptionalFromRequestParts};
use axum::http::request::Parts;
use axum::response::Redirect;
use axum_extra::extract::cookie::{Cookie, SameSite};
use dasos_config::SessionConfig;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub email: String,
    pub name: String,
}

impl Session {
    /// Display name is the local part of the address.
    pub fn for_email(email: &str) -> Self {
        let email = email.trim();
        let name = email.split('@').next().unwrap_or_default();
        Self { email: email.to_string(), name: name.to_string() }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialError {
    InvalidEmail,
    MissingPassword,
}

impl CredentialError {
    pub fn message(self) -> &'static str {
        match self {
            CredentialError::InvalidEmail => "Email inválido",
            CredentialError::MissingPassword => "Contraseña requerida",
        }
    }
}

impl LoginForm {
    pub fn validate(&self) -> Result<Session, CredentialError> {
        if !self.email.contains('@') {
            return Err(CredentialError::InvalidEmail);
        }
        if self.password.is_empty() {
            return Err(CredentialError::MissingPassword);
        }
        Ok(Session::for_email(&self.email))
    }
}

/// Percent-encoded JSON.
pub fn encode_cookie_value(session: &Session) -> String {
    let json = serde_json::to_string(session).unwrap_or_default();
    urlencoding::encode(&json).into_owned()
}

/// Accepts the value with or without its percent-encoding layer. Anything
/// that is not a `{email, name}` object is rejected.
pub fn decode_cookie_value(raw: &str) -> Option<Session> {
    if let Ok(session) = serde_json::from_str::<Session>(raw) {
        return Some(session);
    }
    let decoded = urlencoding::decode(raw).ok()?;
    serde_json::from_str(&decoded).ok()
}

pub fn session_cookie(session: &Session, config: &SessionConfig) -> Cookie<'static> {
    Cookie::build((config.cookie_name.clone(), encode_cookie_value(session)))
        .path("/")
        .same_site(SameSite::Lax)
        .max_age(time::Duration::days(config.max_age_days))
        .build()
}

/// Matches the path of [`session_cookie`] so the browser drops it.
pub fn removal_cookie(config: &SessionConfig) -> Cookie<'static> {
    Cookie::build((config.cookie_name.clone(), "")).path("/").build()
}

/// Injected by the route guard as a request extension.
impl<S> FromRequestParts<S> for Session
where
    S: Send + Sync,
{
    type Rejection = Redirect;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Session>()
            .cloned()
            .ok_or_else(|| Redirect::to("/login"))
    }
}

/// For handlers that also serve anonymous requests.
impl<S> OptionalFromRequestParts<S> for Session
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Option<Self>, Self::Rejection> {
        Ok(parts.extensions.get::<Session>().cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn form(email: &str, password: &str) -> LoginForm {
        LoginForm { email: email.to_string(), password: password.to_string() }
    }

    #[test]
    fn test_any_address_with_password_is_accepted() {
        let session = form("alumno@alumnos.upm.es", "x").validate().unwrap();
        assert_eq!(
            session,
            Session { email: "alumno@alumnos.upm.es".into(), name: "alumno".into() }
        );
    }

    #[test]
    fn test_rejections() {
        assert_eq!(form("alumno", "x").validate(), Err(CredentialError::InvalidEmail));
        assert_eq!(form("a@b", "").validate(), Err(CredentialError::MissingPassword));
        assert_eq!(CredentialError::InvalidEmail.message(), "Email inválido");
        assert_eq!(CredentialError::MissingPassword.message(), "Contraseña requerida");
    }

    #[test]
    fn test_cookie_value_round_trip() {
        let session = Session::for_email("maría@upm.es");
        let encoded = encode_cookie_value(&session);
        assert!(!encoded.contains('"'));
        assert_eq!(decode_cookie_value(&encoded), Some(session.clone()));

        let raw = serde_json::to_string(&session).unwrap();
        assert_eq!(decode_cookie_value(&raw), Some(session));
    }

    #[test]
    fn test_malformed_values_are_rejected() {
        assert_eq!(decode_cookie_value("not-json"), None);
        assert_eq!(decode_cookie_value("%7B%22email%22%3A1%7D"), None);
        assert_eq!(decode_cookie_value(""), None);
    }

    #[test]
    fn test_cookie_attributes() {
        let config = SessionConfig::default();
        let cookie = session_cookie(&Session::for_email("a@b.es"), &config);
        assert_eq!(cookie.name(), "user");
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.max_age(), Some(time::Duration::days(7)));
    }
}
