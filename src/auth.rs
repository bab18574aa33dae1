use axum::http::{HeaderMap, header};
use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;
use uuid::Uuid;

/// Role
///
/// The closed set of roles the external auth service can mint into a session
/// token. The upstream serializes these as uppercase strings (e.g. `SUPER_ADMIN`),
/// so the serde representation must stay in SCREAMING_SNAKE_CASE.
///
/// Role comparison is always done against this enum, never against raw strings,
/// so an unknown role value fails at the deserialization boundary instead of
/// silently failing a membership check downstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    #[default]
    Student,
    Instructor,
    Admin,
    SuperAdmin,
    Moderator,
}

/// SessionClaims
///
/// The payload structure of the session token issued by the external auth
/// service at login. Only `role` participates in the gateway's routing
/// decisions; the remaining claims are carried for completeness.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    /// The role claim driving the route guard's allow/redirect decision.
    pub role: Role,
    /// Subject: the user's UUID at the auth service.
    #[serde(default)]
    pub sub: Option<Uuid>,
    /// Expiration timestamp. Enforced by the auth service, not by this gateway.
    #[serde(default)]
    pub exp: Option<usize>,
    /// Issued-at timestamp.
    #[serde(default)]
    pub iat: Option<usize>,
}

/// TokenError
///
/// Failure modes of session-token payload parsing. All of them collapse to the
/// same guard outcome (treat the request as unauthenticated), but the distinct
/// variants keep parse failures diagnosable in tests.
#[derive(Debug, Error)]
pub enum TokenError {
    #[error("token is not a three-segment JWT")]
    NotAJwt,
    #[error("token payload is not valid base64url")]
    BadEncoding,
    #[error("token payload is not a valid claims object")]
    BadClaims,
}

/// decode_session_claims
///
/// Extracts the claims object from a compact JWT. This is **format parsing
/// only**: the signature segment is never checked, because token integrity is
/// the auth service's responsibility and this gateway holds no verification
/// key. The claims are trusted at face value.
pub fn decode_session_claims(token: &str) -> Result<SessionClaims, TokenError> {
    let segments: Vec<&str> = token.split('.').collect();
    if segments.len() != 3 {
        return Err(TokenError::NotAJwt);
    }

    let payload = URL_SAFE_NO_PAD
        .decode(segments[1])
        .map_err(|_| TokenError::BadEncoding)?;

    serde_json::from_slice(&payload).map_err(|_| TokenError::BadClaims)
}

/// session_token
///
/// Looks up the named session cookie in a request's headers. Returns None when
/// the Cookie header is absent, unreadable, or does not contain the cookie.
pub fn session_token(headers: &HeaderMap, cookie_name: &str) -> Option<String> {
    let raw = headers.get(header::COOKIE)?.to_str().ok()?;

    raw.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        (name == cookie_name).then(|| value.to_string())
    })
}
