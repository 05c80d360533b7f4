//! Bearer tokens: HS256-signed JWTs carrying typed claims.
//!
//! Tokens are `base64url(header).base64url(claims).base64url(signature)`,
//! signed with HMAC-SHA256 over the first two segments and valid for 72 hours.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{DateTime, Duration, Utc};
use ring::hmac;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::models::Role;

pub const TOKEN_TTL_HOURS: i64 = 72;

/// Claims decoded once at verification time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub id: i64,
    pub username: String,
    pub role: Role,
    /// Expiry as a unix timestamp (seconds)
    pub exp: i64,
}

#[derive(Debug, Serialize, Deserialize)]
struct Header {
    alg: String,
    typ: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Missing, malformed, forged or expired token
    Unauthorized(String),
    /// Valid token without the required role
    Forbidden,
    /// Token could not be produced
    Internal(String),
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthError::Unauthorized(reason) => write!(f, "unauthorized: {}", reason),
            AuthError::Forbidden => write!(f, "forbidden"),
            AuthError::Internal(msg) => write!(f, "token error: {}", msg),
        }
    }
}

impl std::error::Error for AuthError {}

fn unauthorized(reason: &str) -> AuthError {
    AuthError::Unauthorized(reason.to_string())
}

/// Issues and verifies tokens with a shared secret
#[derive(Clone)]
pub struct TokenSigner {
    key: hmac::Key,
    ttl: Duration,
}

impl std::fmt::Debug for TokenSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenSigner")
            .field("key", &"***")
            .field("ttl", &self.ttl)
            .finish()
    }
}

impl TokenSigner {
    pub fn new(secret: &[u8]) -> Self {
        Self {
            key: hmac::Key::new(hmac::HMAC_SHA256, secret),
            ttl: Duration::hours(TOKEN_TTL_HOURS),
        }
    }

    /// Issue a token for a user, valid from now
    pub fn issue(&self, user_id: i64, username: &str, role: Role) -> Result<String, AuthError> {
        self.issue_at(user_id, username, role, Utc::now())
    }

    /// Issue a token as if the current time were `now`
    pub fn issue_at(
        &self,
        user_id: i64,
        username: &str,
        role: Role,
        now: DateTime<Utc>,
    ) -> Result<String, AuthError> {
        let header = Header {
            alg: "HS256".to_string(),
            typ: "JWT".to_string(),
        };
        let claims = Claims {
            id: user_id,
            username: username.to_string(),
            role,
            exp: (now + self.ttl).timestamp(),
        };

        let header = encode_segment(&header)?;
        let claims = encode_segment(&claims)?;
        let signing_input = format!("{}.{}", header, claims);
        let tag = hmac::sign(&self.key, signing_input.as_bytes());
        Ok(format!("{}.{}", signing_input, URL_SAFE_NO_PAD.encode(tag.as_ref())))
    }

    /// Check signature and expiry, returning the decoded claims
    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        self.verify_at(token, Utc::now())
    }

    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, AuthError> {
        let mut parts = token.trim().split('.');
        let (Some(header), Some(claims), Some(signature), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(unauthorized("malformed token"));
        };

        let decoded_header: Header = decode_segment(header)?;
        if decoded_header.alg != "HS256" {
            return Err(unauthorized("unsupported signing algorithm"));
        }

        let signature = URL_SAFE_NO_PAD
            .decode(signature)
            .map_err(|_| unauthorized("malformed signature"))?;
        let signing_input = format!("{}.{}", header, claims);
        hmac::verify(&self.key, signing_input.as_bytes(), &signature)
            .map_err(|_| unauthorized("invalid signature"))?;

        let claims: Claims = decode_segment(claims)?;
        if claims.exp <= now.timestamp() {
            return Err(unauthorized("token expired"));
        }
        Ok(claims)
    }
}

/// Allow the request only if the claims carry `role`
pub fn require_role(claims: &Claims, role: Role) -> Result<(), AuthError> {
    if claims.role == role {
        Ok(())
    } else {
        Err(AuthError::Forbidden)
    }
}

fn encode_segment<T: Serialize>(value: &T) -> Result<String, AuthError> {
    let json = serde_json::to_vec(value).map_err(|e| AuthError::Internal(e.to_string()))?;
    Ok(URL_SAFE_NO_PAD.encode(json))
}

fn decode_segment<T: DeserializeOwned>(segment: &str) -> Result<T, AuthError> {
    let bytes = URL_SAFE_NO_PAD
        .decode(segment)
        .map_err(|_| unauthorized("malformed token"))?;
    serde_json::from_slice(&bytes).map_err(|_| unauthorized("malformed token"))
}
