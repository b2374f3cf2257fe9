//! Signed, time-bound identity tokens.
//!
//! The codec is stateless: there is no server-side session store and no
//! revocation list. Validity is purely cryptographic plus expiry. Ban
//! enforcement happens downstream at principal resolution, not here.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenError {
    /// The token could not be parsed or decoded.
    #[error("token is malformed")]
    Malformed,

    /// The signature does not match the token contents.
    #[error("token signature mismatch")]
    BadSignature,

    /// The token's expiry has passed.
    #[error("token has expired")]
    Expired,
}

/// Creates and verifies identity tokens.
///
/// `now` is always supplied by the caller so that expiry decisions are
/// deterministic and testable; the codec never reads the wall clock.
pub trait TokenCodec: Send + Sync {
    /// Produce a signed token for `subject`, expiring at `now + ttl`.
    fn issue(&self, subject: &str, now: DateTime<Utc>) -> Result<String, TokenError>;

    /// Verify signature and expiry, returning the embedded subject.
    fn verify(&self, token: &str, now: DateTime<Utc>) -> Result<String, TokenError>;
}

/// Claims carried by every issued token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct TokenClaims {
    /// Standard JWT subject — set to the username.
    sub: String,

    /// Issued-at (unix seconds).
    iat: i64,

    /// Expiry (unix seconds).
    exp: i64,
}

/// HMAC-SHA256 token codec.
///
/// Key material is process-wide state, initialized once at startup and never
/// rotated mid-process. The same secret verifies what it signs.
pub struct Hs256TokenCodec {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl Hs256TokenCodec {
    pub fn new(secret: &[u8], ttl: Duration) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }
}

impl TokenCodec for Hs256TokenCodec {
    fn issue(&self, subject: &str, now: DateTime<Utc>) -> Result<String, TokenError> {
        let claims = TokenClaims {
            sub: subject.to_string(),
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|_| TokenError::Malformed)
    }

    fn verify(&self, token: &str, now: DateTime<Utc>) -> Result<String, TokenError> {
        // Expiry is judged against the caller-supplied clock below, not the
        // library's idea of the current time.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.required_spec_claims.clear();

        let data =
            decode::<TokenClaims>(token, &self.decoding, &validation).map_err(|e| {
                match e.kind() {
                    ErrorKind::InvalidSignature => TokenError::BadSignature,
                    _ => TokenError::Malformed,
                }
            })?;

        if now.timestamp() >= data.claims.exp {
            return Err(TokenError::Expired);
        }

        Ok(data.claims.sub)
    }
}
