//! Session credentials: HS256 JWTs wrapping a caller-supplied identity.
//!
//! Tokens are stateless. Revocation only happens client-side by clearing the
//! cookie, so a copied token stays valid until `exp`.

use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::AppError;
use crate::models::Identity;

/// Lifetime of an issued credential.
pub const DEFAULT_TOKEN_TTL_SECS: i64 = 60 * 60;

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    #[serde(flatten)]
    identity: Map<String, Value>,
    iat: i64,
    exp: i64,
}

/// Signs and verifies session credentials with a shared server secret.
#[derive(Clone)]
pub struct TokenIssuer {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl TokenIssuer {
    pub fn new(secret: &str) -> Self {
        Self::with_ttl(secret, Duration::seconds(DEFAULT_TOKEN_TTL_SECS))
    }

    pub fn with_ttl(secret: &str, ttl: Duration) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        // Identities may carry any claims, `aud` included
        validation.validate_aud = false;

        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Sign `identity` with a fresh `iat` and `exp = iat + ttl`.
    ///
    /// Any `iat`/`exp` the caller put in the identity are overwritten.
    pub fn issue(&self, identity: Identity) -> Result<String, AppError> {
        let mut claims = identity.0;
        claims.remove("iat");
        claims.remove("exp");

        let iat = Utc::now().timestamp();
        let claims = Claims {
            identity: claims,
            iat,
            exp: iat + self.ttl.num_seconds(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| AppError::TokenError(e.to_string()))
    }

    /// Check a presented credential and return the identity it carries.
    ///
    /// `None` means the caller sent no credential at all.
    pub fn verify(&self, token: Option<&str>) -> Result<Identity, AppError> {
        let token = token.ok_or(AppError::Unauthenticated)?;

        let data = decode::<Claims>(token, &self.decoding, &self.validation).map_err(|e| {
            tracing::debug!(error = %e, "token verification failed");
            AppError::InvalidToken(e.to_string())
        })?;

        Ok(Identity::new(data.claims.identity))
    }
}
