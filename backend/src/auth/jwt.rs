//! JWT token generation and validation
//!
//! Issues and validates HMAC-signed access tokens with pre-computed keys.
//! Only the signature, structure and expiry are checked here; resolving the
//! subject to a credential is the access guard's job.

use anyhow::Result;
use appointment_booking_shared::AuthError;
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

/// Longest token lifetime the service will hand out (one year)
pub const MAX_TOKEN_TTL_SECS: i64 = 365 * 24 * 60 * 60;

/// JWT claims
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (username)
    pub sub: String,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at (Unix timestamp)
    #[serde(default)]
    pub iat: i64,
}

/// Pre-computed JWT keys for efficient token operations
#[derive(Clone)]
pub struct JwtKeys {
    encoding: Arc<EncodingKey>,
    decoding: Arc<DecodingKey>,
}

impl JwtKeys {
    /// Create new JWT keys from secret
    pub fn new(secret: &str) -> Self {
        Self {
            encoding: Arc::new(EncodingKey::from_secret(secret.as_bytes())),
            decoding: Arc::new(DecodingKey::from_secret(secret.as_bytes())),
        }
    }

    pub fn encoding(&self) -> &EncodingKey {
        &self.encoding
    }

    pub fn decoding(&self) -> &DecodingKey {
        &self.decoding
    }
}

/// JWT service for token operations
///
/// Created once at startup from configuration; cloning shares the keys.
#[derive(Clone)]
pub struct JwtService {
    keys: JwtKeys,
    algorithm: Algorithm,
    default_ttl: Duration,
}

impl JwtService {
    /// Create a new JWT service with pre-computed keys
    ///
    /// The default lifetime is capped at [`MAX_TOKEN_TTL_SECS`].
    pub fn new(secret: &str, algorithm: Algorithm, access_token_expiry_secs: i64) -> Self {
        let default_ttl = Duration::try_seconds(access_token_expiry_secs.min(MAX_TOKEN_TTL_SECS))
            .unwrap_or_else(Duration::zero);

        Self {
            keys: JwtKeys::new(secret),
            algorithm,
            default_ttl,
        }
    }

    /// Issue a token for `subject`, valid for `ttl` or the configured default
    pub fn issue(&self, subject: &str, ttl: Option<Duration>) -> Result<String> {
        self.issue_at(subject, ttl, Utc::now())
    }

    /// Issue a token as if the current time were `issued_at`
    pub fn issue_at(
        &self,
        subject: &str,
        ttl: Option<Duration>,
        issued_at: DateTime<Utc>,
    ) -> Result<String> {
        if subject.is_empty() {
            anyhow::bail!("Token subject must not be empty");
        }

        let exp = issued_at
            .checked_add_signed(ttl.unwrap_or(self.default_ttl))
            .ok_or_else(|| anyhow::anyhow!("Token lifetime overflows the expiry timestamp"))?;
        let claims = Claims {
            sub: subject.to_string(),
            exp: exp.timestamp(),
            iat: issued_at.timestamp(),
        };

        encode(&Header::new(self.algorithm), &claims, self.keys.encoding())
            .map_err(|e| anyhow::anyhow!("Failed to generate token: {}", e))
    }

    /// Validate a token against the current time and return its claims
    #[inline]
    pub fn validate_token(&self, token: &str) -> Result<Claims, AuthError> {
        self.validate_token_at(token, Utc::now())
    }

    /// Validate a token against `now`
    ///
    /// A token is still valid at the exact second of `exp`; no leeway applies.
    pub fn validate_token_at(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, AuthError> {
        // Expiry is checked below against `now`, but the claim must still be present.
        let mut validation = Validation::new(self.algorithm);
        validation.validate_exp = false;
        validation.leeway = 0;

        let claims = decode::<Claims>(token, self.keys.decoding(), &validation)
            .map_err(|e| {
                debug!(error = %e, "Token rejected");
                AuthError::InvalidToken
            })?
            .claims;

        if now.timestamp() > claims.exp {
            debug!(sub = %claims.sub, exp = claims.exp, "Token expired");
            return Err(AuthError::TokenExpired);
        }

        Ok(claims)
    }

    /// Default token lifetime in seconds
    #[inline]
    pub fn access_token_expiry_secs(&self) -> i64 {
        self.default_ttl.num_seconds()
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }
}
