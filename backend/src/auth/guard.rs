//! Access guard
//!
//! Resolves bearer tokens to identities and enforces role checks. Only the
//! token's `sub` claim is trusted; the role always comes from the credential
//! store at verification time.

use super::credentials::CredentialStore;
use super::jwt::JwtService;
use super::password::PasswordService;
use crate::error::ApiError;
use appointment_booking_shared::{AuthError, Role};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::{debug, warn};

/// The authenticated caller of one request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub username: String,
    pub role: Role,
}

/// Token verification plus role enforcement over a credential store
#[derive(Clone)]
pub struct AccessGuard {
    jwt: JwtService,
    credentials: Arc<CredentialStore>,
}

impl AccessGuard {
    pub fn new(jwt: JwtService, credentials: CredentialStore) -> Self {
        Self {
            jwt,
            credentials: Arc::new(credentials),
        }
    }

    /// Check a username/password pair and issue a token for it
    pub async fn login(&self, username: &str, password: &str) -> Result<String, ApiError> {
        let Some(credential) = self.credentials.get(username) else {
            warn!(username, "Login failed: unknown user");
            return Err(AuthError::InvalidCredentials.into());
        };

        let valid =
            PasswordService::verify_async(password.to_string(), credential.password.clone())
                .await
                .map_err(ApiError::Internal)?;
        if !valid {
            warn!(username, "Login failed: wrong password");
            return Err(AuthError::InvalidCredentials.into());
        }

        let token = self.jwt.issue(username, None).map_err(ApiError::Internal)?;
        debug!(username, role = %credential.role, "Token issued");
        Ok(token)
    }

    /// Verify a token and resolve its subject, keeping the precise cause
    pub fn verify(&self, token: &str) -> Result<Identity, AuthError> {
        self.verify_at(token, Utc::now())
    }

    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<Identity, AuthError> {
        let claims = self.jwt.validate_token_at(token, now)?;

        let credential = self
            .credentials
            .get(&claims.sub)
            .ok_or_else(|| AuthError::UnknownSubject(claims.sub.clone()))?;

        Ok(Identity {
            username: credential.username.clone(),
            role: credential.role,
        })
    }

    /// Verify a token; every failure collapses into a single 401
    pub fn authenticate(&self, token: &str) -> Result<Identity, ApiError> {
        self.verify(token).map_err(|e| {
            debug!(cause = %e, "Authentication rejected");
            ApiError::from(e)
        })
    }

    /// Fail with 403 unless the identity holds exactly `required`
    pub fn require_role(&self, identity: &Identity, required: Role) -> Result<(), ApiError> {
        if identity.role != required {
            warn!(
                username = %identity.username,
                role = %identity.role,
                required = %required,
                "Forbidden"
            );
            return Err(AuthError::Forbidden { required }.into());
        }
        Ok(())
    }

    #[inline]
    pub fn jwt(&self) -> &JwtService {
        &self.jwt
    }

    #[inline]
    pub fn credentials(&self) -> &CredentialStore {
        &self.credentials
    }
}
