//! Login service

use crate::auth::AccessGuard;
use crate::error::ApiError;
use appointment_booking_shared::{LoginForm, TokenResponse};
use tracing::info;

/// Token issuance for `POST /token`
pub struct AuthService;

impl AuthService {
    /// Exchange a username/password form for a bearer token
    pub async fn login(guard: &AccessGuard, form: &LoginForm) -> Result<TokenResponse, ApiError> {
        let access_token = guard.login(&form.username, &form.password).await?;
        info!(username = %form.username, "User logged in");

        Ok(TokenResponse::bearer(
            access_token,
            guard.jwt().access_token_expiry_secs(),
        ))
    }
}
