//! Authentication extractors
//!
//! `Identity` authenticates the bearer token of a request; `AdminUser`
//! additionally requires the admin role. Both run before the body is read,
//! so an unauthorized caller is rejected whatever it sent.

use super::guard::Identity;
use crate::error::ApiError;
use crate::state::AppState;
use appointment_booking_shared::{AuthError, Role};
use axum::{
    extract::{FromRef, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
};
use tracing::debug;

/// Extract the token from an `Authorization: Bearer <token>` header
///
/// The scheme is matched case-insensitively.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    let value = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or(AuthError::MissingToken)?;

    let (scheme, token) = value.split_once(' ').ok_or(AuthError::MissingToken)?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return Err(AuthError::MissingToken);
    }

    let token = token.trim();
    if token.is_empty() {
        return Err(AuthError::MissingToken);
    }
    Ok(token)
}

#[axum::async_trait]
impl<S> FromRequestParts<S> for Identity
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);

        let token = bearer_token(&parts.headers).map_err(|e| {
            debug!(cause = %e, "Authentication rejected");
            ApiError::from(e)
        })?;

        app_state.guard().authenticate(token)
    }
}

/// An authenticated caller holding the admin role
#[derive(Debug, Clone)]
pub struct AdminUser(pub Identity);

#[axum::async_trait]
impl<S> FromRequestParts<S> for AdminUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let identity = Identity::from_request_parts(parts, state).await?;
        AppState::from_ref(state)
            .guard()
            .require_role(&identity, Role::Admin)?;
        Ok(AdminUser(identity))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;
    use rstest::rstest;

    fn headers(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[rstest]
    #[case("Bearer abc.def.ghi", "abc.def.ghi")]
    #[case("bearer abc.def.ghi", "abc.def.ghi")]
    #[case("BEARER  abc", "abc")]
    fn test_bearer_token_accepted(#[case] header: &str, #[case] expected: &str) {
        assert_eq!(bearer_token(&headers(header)).unwrap(), expected);
    }

    #[rstest]
    #[case("Basic dXNlcjpwYXNz")]
    #[case("Bearer")]
    #[case("Bearer ")]
    #[case("abc.def.ghi")]
    fn test_bearer_token_rejected(#[case] header: &str) {
        assert_eq!(
            bearer_token(&headers(header)),
            Err(AuthError::MissingToken)
        );
    }

    #[test]
    fn test_missing_header() {
        assert_eq!(
            bearer_token(&HeaderMap::new()),
            Err(AuthError::MissingToken)
        );
    }
}
