//! Authentication routes
//!
//! `POST /token` exchanges form-encoded credentials for a bearer token.

use crate::error::ApiResult;
use crate::services::AuthService;
use crate::state::AppState;
use appointment_booking_shared::{LoginForm, TokenResponse};
use axum::{extract::State, routing::post, Form, Json, Router};

/// Create auth routes
pub fn auth_routes() -> Router<AppState> {
    Router::new().route("/token", post(login))
}

/// Login with username and password
///
/// POST /token
async fn login(
    State(state): State<AppState>,
    Form(form): Form<LoginForm>,
) -> ApiResult<Json<TokenResponse>> {
    let tokens = AuthService::login(state.guard(), &form).await?;
    Ok(Json(tokens))
}
