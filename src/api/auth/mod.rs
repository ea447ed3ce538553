//! Authentication API endpoints
//!
//! `POST /auth/login` and `POST /auth/signup`, both answering with
//! `{token, expiresIn}` on success.

mod extract;

use axum::{extract::State, http::StatusCode, routing::post, Router};
use serde::Deserialize;

use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::infrastructure::user::AuthToken;

pub use extract::ValidatedSignup;

/// Create the authentication router
pub fn create_auth_router() -> Router<AppState> {
    Router::new()
        .route("/login", post(login))
        .route("/signup", post(signup))
}

/// Login request. Missing fields read as empty strings.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Login with email and password
///
/// POST /auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<AuthToken>, ApiError> {
    let token = state
        .auth_service
        .login(&request.email, &request.password)
        .await?;

    Ok(Json(token))
}

/// Register a new account
///
/// POST /auth/signup
///
/// The body has already passed the validation stage in [`ValidatedSignup`].
pub async fn signup(
    State(state): State<AppState>,
    ValidatedSignup(fields): ValidatedSignup,
) -> Result<(StatusCode, Json<AuthToken>), ApiError> {
    let token = state.auth_service.signup(fields).await?;

    Ok((StatusCode::CREATED, Json(token)))
}
