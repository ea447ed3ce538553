//! Signup validation stage as an axum extractor

use axum::{
    extract::{FromRequest, Request},
    response::{IntoResponse, Response},
};

use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::user::{SignupFields, SignupForm};

/// Extractor yielding signup fields that passed validation.
///
/// Rejects with 400 on a malformed body and 422 with the first offending
/// field otherwise, before the handler runs.
#[derive(Debug, Clone)]
pub struct ValidatedSignup(pub SignupFields);

impl FromRequest<AppState> for ValidatedSignup {
    type Rejection = Response;

    async fn from_request(req: Request, state: &AppState) -> Result<Self, Self::Rejection> {
        let Json(form) = Json::<SignupForm>::from_request(req, state)
            .await
            .map_err(IntoResponse::into_response)?;

        let fields = state
            .auth_service
            .validate_signup(form)
            .await
            .map_err(|e| ApiError::from(e).into_response())?;

        Ok(ValidatedSignup(fields))
    }
}
