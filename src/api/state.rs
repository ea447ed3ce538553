//! Application state for shared services

use std::sync::Arc;

use crate::domain::user::{SignupFields, SignupForm, UserRepository};
use crate::domain::AuthError;
use crate::infrastructure::user::{AuthService, AuthToken, PasswordHasher};

/// Application state containing shared services using dynamic dispatch
#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<dyn AuthServiceTrait>,
}

impl AppState {
    pub fn new(auth_service: Arc<dyn AuthServiceTrait>) -> Self {
        Self { auth_service }
    }
}

/// Trait for auth service operations
#[async_trait::async_trait]
pub trait AuthServiceTrait: Send + Sync {
    async fn login(&self, email: &str, password: &str) -> Result<AuthToken, AuthError>;
    async fn validate_signup(&self, form: SignupForm) -> Result<SignupFields, AuthError>;
    async fn signup(&self, fields: SignupFields) -> Result<AuthToken, AuthError>;
    async fn ping(&self) -> Result<(), AuthError>;
}

#[async_trait::async_trait]
impl<R, H> AuthServiceTrait for AuthService<R, H>
where
    R: UserRepository + 'static,
    H: PasswordHasher + 'static,
{
    async fn login(&self, email: &str, password: &str) -> Result<AuthToken, AuthError> {
        AuthService::login(self, email, password).await
    }

    async fn validate_signup(&self, form: SignupForm) -> Result<SignupFields, AuthError> {
        AuthService::validate_signup(self, form).await
    }

    async fn signup(&self, fields: SignupFields) -> Result<AuthToken, AuthError> {
        AuthService::signup(self, fields).await
    }

    async fn ping(&self) -> Result<(), AuthError> {
        AuthService::ping(self).await
    }
}
