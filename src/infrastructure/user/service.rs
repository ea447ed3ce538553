//! Authentication service: credential verification and account registration

use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::domain::user::{normalize_email, SignupFields, SignupForm, User, UserId, UserRepository};
use crate::domain::AuthError;
use crate::infrastructure::auth::TokenIssuer;
use crate::infrastructure::observability::{record_auth_attempt, AuthOutcome};

use super::password::PasswordHasher;

/// Default value reported as `expiresIn`
pub const DEFAULT_EXPIRES_IN_SECONDS: u64 = 3600;

const EMAIL_TAKEN: &str = "E-Mail address already exists!";

/// Settings consumed by the auth service at construction time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthSettings {
    /// Value reported to clients as `expiresIn`
    pub expires_in_seconds: u64,
}

impl Default for AuthSettings {
    fn default() -> Self {
        Self {
            expires_in_seconds: DEFAULT_EXPIRES_IN_SECONDS,
        }
    }
}

/// Token handed back after a successful login or signup
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthToken {
    pub token: String,
    pub expires_in: String,
}

/// Service verifying credentials and registering accounts
#[derive(Debug)]
pub struct AuthService<R: UserRepository, H: PasswordHasher> {
    repository: Arc<R>,
    hasher: Arc<H>,
    tokens: Arc<dyn TokenIssuer>,
    settings: AuthSettings,
}

impl<R, H> AuthService<R, H>
where
    R: UserRepository,
    H: PasswordHasher + 'static,
{
    /// Create a new auth service
    pub fn new(
        repository: Arc<R>,
        hasher: Arc<H>,
        tokens: Arc<dyn TokenIssuer>,
        settings: AuthSettings,
    ) -> Self {
        Self {
            repository,
            hasher,
            tokens,
            settings,
        }
    }

    /// Verify an email/password pair and issue a token.
    ///
    /// The email is normalized the same way signup stores it. Performs
    /// exactly one lookup and never mutates the store.
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthToken, AuthError> {
        let started = Instant::now();
        let result = self.verify_credentials(email, password).await;

        record_auth_attempt("login", outcome_of(&result), started.elapsed());

        match &result {
            Ok((user_id, _)) => info!(user_id = %user_id, "User logged in"),
            Err(AuthError::Unclassified { message }) => warn!(error = %message, "Login failed"),
            Err(e) => debug!(kind = e.kind(), field = ?e.field(), "Login rejected: {}", e.message()),
        }

        result.map(|(_, token)| token)
    }

    /// Run the signup validation stage.
    ///
    /// Normalizes the form, reports the first field problem as a 422 and,
    /// once every field passes, checks that the email is not taken.
    pub async fn validate_signup(&self, form: SignupForm) -> Result<SignupFields, AuthError> {
        let form = form.normalized();

        if let Some(issue) = form.issues().into_iter().next() {
            record_auth_attempt("signup", AuthOutcome::Invalid, Duration::ZERO);
            debug!(field = %issue.field, "Signup rejected: {}", issue.message);

            return Err(AuthError::validation(issue.field, issue.message));
        }

        if self.email_registered(&form.email).await? {
            record_auth_attempt("signup", AuthOutcome::Invalid, Duration::ZERO);
            debug!(email = %form.email, "Signup rejected: email already registered");

            return Err(AuthError::validation("email", EMAIL_TAKEN));
        }

        Ok(form.into())
    }

    /// Create an account from validated fields and issue a token
    pub async fn signup(&self, fields: SignupFields) -> Result<AuthToken, AuthError> {
        let started = Instant::now();
        let result = self.register(fields).await;

        record_auth_attempt("signup", outcome_of(&result), started.elapsed());

        match result {
            Ok((user_id, token)) => {
                info!(user_id = %user_id, "User signed up");
                Ok(token)
            }
            Err(e) => {
                warn!(error = %e, "Signup failed");
                Err(e)
            }
        }
    }

    /// Check whether an email already belongs to an account
    pub async fn email_registered(&self, email: &str) -> Result<bool, AuthError> {
        Ok(self.repository.email_exists(email).await?)
    }

    /// Verify the user store is reachable
    pub async fn ping(&self) -> Result<(), AuthError> {
        Ok(self.repository.ping().await?)
    }

    async fn verify_credentials(
        &self,
        email: &str,
        password: &str,
    ) -> Result<(UserId, AuthToken), AuthError> {
        let user = self
            .repository
            .get_by_email(&normalize_email(email))
            .await?
            .ok_or_else(AuthError::user_not_found)?;

        let hasher = Arc::clone(&self.hasher);
        let candidate = password.to_string();
        let stored = user.password_hash().to_string();

        let matches = tokio::task::spawn_blocking(move || hasher.verify(&candidate, &stored))
            .await
            .map_err(|e| AuthError::unclassified(format!("Password check aborted: {}", e)))?;

        if !matches {
            return Err(AuthError::wrong_password());
        }

        let token = self.issue_token(&user)?;

        Ok((user.id().clone(), token))
    }

    async fn register(&self, fields: SignupFields) -> Result<(UserId, AuthToken), AuthError> {
        let SignupFields {
            name,
            email,
            password,
        } = fields;

        let hasher = Arc::clone(&self.hasher);
        let password_hash = tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| AuthError::unclassified(format!("Password hashing aborted: {}", e)))??;

        let user = User::new(UserId::generate(), name, email, password_hash);
        let user = self.repository.create(user).await?;
        let token = self.issue_token(&user)?;

        Ok((user.id().clone(), token))
    }

    fn issue_token(&self, user: &User) -> Result<AuthToken, AuthError> {
        let token = self.tokens.issue(user)?;

        Ok(AuthToken {
            token,
            expires_in: self.settings.expires_in_seconds.to_string(),
        })
    }
}

fn outcome_of<T>(result: &Result<T, AuthError>) -> AuthOutcome {
    match result {
        Ok(_) => AuthOutcome::Success,
        Err(AuthError::Validation { .. }) => AuthOutcome::Invalid,
        Err(AuthError::Authentication { .. }) => AuthOutcome::Rejected,
        Err(AuthError::Unclassified { .. }) => AuthOutcome::Failed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::user::MockUserRepository;
    use crate::domain::DomainError;
    use crate::infrastructure::auth::{JwtConfig, JwtService};
    use crate::infrastructure::user::password::BcryptHasher;
    use crate::infrastructure::user::repository::InMemoryUserRepository;

    const SECRET: &str = "service-test-secret";

    fn token_issuer() -> Arc<dyn TokenIssuer> {
        Arc::new(JwtService::new(&JwtConfig::new(SECRET).unwrap()))
    }

    fn create_service() -> (
        AuthService<InMemoryUserRepository, BcryptHasher>,
        Arc<InMemoryUserRepository>,
    ) {
        let repository = Arc::new(InMemoryUserRepository::new());
        let service = AuthService::new(
            repository.clone(),
            Arc::new(BcryptHasher::with_cost(4)),
            token_issuer(),
            AuthSettings::default(),
        );

        (service, repository)
    }

    fn mock_service(repository: MockUserRepository) -> AuthService<MockUserRepository, BcryptHasher> {
        AuthService::new(
            Arc::new(repository),
            Arc::new(BcryptHasher::with_cost(4)),
            token_issuer(),
            AuthSettings::default(),
        )
    }

    fn fields(name: &str, email: &str, password: &str) -> SignupFields {
        SignupFields {
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    fn form(name: &str, email: &str, password: &str) -> SignupForm {
        SignupForm {
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn test_signup_then_login() {
        let (service, _) = create_service();

        let signup = service
            .signup(fields("Jane Doe", "jane@x.com", "secret123"))
            .await
            .unwrap();
        assert!(!signup.token.is_empty());
        assert_eq!(signup.expires_in, "3600");

        let login = service.login("jane@x.com", "secret123").await.unwrap();
        let claims = JwtService::new(&JwtConfig::new(SECRET).unwrap())
            .decode(&login.token)
            .unwrap();

        assert_eq!(claims.email, "jane@x.com");
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[tokio::test]
    async fn test_login_and_signup_tokens_share_user_id() {
        let (service, repository) = create_service();
        let decoder = JwtService::new(&JwtConfig::new(SECRET).unwrap());

        let signup = service
            .signup(fields("Jane Doe", "jane@x.com", "secret123"))
            .await
            .unwrap();
        let login = service.login("jane@x.com", "secret123").await.unwrap();

        let stored = repository.get_by_email("jane@x.com").await.unwrap().unwrap();
        let signup_claims = decoder.decode(&signup.token).unwrap();
        let login_claims = decoder.decode(&login.token).unwrap();

        assert_eq!(signup_claims.user_id, stored.id().as_str());
        assert_eq!(login_claims.user_id, stored.id().as_str());
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let (service, _) = create_service();
        service
            .signup(fields("Jane Doe", "jane@x.com", "secret123"))
            .await
            .unwrap();

        let err = service.login("jane@x.com", "secret124").await.unwrap_err();

        assert_eq!(err.status_code(), 401);
        assert_eq!(err.field(), Some("password"));
        assert_eq!(err.message(), "Wrong password!");
    }

    #[tokio::test]
    async fn test_login_unknown_email() {
        let (service, _) = create_service();

        let err = service.login("nobody@x.com", "whatever").await.unwrap_err();

        assert_eq!(err.status_code(), 401);
        assert_eq!(err.field(), Some("email"));
        assert_eq!(err.message(), "User not found!");
    }

    #[tokio::test]
    async fn test_login_matches_normalized_signup_email() {
        let (service, _) = create_service();
        let fields = service
            .validate_signup(form("Jane Doe", "Jane@X.com", "secret123"))
            .await
            .unwrap();
        service.signup(fields).await.unwrap();

        assert!(service.login("Jane@X.com", "secret123").await.is_ok());
        assert!(service.login(" jane@x.com ", "secret123").await.is_ok());
    }

    #[tokio::test]
    async fn test_login_does_one_lookup_and_no_writes() {
        let user = User::new(
            UserId::generate(),
            "Jane Doe".to_string(),
            "jane@x.com".to_string(),
            BcryptHasher::with_cost(4).hash("secret123").unwrap(),
        );

        let mut repository = MockUserRepository::new();
        repository
            .expect_get_by_email()
            .withf(|email| email.to_string() == "jane@x.com")
            .times(1)
            .returning(move |_| Ok(Some(user.clone())));
        repository.expect_create().never();
        repository.expect_email_exists().never();

        let token = mock_service(repository)
            .login("Jane@x.com", "secret123")
            .await
            .unwrap();

        assert!(!token.token.is_empty());
    }

    #[tokio::test]
    async fn test_login_lookup_error_is_unclassified() {
        let mut repository = MockUserRepository::new();
        repository
            .expect_get_by_email()
            .times(1)
            .returning(|_| Err(DomainError::storage("connection reset")));

        let err = mock_service(repository)
            .login("jane@x.com", "secret123")
            .await
            .unwrap_err();

        assert_eq!(err.status_code(), 500);
        assert_eq!(err.field(), None);
    }

    #[tokio::test]
    async fn test_signup_never_stores_plaintext() {
        let (service, repository) = create_service();
        service
            .signup(fields("Jane Doe", "jane@x.com", "secret123"))
            .await
            .unwrap();

        let user = repository.get_by_email("jane@x.com").await.unwrap().unwrap();
        let hasher = BcryptHasher::with_cost(4);

        assert_ne!(user.password_hash(), "secret123");
        assert!(hasher.verify("secret123", user.password_hash()));
        assert!(!hasher.verify("secret1234", user.password_hash()));
        assert!(!hasher.verify("", user.password_hash()));
    }

    #[tokio::test]
    async fn test_signup_salts_hashes() {
        let (service, repository) = create_service();
        service
            .signup(fields("Jane Doe", "jane@x.com", "secret123"))
            .await
            .unwrap();
        service
            .signup(fields("John Roe", "john@x.com", "secret123"))
            .await
            .unwrap();

        let jane = repository.get_by_email("jane@x.com").await.unwrap().unwrap();
        let john = repository.get_by_email("john@x.com").await.unwrap().unwrap();

        assert_ne!(jane.password_hash(), john.password_hash());
    }

    #[tokio::test]
    async fn test_signup_record_shape() {
        let (service, repository) = create_service();
        service
            .signup(fields("jane doe", "jane@x.com", "secret123"))
            .await
            .unwrap();

        let user = repository.get_by_email("jane@x.com").await.unwrap().unwrap();

        assert_eq!(user.name(), "jane doe");
        assert_eq!(user.initials(), "JD");
        assert!(user.habits().is_empty());
    }

    #[tokio::test]
    async fn test_signup_persistence_failure_is_unclassified() {
        let mut repository = MockUserRepository::new();
        repository
            .expect_create()
            .times(1)
            .returning(|_| Err(DomainError::conflict("Email 'jane@x.com' is already registered")));

        let err = mock_service(repository)
            .signup(fields("Jane Doe", "jane@x.com", "secret123"))
            .await
            .unwrap_err();

        assert_eq!(err.status_code(), 500);
    }

    #[tokio::test]
    async fn test_validate_signup_reports_first_field() {
        let mut repository = MockUserRepository::new();
        repository.expect_email_exists().never();
        repository.expect_create().never();

        let service = mock_service(repository);

        let err = service
            .validate_signup(form("", "not-an-email", "123"))
            .await
            .unwrap_err();

        assert_eq!(err.status_code(), 422);
        assert_eq!(err.field(), Some("name"));
        assert_eq!(err.message(), "Please enter a name.");

        let err = service
            .validate_signup(form("Jane", "jane@x.com", "12345"))
            .await
            .unwrap_err();

        assert_eq!(err.field(), Some("password"));
    }

    #[tokio::test]
    async fn test_validate_signup_rejects_taken_email() {
        let (service, repository) = create_service();
        service
            .signup(fields("Jane Doe", "jane@x.com", "secret123"))
            .await
            .unwrap();

        let err = service
            .validate_signup(form("Other Jane", " Jane@X.com ", "secret456"))
            .await
            .unwrap_err();

        assert_eq!(err.status_code(), 422);
        assert_eq!(err.field(), Some("email"));
        assert_eq!(err.message(), "E-Mail address already exists!");
        assert_eq!(repository.len().await, 1);
    }

    #[tokio::test]
    async fn test_validate_signup_normalizes() {
        let (service, _) = create_service();

        let fields = service
            .validate_signup(form("  Jane Doe ", " Jane@X.com", "secret123"))
            .await
            .unwrap();

        assert_eq!(fields.name, "Jane Doe");
        assert_eq!(fields.email, "jane@x.com");
        assert_eq!(fields.password, "secret123");
    }

    #[tokio::test]
    async fn test_configured_expiry_is_reported() {
        let service = AuthService::new(
            Arc::new(InMemoryUserRepository::new()),
            Arc::new(BcryptHasher::with_cost(4)),
            token_issuer(),
            AuthSettings {
                expires_in_seconds: 7200,
            },
        );

        let token = service
            .signup(fields("Jane Doe", "jane@x.com", "secret123"))
            .await
            .unwrap();

        assert_eq!(token.expires_in, "7200");
    }

    #[tokio::test]
    async fn test_ping_propagates_storage_errors() {
        let mut repository = MockUserRepository::new();
        repository
            .expect_ping()
            .returning(|| Err(DomainError::storage("down")));

        let err = mock_service(repository).ping().await.unwrap_err();
        assert_eq!(err.status_code(), 500);
    }

    #[test]
    fn test_auth_token_serializes_camel_case() {
        let token = AuthToken {
            token: "abc".to_string(),
            expires_in: "3600".to_string(),
        };

        let json = serde_json::to_value(&token).unwrap();
        assert_eq!(json, serde_json::json!({"token": "abc", "expiresIn": "3600"}));
    }
}
