//! JWT token generation and validation

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

use crate::domain::user::User;
use crate::domain::DomainError;

/// Lifetime of every issued token
pub const TOKEN_LIFETIME_SECS: i64 = 60 * 60;

/// JWT claims structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JwtClaims {
    /// Account email
    pub email: String,
    /// User ID as string
    #[serde(rename = "userId")]
    pub user_id: String,
    /// Issued at timestamp (Unix epoch)
    pub iat: i64,
    /// Expiration timestamp (Unix epoch)
    pub exp: i64,
}

impl JwtClaims {
    /// Create new claims for a user, expiring one hour from now
    pub fn new(user: &User) -> Self {
        let now = Utc::now();
        let exp = now + Duration::seconds(TOKEN_LIFETIME_SECS);

        Self {
            email: user.email().to_string(),
            user_id: user.id().as_str().to_string(),
            iat: now.timestamp(),
            exp: exp.timestamp(),
        }
    }
}

/// Configuration for JWT service
#[derive(Clone)]
pub struct JwtConfig {
    /// Secret key for signing tokens
    pub secret: String,
}

impl JwtConfig {
    /// Create new JWT configuration. A blank secret is rejected.
    pub fn new(secret: impl Into<String>) -> Result<Self, DomainError> {
        let secret = secret.into();

        if secret.trim().is_empty() {
            return Err(DomainError::configuration("JWT signing secret must not be empty"));
        }

        Ok(Self { secret })
    }
}

impl Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"[hidden]")
            .finish()
    }
}

/// Trait for issuing and reading signed session tokens
pub trait TokenIssuer: Send + Sync + Debug {
    /// Generate a signed token for a user
    fn issue(&self, user: &User) -> Result<String, DomainError>;

    /// Verify a token's signature and expiry and return its claims
    fn decode(&self, token: &str) -> Result<JwtClaims, DomainError>;
}

/// HS256 JWT service backed by a shared secret
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl Debug for JwtService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtService")
            .field("encoding_key", &"[hidden]")
            .field("decoding_key", &"[hidden]")
            .finish()
    }
}

impl JwtService {
    /// Create a new JWT service with the given configuration
    pub fn new(config: &JwtConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
        }
    }
}

impl TokenIssuer for JwtService {
    fn issue(&self, user: &User) -> Result<String, DomainError> {
        let claims = JwtClaims::new(user);

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| DomainError::internal(format!("Failed to generate JWT: {}", e)))
    }

    fn decode(&self, token: &str) -> Result<JwtClaims, DomainError> {
        let token_data = decode::<JwtClaims>(token, &self.decoding_key, &Validation::default())
            .map_err(|e| DomainError::validation(format!("Invalid JWT: {}", e)))?;

        Ok(token_data.claims)
    }
}
