//! User entity and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::initials::derive_initials;

/// Opaque user identifier (UUID v4 text form)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// Generate a fresh identifier
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    /// Wrap an identifier read back from storage
    pub fn from_stored(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the inner string value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<UserId> for String {
    fn from(id: UserId) -> Self {
        id.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Registered account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier for the user
    id: UserId,
    /// Display name as entered at signup
    name: String,
    /// Login key, unique across users
    email: String,
    /// Bcrypt password hash - never exposed in serialization
    #[serde(skip_serializing)]
    password_hash: String,
    /// Abbreviation derived from the name
    initials: String,
    /// Habit references owned by the habits service
    habits: Vec<String>,
    /// Creation timestamp
    created_at: DateTime<Utc>,
}

impl User {
    /// Create a new user with no habits
    pub fn new(
        id: UserId,
        name: impl Into<String>,
        email: impl Into<String>,
        password_hash: impl Into<String>,
    ) -> Self {
        let name = name.into();
        let initials = derive_initials(&name);

        Self {
            id,
            name,
            email: email.into(),
            password_hash: password_hash.into(),
            initials,
            habits: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Rebuild a user from persisted columns
    pub fn restore(
        id: UserId,
        name: String,
        email: String,
        password_hash: String,
        initials: String,
        habits: Vec<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name,
            email,
            password_hash,
            initials,
            habits,
            created_at,
        }
    }

    pub fn id(&self) -> &UserId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn password_hash(&self) -> &str {
        &self.password_hash
    }

    pub fn initials(&self) -> &str {
        &self.initials
    }

    pub fn habits(&self) -> &[String] {
        &self.habits
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_user() -> User {
        User::new(UserId::generate(), "Jane Doe", "jane@x.com", "hashed_password")
    }

    #[test]
    fn test_generated_ids_are_unique() {
        let a = UserId::generate();
        let b = UserId::generate();

        assert_ne!(a, b);
        assert!(uuid::Uuid::parse_str(a.as_str()).is_ok());
    }

    #[test]
    fn test_user_creation() {
        let user = create_test_user();

        assert_eq!(user.name(), "Jane Doe");
        assert_eq!(user.email(), "jane@x.com");
        assert_eq!(user.password_hash(), "hashed_password");
        assert_eq!(user.initials(), "JD");
        assert!(user.habits().is_empty());
    }

    #[test]
    fn test_user_serialization_excludes_password() {
        let user = create_test_user();

        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("hashed_password"));
        assert!(!json.contains("password_hash"));
        assert!(json.contains("\"initials\":\"JD\""));
    }

    #[test]
    fn test_user_id_display() {
        let id = UserId::from_stored("abc-123");
        assert_eq!(id.to_string(), "abc-123");
        assert_eq!(String::from(id), "abc-123");
    }
}
