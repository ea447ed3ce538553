use thiserror::Error;

/// Core domain errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Conflict: {message}")]
    Conflict { message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Storage error: {message}")]
    Storage { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl DomainError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

/// Failure reported by the login and signup flows.
///
/// Every variant maps to exactly one HTTP status. `Validation` and
/// `Authentication` always name the offending input field; `Unclassified`
/// is the catch-all for anything that arrived without a status.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("{message}")]
    Validation { field: String, message: String },

    #[error("{message}")]
    Authentication { field: String, message: String },

    #[error("{message}")]
    Unclassified { message: String },
}

impl AuthError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn authentication(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Authentication {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn unclassified(message: impl Into<String>) -> Self {
        Self::Unclassified {
            message: message.into(),
        }
    }

    /// No account is registered under the supplied email.
    pub fn user_not_found() -> Self {
        Self::authentication("email", "User not found!")
    }

    /// The supplied password does not match the stored hash.
    pub fn wrong_password() -> Self {
        Self::authentication("password", "Wrong password!")
    }

    /// HTTP status code carried by this error
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Validation { .. } => 422,
            Self::Authentication { .. } => 401,
            Self::Unclassified { .. } => 500,
        }
    }

    /// Input field the error refers to, if any
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::Validation { field, .. } | Self::Authentication { field, .. } => Some(field),
            Self::Unclassified { .. } => None,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::Validation { message, .. }
            | Self::Authentication { message, .. }
            | Self::Unclassified { message } => message,
        }
    }

    /// Short label used for log fields and metric labels
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation { .. } => "validation",
            Self::Authentication { .. } => "authentication",
            Self::Unclassified { .. } => "unclassified",
        }
    }
}

impl From<DomainError> for AuthError {
    fn from(err: DomainError) -> Self {
        Self::unclassified(err.to_string())
    }
}
