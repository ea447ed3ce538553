//! Signup form validation

use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;
use validator::{Validate, ValidationErrors};

const MIN_PASSWORD_LENGTH: usize = 6;

/// Order in which field problems are reported
const FIELD_ORDER: [&str; 3] = ["name", "email", "password"];

static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9-]+(\.[A-Za-z0-9-]+)*\.[A-Za-z]{2,}$")
        .expect("email pattern is valid")
});

/// Canonical form of an email address used for storage and lookup
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Raw signup body as submitted by the client
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct SignupForm {
    #[validate(length(min = 1, message = "Please enter a name."))]
    pub name: String,

    #[validate(regex(path = *EMAIL_REGEX, message = "Please enter a valid email."))]
    pub email: String,

    #[validate(length(min = 6, message = "Password has to be at least 6 characters long."))]
    pub password: String,
}

impl SignupForm {
    /// Trim name and email and lowercase the email. The password is trimmed
    /// for the length check only; the submitted value is what gets hashed.
    pub fn normalized(self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            email: normalize_email(&self.email),
            password: self.password,
        }
    }

    /// Run the field checks and return every problem, in field order
    pub fn issues(&self) -> Vec<ValidationIssue> {
        let mut issues = match self.validate() {
            Ok(()) => Vec::new(),
            Err(errors) => ordered_issues(&errors),
        };

        let trimmed_len = self.password.trim().chars().count();
        if trimmed_len < MIN_PASSWORD_LENGTH && !issues.iter().any(|i| i.field == "password") {
            issues.push(ValidationIssue::new(
                "password",
                "Password has to be at least 6 characters long.",
            ));
        }

        issues
    }
}

/// Signup fields that passed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignupFields {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl From<SignupForm> for SignupFields {
    fn from(form: SignupForm) -> Self {
        Self {
            name: form.name,
            email: form.email,
            password: form.password,
        }
    }
}

/// A single field-scoped validation problem
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    pub field: String,
    pub message: String,
}

impl ValidationIssue {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

fn ordered_issues(errors: &ValidationErrors) -> Vec<ValidationIssue> {
    let field_errors = errors.field_errors();

    FIELD_ORDER
        .iter()
        .filter_map(|field| {
            let first = field_errors.get(*field)?.first()?;
            let message = first
                .message
                .as_ref()
                .map(|m| m.to_string())
                .unwrap_or_else(|| format!("Invalid value for {}", field));

            Some(ValidationIssue::new(*field, message))
        })
        .collect()
}
