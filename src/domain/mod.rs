//! Domain layer - Core business logic and entities

pub mod error;
pub mod user;

pub use error::{AuthError, DomainError};
pub use user::{SignupFields, SignupForm, User, UserId, UserRepository, ValidationIssue};
