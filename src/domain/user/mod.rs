//! User domain
//!
//! This module provides domain types and traits for user accounts,
//! including the user entity, signup validation, and the repository port.

mod entity;
mod initials;
mod repository;
mod validation;

pub use entity::{User, UserId};
pub use initials::derive_initials;
pub use repository::UserRepository;
pub use validation::{normalize_email, SignupFields, SignupForm, ValidationIssue};

#[cfg(test)]
pub use repository::MockUserRepository;
