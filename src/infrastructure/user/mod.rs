//! User infrastructure module
//!
//! Password hashing with bcrypt, user repositories and the auth service
//! that verifies credentials and registers accounts.

mod password;
mod postgres_repository;
mod repository;
mod service;

pub use password::{BcryptHasher, PasswordHasher, DEFAULT_BCRYPT_COST};
pub use postgres_repository::PostgresUserRepository;
pub use repository::InMemoryUserRepository;
pub use service::{AuthService, AuthSettings, AuthToken, DEFAULT_EXPIRES_IN_SECONDS};
