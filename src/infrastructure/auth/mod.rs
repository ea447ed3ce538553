//! Authentication infrastructure module
//!
//! This module provides JWT token issuance for user sessions.

mod jwt;

pub use jwt::{JwtClaims, JwtConfig, JwtService, TokenIssuer, TOKEN_LIFETIME_SECS};
