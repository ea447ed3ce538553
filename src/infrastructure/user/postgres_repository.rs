//! PostgreSQL user repository implementation

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::domain::user::{User, UserId, UserRepository};
use crate::domain::DomainError;

const USER_COLUMNS: &str = "id, name, email, password_hash, initials, habits, created_at";

/// PostgreSQL implementation of UserRepository
#[derive(Debug, Clone)]
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    /// Create a new repository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn get_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let row = sqlx::query(&format!("SELECT {} FROM users WHERE email = $1", USER_COLUMNS))
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to get user by email: {}", e)))?;

        row.as_ref().map(row_to_user).transpose()
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        sqlx::query(
            r#"
            INSERT INTO users (id, name, email, password_hash, initials, habits, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(user.id().as_str())
        .bind(user.name())
        .bind(user.email())
        .bind(user.password_hash())
        .bind(user.initials())
        .bind(user.habits())
        .bind(user.created_at())
        .execute(&self.pool)
        .await
        .map_err(|e| map_insert_error(e, &user))?;

        Ok(user)
    }

    async fn ping(&self) -> Result<(), DomainError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Database unreachable: {}", e)))?;

        Ok(())
    }
}

fn map_insert_error(error: sqlx::Error, user: &User) -> DomainError {
    let unique_violation = error
        .as_database_error()
        .map(|db| db.is_unique_violation())
        .unwrap_or(false);

    if !unique_violation {
        return DomainError::storage(format!("Failed to create user: {}", error));
    }

    if error.to_string().contains("email") {
        DomainError::conflict(format!("Email '{}' is already registered", user.email()))
    } else {
        DomainError::conflict(format!(
            "User with ID '{}' already exists",
            user.id().as_str()
        ))
    }
}

fn row_to_user(row: &sqlx::postgres::PgRow) -> Result<User, DomainError> {
    let column_error = |e: sqlx::Error| DomainError::storage(format!("Invalid user row: {}", e));

    Ok(User::restore(
        UserId::from_stored(row.try_get::<String, _>("id").map_err(column_error)?),
        row.try_get("name").map_err(column_error)?,
        row.try_get("email").map_err(column_error)?,
        row.try_get("password_hash").map_err(column_error)?,
        row.try_get("initials").map_err(column_error)?,
        row.try_get("habits").map_err(column_error)?,
        row.try_get("created_at").map_err(column_error)?,
    ))
}
