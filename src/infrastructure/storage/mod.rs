//! Storage infrastructure - PostgreSQL pool and schema migrations

pub mod migrations;
mod postgres;

pub use migrations::{
    revert_last_migration, run_migrations, user_migrations, Migration, PostgresMigrator,
};
pub use postgres::{connect_pool, PostgresConfig};
