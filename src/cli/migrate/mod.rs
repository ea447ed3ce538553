//! Migrate command - manages the users schema

use anyhow::Context;
use clap::Args;
use tracing::info;

use crate::config::AppConfig;
use crate::infrastructure::logging;
use crate::infrastructure::storage::{revert_last_migration, run_migrations, PostgresMigrator};

/// Arguments for the migrate command
#[derive(Debug, Args)]
pub struct MigrateArgs {
    /// Revert the most recently applied migration
    #[arg(long, conflicts_with = "status")]
    pub revert: bool,

    /// List applied migration versions without changing anything
    #[arg(long)]
    pub status: bool,
}

/// Run the migrate command against the configured database
pub async fn run(args: MigrateArgs) -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load_unvalidated().context("Failed to load configuration")?;
    logging::init_logging(&config.logging);

    let pool = crate::connect_postgres(&config).await?;

    if args.status {
        let applied = PostgresMigrator::new(pool).applied_versions().await?;
        info!(versions = ?applied, "Applied migrations");
        return Ok(());
    }

    let version = if args.revert {
        revert_last_migration(&pool).await?
    } else {
        run_migrations(&pool).await?
    };

    info!(version = ?version, "Schema version");

    Ok(())
}
