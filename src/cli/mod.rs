//! CLI module for the habits account service
//!
//! Provides subcommands:
//! - `serve`: run the HTTP API
//! - `migrate`: apply, inspect or revert database migrations

pub mod migrate;
pub mod serve;

use clap::{Parser, Subcommand};

/// Habits account service - login and signup API
#[derive(Parser)]
#[command(name = "habits-auth")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP API server
    Serve,

    /// Manage the PostgreSQL schema
    Migrate(migrate::MigrateArgs),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_serve() {
        let cli = Cli::try_parse_from(["habits-auth", "serve"]).unwrap();
        assert!(matches!(cli.command, Command::Serve));
    }

    #[test]
    fn test_parse_migrate_flags() {
        let cli = Cli::try_parse_from(["habits-auth", "migrate", "--revert"]).unwrap();

        match cli.command {
            Command::Migrate(args) => {
                assert!(args.revert);
                assert!(!args.status);
            }
            Command::Serve => panic!("expected migrate"),
        }
    }

    #[test]
    fn test_revert_and_status_conflict() {
        assert!(Cli::try_parse_from(["habits-auth", "migrate", "--revert", "--status"]).is_err());
    }

    #[test]
    fn test_subcommand_required() {
        assert!(Cli::try_parse_from(["habits-auth"]).is_err());
    }
}
