//! Dewdrop CLI - operator tooling for the admin dashboard.
//!
//! # Usage
//!
//! ```bash
//! # Hash a password for ADMIN_BOOTSTRAP_PASSWORD_HASH (reads stdin)
//! echo 'correct-horse-2026' | dd-cli admin hash-password
//!
//! # Write the built-in seed catalog as JSON
//! dd-cli catalog export --output catalog.json
//!
//! # Check a catalog file before pointing ADMIN_CATALOG_PATH at it
//! dd-cli catalog validate catalog.json
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "dd-cli")]
#[command(author, version, about = "Dewdrop CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage admin credentials
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },
    /// Work with catalog JSON files
    Catalog {
        #[command(subcommand)]
        action: CatalogAction,
    },
}

#[derive(Subcommand)]
enum AdminAction {
    /// Print an Argon2 hash suitable for `ADMIN_BOOTSTRAP_PASSWORD_HASH`
    HashPassword {
        /// Password to hash (read from stdin when omitted)
        #[arg(short, long)]
        password: Option<String>,
    },
}

#[derive(Subcommand)]
enum CatalogAction {
    /// Write the built-in seed catalog
    Export {
        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Check a catalog file for errors
    Validate {
        /// Catalog JSON file
        path: PathBuf,
    },
}

fn main() {
    // Logs go to stderr so stdout stays clean for hashes and JSON
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Admin { action } => match action {
            AdminAction::HashPassword { password } => {
                commands::admin::hash_password(password)?;
            }
        },
        Commands::Catalog { action } => match action {
            CatalogAction::Export { output } => commands::catalog::export(output.as_deref())?,
            CatalogAction::Validate { path } => commands::catalog::validate(&path)?,
        },
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parses_catalog_validate() {
        let cli = Cli::try_parse_from(["dd-cli", "catalog", "validate", "catalog.json"]);
        assert!(matches!(
            cli.map(|c| c.command),
            Ok(Commands::Catalog {
                action: CatalogAction::Validate { .. }
            })
        ));
    }
}
