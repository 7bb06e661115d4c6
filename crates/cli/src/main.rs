//! ProShop CLI - database migrations, sample data and catalog browsing.
//!
//! # Usage
//!
//! ```bash
//! # Run database migrations
//! proshop migrate
//!
//! # Replace all users and products with the sample data
//! proshop seed import
//!
//! # Remove all orders, products and users
//! proshop seed destroy
//!
//! # Browse the catalog of a running API
//! proshop catalog list
//! proshop catalog show <id>
//!
//! # Check a seeded account (password on stdin)
//! proshop user check -e admin@example.com
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "proshop")]
#[command(author, version, about = "ProShop CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Load or remove sample data
    Seed {
        #[command(subcommand)]
        action: SeedAction,
    },
    /// Browse the catalog through the API
    Catalog {
        #[command(subcommand)]
        action: CatalogAction,
    },
    /// Inspect user accounts
    User {
        #[command(subcommand)]
        action: UserAction,
    },
}

#[derive(Subcommand)]
enum SeedAction {
    /// Clear orders, products and users, then insert the sample data
    Import,
    /// Clear orders, products and users
    #[command(short_flag = 'd')]
    Destroy,
}

#[derive(Subcommand)]
enum CatalogAction {
    /// List all products
    List,
    /// Show one product
    Show {
        /// Product id
        id: String,
    },
}

#[derive(Subcommand)]
enum UserAction {
    /// Check an account's password, read from stdin
    Check {
        /// Account email
        #[arg(short, long)]
        email: String,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "proshop=info,proshop_api=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Migrate => commands::migrate::run().await?,
        Commands::Seed { action } => match action {
            SeedAction::Import => commands::seed::import().await?,
            SeedAction::Destroy => commands::seed::destroy().await?,
        },
        Commands::Catalog { action } => match action {
            CatalogAction::List => commands::catalog::list().await?,
            CatalogAction::Show { id } => commands::catalog::show(&id).await?,
        },
        Commands::User { action } => match action {
            UserAction::Check { email } => commands::user::check(&email).await?,
        },
    }
    Ok(())
}
