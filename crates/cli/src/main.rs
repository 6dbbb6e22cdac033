//! Back-office CLI - catalog inspection and session tools.
//!
//! # Usage
//!
//! ```bash
//! # Sign in and print a bearer token for BACKOFFICE_API_TOKEN
//! bo-cli login -e admin@example.com
//!
//! # List products
//! bo-cli product list
//!
//! # Show one product
//! bo-cli product show walnut-desk
//!
//! # List categories
//! bo-cli category list
//! ```
//!
//! # Environment Variables
//!
//! - `BACKOFFICE_API_URL` - Base URL of the REST backend
//! - `BACKOFFICE_API_TOKEN` - Bearer token (from `bo-cli login`)

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "bo-cli")]
#[command(author, version, about = "Back-office CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in and print a bearer token
    Login {
        /// Account email address
        #[arg(short, long)]
        email: String,
    },
    /// Inspect products
    Product {
        #[command(subcommand)]
        action: ProductAction,
    },
    /// Inspect categories
    Category {
        #[command(subcommand)]
        action: CategoryAction,
    },
}

#[derive(Subcommand)]
enum ProductAction {
    /// List all products
    List,
    /// Show one product by slug
    Show {
        /// Product slug
        slug: String,
    },
}

#[derive(Subcommand)]
enum CategoryAction {
    /// List all categories
    List,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Login { email } => commands::session::login(&email).await?,
        Commands::Product { action } => match action {
            ProductAction::List => commands::products::list().await?,
            ProductAction::Show { slug } => commands::products::show(&slug).await?,
        },
        Commands::Category { action } => match action {
            CategoryAction::List => commands::categories::list().await?,
        },
    }
    Ok(())
}
