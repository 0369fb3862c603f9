//! tinycart CLI - database migrations and catalog management.
//!
//! # Usage
//!
//! ```bash
//! # Apply database migrations
//! tinycart migrate
//!
//! # Create a user
//! tinycart user create -u alice -p secret
//!
//! # Add a product
//! tinycart product create -n Widget --price 9.99 -d "A small widget"
//!
//! # Load the demo catalog
//! tinycart seed
//! ```
//!
//! The database is taken from `TINYCART_DATABASE_URL` (or `DATABASE_URL`),
//! defaulting to `tinycart.db` in the working directory.

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "tinycart")]
#[command(author, version, about = "tinycart CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Manage users
    User {
        #[command(subcommand)]
        action: UserAction,
    },
    /// Manage the product catalog
    Product {
        #[command(subcommand)]
        action: ProductAction,
    },
    /// Insert a small demo catalog (skipped when products already exist)
    Seed,
}

#[derive(Subcommand)]
enum UserAction {
    /// Create a new user
    Create {
        /// Login name (must be unique)
        #[arg(short, long)]
        username: String,

        /// Password
        #[arg(short, long)]
        password: String,
    },
}

#[derive(Subcommand)]
enum ProductAction {
    /// Create a new product
    Create {
        /// Product name
        #[arg(short, long)]
        name: String,

        /// Unit price
        #[arg(long)]
        price: f64,

        /// Free-text description
        #[arg(short, long, default_value = "")]
        description: String,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), commands::CommandError> {
    let pool = commands::connect().await?;

    match cli.command {
        Commands::Migrate => commands::migrate::run(&pool).await?,
        Commands::User { action } => match action {
            UserAction::Create { username, password } => {
                commands::user::create(&pool, &username, &password).await?;
            }
        },
        Commands::Product { action } => match action {
            ProductAction::Create {
                name,
                price,
                description,
            } => {
                commands::product::create(&pool, name, price, description).await?;
            }
        },
        Commands::Seed => commands::seed::run(&pool).await?,
    }
    Ok(())
}
