//! Go Marketplace CLI - drive the cart store from the command line.
//!
//! # Usage
//!
//! ```bash
//! # Show the cart
//! gm-cart list
//!
//! # Add a product (or one more unit of it)
//! gm-cart add --id a --title Shoe --image-url https://cdn/shoe.png --price 10
//!
//! # Change quantities
//! gm-cart increment a
//! gm-cart decrement a
//!
//! # Drop lines
//! gm-cart remove a
//! gm-cart clear
//! ```
//!
//! # Commands
//!
//! - `list` - Print every line and the cart totals
//! - `add` - Add one unit of a product
//! - `increment` / `decrement` - Change a line's quantity by one
//! - `remove` - Drop a line
//! - `clear` - Empty the cart

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "gm-cart")]
#[command(author, version, about = "Go Marketplace cart tools")]
struct Cli {
    /// Directory holding the stored cart (overrides `CART_STORAGE_DIR`)
    #[arg(long, global = true)]
    storage_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the cart
    List,
    /// Add one unit of a product
    Add {
        /// Product identifier
        #[arg(long)]
        id: String,

        /// Product title
        #[arg(long)]
        title: String,

        /// Product image URL
        #[arg(long)]
        image_url: String,

        /// Unit price (e.g. `19.99`)
        #[arg(long)]
        price: String,
    },
    /// Increase a line's quantity by one
    Increment {
        /// Product identifier
        id: String,
    },
    /// Decrease a line's quantity by one
    Decrement {
        /// Product identifier
        id: String,
    },
    /// Remove a line from the cart
    Remove {
        /// Product identifier
        id: String,
    },
    /// Remove every line from the cart
    Clear,
}

#[tokio::main]
async fn main() {
    // Defaults to info level if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info".into());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let store = commands::cart::open(cli.storage_dir).await?;

    match cli.command {
        Commands::List => commands::cart::list(&store)?,
        Commands::Add {
            id,
            title,
            image_url,
            price,
        } => commands::cart::add(&store, id, title, image_url, &price)?,
        Commands::Increment { id } => commands::cart::increment(&store, &id)?,
        Commands::Decrement { id } => commands::cart::decrement(&store, &id)?,
        Commands::Remove { id } => commands::cart::remove(&store, &id)?,
        Commands::Clear => commands::cart::clear(&store)?,
    }

    // Persist everything before the runtime shuts down
    store.close().await?;
    Ok(())
}
