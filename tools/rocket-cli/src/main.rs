//! Rocket CLI - drive the RocketShoes cart from a terminal.
//!
//! Commands:
//! - `rocket products` - List the catalog
//! - `rocket show` - Show the cart with totals
//! - `rocket add <id>` - Add one unit of a product
//! - `rocket remove <id>` - Remove a product
//! - `rocket update <id> <amount>` - Set a product's amount
//! - `rocket clear` - Empty the cart

mod commands;
mod context;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use rocket_commerce::ProductId;
use tracing_subscriber::EnvFilter;

/// Rocket CLI - manage a RocketShoes cart against a db.json catalog
#[derive(Parser)]
#[command(name = "rocket")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Catalog fixture (json-server db.json layout)
    #[arg(long, global = true, default_value = "db.json")]
    db: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List products with available stock
    Products,

    /// Show the cart
    Show,

    /// Add one unit of a product
    Add {
        /// Product id
        id: ProductId,
    },

    /// Remove a product from the cart
    Remove {
        /// Product id
        id: ProductId,
    },

    /// Set the amount of a product already in the cart
    Update {
        /// Product id
        id: ProductId,
        /// New amount
        amount: i64,
    },

    /// Empty the cart
    Clear,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    // Setup output formatting
    let output = output::Output::new(cli.verbose, cli.json);

    // Load config
    let ctx = match context::Context::load(cli.config.as_deref(), &cli.db, output.clone()) {
        Ok(ctx) => ctx,
        Err(e) => {
            output.error(&format!("{:#}", e));
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Commands::Products => commands::products::run(&ctx).await,
        Commands::Show => commands::cart::show(&ctx),
        Commands::Add { id } => commands::cart::add(id, &ctx).await,
        Commands::Remove { id } => commands::cart::remove(id, &ctx).await,
        Commands::Update { id, amount } => commands::cart::update(id, amount, &ctx).await,
        Commands::Clear => commands::cart::clear(&ctx),
    };

    match result {
        Ok(commands::Outcome::Done) => Ok(()),
        Ok(commands::Outcome::Rejected) => std::process::exit(2),
        Err(e) => {
            ctx.output.error(&format!("{:#}", e));
            std::process::exit(1);
        }
    }
}

fn init_tracing(verbose: bool) {
    // Rejections are already shown to the shopper; keep the store's own warnings quiet.
    let default = if verbose {
        "debug"
    } else {
        "warn,rocket_cart::store=error"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
