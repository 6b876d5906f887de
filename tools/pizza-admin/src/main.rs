//! Pizza admin - operator reports over the order service's data directory.
//!
//! Commands:
//! - `pizza-admin menu` - List menu items
//! - `pizza-admin orders` - Carts created recently
//! - `pizza-admin order <id>` - Show one cart
//! - `pizza-admin users` - Users who signed up recently
//! - `pizza-admin user <email>` - Show one user's profile
//! - `pizza-admin seed-menu <file>` - Replace the menu from a TOML file

mod commands;
mod context;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{OrderArgs, RecentArgs, SeedMenuArgs, UserArgs};

/// Inspect orders, users and the menu of a pizza order service
#[derive(Parser)]
#[command(name = "pizza-admin")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Document store directory
    #[arg(long, global = true, env = "PIZZA_DATA_DIR", default_value = ".data")]
    data_dir: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List menu items
    Menu,

    /// List carts created within a time window
    Orders(RecentArgs),

    /// Show a cart by id
    Order(OrderArgs),

    /// List users created within a time window
    Users(RecentArgs),

    /// Show a user's profile
    User(UserArgs),

    /// Replace the menu from a TOML file
    SeedMenu(SeedMenuArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    tracing::debug!(data_dir = %cli.data_dir, json = cli.json, "pizza-admin starting");

    let output = output::Output::new(cli.verbose, cli.json);
    let ctx = context::Context::load(&cli.data_dir, output)?;

    let result = match cli.command {
        Commands::Menu => commands::menu::run(&ctx).await,
        Commands::Orders(args) => commands::orders::list(args, &ctx).await,
        Commands::Order(args) => commands::orders::show(args, &ctx).await,
        Commands::Users(args) => commands::users::list(args, &ctx).await,
        Commands::User(args) => commands::users::show(args, &ctx).await,
        Commands::SeedMenu(args) => commands::menu::seed(args, &ctx).await,
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}
