//! CLI command implementations.

pub mod menu;
pub mod orders;
pub mod users;

use clap::Args;

/// Arguments for commands that report on a recent time window.
#[derive(Args)]
pub struct RecentArgs {
    /// Look back this many hours.
    #[arg(long, default_value = "24")]
    pub within_hours: u32,
}

impl RecentArgs {
    pub fn window(&self) -> chrono::Duration {
        chrono::Duration::hours(i64::from(self.within_hours))
    }
}

/// Arguments for the order command.
#[derive(Args)]
pub struct OrderArgs {
    /// Cart id (the token id that created it).
    pub id: String,
}

/// Arguments for the user command.
#[derive(Args)]
pub struct UserArgs {
    /// User email.
    pub email: String,
}

/// Arguments for the seed-menu command.
#[derive(Args)]
pub struct SeedMenuArgs {
    /// TOML file with `[[items]]` tables.
    pub file: String,
}
