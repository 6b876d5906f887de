//! User reports.

use anyhow::{Context as _, Result};
use chrono::Utc;

use super::{RecentArgs, UserArgs};
use crate::context::Context;
use crate::output::format_timestamp;

/// List users created within the window.
pub async fn list(args: RecentArgs, ctx: &Context) -> Result<()> {
    let users = ctx
        .reports
        .recent_users(args.window(), Utc::now())
        .await
        .context("Failed to list users")?;

    if ctx.output.is_json() {
        ctx.output.json(&users);
        return Ok(());
    }

    ctx.output
        .header(&format!("Sign-ups in the last {} hour(s)", args.within_hours));
    if users.is_empty() {
        ctx.output.info("No users found.");
        return Ok(());
    }

    let widths = [28, 32, 24];
    ctx.output.table_row(&["NAME", "EMAIL", "CREATED"], &widths);
    for user in &users {
        let created = format_timestamp(&user.created_at);
        ctx.output
            .table_row(&[&user.name, &user.email, &created], &widths);
    }
    ctx.output.info(&format!("Total: {} user(s)", users.len()));
    Ok(())
}

/// Show one user's profile.
pub async fn show(args: UserArgs, ctx: &Context) -> Result<()> {
    let profile = ctx
        .reports
        .user(&args.email)
        .await
        .with_context(|| format!("User '{}' not found", args.email))?;

    if ctx.output.is_json() {
        ctx.output.json(&profile);
        return Ok(());
    }

    ctx.output.header(&format!(
        "User: {} {}",
        profile.first_name, profile.last_name
    ));
    ctx.output.kv("Email", &profile.email);
    ctx.output.kv("Phone", &profile.phone);
    ctx.output.kv("Address", &profile.address);
    ctx.output
        .kv("Accepted terms", if profile.tos_agreement { "yes" } else { "no" });
    Ok(())
}
