use chrono::{Local, TimeZone};
use mortar_core::models::StaffRole;

use crate::commands::common::print_json;
use crate::context::Context;
use crate::error::CliError;

pub async fn run_post(
    ctx: &Context,
    title: String,
    body: String,
    audience: StaffRole,
) -> Result<(), CliError> {
    let bulletin = ctx.bulletins.post(title, body, audience).await?;
    println!(
        "Bulletin posted to {}: {} [{}]",
        bulletin.audience, bulletin.title, bulletin.id
    );
    Ok(())
}

pub async fn run_inbox(ctx: &Context, role: StaffRole, json: bool) -> Result<(), CliError> {
    let bulletins = ctx.bulletins.inbox(role).await?;

    if json {
        return print_json(&bulletins);
    }

    if bulletins.is_empty() {
        println!("No bulletins for {role}.");
        return Ok(());
    }
    for bulletin in &bulletins {
        let posted = Local
            .timestamp_millis_opt(bulletin.created_at)
            .single()
            .map_or_else(|| bulletin.created_at.to_string(), |ts| ts.to_rfc3339());
        println!(
            "[{}] {} - {} ({})",
            bulletin.audience, bulletin.title, bulletin.body, posted
        );
    }
    Ok(())
}
