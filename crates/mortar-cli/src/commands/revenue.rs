use mortar_core::models::{RevenueDraft, Shift};

use crate::commands::common::{format_amount, parse_date, print_json};
use crate::context::Context;
use crate::error::CliError;

pub async fn run_add(
    ctx: &Context,
    date: Option<String>,
    shift: Shift,
    cash: i64,
    card: i64,
    banking: i64,
    note: Option<String>,
) -> Result<(), CliError> {
    let shift_date = match date {
        Some(raw) => parse_date(&raw)?,
        None => chrono::Local::now().date_naive(),
    };

    let revenue = ctx
        .records
        .add_revenue(RevenueDraft {
            shift_date,
            shift,
            cash,
            card,
            banking,
            note,
        })
        .await?;

    if ctx.status.is_online() {
        println!(
            "Revenue logged for {} {}: {}",
            revenue.shift_date,
            revenue.shift,
            format_amount(revenue.total())
        );
    } else {
        println!(
            "Offline: revenue for {} {} queued for sync ({} pending)",
            revenue.shift_date,
            revenue.shift,
            ctx.records.pending_count().await?
        );
    }
    Ok(())
}

pub async fn run_list(ctx: &Context, json: bool) -> Result<(), CliError> {
    if ctx.status.is_online() {
        ctx.records.refresh().await?;
    }
    let revenues = ctx.records.revenues().await;

    if json {
        return print_json(&revenues);
    }

    if revenues.is_empty() {
        println!("No revenue entries.");
        return Ok(());
    }
    for revenue in &revenues {
        println!(
            "{}  {} {}  cash {}  card {}  banking {}  total {}",
            revenue.id,
            revenue.shift_date,
            revenue.shift,
            format_amount(revenue.cash),
            format_amount(revenue.card),
            format_amount(revenue.banking),
            format_amount(revenue.total())
        );
    }
    Ok(())
}
