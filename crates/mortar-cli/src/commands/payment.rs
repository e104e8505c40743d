use mortar_core::models::{PaymentDraft, PaymentId, PaymentKind};
use mortar_core::services::payments;

use crate::commands::common::{format_amount, parse_date, parse_id, print_json};
use crate::context::Context;
use crate::error::CliError;

pub async fn run_add(
    ctx: &Context,
    counterparty: String,
    amount: i64,
    kind: PaymentKind,
    due: Option<String>,
    note: Option<String>,
) -> Result<(), CliError> {
    let due_date = due.map(|raw| parse_date(&raw)).transpose()?;
    let payment = ctx
        .ledger
        .record(PaymentDraft {
            counterparty,
            kind,
            amount,
            due_date,
            note,
        })
        .await?;

    println!(
        "{} recorded: {} {} [{}]",
        payment.kind,
        payment.counterparty,
        format_amount(payment.amount),
        payment.id
    );
    Ok(())
}

pub async fn run_list(ctx: &Context, json: bool) -> Result<(), CliError> {
    let payments = ctx.ledger.list().await?;

    if json {
        return print_json(&payments);
    }

    if payments.is_empty() {
        println!("No payments tracked.");
        return Ok(());
    }
    for payment in &payments {
        let due = payment
            .due_date
            .map_or(String::new(), |date| format!("  due {date}"));
        let state = if payment.settled { "settled" } else { "open" };
        println!(
            "{}  {}  {}  {}{}  [{}]",
            payment.id,
            payment.kind,
            payment.counterparty,
            format_amount(payment.amount),
            due,
            state
        );
    }
    println!(
        "Outstanding: {}",
        format_amount(payments::outstanding_total(&payments))
    );
    Ok(())
}

pub async fn run_settle(ctx: &Context, id: &str) -> Result<(), CliError> {
    let id: PaymentId = parse_id(id)?;
    ctx.ledger.settle(id).await?;
    println!("Payment {id} settled");
    Ok(())
}
