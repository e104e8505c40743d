use mortar_core::models::OrderId;

use crate::commands::common::{format_amount, parse_id, parse_quote_line, print_json};
use crate::context::Context;
use crate::error::CliError;

pub async fn run_build(ctx: &Context, supplier: String, lines: Vec<String>) -> Result<(), CliError> {
    let lines = lines
        .iter()
        .map(|raw| parse_quote_line(raw))
        .collect::<Result<Vec<_>, _>>()?;

    let order = ctx.purchasing.build_order(supplier, lines).await?;
    println!(
        "Draft order for {}: {} lines, total {} [{}]",
        order.supplier,
        order.lines.len(),
        format_amount(order.total()),
        order.id
    );
    Ok(())
}

pub async fn run_list(ctx: &Context, json: bool) -> Result<(), CliError> {
    let orders = ctx.purchasing.list().await?;

    if json {
        return print_json(&orders);
    }

    if orders.is_empty() {
        println!("No purchase orders.");
        return Ok(());
    }
    for order in &orders {
        println!(
            "{}  {}  {} lines  total {}  {}",
            order.id,
            order.supplier,
            order.lines.len(),
            format_amount(order.total()),
            order.status
        );
    }
    Ok(())
}

pub async fn run_submit(ctx: &Context, id: &str) -> Result<(), CliError> {
    let id: OrderId = parse_id(id)?;
    ctx.purchasing.submit(id).await?;
    println!("Order {id} submitted");
    Ok(())
}

pub async fn run_receive(ctx: &Context, id: &str) -> Result<(), CliError> {
    let id: OrderId = parse_id(id)?;
    ctx.purchasing.mark_received(id).await?;
    println!("Order {id} received");
    Ok(())
}
