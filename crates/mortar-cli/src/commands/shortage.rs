use mortar_core::models::{MedicineDraft, MedicineId, MedicinePatch};

use crate::commands::common::{parse_id, print_json};
use crate::context::Context;
use crate::error::CliError;

pub async fn run_add(
    ctx: &Context,
    name: String,
    strength: Option<String>,
    form: Option<String>,
    quantity: u32,
    urgent: bool,
    note: Option<String>,
) -> Result<(), CliError> {
    let medicine = ctx
        .records
        .add_medicine(MedicineDraft {
            name,
            strength,
            form,
            quantity,
            urgent,
            note,
        })
        .await?;

    if ctx.status.is_online() {
        println!("Shortage registered: {} [{}]", medicine.name, medicine.id);
    } else {
        println!(
            "Offline: shortage '{}' queued for sync ({} pending)",
            medicine.name,
            ctx.records.pending_count().await?
        );
    }
    Ok(())
}

pub async fn run_list(ctx: &Context, json: bool) -> Result<(), CliError> {
    if ctx.status.is_online() {
        ctx.records.refresh().await?;
    }
    let medicines = ctx.records.medicines().await;

    if json {
        return print_json(&medicines);
    }

    if medicines.is_empty() {
        println!("No shortages registered.");
        return Ok(());
    }
    for medicine in &medicines {
        let urgent = if medicine.urgent { " URGENT" } else { "" };
        let details = [medicine.strength.as_deref(), medicine.form.as_deref()]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(", ");
        let details = if details.is_empty() {
            String::new()
        } else {
            format!(" ({details})")
        };
        println!(
            "{}  {}{}  x{}{}",
            medicine.id, medicine.name, details, medicine.quantity, urgent
        );
    }
    Ok(())
}

#[allow(clippy::too_many_arguments)]
pub async fn run_update(
    ctx: &Context,
    id: &str,
    name: Option<String>,
    strength: Option<String>,
    form: Option<String>,
    quantity: Option<u32>,
    urgent: Option<bool>,
    note: Option<String>,
) -> Result<(), CliError> {
    let id: MedicineId = parse_id(id)?;
    ctx.records
        .update_medicine(
            id,
            MedicinePatch {
                name,
                strength,
                form,
                quantity,
                urgent,
                note,
            },
        )
        .await?;

    if ctx.status.is_online() {
        println!("Shortage {id} updated");
    } else {
        println!("Offline: update to {id} queued for sync");
    }
    Ok(())
}

pub async fn run_resolve(ctx: &Context, id: &str) -> Result<(), CliError> {
    let id: MedicineId = parse_id(id)?;
    ctx.records.delete_medicine(id).await?;

    if ctx.status.is_online() {
        println!("Shortage {id} resolved");
    } else {
        println!("Offline: removal of {id} queued for sync");
    }
    Ok(())
}
