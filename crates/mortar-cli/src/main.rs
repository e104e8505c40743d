//! mortar CLI - pharmacy operations from the terminal
//!
//! Shortage and revenue capture works offline: writes are queued in a local
//! database and `mortar sync` replays them once a connection is back.

mod cli;
mod commands;
mod config_profiles;
mod context;
mod error;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::{
    BulletinCommands, Cli, Commands, ConfigCommands, OrderCommands, PaymentCommands,
    RevenueCommands, ShortageCommands,
};
use crate::context::Context;
use crate::error::CliError;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(error) = run(cli).await {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let Cli {
        command,
        db_path,
        profile,
        offline,
    } = cli;

    // Commands that never touch the service stack
    match command {
        Commands::Config {
            command: ConfigCommands::Init {
                profile: init_profile,
                remote_url,
                api_key,
                no_activate,
            },
        } => {
            return commands::config_cmd::run_config_init(
                init_profile.as_deref().or(profile.as_deref()),
                remote_url,
                api_key,
                no_activate,
            );
        }
        Commands::Completions { shell, output } => {
            return commands::completions::run_completions(shell, output);
        }
        command => {
            // Status works without a configured remote; everything else only
            // skips the requirement when explicitly offline
            let require_remote = !offline && !matches!(command, Commands::Status);
            let mut ctx =
                Context::build(db_path, profile.as_deref(), offline, require_remote).await?;
            dispatch(command, &mut ctx).await
        }
    }
}

async fn dispatch(command: Commands, ctx: &mut Context) -> Result<(), CliError> {
    match command {
        Commands::Shortage { command } => match command {
            ShortageCommands::Add {
                name,
                strength,
                form,
                quantity,
                urgent,
                note,
            } => commands::shortage::run_add(ctx, name, strength, form, quantity, urgent, note).await,
            ShortageCommands::List { json } => commands::shortage::run_list(ctx, json).await,
            ShortageCommands::Update {
                id,
                name,
                strength,
                form,
                quantity,
                urgent,
                note,
            } => {
                commands::shortage::run_update(
                    ctx, &id, name, strength, form, quantity, urgent, note,
                )
                .await
            }
            ShortageCommands::Resolve { id } => commands::shortage::run_resolve(ctx, &id).await,
        },
        Commands::Revenue { command } => match command {
            RevenueCommands::Add {
                date,
                shift,
                cash,
                card,
                banking,
                note,
            } => {
                commands::revenue::run_add(ctx, date, shift.into(), cash, card, banking, note).await
            }
            RevenueCommands::List { json } => commands::revenue::run_list(ctx, json).await,
        },
        Commands::Payment { command } => match command {
            PaymentCommands::Add {
                counterparty,
                amount,
                kind,
                due,
                note,
            } => commands::payment::run_add(ctx, counterparty, amount, kind.into(), due, note).await,
            PaymentCommands::List { json } => commands::payment::run_list(ctx, json).await,
            PaymentCommands::Settle { id } => commands::payment::run_settle(ctx, &id).await,
        },
        Commands::Order { command } => match command {
            OrderCommands::Build { supplier, lines } => {
                commands::order::run_build(ctx, supplier, lines).await
            }
            OrderCommands::List { json } => commands::order::run_list(ctx, json).await,
            OrderCommands::Submit { id } => commands::order::run_submit(ctx, &id).await,
            OrderCommands::Receive { id } => commands::order::run_receive(ctx, &id).await,
        },
        Commands::Bulletin { command } => match command {
            BulletinCommands::Post {
                title,
                body,
                audience,
            } => commands::bulletin::run_post(ctx, title, body, audience.into()).await,
            BulletinCommands::Inbox { role, json } => {
                commands::bulletin::run_inbox(ctx, role.into(), json).await
            }
        },
        Commands::Sync => commands::sync::run_sync(ctx).await,
        Commands::Status => commands::status::run_status(ctx).await,
        Commands::Config { .. } | Commands::Completions { .. } => unreachable!("handled in run()"),
    }
}
