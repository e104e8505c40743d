use mortar_core::sync::{Notice, SyncOutcome};

use crate::context::Context;
use crate::error::CliError;

pub async fn run_sync(ctx: &mut Context) -> Result<(), CliError> {
    if !ctx.status.is_online() {
        return Err(CliError::OfflineSync);
    }

    let pending = ctx.queue.len().await?;
    if pending > 0 {
        println!("Replaying {pending} queued change(s)...");
    }

    let outcome = ctx.reconciler.sync().await;
    print_notices(ctx);
    let outcome = outcome?;

    match outcome {
        SyncOutcome::AlreadyRunning => println!("A sync is already running."),
        SyncOutcome::Completed(report) => {
            if report.failed > 0 {
                println!(
                    "Sync finished with failures: {} of {} applied; {} remain queued.",
                    report.synced, report.attempted, report.failed
                );
            } else {
                println!("Sync completed: {} change(s) applied.", report.synced);
            }
        }
    }
    Ok(())
}

fn print_notices(ctx: &mut Context) {
    while let Ok(notice) = ctx.notice_rx.try_recv() {
        match notice {
            Notice::OfflineEntered => println!("Connection lost; changes will be queued."),
            Notice::SyncStarted => println!("Sync started."),
            Notice::SyncSucceeded { synced } => println!("Sync succeeded ({synced} synced)."),
            Notice::SyncFailed { message } => println!("Sync problem: {message}"),
        }
    }
}
