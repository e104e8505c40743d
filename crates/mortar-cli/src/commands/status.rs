use crate::context::Context;
use crate::error::CliError;

pub async fn run_status(ctx: &Context) -> Result<(), CliError> {
    let state = ctx.status.snapshot();
    let queued = ctx.queue.len().await?;
    let mirrored = ctx.mirror.pending_len().await;

    println!(
        "Connectivity: {}",
        if state.online { "online" } else { "offline" }
    );
    if state.syncing {
        println!("Sync: in progress");
    }
    println!("Queued changes: {queued}");
    if mirrored > 0 {
        println!("Optimistic entries awaiting confirmation: {mirrored}");
    }
    Ok(())
}
