use super::Context;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use orgtree_sync::{NodeId, SyncOutcome};

#[derive(Debug, Args)]
pub struct DeleteArgs {
    /// Id of the entry to delete, together with everything under it
    pub id: String,
}

pub async fn delete(args: DeleteArgs, ctx: &Context) -> Result<()> {
    let mut session = ctx.session().await?;
    let id = NodeId::from(args.id);

    let name = session
        .forest()
        .get(&id)
        .map(|entry| entry.name.clone())
        .unwrap_or_default();

    if let SyncOutcome::Deleted { removed, .. } = session.delete(&id).await? {
        println!("  {} Deleted {}", "✓".green(), name.bold());
        if removed > 1 {
            println!("    {} nested entries removed with it", removed - 1);
        }
    }

    Ok(())
}
