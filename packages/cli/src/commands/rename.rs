use super::Context;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use orgtree_sync::NodeId;

#[derive(Debug, Args)]
pub struct RenameArgs {
    /// Id of the entry to rename
    pub id: String,

    /// New name
    pub name: String,
}

pub async fn rename(args: RenameArgs, ctx: &Context) -> Result<()> {
    let mut session = ctx.session().await?;
    let id = NodeId::from(args.id);

    session.edit(&id)?;
    let old = session.form().child_name.clone();
    session.set_child_name(args.name);
    session.submit().await?;

    let renamed = session
        .forest()
        .get(&id)
        .map(|entry| entry.name.clone())
        .unwrap_or_default();
    println!("  {} Renamed {} → {}", "✓".green(), old, renamed.bold());

    Ok(())
}
