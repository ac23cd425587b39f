use super::Context;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use orgtree_hierarchy::breadcrumb_of;
use orgtree_sync::{NodeId, SyncOutcome};

#[derive(Debug, Args)]
pub struct AddArgs {
    /// Name of the new entry
    pub name: String,

    /// Id of the parent entry; omit to add a root
    #[arg(short, long)]
    pub parent: Option<String>,
}

pub async fn add(args: AddArgs, ctx: &Context) -> Result<()> {
    let mut session = ctx.session().await?;

    if let Some(parent) = &args.parent {
        session.add_child(&NodeId::from(parent.as_str()))?;
    }
    session.set_child_name(args.name);

    if let SyncOutcome::Inserted { id } = session.submit().await? {
        let breadcrumb = breadcrumb_of(session.forest(), &id).unwrap_or_default();
        println!("  {} Added {}  {}", "✓".green(), breadcrumb.bold(), id.to_string().dimmed());
    }

    Ok(())
}
