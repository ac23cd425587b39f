use super::Context;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use orgtree_sync::Node;

#[derive(Debug, Args)]
pub struct TreeArgs {
    /// Print the session view as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn tree(args: TreeArgs, ctx: &Context) -> Result<()> {
    let session = ctx.session().await?;
    let view = session.view();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&view)?);
        return Ok(());
    }

    if view.is_empty() {
        println!("No entries saved yet.");
        return Ok(());
    }

    for (depth, node) in rows(&view.tree) {
        let indent = "  ".repeat(depth);
        if depth == 0 {
            println!("{}{}  {}", indent, node.name.bold(), node.id.to_string().dimmed());
        } else {
            println!(
                "{}{}  {}  {}",
                indent,
                node.name.bold(),
                node.breadcrumb.bright_blue(),
                node.id.to_string().dimmed()
            );
        }
    }

    let dropped = session.last_report().dropped();
    if dropped > 0 {
        println!();
        println!(
            "{} {} record(s) skipped, run with RUST_LOG=warn for details",
            "⚠️".yellow(),
            dropped
        );
    }

    Ok(())
}

/// Pre-order rows with their depth
fn rows(roots: &[Node]) -> Vec<(usize, &Node)> {
    fn visit<'a>(node: &'a Node, depth: usize, out: &mut Vec<(usize, &'a Node)>) {
        out.push((depth, node));
        for child in &node.children {
            visit(child, depth + 1, out);
        }
    }

    let mut out = Vec::new();
    for root in roots {
        visit(root, 0, &mut out);
    }
    out
}
