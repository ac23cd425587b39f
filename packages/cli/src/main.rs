mod commands;
mod config;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{
    add, delete, init, rename, tree, AddArgs, Context, DeleteArgs, InitArgs, RenameArgs, TreeArgs,
};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Orgtree CLI - Parent/child org hierarchies with breadcrumbs
#[derive(Parser, Debug)]
#[command(name = "orgtree")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Config file (default: ./orgtree.config.json)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write a config file pointing at a document store
    Init(InitArgs),

    /// Print the hierarchy with breadcrumbs
    Tree(TreeArgs),

    /// Add an entry, as a root or under a parent
    Add(AddArgs),

    /// Rename an entry in place
    Rename(RenameArgs),

    /// Delete an entry and everything under it
    Delete(DeleteArgs),
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match std::env::current_dir() {
        Ok(cwd) => {
            let ctx = Context {
                cwd,
                config_path: cli.config,
            };
            run(cli.command, &ctx).await
        }
        Err(e) => Err(anyhow::anyhow!("Cannot get current directory: {e}")),
    };

    if let Err(err) = result {
        eprintln!();
        eprintln!("{} {:#}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}

async fn run(command: Command, ctx: &Context) -> anyhow::Result<()> {
    match command {
        Command::Init(args) => init(args, ctx),
        Command::Tree(args) => tree(args, ctx).await,
        Command::Add(args) => add(args, ctx).await,
        Command::Rename(args) => rename(args, ctx).await,
        Command::Delete(args) => delete(args, ctx).await,
    }
}
