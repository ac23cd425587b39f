use super::Context;
use crate::config::{Config, DEFAULT_CONFIG_NAME};
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use orgtree_sync::StoreConfig;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct InitArgs {
    /// JSON file that holds the hierarchy documents
    #[arg(short, long, default_value = "hierarchy.json")]
    pub path: PathBuf,

    /// Use a Firestore project instead of a local file
    #[cfg(feature = "firestore")]
    #[arg(long, conflicts_with = "path")]
    pub firestore_project: Option<String>,

    /// Force overwrite existing config
    #[arg(short, long)]
    pub force: bool,
}

pub fn init(args: InitArgs, ctx: &Context) -> Result<()> {
    let config_path = match &ctx.config_path {
        Some(path) => ctx.cwd.join(path),
        None => ctx.cwd.join(DEFAULT_CONFIG_NAME),
    };

    if config_path.exists() && !args.force {
        println!(
            "{} {} already exists",
            "⚠️".yellow(),
            config_path.display().to_string().bright_white()
        );
        println!("Use --force to overwrite");
        return Ok(());
    }

    println!("{}", "📝 Initializing orgtree...".bright_blue().bold());

    let config = Config {
        store: store_config(&args),
    };
    fs::write(&config_path, config.to_json()?)?;
    println!("  {} Created {}", "✓".green(), config_path.display());

    println!();
    println!("{}", "✅ Ready!".green().bold());
    println!();
    println!("Next steps:");
    println!("  1. Run: orgtree add Engineering");
    println!("  2. Run: orgtree tree");

    Ok(())
}

fn store_config(args: &InitArgs) -> StoreConfig {
    #[cfg(feature = "firestore")]
    {
        if let Some(project) = &args.firestore_project {
            return StoreConfig::Firestore(orgtree_sync::FirestoreConfig::new(project.clone()));
        }
    }

    StoreConfig::File {
        path: args.path.clone(),
    }
}
