pub mod add;
pub mod delete;
pub mod init;
pub mod rename;
pub mod tree;

pub use add::{add, AddArgs};
pub use delete::{delete, DeleteArgs};
pub use init::{init, InitArgs};
pub use rename::{rename, RenameArgs};
pub use tree::{tree, TreeArgs};

use crate::config::{Config, LoadedConfig};
use anyhow::Result;
use orgtree_sync::HierarchySession;
use std::path::PathBuf;

/// Where a command runs and which config it should use
#[derive(Debug, Clone)]
pub struct Context {
    pub cwd: PathBuf,

    /// `--config`; `orgtree.config.json` in `cwd` otherwise
    pub config_path: Option<PathBuf>,
}

impl Context {
    pub fn load_config(&self) -> Result<LoadedConfig> {
        match &self.config_path {
            Some(path) => Config::load_from(&self.cwd.join(path)),
            None => Config::load(&self.cwd),
        }
    }

    /// Open the configured store and load the current hierarchy
    pub async fn session(&self) -> Result<HierarchySession> {
        let loaded = self.load_config()?;
        let store = loaded.config.store.open(&loaded.base_dir)?;

        let mut session = HierarchySession::new(store);
        session.load().await?;
        Ok(session)
    }
}
