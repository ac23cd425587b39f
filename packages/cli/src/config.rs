use anyhow::Context;
use orgtree_sync::StoreConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_NAME: &str = "orgtree.config.json";

/// Orgtree configuration file format
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Where the hierarchy documents live
    #[serde(default)]
    pub store: StoreConfig,
}

/// A loaded config plus the directory its relative paths resolve against
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: Config,
    pub base_dir: PathBuf,
}

impl Config {
    /// Load `orgtree.config.json` from `cwd`, or defaults if there is none
    pub fn load(cwd: &Path) -> anyhow::Result<LoadedConfig> {
        let config_path = cwd.join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            Ok(LoadedConfig {
                config: Config::default(),
                base_dir: cwd.to_path_buf(),
            })
        }
    }

    /// Load an explicitly named config file; it must exist
    pub fn load_from(path: &Path) -> anyhow::Result<LoadedConfig> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Cannot read config {}", path.display()))?;
        let config: Config = serde_json::from_str(&content)
            .with_context(|| format!("Invalid config {}", path.display()))?;

        let base_dir = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));

        Ok(LoadedConfig { config, base_dir })
    }

    pub fn to_json(&self) -> anyhow::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_file_config() {
        let json = r#"{ "store": { "kind": "file", "path": "data/org.json" } }"#;

        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(
            config.store,
            StoreConfig::File {
                path: PathBuf::from("data/org.json")
            }
        );
    }

    #[cfg(feature = "firestore")]
    #[test]
    fn test_parse_firestore_config() {
        let json = r#"{
            "store": {
                "kind": "firestore",
                "project": "my-apps",
                "apiKey": "abc"
            }
        }"#;

        let config: Config = serde_json::from_str(json).unwrap();
        let StoreConfig::Firestore(firestore) = config.store else {
            panic!("expected firestore store");
        };
        assert_eq!(firestore.project, "my-apps");
        assert_eq!(firestore.collection, "hierarchies");
        assert_eq!(firestore.api_key.as_deref(), Some("abc"));
    }

    #[test]
    fn test_default_config() {
        let config: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(
            config.store,
            StoreConfig::File {
                path: PathBuf::from("hierarchy.json")
            }
        );
    }

    #[test]
    fn test_missing_config_falls_back() {
        let dir = tempfile::tempdir().unwrap();

        let loaded = Config::load(dir.path()).unwrap();
        assert_eq!(loaded.config, Config::default());
        assert_eq!(loaded.base_dir, dir.path());
    }

    #[test]
    fn test_explicit_config_must_exist() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Config::load_from(&dir.path().join("nope.json")).is_err());
    }

    #[test]
    fn test_relative_paths_resolve_next_to_config() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("conf");
        std::fs::create_dir(&nested).unwrap();
        let path = nested.join("custom.json");
        std::fs::write(&path, Config::default().to_json().unwrap()).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.base_dir, nested);
    }
}
