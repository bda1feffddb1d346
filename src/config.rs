use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::repository::maven::DEFAULT_BASE_URL;

// =============================================================================
// Time-related constants
// =============================================================================

/// Default refresh interval in milliseconds (24 hours)
pub const DEFAULT_REFRESH_INTERVAL_MS: i64 = 24 * 60 * 60 * 1000;

/// Timeout for fetch operations in milliseconds (30 seconds)
pub const FETCH_TIMEOUT_MS: u64 = 30_000;

/// User agent sent to repositories
pub const USER_AGENT: &str = concat!("maven-version-resolver/", env!("CARGO_PKG_VERSION"));

const APP_DIR: &str = "maven-version-resolver";

/// Resolver configuration structure
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
    pub cache: CacheConfig,
    pub repositories: RepositoriesConfig,
}

/// Cache-related configuration
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct CacheConfig {
    /// Cache refresh interval in milliseconds
    pub refresh_interval: i64,
    pub enabled: bool,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            refresh_interval: DEFAULT_REFRESH_INTERVAL_MS,
            enabled: true,
        }
    }
}

/// Ordered repository list, tried first to last
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct RepositoriesConfig(pub Vec<RepositoryConfig>);

impl Default for RepositoriesConfig {
    fn default() -> Self {
        Self(vec![RepositoryConfig::new(DEFAULT_BASE_URL)])
    }
}

impl RepositoriesConfig {
    /// URLs of the enabled repositories, in order
    pub fn enabled_urls(&self) -> Vec<&str> {
        self.0
            .iter()
            .filter(|repo| repo.enabled)
            .map(|repo| repo.url.as_str())
            .collect()
    }
}

/// Individual repository configuration
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct RepositoryConfig {
    pub url: String,
    #[serde(default = "enabled_by_default")]
    pub enabled: bool,
}

impl RepositoryConfig {
    pub fn new(url: &str) -> Self {
        Self {
            url: url.to_string(),
            enabled: true,
        }
    }
}

fn enabled_by_default() -> bool {
    true
}

impl Config {
    /// Replaces the configured repositories with the given URLs
    pub fn with_repositories(mut self, urls: &[String]) -> Self {
        if !urls.is_empty() {
            self.repositories =
                RepositoriesConfig(urls.iter().map(|url| RepositoryConfig::new(url)).collect());
        }
        self
    }

    pub fn without_cache(mut self) -> Self {
        self.cache.enabled = false;
        self
    }
}

/// Loads `config.json` from the data directory, falling back to defaults
/// when the file does not exist.
pub fn load_config() -> anyhow::Result<Config> {
    load_config_from(&config_path())
}

pub fn load_config_from(path: &Path) -> anyhow::Result<Config> {
    if !path.exists() {
        return Ok(Config::default());
    }

    let content = std::fs::read_to_string(path)?;
    let config = serde_json::from_str(&content)
        .map_err(|e| anyhow::anyhow!("invalid configuration {}: {}", path.display(), e))?;
    Ok(config)
}

/// Returns the path to the data directory for maven-version-resolver.
/// Uses $XDG_DATA_HOME/maven-version-resolver if XDG_DATA_HOME is set,
/// otherwise falls back to ~/.local/share/maven-version-resolver,
/// or ./maven-version-resolver if neither is available.
pub fn data_dir() -> PathBuf {
    data_dir_with_env(std::env::var("XDG_DATA_HOME").ok(), dirs::home_dir())
}

/// Returns the path to the configuration file.
pub fn config_path() -> PathBuf {
    data_dir().join("config.json")
}

/// Returns the path to the database file.
pub fn db_path() -> PathBuf {
    data_dir().join("versions.db")
}

/// Returns the path to the log file.
pub fn log_path() -> PathBuf {
    data_dir().join("maven-version-resolver.log")
}

fn data_dir_with_env(xdg_data_home: Option<String>, home_dir: Option<PathBuf>) -> PathBuf {
    let data_dir = xdg_data_home
        .map(PathBuf::from)
        .or_else(|| home_dir.map(|home| home.join(".local/share")))
        .unwrap_or_else(|| PathBuf::from("."));

    data_dir.join(APP_DIR)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn config_from_partial_object_uses_defaults_for_missing_fields() {
        let result = serde_json::from_value::<Config>(json!({
            "cache": {
                "refreshInterval": 1000
            }
        }))
        .unwrap();

        assert_eq!(result.cache.refresh_interval, 1000);
        assert!(result.cache.enabled);
        assert_eq!(result.repositories, RepositoriesConfig::default());
    }

    #[test]
    fn config_from_full_object_parses_all_fields() {
        let result = serde_json::from_value::<Config>(json!({
            "cache": {
                "refreshInterval": 5000,
                "enabled": false
            },
            "repositories": [
                { "url": "https://repo.example.org/maven2" },
                { "url": "https://mirror.example.org/maven2", "enabled": false }
            ]
        }))
        .unwrap();

        assert_eq!(
            result,
            Config {
                cache: CacheConfig {
                    refresh_interval: 5000,
                    enabled: false,
                },
                repositories: RepositoriesConfig(vec![
                    RepositoryConfig {
                        url: "https://repo.example.org/maven2".to_string(),
                        enabled: true,
                    },
                    RepositoryConfig {
                        url: "https://mirror.example.org/maven2".to_string(),
                        enabled: false,
                    },
                ]),
            }
        );
        assert_eq!(
            result.repositories.enabled_urls(),
            vec!["https://repo.example.org/maven2"]
        );
    }

    #[test]
    fn default_repository_is_maven_central() {
        assert_eq!(
            Config::default().repositories.enabled_urls(),
            vec![DEFAULT_BASE_URL]
        );
    }

    #[test]
    fn cli_overrides_replace_repositories_and_disable_cache() {
        let config = Config::default()
            .with_repositories(&["https://a".to_string(), "https://b".to_string()])
            .without_cache();

        assert_eq!(
            config.repositories.enabled_urls(),
            vec!["https://a", "https://b"]
        );
        assert!(!config.cache.enabled);
    }

    #[test]
    fn empty_override_keeps_configured_repositories() {
        let config = Config::default().with_repositories(&[]);
        assert_eq!(config.repositories, RepositoriesConfig::default());
    }

    #[test]
    fn load_config_from_missing_file_returns_default() {
        let temp_dir = TempDir::new().unwrap();
        let config = load_config_from(&temp_dir.path().join("config.json")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn load_config_from_reads_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.json");
        std::fs::write(&path, r#"{"cache":{"enabled":false}}"#).unwrap();

        let config = load_config_from(&path).unwrap();

        assert!(!config.cache.enabled);
        assert_eq!(config.cache.refresh_interval, DEFAULT_REFRESH_INTERVAL_MS);
    }

    #[test]
    fn load_config_from_rejects_malformed_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();

        assert!(load_config_from(&path).is_err());
    }

    #[test]
    fn data_dir_with_env_uses_xdg_data_home_when_set() {
        let path = data_dir_with_env(
            Some("/tmp/test-data".to_string()),
            Some(PathBuf::from("/home/user")),
        );

        assert_eq!(path, PathBuf::from("/tmp/test-data/maven-version-resolver"));
    }

    #[test]
    fn data_dir_with_env_falls_back_to_home_local_share() {
        let path = data_dir_with_env(None, Some(PathBuf::from("/home/user")));

        assert_eq!(
            path,
            PathBuf::from("/home/user/.local/share/maven-version-resolver")
        );
    }

    #[test]
    fn data_dir_with_env_falls_back_to_current_dir_when_no_dirs_available() {
        let path = data_dir_with_env(None, None);
        assert_eq!(path, PathBuf::from("./maven-version-resolver"));
    }
}
