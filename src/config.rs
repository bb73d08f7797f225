//! Configuration file handling for daybook.
//!
//! The configuration file is stored at `$DAYBOOK_HOME/config.json`. Next to it lives the
//! `daybook.sqlite` store that holds the dashboard's data.

use crate::chart::ChartFrame;
use crate::dashboard::Settings;
use crate::model::RetiredHabitPolicy;
use crate::store::SqliteStore;
use crate::utils;
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const APP_NAME: &str = "daybook";
const CONFIG_VERSION: u8 = 1;
const CONFIG_JSON: &str = "config.json";
const DAYBOOK_SQLITE: &str = "daybook.sqlite";
const DEFAULT_CURRENCY_SYMBOL: &str = "₹";

/// The `Config` object represents the configuration of the app. You instantiate it by providing
/// the path to `$DAYBOOK_HOME` and from there it loads `$DAYBOOK_HOME/config.json` and opens the
/// store.
#[derive(Debug, Clone)]
pub struct Config {
    root: PathBuf,
    config_path: PathBuf,
    config_file: ConfigFile,
    store: SqliteStore,
}

impl Config {
    /// Creates the data directory and:
    /// - Writes an initial `config.json` with the given settings and defaults for the rest
    /// - Creates an empty SQLite store
    ///
    /// # Errors
    /// - Returns an error if the directory already holds a daybook, or any file operation fails.
    pub async fn create(
        dir: impl Into<PathBuf>,
        retired_habits: RetiredHabitPolicy,
        currency_symbol: Option<&str>,
    ) -> Result<Self> {
        let maybe_relative = dir.into();
        utils::make_dir(&maybe_relative)
            .await
            .context("Unable to create the daybook home directory")?;
        let root = utils::canonicalize(&maybe_relative).await?;

        let config_path = root.join(CONFIG_JSON);
        if config_path.exists() {
            bail!("There is already a daybook at {}", root.display());
        }

        let config_file = ConfigFile {
            retired_habits,
            currency_symbol: currency_symbol
                .unwrap_or(DEFAULT_CURRENCY_SYMBOL)
                .to_string(),
            ..ConfigFile::default()
        };
        config_file.save(&config_path).await?;

        let store = SqliteStore::init(root.join(DAYBOOK_SQLITE))
            .await
            .context("Unable to create the SQLite store")?;

        Ok(Self {
            root,
            config_path,
            config_file,
            store,
        })
    }

    /// This will
    /// - validate that `daybook_home` exists and that the config file exists
    /// - load the config file
    /// - open the store, migrating its schema if it is out of date
    pub async fn load(daybook_home: impl Into<PathBuf>) -> Result<Self> {
        let maybe_relative = daybook_home.into();
        let root = utils::canonicalize(&maybe_relative)
            .await
            .context("Daybook Home is missing, have you run 'daybook init'?")?;

        let config_path = root.join(CONFIG_JSON);
        if !config_path.is_file() {
            bail!("The config file is missing '{}'", config_path.display())
        }
        let config_file = ConfigFile::load(&config_path).await?;

        let store = SqliteStore::load(root.join(DAYBOOK_SQLITE))
            .await
            .context("Unable to open the SQLite store")?;

        Ok(Self {
            root,
            config_path,
            config_file,
            store,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn store(&self) -> &SqliteStore {
        &self.store
    }

    pub fn retired_habits(&self) -> RetiredHabitPolicy {
        self.config_file.retired_habits
    }

    pub fn currency_symbol(&self) -> &str {
        &self.config_file.currency_symbol
    }

    pub fn chart(&self) -> ChartFrame {
        self.config_file.chart
    }

    /// The dashboard settings this configuration describes.
    pub fn settings(&self) -> Settings {
        Settings {
            retired_habits: self.retired_habits(),
            currency_symbol: self.currency_symbol().to_string(),
            chart: self.chart(),
        }
    }
}

/// Represents the serialization and deserialization format of the configuration file.
///
/// Example configuration:
/// ```json
/// {
///   "app_name": "daybook",
///   "config_version": 1,
///   "retired_habits": "hide",
///   "currency_symbol": "₹",
///   "chart": { "width": 300.0, "height": 200.0, "margin": 30.0 }
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
struct ConfigFile {
    /// Application name, should always be "daybook"
    app_name: String,

    /// Configuration file version
    config_version: u8,

    /// What happens to the history of a custom habit once it is removed
    #[serde(default)]
    retired_habits: RetiredHabitPolicy,

    /// Printed in front of every amount
    #[serde(default = "default_currency_symbol")]
    currency_symbol: String,

    /// The size of the chart drawing area
    #[serde(default)]
    chart: ChartFrame,
}

fn default_currency_symbol() -> String {
    DEFAULT_CURRENCY_SYMBOL.to_string()
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            app_name: APP_NAME.to_string(),
            config_version: CONFIG_VERSION,
            retired_habits: RetiredHabitPolicy::default(),
            currency_symbol: default_currency_symbol(),
            chart: ChartFrame::default(),
        }
    }
}

impl ConfigFile {
    /// Loads a ConfigFile asynchronously from the specified path.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed, or is not a daybook config.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let config: ConfigFile = utils::deserialize(path)
            .await
            .with_context(|| format!("Failed to load config file at {}", path.display()))?;

        anyhow::ensure!(
            config.app_name == APP_NAME,
            "Invalid app_name in config file: expected '{}', got '{}'",
            APP_NAME,
            config.app_name
        );
        anyhow::ensure!(
            config.chart.width > 2.0 * config.chart.margin
                && config.chart.height > 2.0 * config.chart.margin,
            "Invalid chart size in config file: the margins leave no room to draw"
        );

        Ok(config)
    }

    /// Saves the ConfigFile to the specified path.
    pub async fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let p = path.as_ref();
        let data = serde_json::to_string_pretty(self).context("Unable to serialize config")?;
        utils::write(p, data)
            .await
            .context("Unable to write config file")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_config_create_then_load() {
        let dir = TempDir::new().unwrap();
        let home = dir.path().join("daybook_home");
        let created = Config::create(&home, RetiredHabitPolicy::Purge, Some("$"))
            .await
            .unwrap();
        assert!(created.config_path().is_file());
        assert!(created.store().path().is_file());

        let loaded = Config::load(&home).await.unwrap();
        assert_eq!(loaded.retired_habits(), RetiredHabitPolicy::Purge);
        assert_eq!(loaded.currency_symbol(), "$");
        assert_eq!(loaded.chart(), ChartFrame::default());
        assert_eq!(loaded.root(), created.root());
    }

    #[tokio::test]
    async fn test_config_create_twice_fails() {
        let dir = TempDir::new().unwrap();
        Config::create(dir.path(), RetiredHabitPolicy::Hide, None)
            .await
            .unwrap();
        assert!(Config::create(dir.path(), RetiredHabitPolicy::Hide, None)
            .await
            .is_err());
    }

    #[tokio::test]
    async fn test_config_load_missing_home() {
        let dir = TempDir::new().unwrap();
        assert!(Config::load(dir.path().join("nope")).await.is_err());
        assert!(Config::load(dir.path()).await.is_err());
    }

    #[tokio::test]
    async fn test_config_file_load_with_minimal_config() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_JSON);
        utils::write(&path, r#"{"app_name": "daybook", "config_version": 1}"#)
            .await
            .unwrap();
        let config = ConfigFile::load(&path).await.unwrap();
        assert_eq!(config, ConfigFile::default());
    }

    #[tokio::test]
    async fn test_config_file_load_invalid_app_name() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_JSON);
        utils::write(&path, r#"{"app_name": "ledgerly", "config_version": 1}"#)
            .await
            .unwrap();
        let e = ConfigFile::load(&path).await.unwrap_err();
        assert!(e.to_string().contains("Invalid app_name"));
    }

    #[tokio::test]
    async fn test_config_file_load_rejects_unusable_chart() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_JSON);
        let json = r#"{"app_name": "daybook", "config_version": 1,
            "chart": {"width": 50, "height": 200, "margin": 30}}"#;
        utils::write(&path, json).await.unwrap();
        assert!(ConfigFile::load(&path).await.is_err());
    }

    #[tokio::test]
    async fn test_config_file_save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_JSON);
        let original = ConfigFile {
            retired_habits: RetiredHabitPolicy::Show,
            currency_symbol: "€".into(),
            ..ConfigFile::default()
        };
        original.save(&path).await.unwrap();
        assert_eq!(ConfigFile::load(&path).await.unwrap(), original);
    }
}
