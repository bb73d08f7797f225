//! Shared test utilities for creating test environments.
//!
//! This module is only compiled when running tests (`#[cfg(test)]`).

use crate::commands::open_dashboard;
use crate::dashboard::Dashboard;
use crate::model::RetiredHabitPolicy;
use crate::Config;
use chrono::NaiveDate;
use tempfile::TempDir;

/// Test environment that sets up a daybook home directory with a Config and an empty store.
/// Holds TempDir to keep the directory alive for the duration of the test.
pub(crate) struct TestEnv {
    _temp_dir: TempDir,
    config: Config,
}

impl TestEnv {
    /// Creates a test environment with the default settings.
    pub(crate) async fn new() -> Self {
        Self::with_policy(RetiredHabitPolicy::Hide).await
    }

    pub(crate) async fn with_policy(retired_habits: RetiredHabitPolicy) -> Self {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("daybook");
        let config = Config::create(&root, retired_habits, None).await.unwrap();
        Self {
            _temp_dir: temp_dir,
            config,
        }
    }

    pub(crate) fn config(&self) -> &Config {
        &self.config
    }

    /// The fixed reference date of every test: Monday, January 15th 2024.
    pub(crate) fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
    }

    /// Opens a fresh dashboard over the environment's store, as a new command invocation would.
    pub(crate) async fn dashboard(&self) -> Dashboard {
        open_dashboard(&self.config, Self::today()).await.unwrap()
    }
}
