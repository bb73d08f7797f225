use crate::commands::Out;
use crate::error::{ErrorType, IntoResult};
use crate::model::RetiredHabitPolicy;
use crate::{Config, Result};
use anyhow::Context;
use std::path::Path;

/// Creates the data directory with:
/// - An initial `config.json` using the given settings along with defaults
/// - An empty SQLite store
///
/// # Arguments
/// - `daybook_home` - The directory that will be the root of data directory, e.g. `$HOME/daybook`
/// - `retired_habits` - What removing a custom habit does to its history.
/// - `currency_symbol` - Printed in front of amounts. `None` keeps the default.
///
/// # Errors
/// - Returns an error if the directory already holds a daybook or any file operation fails.
pub async fn init(
    daybook_home: &Path,
    retired_habits: RetiredHabitPolicy,
    currency_symbol: Option<&str>,
) -> Result<Out<()>> {
    let config = Config::create(daybook_home, retired_habits, currency_symbol)
        .await
        .context("Unable to create the data directory and configs")
        .pub_result(ErrorType::Config)?;
    Ok(format!("Successfully created the daybook at {}", config.root().display()).into())
}
