//! The durable key-value store that every ledger is written back to.
//!
//! Values are JSON documents stored under fixed key names. A missing key means "use the default
//! state"; a present but unreadable value is an error, never silently replaced.

mod memory;
mod schema;
mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use anyhow::Context;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::trace;

/// Habit completions and monthly counts.
pub const HABIT_DATA: &str = "habitData";
/// User-defined habits, `[{name, icon}]`.
pub const CUSTOM_HABITS: &str = "customHabits";
/// Names of disabled built-in habits.
pub const DISABLED_DEFAULT_HABITS: &str = "disabledDefaultHabits";
/// `[{id, name, balance}]`.
pub const FINANCE_ACCOUNTS: &str = "financeAccounts";
/// `[{id, accountId, title, amount, type, date}]`.
pub const FINANCE_TRANSACTIONS: &str = "financeTransactions";
/// The id of the active account, as a JSON string.
pub const FINANCE_CURRENT_ACCOUNT: &str = "financeCurrentAccount";
/// `[{text, checked}]`.
pub const NOTES: &str = "notes";
/// `[{name, date}]`.
pub const EVENTS: &str = "events";

/// A string-keyed durable store. Writes complete before `set` or `set_many` returns.
#[async_trait]
pub trait KvStore: Send + Sync {
    /// Returns the stored value, or `None` if the key has never been written.
    async fn get(&self, key: &str) -> anyhow::Result<Option<String>>;

    /// Stores every `(key, value)` pair, replacing previous values. Either all of them are
    /// written or, on error, none are.
    async fn set_many(&self, entries: &[(&str, String)]) -> anyhow::Result<()>;

    /// Stores `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: &str) -> anyhow::Result<()> {
        self.set_many(&[(key, value.to_string())]).await
    }
}

/// Reads and parses the JSON document stored under `key`.
pub(crate) async fn load_json<T>(store: &dyn KvStore, key: &str) -> anyhow::Result<Option<T>>
where
    T: DeserializeOwned,
{
    let Some(raw) = store
        .get(key)
        .await
        .with_context(|| format!("Unable to read '{key}' from the store"))?
    else {
        trace!("Key '{key}' is absent, using the default");
        return Ok(None);
    };
    let value = serde_json::from_str(&raw)
        .with_context(|| format!("The stored value of '{key}' is not valid"))?;
    Ok(Some(value))
}

/// The JSON documents of one ledger, written together so a ledger is never half saved.
#[derive(Debug, Default)]
pub(crate) struct Batch {
    entries: Vec<(&'static str, String)>,
}

impl Batch {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Serializes `value` to be written under `key`.
    pub(crate) fn put<T>(&mut self, key: &'static str, value: &T) -> anyhow::Result<()>
    where
        T: Serialize + ?Sized,
    {
        let json = serde_json::to_string(value)
            .with_context(|| format!("Unable to serialize '{key}'"))?;
        self.entries.push((key, json));
        Ok(())
    }

    pub(crate) async fn write(self, store: &dyn KvStore) -> anyhow::Result<()> {
        let keys: Vec<&str> = self.entries.iter().map(|(key, _)| *key).collect();
        store
            .set_many(&self.entries)
            .await
            .with_context(|| format!("Unable to write {} to the store", keys.join(", ")))?;
        trace!(
            "Wrote {} ({} bytes)",
            keys.join(", "),
            self.entries.iter().map(|(_, json)| json.len()).sum::<usize>()
        );
        Ok(())
    }
}
