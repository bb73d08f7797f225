//! The habit ledger: which habits exist, which were completed on which day, and how many days
//! each habit was completed in each month.

use crate::error::{Error, Result};
use crate::model::{
    CustomHabitRecord, HabitDefinition, RetiredHabitPolicy, Toggle, YearMonth, BUILTIN_HABITS,
};
use crate::store::{self, KvStore};
use anyhow::{bail, Context};
use chrono::NaiveDate;
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};
use std::str::FromStr;
use tracing::debug;

/// The stored `habitData` document. Month keys (`YYYY-MM`) map habit names to counts and day
/// keys (`YYYY-MM-DD`) map habit names to `true`.
type HabitDataDoc = BTreeMap<String, BTreeMap<String, Value>>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HabitLedger {
    builtins: Vec<HabitDefinition>,
    customs: Vec<HabitDefinition>,
    daily: BTreeMap<NaiveDate, BTreeSet<String>>,
    monthly: BTreeMap<YearMonth, BTreeMap<String, u32>>,
    policy: RetiredHabitPolicy,
    version: u64,
}

impl Default for HabitLedger {
    fn default() -> Self {
        Self::new(RetiredHabitPolicy::default())
    }
}

impl HabitLedger {
    /// A first-run ledger: all six built-ins enabled, no custom habits, no history.
    pub fn new(policy: RetiredHabitPolicy) -> Self {
        Self {
            builtins: BUILTIN_HABITS
                .iter()
                .map(|(name, icon)| HabitDefinition::builtin(name, icon, true))
                .collect(),
            customs: Vec::new(),
            daily: BTreeMap::new(),
            monthly: BTreeMap::new(),
            policy,
            version: 0,
        }
    }

    pub fn policy(&self) -> RetiredHabitPolicy {
        self.policy
    }

    /// Bumped by every mutation that changed something.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Flips completion of `name` on `day`, keeping the day's set and the month's count in step.
    ///
    /// Returns `Toggle::Ignored` without changing anything when `name` is not an enabled habit.
    pub fn toggle(&mut self, name: &str, day: NaiveDate) -> Toggle {
        let Some(name) = self.enabled_name(name) else {
            debug!("Ignoring toggle of '{name}', which is not an enabled habit");
            return Toggle::Ignored;
        };
        let counts = self.monthly.entry(YearMonth::of(day)).or_default();
        let completed = self.daily.entry(day).or_default();

        let outcome = if completed.remove(&name) {
            if let Some(count) = counts.get_mut(&name) {
                *count = count.saturating_sub(1);
            }
            Toggle::Cleared
        } else {
            *counts.entry(name.clone()).or_insert(0) += 1;
            completed.insert(name.clone());
            Toggle::Completed
        };

        if completed.is_empty() {
            self.daily.remove(&day);
        }
        self.version += 1;
        debug!("Habit '{name}' on {day}: {outcome:?}");
        outcome
    }

    /// Adds a user-defined habit.
    ///
    /// # Errors
    /// - `InvalidInput` if the name or icon is empty.
    /// - `DuplicateName` if any built-in (enabled or not) or custom habit has the same name,
    ///   ignoring case.
    pub fn add_custom(&mut self, name: &str, icon: &str) -> Result<()> {
        let name = name.trim();
        let icon = icon.trim();
        if name.is_empty() || icon.is_empty() {
            return Err(Error::invalid_input(
                "Please enter both a habit name and an icon",
            ));
        }
        if self.definitions().any(|h| h.same_name(name)) {
            return Err(Error::duplicate_name(format!(
                "A habit named '{name}' already exists"
            )));
        }
        self.customs.push(HabitDefinition::custom(name, icon));
        self.version += 1;
        debug!("Added custom habit '{name}' ({icon})");
        Ok(())
    }

    /// Deletes a custom habit's definition. Its history is kept or purged according to the
    /// ledger's `RetiredHabitPolicy`.
    pub fn remove_custom(&mut self, name: &str) -> Result<HabitDefinition> {
        if self.builtins.iter().any(|h| h.same_name(name)) {
            return Err(Error::invalid_input(format!(
                "'{name}' is a built-in habit; it can be disabled but not deleted"
            )));
        }
        let Some(ix) = self.customs.iter().position(|h| h.same_name(name)) else {
            return Err(Error::not_found(format!("There is no custom habit named '{name}'")));
        };
        let removed = self.customs.remove(ix);
        if self.policy == RetiredHabitPolicy::Purge {
            self.purge_history(&removed.name);
        }
        self.version += 1;
        debug!("Removed custom habit '{}'", removed.name);
        Ok(removed)
    }

    pub fn disable_builtin(&mut self, name: &str) -> Result<()> {
        self.set_builtin_enabled(name, false)
    }

    pub fn enable_builtin(&mut self, name: &str) -> Result<()> {
        self.set_builtin_enabled(name, true)
    }

    fn set_builtin_enabled(&mut self, name: &str, enabled: bool) -> Result<()> {
        let Some(habit) = self.builtins.iter_mut().find(|h| h.same_name(name)) else {
            return Err(Error::not_found(format!("There is no built-in habit named '{name}'")));
        };
        if habit.enabled != enabled {
            habit.enabled = enabled;
            self.version += 1;
            debug!("Built-in habit '{}' enabled: {enabled}", habit.name);
        }
        Ok(())
    }

    /// Enabled built-ins followed by custom habits. Every view iterates habits in this order.
    pub fn active_habit_names(&self) -> Vec<&str> {
        self.active().map(|h| h.name.as_str()).collect()
    }

    /// Every definition, enabled or not: built-ins first, then custom habits.
    pub fn catalog(&self) -> impl Iterator<Item = &HabitDefinition> {
        self.definitions()
    }

    /// The enabled habits completed on `day`, in canonical order.
    pub fn completed_on(&self, day: NaiveDate) -> Vec<&str> {
        let Some(done) = self.daily.get(&day) else {
            return Vec::new();
        };
        self.active()
            .filter(|h| done.contains(&h.name))
            .map(|h| h.name.as_str())
            .collect()
    }

    pub fn is_completed(&self, name: &str, day: NaiveDate) -> bool {
        self.daily
            .get(&day)
            .is_some_and(|done| done.contains(name))
    }

    /// The number of days in `month` on which `name` was completed.
    pub fn count(&self, month: YearMonth, name: &str) -> u32 {
        self.monthly
            .get(&month)
            .and_then(|counts| counts.get(name))
            .copied()
            .unwrap_or(0)
    }

    /// Whether anything has ever been recorded for `month`.
    pub fn has_month(&self, month: YearMonth) -> bool {
        self.monthly.contains_key(&month)
    }

    /// Names with a non-zero count in `month` that no longer have a definition, in name order.
    pub fn retired_names(&self, month: YearMonth) -> Vec<&str> {
        let Some(counts) = self.monthly.get(&month) else {
            return Vec::new();
        };
        counts
            .iter()
            .filter(|(name, count)| **count > 0 && !self.definitions().any(|h| h.name == **name))
            .map(|(name, _)| name.as_str())
            .collect()
    }

    /// The canonical spelling of `name` if it is an enabled habit.
    fn enabled_name(&self, name: &str) -> Option<String> {
        self.active()
            .find(|h| h.same_name(name))
            .map(|h| h.name.clone())
    }

    fn definitions(&self) -> impl Iterator<Item = &HabitDefinition> {
        self.builtins.iter().chain(self.customs.iter())
    }

    fn active(&self) -> impl Iterator<Item = &HabitDefinition> {
        self.definitions().filter(|h| h.enabled)
    }

    fn purge_history(&mut self, name: &str) {
        for done in self.daily.values_mut() {
            done.remove(name);
        }
        self.daily.retain(|_, done| !done.is_empty());
        for counts in self.monthly.values_mut() {
            counts.remove(name);
        }
        debug!("Purged the history of '{name}'");
    }

    /// Loads the ledger from `store`. Absent keys give the first-run state.
    pub async fn load(store: &dyn KvStore, policy: RetiredHabitPolicy) -> anyhow::Result<Self> {
        let mut ledger = Self::new(policy);

        let customs: Vec<CustomHabitRecord> = store::load_json(store, store::CUSTOM_HABITS)
            .await?
            .unwrap_or_default();
        ledger.customs = customs
            .into_iter()
            .map(|r| HabitDefinition::custom(r.name, r.icon))
            .collect();

        let disabled: Vec<String> = store::load_json(store, store::DISABLED_DEFAULT_HABITS)
            .await?
            .unwrap_or_default();
        for habit in ledger.builtins.iter_mut() {
            habit.enabled = !disabled.iter().any(|d| *d == habit.name);
        }

        let doc: HabitDataDoc = store::load_json(store, store::HABIT_DATA)
            .await?
            .unwrap_or_default();
        ledger
            .read_habit_data(doc)
            .context("Unable to read the stored habit data")?;

        debug!(
            "Loaded {} habit definitions, {} days and {} months of history",
            ledger.builtins.len() + ledger.customs.len(),
            ledger.daily.len(),
            ledger.monthly.len()
        );
        Ok(ledger)
    }

    /// Writes the whole ledger back to `store` in one batch.
    pub async fn save(&self, store: &dyn KvStore) -> anyhow::Result<()> {
        let mut batch = store::Batch::new();
        batch.put(store::HABIT_DATA, &self.habit_data())?;

        let customs: Vec<CustomHabitRecord> = self
            .customs
            .iter()
            .map(|h| CustomHabitRecord {
                name: h.name.clone(),
                icon: h.icon.clone(),
            })
            .collect();
        batch.put(store::CUSTOM_HABITS, &customs)?;

        let disabled: Vec<&str> = self
            .builtins
            .iter()
            .filter(|h| !h.enabled)
            .map(|h| h.name.as_str())
            .collect();
        batch.put(store::DISABLED_DEFAULT_HABITS, &disabled)?;
        batch.write(store).await
    }

    /// Splits the stored document by the shape of its keys into the two typed maps.
    fn read_habit_data(&mut self, doc: HabitDataDoc) -> anyhow::Result<()> {
        for (key, entries) in doc {
            match key.len() {
                7 => {
                    let month = YearMonth::from_str(&key)?;
                    let counts = self.monthly.entry(month).or_default();
                    for (name, value) in entries {
                        let Some(count) = value.as_u64() else {
                            bail!("The count of '{name}' in {key} is not a whole number: {value}");
                        };
                        counts.insert(name, u32::try_from(count).unwrap_or(u32::MAX));
                    }
                }
                10 => {
                    let day = NaiveDate::parse_from_str(&key, "%Y-%m-%d")
                        .with_context(|| format!("'{key}' is not a valid day"))?;
                    let done: BTreeSet<String> = entries
                        .into_iter()
                        .filter(|(_, value)| value.as_bool() == Some(true))
                        .map(|(name, _)| name)
                        .collect();
                    if !done.is_empty() {
                        self.daily.insert(day, done);
                    }
                }
                _ => bail!("'{key}' is neither a month (YYYY-MM) nor a day (YYYY-MM-DD)"),
            }
        }
        Ok(())
    }

    fn habit_data(&self) -> HabitDataDoc {
        let months = self.monthly.iter().map(|(month, counts)| {
            let entries: BTreeMap<String, Value> = counts
                .iter()
                .map(|(name, count)| (name.clone(), Value::from(*count)))
                .collect();
            (month.to_string(), entries)
        });
        let days = self.daily.iter().map(|(day, done)| {
            let entries: BTreeMap<String, Value> = done
                .iter()
                .map(|name| (name.clone(), Value::Bool(true)))
                .collect();
            (day.format("%Y-%m-%d").to_string(), entries)
        });
        months.chain(days).collect()
    }
}
