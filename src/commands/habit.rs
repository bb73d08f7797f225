use crate::commands::{open_dashboard, Out};
use crate::error::Error;
use crate::model::{HabitDefinition, RetiredHabitPolicy, Toggle, YearMonth};
use crate::projection::TallyEntry;
use crate::{Config, Result};
use chrono::NaiveDate;
use std::fmt::Write;

/// Marks `name` done on `day` (default: today), or clears it if it is already done.
///
/// # Errors
/// - `NotFound` if `name` is not an enabled habit.
pub async fn habit_toggle(
    config: &Config,
    today: NaiveDate,
    name: &str,
    day: Option<NaiveDate>,
) -> Result<Out<Toggle>> {
    let mut dashboard = open_dashboard(config, today).await?;
    let day = day.unwrap_or(today);
    let outcome = dashboard.toggle_habit(name, Some(day)).await?;
    let message = match outcome {
        Toggle::Completed => format!("Marked '{name}' done for {day}"),
        Toggle::Cleared => format!("Marked '{name}' not done for {day}"),
        Toggle::Ignored => {
            return Err(Error::not_found(format!(
                "'{name}' is not an enabled habit, see 'daybook habit list'"
            )))
        }
    };
    Ok(Out::new(message, outcome))
}

pub async fn habit_add(config: &Config, today: NaiveDate, name: &str, icon: &str) -> Result<Out<()>> {
    let mut dashboard = open_dashboard(config, today).await?;
    dashboard.add_custom_habit(name, icon).await?;
    Ok(format!("Added habit '{}'", name.trim()).into())
}

pub async fn habit_remove(config: &Config, today: NaiveDate, name: &str) -> Result<Out<()>> {
    let mut dashboard = open_dashboard(config, today).await?;
    dashboard.remove_custom_habit(name).await?;
    Ok(format!(
        "Removed habit '{name}' ({} its history)",
        match config.retired_habits() {
            RetiredHabitPolicy::Purge => "erased",
            _ => "kept",
        }
    )
    .into())
}

pub async fn habit_disable(config: &Config, today: NaiveDate, name: &str) -> Result<Out<()>> {
    let mut dashboard = open_dashboard(config, today).await?;
    dashboard.disable_builtin(name).await?;
    Ok(format!("Disabled habit '{name}'").into())
}

pub async fn habit_enable(config: &Config, today: NaiveDate, name: &str) -> Result<Out<()>> {
    let mut dashboard = open_dashboard(config, today).await?;
    dashboard.enable_builtin(name).await?;
    Ok(format!("Enabled habit '{name}'").into())
}

/// Lists every habit definition. Enabled habits show whether they are done today.
pub async fn habit_list(config: &Config, today: NaiveDate) -> Result<Out<Vec<HabitDefinition>>> {
    let dashboard = open_dashboard(config, today).await?;
    let done = dashboard.completed_today();
    let mut view = String::new();
    let catalog: Vec<HabitDefinition> = dashboard.habits().catalog().cloned().collect();
    for habit in &catalog {
        let mark = if !habit.enabled {
            "-"
        } else if done.contains(&habit.name.as_str()) {
            "x"
        } else {
            " "
        };
        let _ = write!(view, "[{mark}] {} ({}, {})", habit.name, habit.icon, habit.origin);
        if !habit.enabled {
            view.push_str(" disabled");
        }
        view.push('\n');
    }
    Ok(Out::new(
        format!("{} of {} habits done today", done.len(), catalog.len()),
        catalog,
    )
    .with_view(view))
}

/// Shows the number of days each habit was done in `month` (default: this month).
pub async fn habit_tally(
    config: &Config,
    today: NaiveDate,
    month: Option<YearMonth>,
) -> Result<Out<Vec<TallyEntry>>> {
    let dashboard = open_dashboard(config, today).await?;
    let month = month.unwrap_or_else(|| dashboard.month());
    let tally = dashboard.habit_tally(month);
    let view = dashboard.habit_records(month);
    Ok(Out::new(format!("Habit tally for {}", month.long_name()), tally).with_view(view))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorType;
    use crate::test::TestEnv;

    #[tokio::test]
    async fn test_toggle_and_tally() {
        let env = TestEnv::new().await;
        let today = TestEnv::today();
        let out = habit_toggle(env.config(), today, "workout", None).await.unwrap();
        assert_eq!(out.structure(), Some(&Toggle::Completed));
        habit_toggle(env.config(), today, "workout", NaiveDate::from_ymd_opt(2024, 1, 2))
            .await
            .unwrap();

        let out = habit_tally(env.config(), today, None).await.unwrap();
        let tally = out.structure().unwrap();
        assert_eq!(tally[0].name, "workout");
        assert_eq!(tally[0].count, 2);
        assert!(out.view().unwrap().starts_with("January 2024\n"));

        let out = habit_toggle(env.config(), today, "workout", None).await.unwrap();
        assert_eq!(out.structure(), Some(&Toggle::Cleared));
    }

    #[tokio::test]
    async fn test_toggle_unknown_habit() {
        let env = TestEnv::new().await;
        let e = habit_toggle(env.config(), TestEnv::today(), "juggling", None)
            .await
            .unwrap_err();
        assert_eq!(e.error_type(), ErrorType::NotFound);
    }

    #[tokio::test]
    async fn test_tally_shows_removed_habits() {
        let env = TestEnv::with_policy(RetiredHabitPolicy::Show).await;
        let today = TestEnv::today();
        habit_add(env.config(), today, "Read", "fas fa-book-open").await.unwrap();
        habit_toggle(env.config(), today, "read", None).await.unwrap();
        let out = habit_remove(env.config(), today, "Read").await.unwrap();
        assert_eq!(out.message(), "Removed habit 'Read' (kept its history)");

        let out = habit_tally(env.config(), today, None).await.unwrap();
        assert!(out.view().unwrap().ends_with("Read: 1 days (removed)\n"));
        assert!(out.structure().unwrap().last().unwrap().retired);
    }

    #[tokio::test]
    async fn test_manage_habits() {
        let env = TestEnv::new().await;
        let today = TestEnv::today();
        habit_add(env.config(), today, " Read ", "fas fa-book-open").await.unwrap();
        habit_disable(env.config(), today, "phone").await.unwrap();
        let e = habit_add(env.config(), today, "PHONE", "x").await.unwrap_err();
        assert_eq!(e.error_type(), ErrorType::DuplicateName);

        let out = habit_list(env.config(), today).await.unwrap();
        let view = out.view().unwrap();
        assert!(view.contains("[-] phone (fas fa-mobile-alt, builtin) disabled\n"));
        assert!(view.contains("[ ] Read (fas fa-book-open, custom)\n"));
        assert_eq!(out.structure().unwrap().len(), 7);

        habit_enable(env.config(), today, "phone").await.unwrap();
        habit_remove(env.config(), today, "read").await.unwrap();
        let out = habit_list(env.config(), today).await.unwrap();
        assert_eq!(out.structure().unwrap().len(), 6);
        assert!(out.view().unwrap().contains("[ ] phone"));
    }
}
