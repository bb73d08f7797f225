//! Read-only views derived from the ledgers. Everything here is a pure function of its inputs.

use crate::finance::FinanceLedger;
use crate::habits::HabitLedger;
use crate::model::{Amount, RetiredHabitPolicy, TransactionKind, YearMonth};
use chrono::NaiveDate;
use serde::Serialize;
use std::fmt::Write;

/// One habit's completion count for a month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TallyEntry {
    pub name: String,
    pub count: u32,
    /// The habit no longer has a definition. Only present under `RetiredHabitPolicy::Show`.
    pub retired: bool,
}

/// The amount spent from an account on one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailySpend {
    pub date: NaiveDate,
    pub amount: Amount,
}

/// The count of every active habit in `month`, in canonical habit order. Under
/// `RetiredHabitPolicy::Show`, habits that were removed but still have a count in `month` follow.
pub fn monthly_habit_tally(habits: &HabitLedger, month: YearMonth) -> Vec<TallyEntry> {
    let active = habits.active_habit_names().into_iter().map(|name| TallyEntry {
        name: name.to_string(),
        count: habits.count(month, name),
        retired: false,
    });
    let retired = habits
        .retired_names(month)
        .into_iter()
        .filter(|_| habits.policy() == RetiredHabitPolicy::Show)
        .map(|name| TallyEntry {
            name: name.to_string(),
            count: habits.count(month, name),
            retired: true,
        });
    active.chain(retired).collect()
}

/// One entry per day of `month`, each the sum of that day's debits from `account_id`. Credits
/// and other months are left out; days without spending are zero.
pub fn daily_expenditure_series(
    finance: &FinanceLedger,
    account_id: &str,
    month: YearMonth,
) -> Vec<DailySpend> {
    let mut series: Vec<DailySpend> = month
        .days()
        .map(|date| DailySpend {
            date,
            amount: Amount::ZERO,
        })
        .collect();
    let debits = finance.transactions().iter().filter(|t| {
        t.account_id == account_id && t.kind == TransactionKind::Debit && month.contains(t.date)
    });
    for t in debits {
        let ix = (t.date - month.first_day()).num_days() as usize;
        if let Some(day) = series.get_mut(ix) {
            day.amount += t.amount;
        }
    }
    series
}

/// The text of the monthly habit records panel.
pub fn habit_records(habits: &HabitLedger, month: YearMonth) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", month.long_name());
    if !habits.has_month(month) {
        out.push_str("No habit records for this month yet.\n");
        return out;
    }
    for entry in monthly_habit_tally(habits, month) {
        let suffix = if entry.retired { " (removed)" } else { "" };
        let _ = writeln!(out, "{}: {} days{suffix}", entry.name, entry.count);
    }
    out
}
