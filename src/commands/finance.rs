use crate::args::RecordArgs;
use crate::commands::{open_dashboard, Out};
use crate::dashboard::Dashboard;
use crate::model::{Amount, Transaction, TransactionKind, YearMonth};
use crate::projection::DailySpend;
use crate::{Config, Result};
use chrono::NaiveDate;
use serde::Serialize;
use std::fmt::Write;

/// An account as listed by `daybook finance account list`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccountSummary {
    pub id: String,
    pub name: String,
    pub balance: Amount,
    pub active: bool,
}

/// Records a credit or debit. The date defaults to today and the account to the active one.
pub async fn finance_record(
    config: &Config,
    today: NaiveDate,
    args: &RecordArgs,
) -> Result<Out<Transaction>> {
    let mut dashboard = open_dashboard(config, today).await?;
    let transaction = dashboard
        .record_transaction(
            args.account(),
            args.title(),
            args.amount(),
            args.kind(),
            Some(args.date().unwrap_or(today)),
        )
        .await?;
    let balance = dashboard.balance(&transaction.account_id)?;
    let symbol = config.currency_symbol();
    let verb = match transaction.kind {
        TransactionKind::Credit => "Added",
        TransactionKind::Debit => "Spent",
    };
    Ok(Out::new(
        format!(
            "{verb} {} for '{}' in {}, balance is now {}",
            transaction.amount.with_symbol(symbol),
            transaction.title,
            transaction.account_id,
            balance.with_symbol(symbol)
        ),
        transaction,
    ))
}

pub async fn account_create(
    config: &Config,
    today: NaiveDate,
    name: &str,
    opening_balance: Amount,
) -> Result<Out<AccountSummary>> {
    let mut dashboard = open_dashboard(config, today).await?;
    let account = dashboard.create_account(name, opening_balance).await?;
    let summary = summarize(&dashboard, &account.id)?;
    Ok(Out::new(
        format!(
            "Created account '{}' with id {} and made it the active account",
            account.name, account.id
        ),
        summary,
    ))
}

pub async fn account_switch(config: &Config, today: NaiveDate, id: &str) -> Result<Out<()>> {
    let mut dashboard = open_dashboard(config, today).await?;
    dashboard.switch_account(id).await?;
    let account = dashboard.current_account();
    Ok(format!("Switched to account '{}' ({})", account.name, account.id).into())
}

/// Lists every account with its balance. The active account is marked with `*`.
pub async fn account_list(config: &Config, today: NaiveDate) -> Result<Out<Vec<AccountSummary>>> {
    let dashboard = open_dashboard(config, today).await?;
    let symbol = config.currency_symbol();
    let mut summaries = Vec::new();
    let mut view = String::new();
    for account in dashboard.finance().accounts() {
        let summary = summarize(&dashboard, &account.id)?;
        let marker = if summary.active { "*" } else { " " };
        let _ = writeln!(
            view,
            "{marker} {} ({}): {}",
            summary.name,
            summary.id,
            summary.balance.with_symbol(symbol)
        );
        summaries.push(summary);
    }
    Ok(Out::new(format!("{} accounts", summaries.len()), summaries).with_view(view))
}

/// Lists an account's transactions, newest first.
pub async fn finance_history(
    config: &Config,
    today: NaiveDate,
    account: Option<&str>,
) -> Result<Out<Vec<Transaction>>> {
    let dashboard = open_dashboard(config, today).await?;
    let account_id = account
        .unwrap_or(dashboard.current_account().id.as_str())
        .to_string();
    let symbol = config.currency_symbol();
    let history: Vec<Transaction> = dashboard.history(&account_id)?.into_iter().cloned().collect();
    let mut view = String::new();
    for t in &history {
        let sign = match t.kind {
            TransactionKind::Credit => "+",
            TransactionKind::Debit => "-",
        };
        let _ = writeln!(
            view,
            "{} {sign}{} {}",
            t.date,
            t.amount.with_symbol(symbol),
            t.title
        );
    }
    let balance = dashboard.balance(&account_id)?;
    Ok(Out::new(
        format!(
            "{} transactions in {account_id}, balance {}",
            history.len(),
            balance.with_symbol(symbol)
        ),
        history,
    )
    .with_view(view))
}

/// Shows the amount spent from an account on every day of `month` (default: this month).
pub async fn finance_series(
    config: &Config,
    today: NaiveDate,
    account: Option<&str>,
    month: Option<YearMonth>,
) -> Result<Out<Vec<DailySpend>>> {
    let dashboard = open_dashboard(config, today).await?;
    let account_id = account
        .unwrap_or(dashboard.current_account().id.as_str())
        .to_string();
    // Fails for an unknown account.
    dashboard.balance(&account_id)?;
    let month = month.unwrap_or_else(|| dashboard.month());
    let series = dashboard.spending_series(&account_id, month);
    let symbol = config.currency_symbol();
    let mut view = String::new();
    for day in &series {
        let _ = writeln!(view, "{} {}", day.date, day.amount.with_symbol(symbol));
    }
    let total: Amount = series.iter().map(|d| d.amount).sum();
    Ok(Out::new(
        format!(
            "Spent {} from {account_id} in {}",
            total.with_symbol(symbol),
            month.long_name()
        ),
        series,
    )
    .with_view(view))
}

fn summarize(dashboard: &Dashboard, account_id: &str) -> Result<AccountSummary> {
    let balance = dashboard.balance(account_id)?;
    let current = dashboard.current_account();
    let name = dashboard
        .finance()
        .account(account_id)
        .map(|a| a.name.clone())
        .unwrap_or_default();
    Ok(AccountSummary {
        id: account_id.to_string(),
        name,
        balance,
        active: current.id == account_id,
    })
}
