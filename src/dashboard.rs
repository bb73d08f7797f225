//! The dashboard controller. Every user action goes through here: the matching ledger is mutated,
//! written back to the store before the call returns, and any visible chart whose data changed is
//! redrawn.

use crate::chart::{ChartFrame, ChartLayout, ChartSpec};
use crate::error::{Error, ErrorType, IntoResult, Result};
use crate::finance::FinanceLedger;
use crate::habits::HabitLedger;
use crate::journal::Journal;
use crate::model::{
    Account, Amount, Event, Note, RetiredHabitPolicy, Toggle, Transaction, TransactionKind,
    YearMonth,
};
use crate::projection::{self, DailySpend, TallyEntry};
use crate::store::KvStore;
use chrono::{NaiveDate, NaiveDateTime};
use std::sync::Arc;
use tracing::{debug, trace};

/// Settings that shape what the dashboard shows, usually read from `config.json`.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub retired_habits: RetiredHabitPolicy,
    pub currency_symbol: String,
    pub chart: ChartFrame,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            retired_habits: RetiredHabitPolicy::default(),
            currency_symbol: String::from("₹"),
            chart: ChartFrame::default(),
        }
    }
}

/// The two chart panels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel {
    Habits,
    Spending,
}

/// A chart panel: shown or hidden, and what it last drew.
#[derive(Debug, Default, Clone)]
struct PanelState {
    visible: bool,
    /// The ledger version the current `layout` was drawn from.
    drawn_at: Option<u64>,
    layout: Option<ChartLayout>,
    draws: u64,
}

impl PanelState {
    fn is_stale(&self, version: u64) -> bool {
        self.drawn_at != Some(version)
    }
}

pub struct Dashboard {
    store: Arc<dyn KvStore>,
    settings: Settings,
    today: NaiveDate,
    habits: HabitLedger,
    finance: FinanceLedger,
    journal: Journal,
    habit_panel: PanelState,
    spending_panel: PanelState,
}

impl std::fmt::Debug for Dashboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dashboard")
            .field("settings", &self.settings)
            .field("today", &self.today)
            .field("habits", &self.habits)
            .field("finance", &self.finance)
            .field("journal", &self.journal)
            .finish_non_exhaustive()
    }
}

impl Dashboard {
    /// Loads every ledger from `store`. `today` is the reference date for habit toggles and for
    /// the month shown in the charts.
    pub async fn open(store: Arc<dyn KvStore>, settings: Settings, today: NaiveDate) -> Result<Self> {
        let habits = HabitLedger::load(store.as_ref(), settings.retired_habits)
            .await
            .pub_result(ErrorType::Storage)?;
        let finance = FinanceLedger::load(store.as_ref())
            .await
            .pub_result(ErrorType::Storage)?;
        let journal = Journal::load(store.as_ref())
            .await
            .pub_result(ErrorType::Storage)?;
        debug!("Opened the dashboard for {today}");
        Ok(Self {
            store,
            settings,
            today,
            habits,
            finance,
            journal,
            habit_panel: PanelState::default(),
            spending_panel: PanelState::default(),
        })
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn month(&self) -> YearMonth {
        YearMonth::of(self.today)
    }

    pub fn habits(&self) -> &HabitLedger {
        &self.habits
    }

    pub fn finance(&self) -> &FinanceLedger {
        &self.finance
    }

    pub fn journal(&self) -> &Journal {
        &self.journal
    }

    // Habits

    /// Flips `name` for `day`, or for today when no day is given.
    pub async fn toggle_habit(&mut self, name: &str, day: Option<NaiveDate>) -> Result<Toggle> {
        let before = self.habits.clone();
        let outcome = self.habits.toggle(name, day.unwrap_or(self.today));
        if outcome != Toggle::Ignored {
            self.commit_habits(before).await?;
        }
        Ok(outcome)
    }

    pub async fn add_custom_habit(&mut self, name: &str, icon: &str) -> Result<()> {
        let before = self.habits.clone();
        self.habits.add_custom(name, icon)?;
        self.commit_habits(before).await
    }

    pub async fn remove_custom_habit(&mut self, name: &str) -> Result<()> {
        let before = self.habits.clone();
        self.habits.remove_custom(name)?;
        self.commit_habits(before).await
    }

    pub async fn disable_builtin(&mut self, name: &str) -> Result<()> {
        let before = self.habits.clone();
        self.habits.disable_builtin(name)?;
        self.commit_habits(before).await
    }

    pub async fn enable_builtin(&mut self, name: &str) -> Result<()> {
        let before = self.habits.clone();
        self.habits.enable_builtin(name)?;
        self.commit_habits(before).await
    }

    /// The enabled habits completed today, which are the ones shown as active.
    pub fn completed_today(&self) -> Vec<&str> {
        self.habits.completed_on(self.today)
    }

    pub fn habit_tally(&self, month: YearMonth) -> Vec<TallyEntry> {
        projection::monthly_habit_tally(&self.habits, month)
    }

    pub fn habit_records(&self, month: YearMonth) -> String {
        projection::habit_records(&self.habits, month)
    }

    async fn commit_habits(&mut self, before: HabitLedger) -> Result<()> {
        if let Err(e) = self.habits.save(self.store.as_ref()).await {
            self.habits = before;
            return Err(Error::new(ErrorType::Storage, e));
        }
        trace!("Habits written back at version {}", self.habits.version());
        self.refresh();
        Ok(())
    }

    // Finance

    /// Records a transaction against `account_id`, or against the active account when none is
    /// given.
    pub async fn record_transaction(
        &mut self,
        account_id: Option<&str>,
        title: &str,
        amount: Amount,
        kind: TransactionKind,
        date: Option<NaiveDate>,
    ) -> Result<Transaction> {
        let before = self.finance.clone();
        let account_id = account_id
            .unwrap_or(self.finance.current_account_id())
            .to_string();
        let transaction = self
            .finance
            .record(&account_id, title, amount, kind, date)?
            .clone();
        self.commit_finance(before).await?;
        Ok(transaction)
    }

    pub async fn switch_account(&mut self, account_id: &str) -> Result<()> {
        let before = self.finance.clone();
        self.finance.switch_account(account_id)?;
        self.commit_finance(before).await
    }

    /// Creates an account and makes it the active one.
    pub async fn create_account(&mut self, name: &str, opening_balance: Amount) -> Result<Account> {
        let before = self.finance.clone();
        let account = self.finance.create_account(name, opening_balance)?.clone();
        self.commit_finance(before).await?;
        Ok(account)
    }

    pub fn current_account(&self) -> &Account {
        self.finance.current_account()
    }

    pub fn balance(&self, account_id: &str) -> Result<Amount> {
        self.finance.balance(account_id)
    }

    /// The account's transactions, newest first.
    pub fn history(&self, account_id: &str) -> Result<Vec<&Transaction>> {
        if self.finance.account(account_id).is_none() {
            return Err(Error::not_found(format!(
                "There is no account with id '{account_id}'"
            )));
        }
        Ok(self.finance.transactions_for(account_id))
    }

    pub fn spending_series(&self, account_id: &str, month: YearMonth) -> Vec<DailySpend> {
        projection::daily_expenditure_series(&self.finance, account_id, month)
    }

    async fn commit_finance(&mut self, before: FinanceLedger) -> Result<()> {
        if let Err(e) = self.finance.save(self.store.as_ref()).await {
            self.finance = before;
            return Err(Error::new(ErrorType::Storage, e));
        }
        trace!("Finances written back at version {}", self.finance.version());
        self.refresh();
        Ok(())
    }

    // Notes and events

    pub async fn add_note(&mut self, text: &str) -> Result<()> {
        let before = self.journal.clone();
        self.journal.add_note(text);
        self.commit_journal(before).await
    }

    pub async fn edit_note(&mut self, index: usize, text: &str) -> Result<()> {
        let before = self.journal.clone();
        self.journal.edit_note(index, text)?;
        self.commit_journal(before).await
    }

    pub async fn set_note_checked(&mut self, index: usize, checked: bool) -> Result<()> {
        let before = self.journal.clone();
        self.journal.set_note_checked(index, checked)?;
        self.commit_journal(before).await
    }

    pub async fn remove_note(&mut self, index: usize) -> Result<Note> {
        let before = self.journal.clone();
        let note = self.journal.remove_note(index)?;
        self.commit_journal(before).await?;
        Ok(note)
    }

    pub async fn add_event(&mut self, name: &str, at: Option<NaiveDateTime>) -> Result<()> {
        let before = self.journal.clone();
        self.journal.add_event(name, at)?;
        self.commit_journal(before).await
    }

    pub async fn rename_event(&mut self, index: usize, name: &str) -> Result<()> {
        let before = self.journal.clone();
        self.journal.rename_event(index, name)?;
        self.commit_journal(before).await
    }

    pub async fn reschedule_event(&mut self, index: usize, at: Option<NaiveDateTime>) -> Result<()> {
        let before = self.journal.clone();
        self.journal.reschedule_event(index, at)?;
        self.commit_journal(before).await
    }

    pub async fn remove_event(&mut self, index: usize) -> Result<Event> {
        let before = self.journal.clone();
        let event = self.journal.remove_event(index)?;
        self.commit_journal(before).await?;
        Ok(event)
    }

    async fn commit_journal(&mut self, before: Journal) -> Result<()> {
        if let Err(e) = self.journal.save(self.store.as_ref()).await {
            self.journal = before;
            return Err(Error::new(ErrorType::Storage, e));
        }
        trace!("Notes and events written back at version {}", self.journal.version());
        Ok(())
    }

    // Charts

    /// Shows or hides the habit chart. Returns whether it is now visible.
    pub fn toggle_habit_chart(&mut self) -> bool {
        self.toggle_panel(Panel::Habits)
    }

    /// Shows or hides the spending chart. Returns whether it is now visible.
    pub fn toggle_spending_chart(&mut self) -> bool {
        self.toggle_panel(Panel::Spending)
    }

    fn toggle_panel(&mut self, panel: Panel) -> bool {
        let state = self.panel_mut(panel);
        state.visible = !state.visible;
        let visible = state.visible;
        debug!("{panel:?} chart visible: {visible}");
        if visible {
            self.refresh();
        }
        visible
    }

    pub fn is_visible(&self, panel: Panel) -> bool {
        self.panel(panel).visible
    }

    /// The chart currently on screen, or `None` while the panel is hidden.
    pub fn chart(&self, panel: Panel) -> Option<&ChartLayout> {
        let state = self.panel(panel);
        state.visible.then_some(state.layout.as_ref()).flatten()
    }

    /// How many times the panel's chart has been drawn.
    pub fn draw_count(&self, panel: Panel) -> u64 {
        self.panel(panel).draws
    }

    /// The habit chart for any month, independent of the panels.
    pub fn habit_chart_for(&self, month: YearMonth) -> ChartLayout {
        let spec = ChartSpec::habits(&self.habit_tally(month), month);
        ChartLayout::compute(&spec, self.settings.chart)
    }

    /// The spending chart for any account and month, independent of the panels.
    pub fn spending_chart_for(&self, account_id: &str, month: YearMonth) -> ChartLayout {
        let series = self.spending_series(account_id, month);
        let spec = ChartSpec::spending(&series, &self.settings.currency_symbol);
        ChartLayout::compute(&spec, self.settings.chart)
    }

    /// Redraws each visible chart whose ledger moved on since it was last drawn.
    fn refresh(&mut self) {
        let month = self.month();

        let version = self.habits.version();
        if self.habit_panel.visible && self.habit_panel.is_stale(version) {
            let layout = self.habit_chart_for(month);
            redraw(&mut self.habit_panel, layout, version);
        }

        let version = self.finance.version();
        if self.spending_panel.visible && self.spending_panel.is_stale(version) {
            let layout = self.spending_chart_for(self.finance.current_account_id(), month);
            redraw(&mut self.spending_panel, layout, version);
        }
    }

    fn panel(&self, panel: Panel) -> &PanelState {
        match panel {
            Panel::Habits => &self.habit_panel,
            Panel::Spending => &self.spending_panel,
        }
    }

    fn panel_mut(&mut self, panel: Panel) -> &mut PanelState {
        match panel {
            Panel::Habits => &mut self.habit_panel,
            Panel::Spending => &mut self.spending_panel,
        }
    }
}

fn redraw(state: &mut PanelState, layout: ChartLayout, version: u64) {
    state.layout = Some(layout);
    state.drawn_at = Some(version);
    state.draws += 1;
    trace!("Chart redrawn at version {version}");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::DEFAULT_ACCOUNT_ID;
    use crate::store::{self, MemoryStore};
    use async_trait::async_trait;
    use std::str::FromStr;

    fn jan(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    async fn open(store: &MemoryStore) -> Dashboard {
        Dashboard::open(Arc::new(store.clone()), Settings::default(), jan(15))
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_every_mutation_is_written_back() {
        let store = MemoryStore::new();
        let mut dashboard = open(&store).await;
        dashboard.toggle_habit("workout", None).await.unwrap();
        dashboard
            .record_transaction(None, "Salary", Amount::from(1000), TransactionKind::Credit, Some(jan(1)))
            .await
            .unwrap();
        dashboard.add_note("milk").await.unwrap();

        let reopened = open(&store).await;
        assert_eq!(reopened.completed_today(), vec!["workout"]);
        assert_eq!(reopened.balance(DEFAULT_ACCOUNT_ID).unwrap(), Amount::from(1000));
        assert_eq!(reopened.journal().notes()[0].text, "milk");
    }

    #[tokio::test]
    async fn test_ignored_toggle_writes_nothing() {
        let store = MemoryStore::new();
        let mut dashboard = open(&store).await;
        let outcome = dashboard.toggle_habit("juggling", None).await.unwrap();
        assert_eq!(outcome, Toggle::Ignored);
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_rejected_input_writes_nothing() {
        let store = MemoryStore::new();
        let mut dashboard = open(&store).await;
        let e = dashboard.add_custom_habit("Sleep", "icon").await.unwrap_err();
        assert_eq!(e.error_type(), ErrorType::DuplicateName);
        let e = dashboard
            .record_transaction(None, "", Amount::from(5), TransactionKind::Debit, Some(jan(1)))
            .await
            .unwrap_err();
        assert_eq!(e.error_type(), ErrorType::InvalidInput);
        let e = dashboard.switch_account("acc_nope").await.unwrap_err();
        assert_eq!(e.error_type(), ErrorType::NotFound);
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_active_account_survives_reopen() {
        let store = MemoryStore::new();
        let mut dashboard = open(&store).await;
        let bank = dashboard.create_account("Bank", Amount::from(10)).await.unwrap();
        assert_eq!(dashboard.current_account().id, bank.id);
        dashboard.switch_account(DEFAULT_ACCOUNT_ID).await.unwrap();
        dashboard.switch_account(&bank.id).await.unwrap();

        let reopened = open(&store).await;
        assert_eq!(reopened.current_account().id, bank.id);
        assert_eq!(reopened.balance(&bank.id).unwrap(), Amount::from(10));
    }

    #[tokio::test]
    async fn test_scenario() {
        let store = MemoryStore::new();
        let mut dashboard = open(&store).await;
        for (title, amount, kind, day) in [
            ("Salary", 1000, TransactionKind::Credit, 1),
            ("Groceries", 200, TransactionKind::Debit, 5),
            ("Rent", 300, TransactionKind::Debit, 20),
        ] {
            dashboard
                .record_transaction(None, title, Amount::from(amount), kind, Some(jan(day)))
                .await
                .unwrap();
        }
        assert_eq!(dashboard.balance(DEFAULT_ACCOUNT_ID).unwrap(), Amount::from(500));
        let titles: Vec<&str> = dashboard
            .history(DEFAULT_ACCOUNT_ID)
            .unwrap()
            .iter()
            .map(|t| t.title.as_str())
            .collect();
        assert_eq!(titles, vec!["Rent", "Groceries", "Salary"]);

        let series = dashboard.spending_series(DEFAULT_ACCOUNT_ID, dashboard.month());
        assert_eq!(series[4].amount, Amount::from(200));
        assert_eq!(series[19].amount, Amount::from(300));
        let total: Amount = series.iter().map(|d| d.amount).sum();
        assert_eq!(total, Amount::from(500));
    }

    #[tokio::test]
    async fn test_hidden_chart_is_drawn_on_reveal() {
        let store = MemoryStore::new();
        let mut dashboard = open(&store).await;
        assert!(dashboard.chart(Panel::Habits).is_none());

        dashboard.toggle_habit("code", None).await.unwrap();
        dashboard.toggle_habit("code", Some(jan(14))).await.unwrap();
        assert_eq!(dashboard.draw_count(Panel::Habits), 0);

        assert!(dashboard.toggle_habit_chart());
        assert_eq!(dashboard.draw_count(Panel::Habits), 1);
        let code = &dashboard.chart(Panel::Habits).unwrap().bars[3];
        assert_eq!(code.label, "code");
        assert_eq!(code.value_label, "2");

        // Reveal without changes: nothing to redraw.
        assert!(!dashboard.toggle_habit_chart());
        assert!(dashboard.toggle_habit_chart());
        assert_eq!(dashboard.draw_count(Panel::Habits), 1);
    }

    #[tokio::test]
    async fn test_visible_chart_follows_mutations() {
        let store = MemoryStore::new();
        let mut dashboard = open(&store).await;
        dashboard.toggle_spending_chart();
        assert_eq!(dashboard.draw_count(Panel::Spending), 1);

        dashboard
            .record_transaction(None, "Tea", Amount::from(40), TransactionKind::Debit, Some(jan(3)))
            .await
            .unwrap();
        assert_eq!(dashboard.draw_count(Panel::Spending), 2);
        let chart = dashboard.chart(Panel::Spending).unwrap();
        assert_eq!(chart.bars.len(), 31);
        assert_eq!(chart.scale_max, 100.0);
        assert_eq!(chart.bars[2].tooltip, "Jan 3: ₹40.00");

        // Habit changes leave the spending chart alone.
        dashboard.toggle_habit("sleep", None).await.unwrap();
        assert_eq!(dashboard.draw_count(Panel::Spending), 2);
        assert_eq!(dashboard.draw_count(Panel::Habits), 0);
    }

    #[tokio::test]
    async fn test_spending_chart_follows_account_switch() {
        let store = MemoryStore::new();
        let mut dashboard = open(&store).await;
        dashboard
            .record_transaction(None, "Tea", Amount::from(400), TransactionKind::Debit, Some(jan(3)))
            .await
            .unwrap();
        dashboard.toggle_spending_chart();
        assert_eq!(dashboard.chart(Panel::Spending).unwrap().scale_max, 400.0);
        dashboard.create_account("Empty", Amount::ZERO).await.unwrap();
        assert_eq!(dashboard.chart(Panel::Spending).unwrap().scale_max, 100.0);
    }

    #[tokio::test]
    async fn test_notes_and_events() {
        let store = MemoryStore::new();
        let mut dashboard = open(&store).await;
        dashboard.add_note("milk").await.unwrap();
        dashboard.set_note_checked(0, true).await.unwrap();
        dashboard.edit_note(0, "oat milk").await.unwrap();
        dashboard.add_event("Dentist", None).await.unwrap();
        let at = crate::model::parse_event_time("2024-01-20T10:30").unwrap();
        dashboard.reschedule_event(0, Some(at)).await.unwrap();
        dashboard.rename_event(0, "Dentist!").await.unwrap();
        let e = dashboard.remove_note(5).await.unwrap_err();
        assert_eq!(e.error_type(), ErrorType::NotFound);

        let reopened = open(&store).await;
        assert_eq!(reopened.journal().notes()[0].text, "oat milk");
        assert!(reopened.journal().notes()[0].checked);
        assert_eq!(reopened.journal().events()[0].name, "Dentist!");
        assert_eq!(reopened.journal().events()[0].date, Some(at));

        let mut dashboard = reopened;
        assert_eq!(dashboard.remove_event(0).await.unwrap().name, "Dentist!");
        assert_eq!(dashboard.remove_note(0).await.unwrap().text, "oat milk");
    }

    #[tokio::test]
    async fn test_amount_overflow_is_rejected() {
        let store = MemoryStore::new();
        let mut dashboard = open(&store).await;
        let huge = Amount::new(rust_decimal::Decimal::MAX);
        for _ in 0..2 {
            let e = dashboard
                .record_transaction(None, "Jackpot", huge, TransactionKind::Credit, Some(jan(1)))
                .await
                .unwrap_err();
            assert_eq!(e.error_type(), ErrorType::InvalidInput);
        }
        dashboard
            .record_transaction(None, "Jackpot", Amount::LIMIT, TransactionKind::Credit, Some(jan(1)))
            .await
            .unwrap();

        let reopened = open(&store).await;
        assert!(reopened.balance(DEFAULT_ACCOUNT_ID).unwrap() > Amount::ZERO);
        assert_eq!(reopened.finance().transactions().len(), 1);
    }

    #[tokio::test]
    async fn test_malformed_store_is_a_storage_error() {
        let store = MemoryStore::with_entries([(store::FINANCE_ACCOUNTS, "not json")]);
        let e = Dashboard::open(Arc::new(store), Settings::default(), jan(1))
            .await
            .unwrap_err();
        assert_eq!(e.error_type(), ErrorType::Storage);
    }

    /// A store whose writes always fail.
    struct ReadOnlyStore;

    #[async_trait]
    impl KvStore for ReadOnlyStore {
        async fn get(&self, _key: &str) -> anyhow::Result<Option<String>> {
            Ok(None)
        }

        async fn set_many(&self, entries: &[(&str, String)]) -> anyhow::Result<()> {
            anyhow::bail!("{} cannot be written", entries.len())
        }
    }

    /// A store that rejects any write touching `key`, passing the rest to `inner`.
    struct RejectingStore {
        inner: MemoryStore,
        key: &'static str,
    }

    #[async_trait]
    impl KvStore for RejectingStore {
        async fn get(&self, key: &str) -> anyhow::Result<Option<String>> {
            self.inner.get(key).await
        }

        async fn set_many(&self, entries: &[(&str, String)]) -> anyhow::Result<()> {
            if entries.iter().any(|(key, _)| *key == self.key) {
                anyhow::bail!("'{}' cannot be written", self.key);
            }
            self.inner.set_many(entries).await
        }
    }

    #[tokio::test]
    async fn test_failed_write_leaves_stored_balance_alone() {
        let store = MemoryStore::new();
        let mut dashboard = open(&store).await;
        dashboard
            .record_transaction(None, "Salary", Amount::from(1000), TransactionKind::Credit, Some(jan(1)))
            .await
            .unwrap();
        let accounts_before = store.get(store::FINANCE_ACCOUNTS).await.unwrap();

        let rejecting = RejectingStore {
            inner: store.clone(),
            key: store::FINANCE_TRANSACTIONS,
        };
        let mut dashboard = Dashboard::open(Arc::new(rejecting), Settings::default(), jan(15))
            .await
            .unwrap();
        let e = dashboard
            .record_transaction(None, "Rent", Amount::from(300), TransactionKind::Debit, Some(jan(2)))
            .await
            .unwrap_err();
        assert_eq!(e.error_type(), ErrorType::Storage);
        assert_eq!(dashboard.balance(DEFAULT_ACCOUNT_ID).unwrap(), Amount::from(1000));
        assert_eq!(store.get(store::FINANCE_ACCOUNTS).await.unwrap(), accounts_before);

        let reopened = open(&store).await;
        assert_eq!(reopened.balance(DEFAULT_ACCOUNT_ID).unwrap(), Amount::from(1000));
        assert_eq!(reopened.finance().transactions().len(), 1);
        assert_eq!(
            reopened.finance().current_account().opening_balance,
            Amount::ZERO
        );
    }

    #[tokio::test]
    async fn test_failed_write_is_fatal_and_rolls_back() {
        let mut dashboard = Dashboard::open(Arc::new(ReadOnlyStore), Settings::default(), jan(1))
            .await
            .unwrap();
        let e = dashboard.toggle_habit("workout", None).await.unwrap_err();
        assert_eq!(e.error_type(), ErrorType::Storage);
        assert!(dashboard.completed_today().is_empty());

        let e = dashboard
            .record_transaction(None, "x", Amount::from_str("1").unwrap(), TransactionKind::Debit, Some(jan(1)))
            .await
            .unwrap_err();
        assert_eq!(e.error_type(), ErrorType::Storage);
        assert!(dashboard.finance().transactions().is_empty());
    }
}
