//! The finance ledger: named accounts and the append-only list of transactions against them.

use crate::error::{Error, Result};
use crate::model::{Account, AccountRecord, Amount, Transaction, TransactionKind};
use crate::store::{self, KvStore};
use crate::utils::generate_account_id;
use anyhow::bail;
use chrono::NaiveDate;
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinanceLedger {
    /// Never empty.
    accounts: Vec<Account>,
    /// In the order they were recorded.
    transactions: Vec<Transaction>,
    current_account_id: String,
    last_id: u64,
    version: u64,
}

impl Default for FinanceLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl FinanceLedger {
    /// A first-run ledger with the single default `Cash` account, which is active.
    pub fn new() -> Self {
        let cash = Account::default_cash();
        Self {
            current_account_id: cash.id.clone(),
            accounts: vec![cash],
            transactions: Vec::new(),
            last_id: 0,
            version: 0,
        }
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    pub fn account(&self, account_id: &str) -> Option<&Account> {
        self.accounts.iter().find(|a| a.id == account_id)
    }

    pub fn current_account_id(&self) -> &str {
        &self.current_account_id
    }

    pub fn current_account(&self) -> &Account {
        // `current_account_id` always names an account, and there is always at least one.
        self.account(&self.current_account_id)
            .unwrap_or(&self.accounts[0])
    }

    /// Every transaction, in the order recorded.
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Opening balance plus credits minus debits of every transaction against the account.
    pub fn balance(&self, account_id: &str) -> Result<Amount> {
        let account = self.require_account(account_id)?;
        Ok(account.opening_balance + self.net(account_id))
    }

    fn net(&self, account_id: &str) -> Amount {
        self.transactions
            .iter()
            .filter(|t| t.account_id == account_id)
            .map(Transaction::delta)
            .sum()
    }

    /// The opening balance plus every transaction amount against the account, all taken as
    /// positive. Every sum over the account's amounts is bounded by it.
    fn exposure(&self, account: &Account) -> Option<Amount> {
        self.transactions
            .iter()
            .filter(|t| t.account_id == account.id)
            .try_fold(account.opening_balance.abs(), |total, t| {
                total.checked_add(t.amount.abs())
            })
    }

    /// Appends a transaction to `account_id`.
    ///
    /// # Errors
    /// - `InvalidInput` if the title is blank, the amount is not positive or the date is absent.
    /// - `InvalidInput` if the account's totals would pass `Amount::LIMIT`.
    /// - `NotFound` if no account has the id.
    pub fn record(
        &mut self,
        account_id: &str,
        title: &str,
        amount: Amount,
        kind: TransactionKind,
        date: Option<NaiveDate>,
    ) -> Result<&Transaction> {
        let title = title.trim();
        if title.is_empty() {
            return Err(Error::invalid_input("A transaction needs a title"));
        }
        if !amount.is_positive() {
            return Err(Error::invalid_input(format!(
                "The amount must be greater than zero, got {amount}"
            )));
        }
        let Some(date) = date else {
            return Err(Error::invalid_input("A transaction needs a date"));
        };
        let account = self.require_account(account_id)?;
        let total = self
            .exposure(account)
            .and_then(|total| total.checked_add(amount));
        if !total.is_some_and(|total| total <= Amount::LIMIT) {
            return Err(Error::invalid_input(format!(
                "The amount {amount} is too large for account '{account_id}'"
            )));
        }

        let id = self.next_id();
        self.transactions.push(Transaction {
            id,
            account_id: account_id.to_string(),
            title: title.to_string(),
            amount,
            kind,
            date,
        });
        self.last_id = id;
        self.version += 1;
        debug!("Recorded transaction {id}: {kind} {amount} '{title}' on {date} in {account_id}");
        Ok(&self.transactions[self.transactions.len() - 1])
    }

    fn next_id(&self) -> u64 {
        let max_existing = self.transactions.iter().map(|t| t.id).max().unwrap_or(0);
        max_existing.max(self.last_id) + 1
    }

    /// Makes `account_id` the active account.
    pub fn switch_account(&mut self, account_id: &str) -> Result<()> {
        let id = self.require_account(account_id)?.id.clone();
        if id != self.current_account_id {
            self.current_account_id = id;
            self.version += 1;
            debug!("Switched to account {account_id}");
        }
        Ok(())
    }

    /// Creates an account under a fresh id and makes it the active one.
    pub fn create_account(&mut self, name: &str, opening_balance: Amount) -> Result<&Account> {
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::invalid_input("An account needs a name"));
        }
        if opening_balance.abs() > Amount::LIMIT {
            return Err(Error::invalid_input(format!(
                "The opening balance {opening_balance} is too large"
            )));
        }
        let mut id = generate_account_id();
        while self.account(&id).is_some() {
            id = generate_account_id();
        }
        debug!("Created account {id} '{name}' with opening balance {opening_balance}");
        self.accounts.push(Account::new(id.clone(), name, opening_balance));
        self.current_account_id = id;
        self.version += 1;
        Ok(self.current_account())
    }

    /// The account's transactions, newest date first. Transactions on the same date are listed
    /// most recently recorded first.
    pub fn transactions_for(&self, account_id: &str) -> Vec<&Transaction> {
        let mut list: Vec<&Transaction> = self
            .transactions
            .iter()
            .rev()
            .filter(|t| t.account_id == account_id)
            .collect();
        // Stable, so the reversed recording order survives within a date.
        list.sort_by(|a, b| b.date.cmp(&a.date));
        list
    }

    fn require_account(&self, account_id: &str) -> Result<&Account> {
        self.account(account_id)
            .ok_or_else(|| Error::not_found(format!("There is no account with id '{account_id}'")))
    }

    /// Loads the ledger from `store`, seeding the default account when none are stored.
    pub async fn load(store: &dyn KvStore) -> anyhow::Result<Self> {
        let records: Vec<AccountRecord> = store::load_json(store, store::FINANCE_ACCOUNTS)
            .await?
            .unwrap_or_default();
        let transactions: Vec<Transaction> =
            store::load_json(store, store::FINANCE_TRANSACTIONS)
                .await?
                .unwrap_or_default();
        let current: Option<String> =
            store::load_json(store, store::FINANCE_CURRENT_ACCOUNT).await?;

        let mut ledger = Self::new();
        ledger.last_id = transactions.iter().map(|t| t.id).max().unwrap_or(0);
        ledger.transactions = transactions;

        if !records.is_empty() {
            // The stored balance already includes every transaction; peel them off to get back to
            // the opening balance.
            let mut accounts = Vec::with_capacity(records.len());
            for r in records {
                let unopened = Account::new(r.id.as_str(), r.name.as_str(), Amount::ZERO);
                let opening = ledger
                    .exposure(&unopened)
                    .and_then(|_| r.balance.checked_sub(ledger.net(&r.id)));
                let Some(opening) = opening else {
                    bail!("The stored amounts of account '{}' are too large", r.id);
                };
                accounts.push(Account::new(r.id, r.name, opening));
            }
            ledger.accounts = accounts;
            ledger.current_account_id = ledger.accounts[0].id.clone();
        }
        if let Some(account) = ledger
            .accounts
            .iter()
            .find(|a| ledger.exposure(a).is_none())
        {
            bail!("The stored amounts of account '{}' are too large", account.id);
        }

        match current {
            Some(id) if ledger.account(&id).is_some() => ledger.current_account_id = id,
            Some(id) => warn!("The stored active account '{id}' does not exist, using the first"),
            None => {}
        }

        let orphans = ledger
            .transactions
            .iter()
            .filter(|t| ledger.account(&t.account_id).is_none())
            .count();
        if orphans > 0 {
            warn!("{orphans} stored transactions reference accounts that do not exist");
        }

        debug!(
            "Loaded {} accounts and {} transactions",
            ledger.accounts.len(),
            ledger.transactions.len()
        );
        Ok(ledger)
    }

    /// Writes the whole ledger back to `store` in one batch. Each account's `balance` is written
    /// as its derived current balance.
    pub async fn save(&self, store: &dyn KvStore) -> anyhow::Result<()> {
        let records: Vec<AccountRecord> = self
            .accounts
            .iter()
            .map(|a| AccountRecord {
                id: a.id.clone(),
                name: a.name.clone(),
                balance: a.opening_balance + self.net(&a.id),
            })
            .collect();
        let mut batch = store::Batch::new();
        batch.put(store::FINANCE_ACCOUNTS, &records)?;
        batch.put(store::FINANCE_TRANSACTIONS, &self.transactions)?;
        batch.put(store::FINANCE_CURRENT_ACCOUNT, &self.current_account_id)?;
        batch.write(store).await
    }
}
