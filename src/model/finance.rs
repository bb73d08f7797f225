use crate::model::month::lenient_day;
use crate::model::Amount;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The id of the account every dashboard starts with.
pub const DEFAULT_ACCOUNT_ID: &str = "default";

/// The name of the account every dashboard starts with.
pub const DEFAULT_ACCOUNT_NAME: &str = "Cash";

/// Whether money came into or went out of an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionKind {
    /// Money added to the account. Stored as `"add"`.
    #[serde(rename = "add", alias = "credit")]
    Credit,
    /// Money spent from the account. Stored as `"spent"`.
    #[serde(rename = "spent", alias = "debit")]
    Debit,
}

serde_plain::derive_display_from_serialize!(TransactionKind);
serde_plain::derive_fromstr_from_deserialize!(TransactionKind);

impl TransactionKind {
    /// `amount` signed by its effect on the account balance.
    pub fn signed(&self, amount: Amount) -> Amount {
        match self {
            TransactionKind::Credit => amount,
            TransactionKind::Debit => Amount::ZERO - amount,
        }
    }
}

/// A named cash account.
///
/// Only the opening balance is kept; the current balance is always derived from the
/// transactions that reference the account (see `FinanceLedger::balance`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub id: String,
    pub name: String,
    pub opening_balance: Amount,
}

impl Account {
    pub fn new(id: impl Into<String>, name: impl Into<String>, opening_balance: Amount) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            opening_balance,
        }
    }

    /// The account seeded on first run.
    pub fn default_cash() -> Self {
        Self::new(DEFAULT_ACCOUNT_ID, DEFAULT_ACCOUNT_NAME, Amount::ZERO)
    }
}

/// The stored form of an account: `{id, name, balance}` where `balance` is the current balance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct AccountRecord {
    pub(crate) id: String,
    pub(crate) name: String,
    pub(crate) balance: Amount,
}

/// One recorded movement of money. Never modified after it is recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: u64,
    pub account_id: String,
    pub title: String,
    /// Always positive; the direction is given by `kind`.
    pub amount: Amount,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    #[serde(with = "lenient_day")]
    pub date: NaiveDate,
}

impl Transaction {
    /// The effect of this transaction on its account's balance.
    pub fn delta(&self) -> Amount {
        self.kind.signed(self.amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_kind_wire_names() {
        assert_eq!(TransactionKind::Credit.to_string(), "add");
        assert_eq!(TransactionKind::Debit.to_string(), "spent");
        assert_eq!(
            TransactionKind::from_str("debit").unwrap(),
            TransactionKind::Debit
        );
        assert_eq!(
            TransactionKind::from_str("add").unwrap(),
            TransactionKind::Credit
        );
    }

    #[test]
    fn test_transaction_json_shape() {
        let json = r#"{"id":1704067200000,"accountId":"default","title":"Salary",
            "amount":1000,"type":"add","date":"2024-01-01"}"#;
        let t: Transaction = serde_json::from_str(json).unwrap();
        assert_eq!(t.account_id, "default");
        assert_eq!(t.kind, TransactionKind::Credit);
        assert_eq!(t.delta(), Amount::from(1000));

        let back = serde_json::to_value(&t).unwrap();
        assert_eq!(back["type"], "add");
        assert_eq!(back["accountId"], "default");
        assert_eq!(back["date"], "2024-01-01");
    }

    #[test]
    fn test_transaction_date_with_time() {
        let json = r#"{"id":2,"accountId":"default","title":"Lunch",
            "amount":12.5,"type":"spent","date":"2024-01-05T12:30"}"#;
        let t: Transaction = serde_json::from_str(json).unwrap();
        assert_eq!(t.date, NaiveDate::from_ymd_opt(2024, 1, 5).unwrap());
        assert_eq!(t.delta(), Amount::from_str("-12.5").unwrap());
    }
}
