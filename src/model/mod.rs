//! Types that represent the core data model, such as `Transaction` and `HabitDefinition`.
mod amount;
mod finance;
mod habit;
mod journal;
mod month;

pub use amount::{Amount, AmountError};
pub use finance::{
    Account, Transaction, TransactionKind, DEFAULT_ACCOUNT_ID, DEFAULT_ACCOUNT_NAME,
};
pub(crate) use finance::AccountRecord;
pub(crate) use habit::CustomHabitRecord;
pub use habit::{HabitDefinition, HabitOrigin, RetiredHabitPolicy, Toggle, BUILTIN_HABITS};
pub use journal::{parse_event_time, Event, Note};
pub use month::YearMonth;
