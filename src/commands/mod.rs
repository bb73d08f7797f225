//! Command handlers for the daybook CLI.
//!
//! This module contains implementations for all CLI subcommands. Each handler opens the
//! dashboard, performs one action and returns an `Out` describing the result.

mod chart;
mod event;
mod finance;
mod habit;
mod init;
mod note;

use crate::dashboard::Dashboard;
use crate::store::KvStore;
use crate::{Config, Result};
use chrono::{Local, NaiveDate};
use serde::Serialize;
use std::fmt::Debug;
use std::sync::Arc;
use tracing::{debug, info};

pub use chart::chart;
pub use event::{event_add, event_list, event_remove, event_rename, event_reschedule};
pub use finance::{
    account_create, account_list, account_switch, finance_history, finance_record,
    finance_series,
};
pub use habit::{
    habit_add, habit_disable, habit_enable, habit_list, habit_remove, habit_tally, habit_toggle,
};
pub use init::init;
pub use note::{note_add, note_edit, note_list, note_remove, note_set_checked};

/// The output type for a command. This allows the command to return a consistent message,
/// optionally structured data, and optionally a text view meant for the terminal.
#[derive(Debug, Clone, Serialize)]
pub struct Out<T>
where
    T: Serialize + Clone + Debug,
{
    /// A message that can be printed to the user regarding the outcome of the command execution.
    message: String,

    /// Any structured data that needs to be output from the call.
    structure: Option<T>,

    /// A rendered view, such as a list or a tally, printed to stdout.
    #[serde(skip)]
    view: Option<String>,
}

impl<T, S> From<S> for Out<T>
where
    T: Debug + Clone + Serialize,
    S: Into<String>,
{
    fn from(value: S) -> Self {
        Out::new_message(value)
    }
}

impl<T> Out<T>
where
    T: Serialize + Clone + Debug,
{
    /// Create a new `Out` object that has `Some(structure)`.
    pub fn new<S>(message: S, structure: T) -> Self
    where
        S: Into<String>,
    {
        Self {
            message: message.into(),
            structure: Some(structure),
            view: None,
        }
    }

    /// Create a new `Out` object that has `None` for `structure`.
    pub fn new_message<S>(message: S) -> Self
    where
        S: Into<String>,
    {
        Self {
            message: message.into(),
            structure: None,
            view: None,
        }
    }

    /// Attach a text view that `print` writes to stdout.
    pub fn with_view(mut self, view: impl Into<String>) -> Self {
        self.view = Some(view.into());
        self
    }

    /// Get the `message`.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the structured data stored in `structure`.
    pub fn structure(&self) -> Option<&T> {
        self.structure.as_ref()
    }

    pub fn view(&self) -> Option<&str> {
        self.view.as_deref()
    }

    /// Print the view (if it exists) to stdout, the message to `info!` and the structured data
    /// (if it exists) as JSON to `debug!`.
    pub fn print(&self) {
        if let Some(view) = self.view() {
            print!("{view}");
            if !view.ends_with('\n') {
                println!();
            }
        }
        info!("{}", self.message);
        if let Some(structure) = self.structure() {
            if let Ok(json) = serde_json::to_string_pretty(structure) {
                debug!("Command output:\n\n{json}\n\n");
            }
        }
    }
}

/// The local calendar date.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Opens the dashboard over the configured store, with today as the reference date.
pub(crate) async fn open_dashboard(config: &Config, today: NaiveDate) -> Result<Dashboard> {
    let store: Arc<dyn KvStore> = Arc::new(config.store().clone());
    Dashboard::open(store, config.settings(), today).await
}
