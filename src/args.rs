//! These structs provide the CLI interface for the daybook CLI.

use crate::model::{parse_event_time, Amount, RetiredHabitPolicy, TransactionKind, YearMonth};
use chrono::{NaiveDate, NaiveDateTime};
use clap::{Parser, Subcommand};
use std::convert::Infallible;
use std::fmt::{Display, Formatter};
use std::ops::Deref;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::error;
use tracing_subscriber::filter::LevelFilter;

/// daybook: a personal dashboard for the command line.
///
/// Track daily habits, keep a checklist of notes and a list of upcoming events, and record money
/// coming into and going out of your cash accounts. Everything is kept in a local store under
/// the daybook home directory; run `daybook init` once to create it.
#[derive(Debug, Parser, Clone)]
pub struct Args {
    #[clap(flatten)]
    common: Common,

    #[command(subcommand)]
    command: Command,
}

impl Args {
    pub fn new(common: Common, command: Command) -> Self {
        Self { common, command }
    }

    pub fn common(&self) -> &Common {
        &self.common
    }

    pub fn command(&self) -> &Command {
        &self.command
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Create the data directory, its configuration file and an empty store.
    ///
    /// This is the first command you should run. By default the data directory is ~/daybook;
    /// pass --home or set DAYBOOK_HOME to put it somewhere else.
    Init(InitArgs),
    /// Mark habits done, and manage which habits are tracked.
    Habit(HabitArgs),
    /// Record transactions and manage cash accounts.
    Finance(FinanceArgs),
    /// Keep a checklist of notes.
    Note(NoteArgs),
    /// Keep a list of upcoming events.
    Event(EventArgs),
    /// Draw the habit or spending bar chart for a month as SVG.
    Chart(ChartArgs),
}

/// Arguments common to all subcommands.
#[derive(Debug, Parser, Clone)]
pub struct Common {
    /// The logging verbosity. One of, from least to most verbose:
    /// off, error, warn, info, debug, trace
    ///
    /// This can be overridden by RUST_LOG.
    #[arg(long, default_value_t = LevelFilter::INFO)]
    log_level: LevelFilter,

    /// The directory where daybook data and configuration is held. Defaults to ~/daybook
    #[arg(long, env = "DAYBOOK_HOME", default_value_t = default_daybook_home())]
    home: DisplayPath,
}

impl Common {
    pub fn new(log_level: LevelFilter, home: PathBuf) -> Self {
        Self {
            log_level,
            home: home.into(),
        }
    }

    pub fn log_level(&self) -> LevelFilter {
        self.log_level
    }

    pub fn home(&self) -> &DisplayPath {
        &self.home
    }
}

/// Args for the `daybook init` command.
#[derive(Debug, Parser, Clone)]
pub struct InitArgs {
    /// What to do with the history of a custom habit when it is removed: hide, purge or show.
    #[arg(long, default_value_t = RetiredHabitPolicy::Hide)]
    retired_habits: RetiredHabitPolicy,

    /// The currency symbol printed in front of amounts. Defaults to ₹
    #[arg(long)]
    currency_symbol: Option<String>,
}

impl InitArgs {
    pub fn new(retired_habits: RetiredHabitPolicy, currency_symbol: Option<String>) -> Self {
        Self {
            retired_habits,
            currency_symbol,
        }
    }

    pub fn retired_habits(&self) -> RetiredHabitPolicy {
        self.retired_habits
    }

    pub fn currency_symbol(&self) -> Option<&str> {
        self.currency_symbol.as_deref()
    }
}

/// Args for the `daybook habit` command.
#[derive(Debug, Parser, Clone)]
pub struct HabitArgs {
    #[command(subcommand)]
    command: HabitCommand,
}

impl HabitArgs {
    pub fn command(&self) -> &HabitCommand {
        &self.command
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum HabitCommand {
    /// Mark a habit done for a day, or undo that if it is already marked.
    Toggle {
        /// The habit's name, e.g. workout.
        name: String,
        /// The day, as YYYY-MM-DD. Defaults to today.
        #[arg(long)]
        day: Option<NaiveDate>,
    },
    /// Add a habit of your own.
    Add {
        name: String,
        /// An icon reference, e.g. "fas fa-book-open".
        icon: String,
    },
    /// Delete a habit you added. Built-in habits can only be disabled.
    Remove { name: String },
    /// Stop tracking a built-in habit. Its history is kept.
    Disable { name: String },
    /// Resume tracking a built-in habit.
    Enable { name: String },
    /// List every habit, and whether it is done today.
    List,
    /// Show how many days each habit was done in a month.
    Tally(MonthArg),
}

/// A `--month` option that defaults to the current month.
#[derive(Debug, Parser, Clone)]
pub struct MonthArg {
    /// The month, as YYYY-MM. Defaults to the current month.
    #[arg(long)]
    month: Option<YearMonth>,
}

impl MonthArg {
    pub fn month(&self) -> Option<YearMonth> {
        self.month
    }
}

/// Args for the `daybook finance` command.
#[derive(Debug, Parser, Clone)]
pub struct FinanceArgs {
    #[command(subcommand)]
    command: FinanceCommand,
}

impl FinanceArgs {
    pub fn command(&self) -> &FinanceCommand {
        &self.command
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum FinanceCommand {
    /// Record money added to (credit) or spent from (debit) an account.
    Record(RecordArgs),
    /// Create, switch between and list accounts.
    Account {
        #[command(subcommand)]
        command: AccountCommand,
    },
    /// List an account's transactions, newest first.
    History(AccountArg),
    /// Show how much was spent from an account on each day of a month.
    Series {
        #[clap(flatten)]
        account: AccountArg,
        #[clap(flatten)]
        month: MonthArg,
    },
}

/// An `--account` option that defaults to the active account.
#[derive(Debug, Parser, Clone)]
pub struct AccountArg {
    /// The account id. Defaults to the active account.
    #[arg(long)]
    account: Option<String>,
}

impl AccountArg {
    pub fn account(&self) -> Option<&str> {
        self.account.as_deref()
    }
}

/// Args for the `daybook finance record` command.
#[derive(Debug, Parser, Clone)]
pub struct RecordArgs {
    /// credit (money added) or debit (money spent).
    kind: TransactionKind,

    /// What the money was for.
    title: String,

    /// A positive amount, e.g. 250 or 1,250.50.
    amount: Amount,

    /// The day of the transaction, as YYYY-MM-DD. Defaults to today.
    #[arg(long)]
    date: Option<NaiveDate>,

    #[clap(flatten)]
    account: AccountArg,
}

impl RecordArgs {
    pub fn kind(&self) -> TransactionKind {
        self.kind
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn amount(&self) -> Amount {
        self.amount
    }

    pub fn date(&self) -> Option<NaiveDate> {
        self.date
    }

    pub fn account(&self) -> Option<&str> {
        self.account.account()
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum AccountCommand {
    /// Create an account and make it the active one.
    Create {
        name: String,
        /// The balance the account starts with.
        #[arg(long, default_value_t = Amount::ZERO, allow_hyphen_values = true)]
        opening_balance: Amount,
    },
    /// Make another account the active one.
    Switch { id: String },
    /// List accounts with their balances.
    List,
}

/// Args for the `daybook note` command.
#[derive(Debug, Parser, Clone)]
pub struct NoteArgs {
    #[command(subcommand)]
    command: NoteCommand,
}

impl NoteArgs {
    pub fn command(&self) -> &NoteCommand {
        &self.command
    }
}

/// Notes are addressed by their position in `daybook note list`.
#[derive(Subcommand, Debug, Clone)]
pub enum NoteCommand {
    Add { text: String },
    Edit { index: usize, text: String },
    Check { index: usize },
    Uncheck { index: usize },
    Remove { index: usize },
    List,
}

/// Args for the `daybook event` command.
#[derive(Debug, Parser, Clone)]
pub struct EventArgs {
    #[command(subcommand)]
    command: EventCommand,
}

impl EventArgs {
    pub fn command(&self) -> &EventCommand {
        &self.command
    }
}

/// Events are addressed by their position in `daybook event list`, newest first.
#[derive(Subcommand, Debug, Clone)]
pub enum EventCommand {
    Add {
        name: String,
        /// When, as YYYY-MM-DDTHH:MM.
        #[arg(long, value_parser = parse_event_time)]
        at: Option<NaiveDateTime>,
    },
    Rename {
        index: usize,
        name: String,
    },
    Reschedule {
        index: usize,
        /// When, as YYYY-MM-DDTHH:MM. Leave out to clear the time.
        #[arg(value_parser = parse_event_time)]
        at: Option<NaiveDateTime>,
    },
    Remove {
        index: usize,
    },
    List,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, clap::ValueEnum)]
pub enum ChartKind {
    Habits,
    Spending,
}

/// Args for the `daybook chart` command.
#[derive(Debug, Parser, Clone)]
pub struct ChartArgs {
    /// Which chart to draw.
    kind: ChartKind,

    #[clap(flatten)]
    month: MonthArg,

    /// For the spending chart, the account id. Defaults to the active account.
    #[clap(flatten)]
    account: AccountArg,

    /// Write the SVG here instead of printing it.
    #[arg(long)]
    out: Option<PathBuf>,
}

impl ChartArgs {
    pub fn kind(&self) -> ChartKind {
        self.kind
    }

    pub fn month(&self) -> Option<YearMonth> {
        self.month.month()
    }

    pub fn account(&self) -> Option<&str> {
        self.account.account()
    }

    pub fn out(&self) -> Option<&Path> {
        self.out.as_deref()
    }
}

fn default_daybook_home() -> DisplayPath {
    DisplayPath(match dirs::home_dir() {
        Some(home) => home.join("daybook"),
        None => {
            error!(
                "There was an error when trying to get your home directory. You can get around \
                this by providing --home or DAYBOOK_HOME instead of relying on the default \
                daybook home directory. If you continue using the program right now, you may have \
                problems!",
            );
            PathBuf::from("daybook")
        }
    })
}

#[derive(Debug, Default, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct DisplayPath(PathBuf);

impl From<PathBuf> for DisplayPath {
    fn from(value: PathBuf) -> Self {
        DisplayPath(value)
    }
}

impl Deref for DisplayPath {
    type Target = Path;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<Path> for DisplayPath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl Display for DisplayPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_string_lossy())
    }
}

impl FromStr for DisplayPath {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(PathBuf::from(s)))
    }
}

impl DisplayPath {
    pub fn path(&self) -> &Path {
        &self.0
    }
}
