use clap::Parser;
use daybook::args::{
    AccountCommand, Args, Command, EventCommand, FinanceCommand, HabitCommand, NoteCommand,
};
use daybook::{commands, Config, ErrorType, IntoResult, Result};
use std::process::ExitCode;
use tracing::{debug, error, trace, warn};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    let log_level = args.common().log_level();
    init_logger(log_level);
    debug!("Log level set to {}", log_level.to_string().to_lowercase());

    match main_inner(args).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            match e.error_type() {
                ErrorType::InvalidInput | ErrorType::DuplicateName | ErrorType::NotFound => {
                    warn!("{e}")
                }
                _ => error!("Exiting with error: {e}"),
            }
            ExitCode::FAILURE
        }
    }
}

pub async fn main_inner(args: Args) -> Result<()> {
    trace!("{args:?}");
    let home = args.common().home().path();

    if let Command::Init(init_args) = args.command() {
        commands::init(
            home,
            init_args.retired_habits(),
            init_args.currency_symbol(),
        )
        .await?
        .print();
        return Ok(());
    }

    let config = Config::load(home).await.pub_result(ErrorType::Config)?;
    let c = &config;
    let today = commands::today();

    // Route to appropriate command handler
    let _: () = match args.command() {
        Command::Init(_) => {}

        Command::Habit(habit_args) => match habit_args.command() {
            HabitCommand::Toggle { name, day } => commands::habit_toggle(c, today, name, *day)
                .await?
                .print(),
            HabitCommand::Add { name, icon } => {
                commands::habit_add(c, today, name, icon).await?.print()
            }
            HabitCommand::Remove { name } => commands::habit_remove(c, today, name).await?.print(),
            HabitCommand::Disable { name } => {
                commands::habit_disable(c, today, name).await?.print()
            }
            HabitCommand::Enable { name } => commands::habit_enable(c, today, name).await?.print(),
            HabitCommand::List => commands::habit_list(c, today).await?.print(),
            HabitCommand::Tally(month) => {
                commands::habit_tally(c, today, month.month()).await?.print()
            }
        },

        Command::Finance(finance_args) => match finance_args.command() {
            FinanceCommand::Record(record) => {
                commands::finance_record(c, today, record).await?.print()
            }
            FinanceCommand::Account { command } => match command {
                AccountCommand::Create {
                    name,
                    opening_balance,
                } => commands::account_create(c, today, name, *opening_balance)
                    .await?
                    .print(),
                AccountCommand::Switch { id } => {
                    commands::account_switch(c, today, id).await?.print()
                }
                AccountCommand::List => commands::account_list(c, today).await?.print(),
            },
            FinanceCommand::History(account) => {
                commands::finance_history(c, today, account.account())
                    .await?
                    .print()
            }
            FinanceCommand::Series { account, month } => {
                commands::finance_series(c, today, account.account(), month.month())
                    .await?
                    .print()
            }
        },

        Command::Note(note_args) => match note_args.command() {
            NoteCommand::Add { text } => commands::note_add(c, today, text).await?.print(),
            NoteCommand::Edit { index, text } => {
                commands::note_edit(c, today, *index, text).await?.print()
            }
            NoteCommand::Check { index } => commands::note_set_checked(c, today, *index, true)
                .await?
                .print(),
            NoteCommand::Uncheck { index } => commands::note_set_checked(c, today, *index, false)
                .await?
                .print(),
            NoteCommand::Remove { index } => commands::note_remove(c, today, *index).await?.print(),
            NoteCommand::List => commands::note_list(c, today).await?.print(),
        },

        Command::Event(event_args) => match event_args.command() {
            EventCommand::Add { name, at } => {
                commands::event_add(c, today, name, *at).await?.print()
            }
            EventCommand::Rename { index, name } => {
                commands::event_rename(c, today, *index, name).await?.print()
            }
            EventCommand::Reschedule { index, at } => {
                commands::event_reschedule(c, today, *index, *at)
                    .await?
                    .print()
            }
            EventCommand::Remove { index } => {
                commands::event_remove(c, today, *index).await?.print()
            }
            EventCommand::List => commands::event_list(c, today).await?.print(),
        },

        Command::Chart(chart_args) => commands::chart(
            c,
            today,
            chart_args.kind(),
            chart_args.month(),
            chart_args.account(),
            chart_args.out(),
        )
        .await?
        .print(),
    };
    Ok(())
}

/// Initializes the tracing subscriber.
pub fn init_logger(level: LevelFilter) {
    let filter = match std::env::var("RUST_LOG").ok() {
        Some(_) => EnvFilter::from_default_env(),
        None => {
            // Only this crate's own output, at the requested level.
            EnvFilter::new(format!(
                "{}={},{}={}",
                env!("CARGO_CRATE_NAME"),
                level,
                env!("CARGO_BIN_NAME"),
                level
            ))
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
