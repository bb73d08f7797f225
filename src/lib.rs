//! daybook: a personal dashboard of habits, cash accounts, notes and events, kept in a local
//! store, with bar charts of habit completion and daily spending.

pub mod args;
pub mod chart;
pub mod commands;
mod config;
pub mod dashboard;
mod error;
pub mod finance;
pub mod habits;
pub mod journal;
pub mod model;
pub mod projection;
pub mod store;
mod utils;

#[cfg(test)]
mod test;

pub use config::Config;
pub use error::{Error, ErrorType, IntoResult, Result};
