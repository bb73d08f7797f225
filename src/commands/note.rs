use crate::commands::{open_dashboard, Out};
use crate::model::Note;
use crate::{Config, Result};
use chrono::NaiveDate;
use std::fmt::Write;

pub async fn note_add(config: &Config, today: NaiveDate, text: &str) -> Result<Out<()>> {
    let mut dashboard = open_dashboard(config, today).await?;
    dashboard.add_note(text).await?;
    let index = dashboard.journal().notes().len() - 1;
    Ok(format!("Added note {index}").into())
}

pub async fn note_edit(
    config: &Config,
    today: NaiveDate,
    index: usize,
    text: &str,
) -> Result<Out<()>> {
    let mut dashboard = open_dashboard(config, today).await?;
    dashboard.edit_note(index, text).await?;
    Ok(format!("Edited note {index}").into())
}

pub async fn note_set_checked(
    config: &Config,
    today: NaiveDate,
    index: usize,
    checked: bool,
) -> Result<Out<()>> {
    let mut dashboard = open_dashboard(config, today).await?;
    dashboard.set_note_checked(index, checked).await?;
    let state = if checked { "checked" } else { "unchecked" };
    Ok(format!("Note {index} is {state}").into())
}

pub async fn note_remove(config: &Config, today: NaiveDate, index: usize) -> Result<Out<Note>> {
    let mut dashboard = open_dashboard(config, today).await?;
    let note = dashboard.remove_note(index).await?;
    Ok(Out::new(format!("Removed note {index}"), note))
}

/// Lists the notes with the index each one is addressed by.
pub async fn note_list(config: &Config, today: NaiveDate) -> Result<Out<Vec<Note>>> {
    let dashboard = open_dashboard(config, today).await?;
    let notes = dashboard.journal().notes().to_vec();
    let mut view = String::new();
    for (i, note) in notes.iter().enumerate() {
        let mark = if note.checked { "x" } else { " " };
        let _ = writeln!(view, "{i}. [{mark}] {}", note.text);
    }
    let open = notes.iter().filter(|n| !n.checked).count();
    Ok(Out::new(format!("{} notes, {open} unchecked", notes.len()), notes).with_view(view))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorType;
    use crate::test::TestEnv;

    #[tokio::test]
    async fn test_notes() {
        let env = TestEnv::new().await;
        let today = TestEnv::today();
        note_add(env.config(), today, "buy milk").await.unwrap();
        let out = note_add(env.config(), today, "call mom").await.unwrap();
        assert_eq!(out.message(), "Added note 1");
        note_set_checked(env.config(), today, 0, true).await.unwrap();
        note_edit(env.config(), today, 1, "call dad").await.unwrap();

        let out = note_list(env.config(), today).await.unwrap();
        assert_eq!(out.view().unwrap(), "0. [x] buy milk\n1. [ ] call dad\n");
        assert_eq!(out.message(), "2 notes, 1 unchecked");

        let out = note_remove(env.config(), today, 0).await.unwrap();
        assert_eq!(out.structure().unwrap().text, "buy milk");
        let out = note_list(env.config(), today).await.unwrap();
        assert_eq!(out.structure().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_note_out_of_range() {
        let env = TestEnv::new().await;
        let e = note_edit(env.config(), TestEnv::today(), 3, "x")
            .await
            .unwrap_err();
        assert_eq!(e.error_type(), ErrorType::NotFound);
    }
}
