use crate::commands::{open_dashboard, Out};
use crate::model::Event;
use crate::{Config, Result};
use chrono::{NaiveDate, NaiveDateTime};
use std::fmt::Write;

/// Adds an event to the top of the list.
pub async fn event_add(
    config: &Config,
    today: NaiveDate,
    name: &str,
    at: Option<NaiveDateTime>,
) -> Result<Out<Event>> {
    let mut dashboard = open_dashboard(config, today).await?;
    dashboard.add_event(name, at).await?;
    let event = dashboard.journal().events()[0].clone();
    Ok(Out::new(
        format!("Added event '{}' ({})", event.name, event.display_time()),
        event,
    ))
}

pub async fn event_rename(
    config: &Config,
    today: NaiveDate,
    index: usize,
    name: &str,
) -> Result<Out<()>> {
    let mut dashboard = open_dashboard(config, today).await?;
    dashboard.rename_event(index, name).await?;
    Ok(format!("Renamed event {index} to '{}'", name.trim()).into())
}

/// Sets or, with `None`, clears an event's time.
pub async fn event_reschedule(
    config: &Config,
    today: NaiveDate,
    index: usize,
    at: Option<NaiveDateTime>,
) -> Result<Out<()>> {
    let mut dashboard = open_dashboard(config, today).await?;
    dashboard.reschedule_event(index, at).await?;
    let when = dashboard.journal().events()[index].display_time();
    Ok(format!("Event {index} is now at: {when}").into())
}

pub async fn event_remove(config: &Config, today: NaiveDate, index: usize) -> Result<Out<Event>> {
    let mut dashboard = open_dashboard(config, today).await?;
    let event = dashboard.remove_event(index).await?;
    Ok(Out::new(format!("Removed event '{}'", event.name), event))
}

pub async fn event_list(config: &Config, today: NaiveDate) -> Result<Out<Vec<Event>>> {
    let dashboard = open_dashboard(config, today).await?;
    let events = dashboard.journal().events().to_vec();
    let mut view = String::new();
    for (i, event) in events.iter().enumerate() {
        let _ = writeln!(view, "{i}. {} - {}", event.name, event.display_time());
    }
    Ok(Out::new(format!("{} events", events.len()), events).with_view(view))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorType;
    use crate::model::parse_event_time;
    use crate::test::TestEnv;

    #[tokio::test]
    async fn test_events() {
        let env = TestEnv::new().await;
        let today = TestEnv::today();
        let at = parse_event_time("2024-05-24T07:49").unwrap();
        event_add(env.config(), today, "Dentist", Some(at)).await.unwrap();
        event_add(env.config(), today, " Party ", None).await.unwrap();

        let out = event_list(env.config(), today).await.unwrap();
        assert_eq!(
            out.view().unwrap(),
            "0. Party - No Date/Time Set\n1. Dentist - Fri, May 24, 07:49 AM\n"
        );

        event_rename(env.config(), today, 1, "Dentist visit").await.unwrap();
        let out = event_reschedule(env.config(), today, 1, None).await.unwrap();
        assert_eq!(out.message(), "Event 1 is now at: No Date/Time Set");

        let out = event_remove(env.config(), today, 1).await.unwrap();
        assert_eq!(out.structure().unwrap().name, "Dentist visit");
        assert_eq!(out.structure().unwrap().date, None);
    }

    #[tokio::test]
    async fn test_event_needs_a_name() {
        let env = TestEnv::new().await;
        let e = event_add(env.config(), TestEnv::today(), "  ", None)
            .await
            .unwrap_err();
        assert_eq!(e.error_type(), ErrorType::InvalidInput);
        let e = event_remove(env.config(), TestEnv::today(), 0)
            .await
            .unwrap_err();
        assert_eq!(e.error_type(), ErrorType::NotFound);
    }
}
