//! Notes and events: the two free-form lists on the dashboard.

use anyhow::Context;
use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

const EVENT_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// A checklist note.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub text: String,
    #[serde(default)]
    pub checked: bool,
}

/// A named, optionally scheduled event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub name: String,
    #[serde(with = "event_time", default)]
    pub date: Option<NaiveDateTime>,
}

impl Event {
    /// e.g. `Fri, May 24, 07:49 AM`, or `No Date/Time Set`.
    pub fn display_time(&self) -> String {
        match self.date {
            Some(at) => at.format("%a, %b %-d, %I:%M %p").to_string(),
            None => String::from("No Date/Time Set"),
        }
    }
}

/// Parses the `YYYY-MM-DDTHH:MM` form used for event times. Trailing seconds are accepted.
pub fn parse_event_time(s: &str) -> anyhow::Result<NaiveDateTime> {
    let s = s.trim();
    NaiveDateTime::parse_from_str(s, EVENT_TIME_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S"))
        .with_context(|| format!("Expected a date and time in the form YYYY-MM-DDTHH:MM, got '{s}'"))
}

/// Event times are stored as `YYYY-MM-DDTHH:MM` strings; an empty string means "not set".
mod event_time {
    use super::*;

    pub(super) fn serialize<S>(at: &Option<NaiveDateTime>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match at {
            Some(at) => serializer.serialize_str(&at.format(EVENT_TIME_FORMAT).to_string()),
            None => serializer.serialize_str(""),
        }
    }

    pub(super) fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = Option::<String>::deserialize(deserializer)?.unwrap_or_default();
        if s.trim().is_empty() {
            return Ok(None);
        }
        parse_event_time(&s)
            .map(Some)
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_roundtrip_shape() {
        let e: Event = serde_json::from_str(r#"{"name":"Dentist","date":"2024-05-24T07:49"}"#).unwrap();
        assert_eq!(e.display_time(), "Fri, May 24, 07:49 AM");
        let json = serde_json::to_string(&e).unwrap();
        assert_eq!(json, r#"{"name":"Dentist","date":"2024-05-24T07:49"}"#);
    }

    #[test]
    fn test_event_without_date() {
        let e: Event = serde_json::from_str(r#"{"name":"Someday","date":""}"#).unwrap();
        assert_eq!(e.date, None);
        assert_eq!(e.display_time(), "No Date/Time Set");
        let e: Event = serde_json::from_str(r#"{"name":"Someday"}"#).unwrap();
        assert_eq!(e.date, None);
    }

    #[test]
    fn test_note_checked_defaults_to_false() {
        let n: Note = serde_json::from_str(r#"{"text":"milk"}"#).unwrap();
        assert!(!n.checked);
    }

    #[test]
    fn test_parse_event_time() {
        assert!(parse_event_time("2024-05-24T07:49").is_ok());
        assert!(parse_event_time("2024-05-24T07:49:30").is_ok());
        assert!(parse_event_time("2024-05-24").is_err());
    }
}
