//! Notes and events, the two free-form lists of the dashboard.

use crate::error::{Error, Result};
use crate::model::{Event, Note};
use crate::store::{self, KvStore};
use chrono::NaiveDateTime;
use tracing::debug;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Journal {
    notes: Vec<Note>,
    /// Newest first.
    events: Vec<Event>,
    version: u64,
}

impl Journal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Appends an unchecked note. Empty text is allowed.
    pub fn add_note(&mut self, text: &str) -> &Note {
        self.notes.push(Note {
            text: text.to_string(),
            checked: false,
        });
        self.version += 1;
        debug!("Added note {}", self.notes.len() - 1);
        &self.notes[self.notes.len() - 1]
    }

    pub fn edit_note(&mut self, index: usize, text: &str) -> Result<()> {
        self.note_mut(index)?.text = text.to_string();
        self.version += 1;
        debug!("Edited note {index}");
        Ok(())
    }

    pub fn set_note_checked(&mut self, index: usize, checked: bool) -> Result<()> {
        let note = self.note_mut(index)?;
        if note.checked != checked {
            note.checked = checked;
            self.version += 1;
            debug!("Note {index} checked: {checked}");
        }
        Ok(())
    }

    pub fn remove_note(&mut self, index: usize) -> Result<Note> {
        self.note_mut(index)?;
        self.version += 1;
        debug!("Removed note {index}");
        Ok(self.notes.remove(index))
    }

    fn note_mut(&mut self, index: usize) -> Result<&mut Note> {
        let len = self.notes.len();
        self.notes
            .get_mut(index)
            .ok_or_else(|| Error::not_found(format!("There is no note {index} ({len} notes)")))
    }

    /// Puts a new event at the top of the list.
    pub fn add_event(&mut self, name: &str, at: Option<NaiveDateTime>) -> Result<&Event> {
        let name = require_event_name(name)?;
        self.events.insert(0, Event { name, date: at });
        self.version += 1;
        debug!("Added event '{}'", self.events[0].name);
        Ok(&self.events[0])
    }

    pub fn rename_event(&mut self, index: usize, name: &str) -> Result<()> {
        let name = require_event_name(name)?;
        self.event_mut(index)?.name = name;
        self.version += 1;
        debug!("Renamed event {index}");
        Ok(())
    }

    pub fn reschedule_event(&mut self, index: usize, at: Option<NaiveDateTime>) -> Result<()> {
        self.event_mut(index)?.date = at;
        self.version += 1;
        debug!("Rescheduled event {index}");
        Ok(())
    }

    pub fn remove_event(&mut self, index: usize) -> Result<Event> {
        self.event_mut(index)?;
        self.version += 1;
        debug!("Removed event {index}");
        Ok(self.events.remove(index))
    }

    fn event_mut(&mut self, index: usize) -> Result<&mut Event> {
        let len = self.events.len();
        self.events
            .get_mut(index)
            .ok_or_else(|| Error::not_found(format!("There is no event {index} ({len} events)")))
    }

    pub async fn load(store: &dyn KvStore) -> anyhow::Result<Self> {
        let notes: Vec<Note> = store::load_json(store, store::NOTES)
            .await?
            .unwrap_or_default();
        let events: Vec<Event> = store::load_json(store, store::EVENTS)
            .await?
            .unwrap_or_default();
        debug!("Loaded {} notes and {} events", notes.len(), events.len());
        Ok(Self {
            notes,
            events,
            version: 0,
        })
    }

    pub async fn save(&self, store: &dyn KvStore) -> anyhow::Result<()> {
        let mut batch = store::Batch::new();
        batch.put(store::NOTES, &self.notes)?;
        batch.put(store::EVENTS, &self.events)?;
        batch.write(store).await
    }
}

fn require_event_name(name: &str) -> Result<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(Error::invalid_input("An event needs a name"));
    }
    Ok(name.to_string())
}
