use serde::{Deserialize, Serialize};

/// Where a habit definition comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HabitOrigin {
    /// One of the six habits every dashboard starts with. Can be disabled, never deleted.
    Builtin,
    /// Added by the user. Can be deleted.
    Custom,
}

serde_plain::derive_display_from_serialize!(HabitOrigin);

/// A habit that can be marked complete once per day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HabitDefinition {
    pub name: String,
    /// An icon reference for the front end, e.g. `fas fa-dumbbell`.
    pub icon: String,
    pub origin: HabitOrigin,
    pub enabled: bool,
}

impl HabitDefinition {
    pub fn builtin(name: &str, icon: &str, enabled: bool) -> Self {
        Self {
            name: name.to_string(),
            icon: icon.to_string(),
            origin: HabitOrigin::Builtin,
            enabled,
        }
    }

    pub fn custom(name: impl Into<String>, icon: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            icon: icon.into(),
            origin: HabitOrigin::Custom,
            enabled: true,
        }
    }

    pub fn is_builtin(&self) -> bool {
        self.origin == HabitOrigin::Builtin
    }

    /// Case-insensitive name comparison, which is how habit names are kept unique.
    pub fn same_name(&self, other: &str) -> bool {
        self.name.to_lowercase() == other.to_lowercase()
    }
}

/// The built-in habits, in display order: `(name, icon)`.
pub const BUILTIN_HABITS: [(&str, &str); 6] = [
    ("workout", "fas fa-dumbbell"),
    ("study", "fas fa-book"),
    ("drinking", "fas fa-tint"),
    ("code", "fas fa-code"),
    ("sleep", "fas fa-moon"),
    ("phone", "fas fa-mobile-alt"),
];

/// How a custom habit's stored `customHabits` entry looks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct CustomHabitRecord {
    pub(crate) name: String,
    pub(crate) icon: String,
}

/// What to do with the history of a custom habit once it is removed.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RetiredHabitPolicy {
    /// Keep the counts in storage but leave them out of tallies and charts.
    #[default]
    Hide,
    /// Erase the removed habit's daily and monthly history.
    Purge,
    /// Keep the counts and still show them, after the active habits.
    Show,
}

serde_plain::derive_display_from_serialize!(RetiredHabitPolicy);
serde_plain::derive_fromstr_from_deserialize!(RetiredHabitPolicy);

/// The outcome of flipping a habit for a day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Toggle {
    /// The habit is now complete for the day.
    Completed,
    /// The habit is no longer complete for the day.
    Cleared,
    /// The name is not an enabled habit; nothing changed.
    Ignored,
}
