use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::workflows::format;

/// Identifier of a council event. [`EventId::NEW`] marks a record that has
/// not been persisted yet and selects insert over update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(pub u64);

impl EventId {
    pub const NEW: EventId = EventId(0);

    pub const fn is_new(self) -> bool {
        self.0 == Self::NEW.0
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventKind {
    #[default]
    Activity,
    Snack,
}

impl EventKind {
    /// Decode the form selector: index 1 is a snack handout, everything else
    /// an activity.
    pub const fn from_selector(index: usize) -> Self {
        match index {
            1 => EventKind::Snack,
            _ => EventKind::Activity,
        }
    }

    pub const fn selector_index(self) -> usize {
        match self {
            EventKind::Activity => 0,
            EventKind::Snack => 1,
        }
    }
}

/// Dues a student must have paid to register.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FeeRequirement {
    #[default]
    None,
    School,
    Dept,
}

impl FeeRequirement {
    pub const fn from_selector(index: usize) -> Self {
        match index {
            1 => FeeRequirement::School,
            2 => FeeRequirement::Dept,
            _ => FeeRequirement::None,
        }
    }

    pub const fn selector_index(self) -> usize {
        match self {
            FeeRequirement::None => 0,
            FeeRequirement::School => 1,
            FeeRequirement::Dept => 2,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            FeeRequirement::None => "no fee required",
            FeeRequirement::School => "school dues paid",
            FeeRequirement::Dept => "department dues paid",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventStatus {
    #[default]
    Active,
    Closed,
}

/// A council-run event as persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    pub id: EventId,
    pub title: String,
    pub location: String,
    pub description: String,
    pub owner_id: String,
    #[serde(with = "format::minutes")]
    pub event_at: NaiveDateTime,
    #[serde(with = "format::minutes")]
    pub apply_start: NaiveDateTime,
    #[serde(with = "format::minutes")]
    pub apply_end: NaiveDateTime,
    /// Seats available; 0 means no limit was set.
    pub capacity: u32,
    pub registered: u32,
    pub status: EventStatus,
    pub kind: EventKind,
    pub fee: FeeRequirement,
    pub target_audience: String,
    pub secret_code: String,
}

/// Edit form contents, exactly as typed by a council member.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EventDraft {
    #[serde(default)]
    pub id: EventId,
    #[serde(default)]
    pub owner_id: String,
    pub title: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub description: String,
    pub event_at: String,
    pub apply_start: String,
    pub apply_end: String,
    #[serde(default)]
    pub capacity: String,
    #[serde(default)]
    pub target_audience: String,
    #[serde(default)]
    pub secret_code: String,
    #[serde(default)]
    pub kind_index: usize,
    #[serde(default)]
    pub fee_index: usize,
}

impl EventDraft {
    /// Pre-fill an edit form from a stored record.
    pub fn from_record(record: &EventRecord) -> Self {
        Self {
            id: record.id,
            owner_id: record.owner_id.clone(),
            title: record.title.clone(),
            location: record.location.clone(),
            description: record.description.clone(),
            event_at: format::format_minutes(&record.event_at),
            apply_start: format::format_minutes(&record.apply_start),
            apply_end: format::format_minutes(&record.apply_end),
            capacity: if record.capacity > 0 {
                record.capacity.to_string()
            } else {
                String::new()
            },
            target_audience: record.target_audience.clone(),
            secret_code: record.secret_code.clone(),
            kind_index: record.kind.selector_index(),
            fee_index: record.fee.selector_index(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SaveOutcome {
    Created,
    Updated,
}

/// A committed record and whether the save created or updated it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SavedEvent {
    pub record: EventRecord,
    pub outcome: SaveOutcome,
}

/// Date-time fields of the event form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EventField {
    EventAt,
    ApplyStart,
    ApplyEnd,
}

impl EventField {
    pub const fn label(self) -> &'static str {
        match self {
            EventField::EventAt => "event_at",
            EventField::ApplyStart => "apply_start",
            EventField::ApplyEnd => "apply_end",
        }
    }
}

impl fmt::Display for EventField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
