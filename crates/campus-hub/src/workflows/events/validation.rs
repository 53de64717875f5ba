use chrono::NaiveDateTime;

use super::domain::{EventDraft, EventField, EventKind, FeeRequirement};
use crate::workflows::format;

/// Validation errors raised before an event edit reaches storage.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EventValidationError {
    #[error("title is required")]
    TitleRequired,
    #[error("{field} must use yyyy-MM-dd HH:mm (got '{value}')")]
    Format { field: EventField, value: String },
    #[error("registration end {apply_end} is earlier than registration start {apply_start}")]
    ApplyEndBeforeStart {
        apply_start: String,
        apply_end: String,
    },
    #[error("{field} {value} is in the past (now {now})")]
    PastDate {
        field: EventField,
        value: String,
        now: String,
    },
    #[error("capacity must be a number (got '{value}')")]
    CapacityNotNumeric { value: String },
    #[error("capacity {capacity} is below the {registered} students already registered")]
    CapacityBelowRegistered { capacity: u32, registered: u32 },
}

/// Form fields after parsing and classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ValidatedFields {
    pub(crate) title: String,
    pub(crate) event_at: NaiveDateTime,
    pub(crate) apply_start: NaiveDateTime,
    pub(crate) apply_end: NaiveDateTime,
    pub(crate) capacity: u32,
    pub(crate) kind: EventKind,
    pub(crate) fee: FeeRequirement,
}

/// Check a draft against its own consistency rules and the moment `now`.
pub(crate) fn validate_draft(
    draft: &EventDraft,
    now: NaiveDateTime,
) -> Result<ValidatedFields, EventValidationError> {
    let title = draft.title.trim();
    if title.is_empty() {
        return Err(EventValidationError::TitleRequired);
    }

    let event_at = parse_field(EventField::EventAt, &draft.event_at)?;
    let apply_start = parse_field(EventField::ApplyStart, &draft.apply_start)?;
    let apply_end = parse_field(EventField::ApplyEnd, &draft.apply_end)?;

    if apply_end < apply_start {
        return Err(EventValidationError::ApplyEndBeforeStart {
            apply_start: format::format_minutes(&apply_start),
            apply_end: format::format_minutes(&apply_end),
        });
    }

    for (field, value) in [
        (EventField::EventAt, event_at),
        (EventField::ApplyStart, apply_start),
        (EventField::ApplyEnd, apply_end),
    ] {
        if value < now {
            return Err(EventValidationError::PastDate {
                field,
                value: format::format_minutes(&value),
                now: format::format_minutes(&now),
            });
        }
    }

    let capacity = parse_capacity(&draft.capacity)?;

    Ok(ValidatedFields {
        title: title.to_string(),
        event_at,
        apply_start,
        apply_end,
        capacity,
        kind: EventKind::from_selector(draft.kind_index),
        fee: FeeRequirement::from_selector(draft.fee_index),
    })
}

fn parse_field(field: EventField, raw: &str) -> Result<NaiveDateTime, EventValidationError> {
    format::parse_minutes(raw).ok_or_else(|| EventValidationError::Format {
        field,
        value: raw.trim().to_string(),
    })
}

/// Blank means unset (0); negative values clamp to 0.
pub(crate) fn parse_capacity(raw: &str) -> Result<u32, EventValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(0);
    }

    let not_numeric = || EventValidationError::CapacityNotNumeric {
        value: trimmed.to_string(),
    };
    let parsed: i64 = trimmed.parse().map_err(|_| not_numeric())?;
    if parsed < 0 {
        return Ok(0);
    }
    u32::try_from(parsed).map_err(|_| not_numeric())
}
