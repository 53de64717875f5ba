use chrono::NaiveDateTime;

use super::domain::{
    Applicant, ApplicantEntry, LotteryRound, NewRound, Period, RoundField, RoundId,
};
use crate::workflows::format;

/// Validation errors raised before a round or entry touches storage.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RoundValidationError {
    #[error("{0} is required")]
    Required(RoundField),
    #[error("winner count must not be negative (got {value})")]
    NegativeWinnerCount { value: i64 },
    #[error("winner count {value} is too large")]
    WinnerCountOverflow { value: i64 },
    #[error("{field} has an invalid format: '{value}'")]
    Format { field: RoundField, value: String },
    #[error("{field} ({end}) is earlier than its start ({start})")]
    PeriodReversed {
        field: RoundField,
        start: String,
        end: String,
    },
}

/// Build an unregistered round from the admin's form input.
pub(crate) fn round_from_request(request: NewRound) -> Result<LotteryRound, RoundValidationError> {
    let name = request.name.trim();
    if name.is_empty() {
        return Err(RoundValidationError::Required(RoundField::Name));
    }

    if request.winner_count < 0 {
        return Err(RoundValidationError::NegativeWinnerCount {
            value: request.winner_count,
        });
    }
    let winner_count = u32::try_from(request.winner_count).map_err(|_| {
        RoundValidationError::WinnerCountOverflow {
            value: request.winner_count,
        }
    })?;

    let announcement_date = format::parse_date(&request.announcement_date).ok_or_else(|| {
        RoundValidationError::Format {
            field: RoundField::AnnouncementDate,
            value: request.announcement_date.clone(),
        }
    })?;

    let application_period = period(
        (RoundField::ApplicationStart, &request.application_start),
        (RoundField::ApplicationEnd, &request.application_end),
    )?;
    let pickup_period = period(
        (RoundField::PickupStart, &request.pickup_start),
        (RoundField::PickupEnd, &request.pickup_end),
    )?;

    Ok(LotteryRound {
        id: RoundId::PENDING,
        name: name.to_string(),
        prize_name: request.prize_name.trim().to_string(),
        winner_count,
        announcement_date,
        application_period,
        pickup_location: request.pickup_location.trim().to_string(),
        pickup_period,
        is_drawn: false,
        applicants: Vec::new(),
    })
}

fn period(
    start: (RoundField, &str),
    end: (RoundField, &str),
) -> Result<Period, RoundValidationError> {
    let start_at = period_bound(start.0, start.1)?;
    let end_at = period_bound(end.0, end.1)?;
    if end_at < start_at {
        return Err(RoundValidationError::PeriodReversed {
            field: end.0,
            start: format::format_minutes(&start_at),
            end: format::format_minutes(&end_at),
        });
    }
    Ok(Period {
        start: start_at,
        end: end_at,
    })
}

fn period_bound(field: RoundField, raw: &str) -> Result<NaiveDateTime, RoundValidationError> {
    format::parse_minutes_lenient(raw).ok_or_else(|| RoundValidationError::Format {
        field,
        value: raw.to_string(),
    })
}

/// Add an entry to the pool, counting repeat entries by student id.
pub(crate) fn apply_entry(
    applicants: &mut Vec<Applicant>,
    entry: ApplicantEntry,
) -> Result<(), RoundValidationError> {
    let name = entry.name.trim();
    if name.is_empty() {
        return Err(RoundValidationError::Required(RoundField::ApplicantName));
    }
    let student_id = entry.student_id.trim();
    if student_id.is_empty() {
        return Err(RoundValidationError::Required(RoundField::StudentId));
    }

    match applicants
        .iter_mut()
        .find(|applicant| applicant.student_id == student_id)
    {
        Some(existing) => {
            existing.application_count = existing.application_count.saturating_add(1);
        }
        None => applicants.push(Applicant::new(name, student_id)),
    }
    Ok(())
}
