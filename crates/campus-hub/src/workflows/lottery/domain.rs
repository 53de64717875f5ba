use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::workflows::format;

/// Identifier assigned to a round when it is registered. Rounds list in id order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoundId(pub u64);

impl RoundId {
    /// Placeholder carried by a round until the repository assigns its id.
    pub const PENDING: RoundId = RoundId(0);
}

impl fmt::Display for RoundId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Outcome recorded for an applicant. `Undrawn` only exists before the draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicantStatus {
    Undrawn,
    Won,
    Lost,
}

impl ApplicantStatus {
    pub const fn label(self) -> &'static str {
        match self {
            ApplicantStatus::Undrawn => "undrawn",
            ApplicantStatus::Won => "won",
            ApplicantStatus::Lost => "lost",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Applicant {
    pub name: String,
    pub student_id: String,
    pub application_count: u32,
    pub status: ApplicantStatus,
}

impl Applicant {
    pub fn new(name: impl Into<String>, student_id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            student_id: student_id.into(),
            application_count: 1,
            status: ApplicantStatus::Undrawn,
        }
    }
}

/// Inclusive date-time window such as the application or pickup period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Period {
    #[serde(with = "format::minutes_lenient")]
    pub start: NaiveDateTime,
    #[serde(with = "format::minutes_lenient")]
    pub end: NaiveDateTime,
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ~ {}",
            format::format_minutes(&self.start),
            format::format_minutes(&self.end)
        )
    }
}

/// One lottery instance with its own applicant pool and draw state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LotteryRound {
    pub id: RoundId,
    pub name: String,
    pub prize_name: String,
    pub winner_count: u32,
    pub announcement_date: NaiveDate,
    pub application_period: Period,
    pub pickup_location: String,
    pub pickup_period: Period,
    pub is_drawn: bool,
    pub applicants: Vec<Applicant>,
}

impl LotteryRound {
    /// Number of applicants that end up `Won` once the round is drawn.
    pub fn winner_slots(&self) -> usize {
        usize::try_from(self.winner_count)
            .unwrap_or(usize::MAX)
            .min(self.applicants.len())
    }

    pub fn winners(&self) -> Vec<&Applicant> {
        self.applicants
            .iter()
            .filter(|applicant| applicant.status == ApplicantStatus::Won)
            .collect()
    }

    pub fn summary(&self) -> RoundSummary {
        let mut summary = RoundSummary {
            round_id: self.id,
            name: self.name.clone(),
            prize_name: self.prize_name.clone(),
            winner_count: self.winner_count,
            pool_size: self.applicants.len(),
            is_drawn: self.is_drawn,
            won: 0,
            lost: 0,
            undrawn: 0,
        };
        for applicant in &self.applicants {
            match applicant.status {
                ApplicantStatus::Won => summary.won += 1,
                ApplicantStatus::Lost => summary.lost += 1,
                ApplicantStatus::Undrawn => summary.undrawn += 1,
            }
        }
        summary
    }
}

/// Counts rendered next to a round in listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoundSummary {
    pub round_id: RoundId,
    pub name: String,
    pub prize_name: String,
    pub winner_count: u32,
    pub pool_size: usize,
    pub is_drawn: bool,
    pub won: usize,
    pub lost: usize,
    pub undrawn: usize,
}

/// Admin input for registering a round, exactly as typed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewRound {
    pub name: String,
    pub prize_name: String,
    pub winner_count: i64,
    pub announcement_date: String,
    pub application_start: String,
    pub application_end: String,
    pub pickup_location: String,
    pub pickup_start: String,
    pub pickup_end: String,
}

/// A student's entry into a round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicantEntry {
    pub name: String,
    pub student_id: String,
}

/// Result of a successful draw, with a fresh listing for redisplay.
/// `rounds` is `None` when the listing could not be reloaded after the
/// draw was committed.
#[derive(Debug, Clone, Serialize)]
pub struct DrawResult {
    pub round: LotteryRound,
    pub winners: Vec<Applicant>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rounds: Option<Vec<LotteryRound>>,
}

/// Round form fields, used to point validation failures at their input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundField {
    Name,
    WinnerCount,
    AnnouncementDate,
    ApplicationStart,
    ApplicationEnd,
    PickupStart,
    PickupEnd,
    ApplicantName,
    StudentId,
}

impl RoundField {
    pub const fn label(self) -> &'static str {
        match self {
            RoundField::Name => "name",
            RoundField::WinnerCount => "winner_count",
            RoundField::AnnouncementDate => "announcement_date",
            RoundField::ApplicationStart => "application_start",
            RoundField::ApplicationEnd => "application_end",
            RoundField::PickupStart => "pickup_start",
            RoundField::PickupEnd => "pickup_end",
            RoundField::ApplicantName => "applicant_name",
            RoundField::StudentId => "student_id",
        }
    }
}

impl fmt::Display for RoundField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
