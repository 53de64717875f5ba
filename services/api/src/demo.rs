use crate::infra::{InMemoryEventRepository, InMemoryRoundRepository};
use campus_hub::error::AppError;
use campus_hub::workflows::events::{
    EventDraft, EventKind, EventRegistrationLifecycle, FeeRequirement, SavedEvent,
};
use campus_hub::workflows::format::format_minutes;
use campus_hub::workflows::lottery::{ApplicantEntry, NewRound, RoundLotteryEngine};
use campus_hub::workflows::{Clock, FixedClock, SystemClock};
use chrono::{Duration, NaiveDateTime};
use clap::Args;
use std::sync::Arc;

const DEMO_APPLICANTS: [(&str, &str); 5] = [
    ("Kim Minji", "2023001"),
    ("Lee Jisoo", "2023002"),
    ("Park Hana", "2023003"),
    ("Choi Yuna", "2023004"),
    ("Jung Daeho", "2023005"),
];

#[derive(Args, Debug)]
pub(crate) struct DemoArgs {
    /// Seed the draw so repeated demos pick the same winners.
    #[arg(long)]
    pub(crate) seed: Option<u64>,
    /// Number of prizes in the demo raffle.
    #[arg(long, default_value_t = 2)]
    pub(crate) winners: i64,
    /// Override the current time (YYYY-MM-DD HH:MM).
    #[arg(long, value_parser = crate::infra::parse_minutes)]
    pub(crate) now: Option<NaiveDateTime>,
}

#[derive(Args, Debug)]
pub(crate) struct EventCheckArgs {
    #[arg(long)]
    pub(crate) title: String,
    /// Event start (YYYY-MM-DD HH:MM)
    #[arg(long)]
    pub(crate) event_at: String,
    /// Registration opens (YYYY-MM-DD HH:MM)
    #[arg(long)]
    pub(crate) apply_start: String,
    /// Registration closes (YYYY-MM-DD HH:MM)
    #[arg(long)]
    pub(crate) apply_end: String,
    /// Seat limit; leave empty for no limit
    #[arg(long, default_value = "")]
    pub(crate) capacity: String,
    /// 0 = activity, 1 = snack handout
    #[arg(long, default_value_t = 0)]
    pub(crate) kind_index: usize,
    /// 0 = none, 1 = school dues, 2 = department dues
    #[arg(long, default_value_t = 0)]
    pub(crate) fee_index: usize,
    /// Evaluate against this time instead of the system clock (YYYY-MM-DD HH:MM)
    #[arg(long, value_parser = crate::infra::parse_minutes)]
    pub(crate) now: Option<NaiveDateTime>,
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs { seed, winners, now } = args;
    let now = now.unwrap_or_else(|| SystemClock.now());

    println!("Campus Hub demo");
    println!("================");
    run_lottery_demo(seed, winners, now)?;
    println!();
    run_event_demo(now)?;
    Ok(())
}

fn run_lottery_demo(seed: Option<u64>, winners: i64, now: NaiveDateTime) -> Result<(), AppError> {
    let repository = Arc::new(InMemoryRoundRepository::default());
    let engine = match seed {
        Some(seed) => RoundLotteryEngine::with_seed(repository, seed),
        None => RoundLotteryEngine::new(repository),
    };

    let announcement = (now + Duration::days(14)).date();
    let round_id = engine.add_round(NewRound {
        name: "Winter Raffle".to_string(),
        prize_name: "Thermal tumbler".to_string(),
        winner_count: winners,
        announcement_date: announcement.format("%Y-%m-%d").to_string(),
        application_start: format_minutes(&now),
        application_end: format_minutes(&(now + Duration::days(7))),
        pickup_location: "Student council office".to_string(),
        pickup_start: format_minutes(&(now + Duration::days(15))),
        pickup_end: format_minutes(&(now + Duration::days(17))),
    })?;

    for (name, student_id) in DEMO_APPLICANTS {
        engine.enter(
            round_id,
            ApplicantEntry {
                name: name.to_string(),
                student_id: student_id.to_string(),
            },
        )?;
    }
    // A repeat entry bumps the application count instead of adding a row.
    engine.enter(
        round_id,
        ApplicantEntry {
            name: DEMO_APPLICANTS[0].0.to_string(),
            student_id: DEMO_APPLICANTS[0].1.to_string(),
        },
    )?;

    let result = engine.draw(round_id)?;
    let round = &result.round;

    println!("Lottery round #{} - {}", round.id, round.name);
    println!("  Prize: {} x{}", round.prize_name, round.winner_count);
    println!("  Applications: {}", round.application_period);
    println!(
        "  Pickup: {} at {}",
        round.pickup_period, round.pickup_location
    );
    println!("  Announced: {}", round.announcement_date);
    println!("  Applicants:");
    for applicant in &round.applicants {
        println!(
            "    - {} ({}) x{} -> {}",
            applicant.name,
            applicant.student_id,
            applicant.application_count,
            applicant.status.label()
        );
    }
    if result.winners.is_empty() {
        println!("  Winners: none");
    } else {
        println!("  Winners:");
        for winner in &result.winners {
            println!("    - {} ({})", winner.name, winner.student_id);
        }
    }

    match engine.draw(round_id) {
        Ok(_) => println!("  Second draw unexpectedly succeeded"),
        Err(err) => println!("  Second draw rejected: {}", err),
    }

    Ok(())
}

fn run_event_demo(now: NaiveDateTime) -> Result<(), AppError> {
    let lifecycle = EventRegistrationLifecycle::with_clock(
        Arc::new(InMemoryEventRepository::default()),
        FixedClock(now),
    );

    let draft = EventDraft {
        owner_id: "council-president".to_string(),
        title: "Finals Week Snack Night".to_string(),
        location: "Main hall".to_string(),
        description: "Late-night snacks for students studying for finals".to_string(),
        event_at: format_minutes(&(now + Duration::days(10))),
        apply_start: format_minutes(&(now + Duration::days(1))),
        apply_end: format_minutes(&(now + Duration::days(8))),
        capacity: "120".to_string(),
        target_audience: "All undergraduates".to_string(),
        kind_index: EventKind::Snack.selector_index(),
        fee_index: FeeRequirement::School.selector_index(),
        ..EventDraft::default()
    };

    let created = lifecycle.save(draft)?;
    render_saved_event(&created);

    let mut edit = EventDraft::from_record(&created.record);
    edit.capacity = "150".to_string();
    let updated = lifecycle.save(edit)?;
    render_saved_event(&updated);

    Ok(())
}

pub(crate) fn run_event_check(args: EventCheckArgs) -> Result<(), AppError> {
    let EventCheckArgs {
        title,
        event_at,
        apply_start,
        apply_end,
        capacity,
        kind_index,
        fee_index,
        now,
    } = args;

    let now = now.unwrap_or_else(|| SystemClock.now());
    let lifecycle = EventRegistrationLifecycle::with_clock(
        Arc::new(InMemoryEventRepository::default()),
        FixedClock(now),
    );

    let draft = EventDraft {
        title,
        event_at,
        apply_start,
        apply_end,
        capacity,
        kind_index,
        fee_index,
        ..EventDraft::default()
    };

    match lifecycle.save(draft) {
        Ok(saved) => {
            println!("Event form is valid as of {}", format_minutes(&now));
            match serde_json::to_string_pretty(&saved.record) {
                Ok(json) => println!("{}", json),
                Err(err) => println!("Record preview unavailable: {}", err),
            }
            Ok(())
        }
        Err(err) => {
            println!("Event form rejected: {}", err);
            Err(AppError::from(err))
        }
    }
}

fn render_saved_event(saved: &SavedEvent) {
    let record = &saved.record;
    let capacity = if record.capacity == 0 {
        "unlimited".to_string()
    } else {
        record.capacity.to_string()
    };
    println!(
        "Event #{} {:?}: {} ({:?}, {})",
        record.id,
        saved.outcome,
        record.title,
        record.kind,
        record.fee.label()
    );
    println!(
        "  {} at {}, registration {} ~ {}",
        format_minutes(&record.event_at),
        record.location,
        format_minutes(&record.apply_start),
        format_minutes(&record.apply_end)
    );
    println!(
        "  Capacity: {}, registered: {}, status: {:?}",
        capacity, record.registered, record.status
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use campus_hub::workflows::format::parse_minutes;

    fn fixed_now() -> NaiveDateTime {
        parse_minutes("2025-12-01 09:00").expect("valid date-time")
    }

    #[test]
    fn demo_runs_end_to_end_with_a_seed() {
        let args = DemoArgs {
            seed: Some(3),
            winners: 2,
            now: Some(fixed_now()),
        };
        run_demo(args).expect("demo succeeds");
    }

    #[test]
    fn event_check_rejects_reversed_window() {
        let args = EventCheckArgs {
            title: "Board game night".to_string(),
            event_at: "2025-12-10 18:00".to_string(),
            apply_start: "2025-12-09 09:00".to_string(),
            apply_end: "2025-12-08 09:00".to_string(),
            capacity: String::new(),
            kind_index: 0,
            fee_index: 0,
            now: Some(fixed_now()),
        };

        match run_event_check(args) {
            Err(AppError::Event(_)) => {}
            other => panic!("expected event validation error, got {other:?}"),
        }
    }

    #[test]
    fn event_check_accepts_a_valid_form() {
        let args = EventCheckArgs {
            title: "Board game night".to_string(),
            event_at: "2025-12-10 18:00".to_string(),
            apply_start: "2025-12-02 09:00".to_string(),
            apply_end: "2025-12-08 09:00".to_string(),
            capacity: "30".to_string(),
            kind_index: 0,
            fee_index: 2,
            now: Some(fixed_now()),
        };

        run_event_check(args).expect("form validates");
    }
}
