use std::sync::{Arc, Barrier};
use std::thread;

use crate::workflows::lottery::service::{LotteryError, RoundLotteryEngine};

use super::common::*;

#[test]
fn concurrent_draws_on_one_round_succeed_exactly_once() {
    const CONTENDERS: usize = 8;
    let (engine, _) = build_engine();
    let round_id = seeded_round(&engine, "Rush", 2, &["A", "B", "C", "D", "E"]);
    let engine = Arc::new(engine);
    let barrier = Arc::new(Barrier::new(CONTENDERS));

    let handles: Vec<_> = (0..CONTENDERS)
        .map(|_| {
            let engine = engine.clone();
            let barrier = barrier.clone();
            thread::spawn(move || {
                barrier.wait();
                engine.draw(round_id)
            })
        })
        .collect();

    let mut successes = 0;
    let mut already_drawn = 0;
    for handle in handles {
        match handle.join().expect("draw thread panicked") {
            Ok(result) => {
                successes += 1;
                assert_eq!(result.winners.len(), 2);
            }
            Err(LotteryError::AlreadyDrawn { .. }) => already_drawn += 1,
            Err(other) => panic!("unexpected draw error: {other:?}"),
        }
    }

    assert_eq!(successes, 1);
    assert_eq!(already_drawn, CONTENDERS - 1);
}

#[test]
fn commit_rejects_a_round_drawn_by_another_writer() {
    let (engine, repository) = build_engine();
    let round_id = seeded_round(&engine, "Shared store", 1, &["A", "B"]);

    let other_engine = RoundLotteryEngine::with_seed(repository.clone(), 5);
    other_engine.draw(round_id).expect("first writer draws");

    match engine.draw(round_id) {
        Err(LotteryError::AlreadyDrawn { .. }) => {}
        other => panic!("expected already drawn error, got {other:?}"),
    }
}
