//! Session flow tests.
//!
//! These drive the session engine through complete mode sequences the way
//! the coordinator does, and verify the state machine's guarantees.

use signcoach::hand::Landmark;
use signcoach::integration::config::SessionConfig;
use signcoach::session::{Feedback, Mode, SessionEngine};
use std::time::{Duration, Instant};

fn hands() -> Vec<Vec<Landmark>> {
    vec![vec![Landmark::default(); 21]]
}

fn engine() -> SessionEngine {
    SessionEngine::new(SessionConfig::default())
}

#[test]
fn initial_state_is_home() {
    let engine = engine();
    assert_eq!(engine.mode(), Mode::Home, "Sessions start on the home screen");
    assert_eq!(engine.feedback(), Feedback::Neutral);
    assert!(!engine.is_paused());
}

#[test]
fn any_mode_sequence_ending_home_restores_defaults() {
    let mut engine = engine();
    let mut now = Instant::now();

    // Practice with a solved letter, then a test with progress, then home.
    engine.enter_practice(now);
    let request = engine.admit_hands(&hands(), now).unwrap();
    engine.apply_prediction(Some(engine.target()), request.generation);
    assert!(engine.is_paused(), "Practice match should freeze the session");

    now += Duration::from_secs(1);
    engine.enter_test(now);
    let request = engine.admit_hands(&hands(), now).unwrap();
    engine.apply_prediction(Some(engine.target()), request.generation);
    now += Duration::from_secs(32);
    engine.tick(now);
    assert!(engine.test().round > 1);

    engine.go_home();

    assert_eq!(engine.mode(), Mode::Home);
    assert_eq!(engine.test().score, 0, "Score resets on return to home");
    assert_eq!(engine.test().round, 1, "Round resets on return to home");
    assert_eq!(engine.test().countdown, 10, "Countdown resets on return to home");
    assert_eq!(engine.prediction(), None, "Prediction clears on return to home");
    assert!(!engine.is_paused(), "Pause clears on return to home");
}

#[test]
fn practice_session_full_cycle() {
    let mut engine = engine();
    let mut now = Instant::now();
    engine.enter_practice(now);

    // Wrong guess first: feedback goes red, session keeps running.
    let target = engine.target();
    let wrong = if target == signcoach::hand::Letter::C {
        signcoach::hand::Letter::D
    } else {
        signcoach::hand::Letter::C
    };
    let request = engine.admit_hands(&hands(), now).unwrap();
    engine.apply_prediction(Some(wrong), request.generation);
    assert_eq!(engine.feedback(), Feedback::Incorrect);
    assert!(!engine.is_paused());

    // Right guess after the cooldown: session freezes green.
    now += Duration::from_secs(3);
    let request = engine.admit_hands(&hands(), now).unwrap();
    engine.apply_prediction(Some(engine.target()), request.generation);
    assert_eq!(engine.feedback(), Feedback::Correct);
    assert!(engine.is_paused());

    // Frozen: nothing is admitted, no matter how long we wait.
    now += Duration::from_secs(60);
    assert!(engine.admit_hands(&hands(), now).is_none());

    // Next letter rearms everything.
    engine.next_letter();
    assert_eq!(engine.feedback(), Feedback::Neutral);
    assert!(engine.admit_hands(&hands(), now).is_some());
}

#[test]
fn full_test_run_counts_each_round_once() {
    let mut engine = engine();
    let start = Instant::now();
    engine.enter_test(start);

    let mut now = start;
    for round in 1..=10u8 {
        assert_eq!(engine.test().round, round);
        assert_eq!(engine.test().countdown, 10);

        if round % 2 == 1 {
            // Solve odd rounds, twice each: the repeat must not add score.
            let request = engine.admit_hands(&hands(), now).unwrap();
            engine.apply_prediction(Some(engine.target()), request.generation);

            let retry = now + Duration::from_secs(4);
            let request = engine.admit_hands(&hands(), retry).unwrap();
            engine.apply_prediction(Some(engine.target()), request.generation);
        }

        assert!(engine.test().score <= engine.test().round);
        now += Duration::from_secs(10);
        engine.tick(now);
    }

    assert!(engine.test().finished, "Ten rounds complete the test");
    assert_eq!(engine.test().score, 5, "One point per solved round");
}

#[test]
fn cooldown_limits_dispatch_rate_at_frame_cadence() {
    let mut engine = engine();
    let start = Instant::now();
    engine.enter_test(start);

    // 30 fps of detections for five seconds.
    let mut dispatched = 0;
    for frame_index in 0..150 {
        let now = start + Duration::from_millis(frame_index * 33);
        if let Some(request) = engine.admit_hands(&hands(), now) {
            dispatched += 1;
            // Responses come back empty; the gate must still reopen.
            engine.apply_prediction(None, request.generation);
        }
    }

    assert_eq!(
        dispatched, 3,
        "A 2 s cooldown admits exactly three dispatches in five seconds"
    );
}

#[test]
fn late_responses_from_an_abandoned_activation_never_score() {
    let mut engine = engine();
    let now = Instant::now();

    engine.enter_test(now);
    let target = engine.target();
    let request = engine.admit_hands(&hands(), now).unwrap();

    // The user bails out and starts a fresh test before the response lands.
    engine.go_home();
    engine.enter_test(now + Duration::from_secs(1));
    engine.apply_prediction(Some(target), request.generation);

    assert_eq!(engine.test().score, 0, "Stale responses must not score");
    assert_eq!(engine.prediction(), None);

    // The new activation still works normally.
    let request = engine
        .admit_hands(&hands(), now + Duration::from_secs(2))
        .unwrap();
    engine.apply_prediction(Some(engine.target()), request.generation);
    assert_eq!(engine.test().score, 1);
}
