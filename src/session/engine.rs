//! The session state machine.
//!
//! Owns every mutable session field. Runs single-threaded: the coordinator
//! calls into it with drained channel events and the current instant, and
//! nothing else touches session state.

use crate::classify::PredictionGate;
use crate::hand::{Landmark, LandmarkFrame, Letter};
use crate::integration::config::SessionConfig;
use crate::session::feedback::{derive_feedback, Feedback};
use crate::session::timer::RoundTimer;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};
use uuid::Uuid;

/// Top-level application context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Home,
    Practice,
    Test,
}

/// Per-test progress. Holds its defaults outside test mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestProgress {
    pub round: u8,
    pub score: u8,
    pub countdown: u8,
    pub round_solved: bool,
    pub finished: bool,
}

impl TestProgress {
    fn fresh(round_seconds: u8) -> Self {
        Self {
            round: 1,
            score: 0,
            countdown: round_seconds,
            round_solved: false,
            finished: false,
        }
    }
}

/// A classification dispatch produced by the engine. The coordinator
/// forwards it to the classifier pipeline verbatim.
#[derive(Debug, Clone)]
pub struct ClassifyRequest {
    pub frame: LandmarkFrame,
    pub generation: Uuid,
}

pub struct SessionEngine {
    config: SessionConfig,
    mode: Mode,
    target: Letter,
    prediction: Option<Letter>,
    paused: Arc<AtomicBool>,
    is_correct: bool,
    test: TestProgress,
    generation: Uuid,
    gate: PredictionGate,
    timer: RoundTimer,
}

impl SessionEngine {
    pub fn new(config: SessionConfig) -> Self {
        Self {
            mode: Mode::Home,
            target: Letter::A,
            prediction: None,
            paused: Arc::new(AtomicBool::new(false)),
            is_correct: false,
            test: TestProgress::fresh(config.round_seconds),
            generation: Uuid::new_v4(),
            gate: PredictionGate::new(config.cooldown),
            timer: RoundTimer::new(),
            config,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn target(&self) -> Letter {
        self.target
    }

    pub fn prediction(&self) -> Option<Letter> {
        self.prediction
    }

    pub fn is_paused(&self) -> bool {
        self.paused.load(Ordering::SeqCst)
    }

    pub fn is_correct(&self) -> bool {
        self.is_correct
    }

    pub fn test(&self) -> &TestProgress {
        &self.test
    }

    /// Token identifying the current activation. Regenerated on every mode
    /// entry, return-to-home and "next letter".
    pub fn generation(&self) -> Uuid {
        self.generation
    }

    /// Shared pause flag observed by the frame scheduler.
    pub fn pause_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.paused)
    }

    pub fn feedback(&self) -> Feedback {
        derive_feedback(
            self.is_correct,
            self.test.round_solved,
            self.prediction,
            self.target,
        )
    }

    pub fn enter_practice(&mut self, now: Instant) {
        self.enter(Mode::Practice, now);
    }

    pub fn enter_test(&mut self, now: Instant) {
        self.enter(Mode::Test, now);
    }

    fn enter(&mut self, mode: Mode, now: Instant) {
        self.mode = mode;
        self.reset_session_state();
        self.target = Letter::random(&mut rand::thread_rng());
        self.generation = Uuid::new_v4();
        self.gate.reset();
        if mode == Mode::Test {
            self.timer.arm(now);
        } else {
            self.timer.cancel();
        }
        info!("Entered {:?} mode, target letter {}", mode, self.target);
    }

    /// Return to the home screen, restoring every field to its default.
    pub fn go_home(&mut self) {
        self.mode = Mode::Home;
        self.reset_session_state();
        self.target = Letter::A;
        self.generation = Uuid::new_v4();
        self.gate.reset();
        self.timer.cancel();
        info!("Returned home");
    }

    /// Practice only: move on to a fresh random letter.
    pub fn next_letter(&mut self) {
        if self.mode != Mode::Practice {
            return;
        }
        self.prediction = None;
        self.set_paused(false);
        self.is_correct = false;
        // New token: a classification still in flight for the previous
        // letter must not land on this one.
        self.generation = Uuid::new_v4();
        self.gate.reset();
        self.target = Letter::random(&mut rand::thread_rng());
        debug!("Next practice letter: {}", self.target);
    }

    /// Feed one detector result through the prediction gate. Returns the
    /// request to dispatch, if any.
    pub fn admit_hands(&mut self, hands: &[Vec<Landmark>], now: Instant) -> Option<ClassifyRequest> {
        match self.mode {
            Mode::Home => return None,
            Mode::Test if self.test.finished => return None,
            _ => {}
        }
        if self.is_paused() {
            return None;
        }

        let frame = self.gate.admit(hands, now)?;
        Some(ClassifyRequest {
            frame,
            generation: self.generation,
        })
    }

    /// Undo a dispatch that could not be delivered to the classifier.
    pub fn cancel_dispatch(&mut self) {
        self.gate.complete();
    }

    /// Apply one classification outcome. Stale generations are discarded
    /// unconditionally; `None` outcomes leave the prediction untouched.
    pub fn apply_prediction(&mut self, letter: Option<Letter>, generation: Uuid) {
        self.gate.complete();

        if generation != self.generation {
            debug!("Discarding prediction from a stale activation");
            return;
        }
        let Some(letter) = letter else {
            return;
        };

        self.prediction = Some(letter);
        match self.mode {
            Mode::Practice => {
                if letter == self.target && !self.is_paused() {
                    self.set_paused(true);
                    self.is_correct = true;
                    info!("Practice letter {} matched", self.target);
                }
            }
            Mode::Test => {
                if !self.test.finished && !self.test.round_solved && letter == self.target {
                    self.test.score += 1;
                    self.test.round_solved = true;
                    info!("Round {} solved, score {}", self.test.round, self.test.score);
                }
            }
            Mode::Home => {}
        }
    }

    /// Advance the countdown clock. Drains every elapsed second, so a slow
    /// caller cannot stall the test.
    pub fn tick(&mut self, now: Instant) {
        if self.mode != Mode::Test || self.test.finished {
            return;
        }
        while self.timer.poll(now) {
            if self.test.countdown > 0 {
                self.test.countdown -= 1;
            }
            if self.test.countdown == 0 {
                self.advance_round();
            }
            if self.test.finished {
                break;
            }
        }
    }

    fn advance_round(&mut self) {
        if self.test.round >= self.config.rounds {
            self.test.finished = true;
            self.timer.cancel();
            info!(
                "Test finished with score {}/{}",
                self.test.score, self.config.rounds
            );
        } else {
            self.test.round += 1;
            self.test.countdown = self.config.round_seconds;
            self.test.round_solved = false;
            self.target = Letter::random(&mut rand::thread_rng());
            debug!("Advanced to round {}", self.test.round);
        }
    }

    fn reset_session_state(&mut self) {
        self.prediction = None;
        self.set_paused(false);
        self.is_correct = false;
        self.test = TestProgress::fresh(self.config.round_seconds);
    }

    fn set_paused(&mut self, paused: bool) {
        self.paused.store(paused, Ordering::SeqCst);
    }
}
