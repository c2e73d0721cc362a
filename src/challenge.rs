//! Timed multiplication challenge.
//!
//! `Idle -> Running -> Ended`, with `reset` back to `Idle`. A run serves the
//! 100 products `0x0 ..= 9x9` in shuffled order, each at most once, and ends
//! on the first wrong answer, when the clock runs out, or when every product
//! has been answered. The best streak is read from the store on creation and
//! written back whenever it is beaten.

use std::collections::VecDeque;

use rand::{rngs::StdRng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::quiz_engine::{
    helpers::{answer_set, make_question_id, shuffle},
    models::{Question, QuizMode},
    modes::{basic::multiplication, strategy},
};
use crate::settings::Settings;
use crate::store::{KeyValueStore, BEST_STREAK_KEY};

/// Number of distinct operand pairs in one run (10 x 10).
pub const QUESTION_COUNT: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChallengeState {
    Idle,
    Running,
    Ended(EndReason),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EndReason {
    TimeUp,
    WrongAnswer,
    Completed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChallengeFeedback {
    pub is_correct: bool,
    pub selected_value: u32,
    pub correct_value: u32,
    pub streak: u32,
    /// The answer beat the stored best streak.
    pub new_best: bool,
}

pub struct ChallengeSequencer {
    state: ChallengeState,
    rng: StdRng,
    queue: VecDeque<(u32, u32)>,
    current: Option<Question>,
    streak: u32,
    best_streak: u32,
    time_budget: f32,
    time_remaining: f32,
    reveal_delay: f32,
    /// Countdown to the next question after a correct answer.
    pending_advance: Option<f32>,
    answered: bool,
    max_attempts: u32,
    served: usize,
}

impl ChallengeSequencer {
    pub fn new(store: &impl KeyValueStore, settings: &Settings, rng_seed: Option<u64>) -> Self {
        let rng = match rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None       => StdRng::from_entropy(),
        };
        let best_streak = store.get_int_or(BEST_STREAK_KEY, 0).max(0) as u32;
        ChallengeSequencer {
            state: ChallengeState::Idle,
            rng,
            queue: VecDeque::new(),
            current: None,
            streak: 0,
            best_streak,
            time_budget: settings.challenge_time_budget_secs,
            time_remaining: settings.challenge_time_budget_secs,
            reveal_delay: settings.challenge_reveal_delay_secs,
            pending_advance: None,
            answered: false,
            max_attempts: settings.max_distractor_attempts,
            served: 0,
        }
    }

    pub fn state(&self) -> ChallengeState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == ChallengeState::Running
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.current.as_ref()
    }

    pub fn streak(&self) -> u32 {
        self.streak
    }

    pub fn best_streak(&self) -> u32 {
        self.best_streak
    }

    pub fn time_remaining(&self) -> f32 {
        self.time_remaining
    }

    /// Questions served so far in this run.
    pub fn served(&self) -> usize {
        self.served
    }

    pub fn remaining_questions(&self) -> usize {
        self.queue.len()
    }

    /// Begin a fresh run. Allowed from `Idle` or `Ended`; ignored while
    /// already running.
    pub fn start(&mut self) {
        if self.is_running() {
            log::warn!("Challenge already running");
            return;
        }
        self.streak = 0;
        self.time_remaining = self.time_budget;
        self.pending_advance = None;
        self.served = 0;

        let mut pairs: Vec<(u32, u32)> = (0..=9u32)
            .flat_map(|a| (0..=9u32).map(move |b| (a, b)))
            .collect();
        shuffle(&mut self.rng, &mut pairs);
        self.queue = pairs.into();

        self.state = ChallengeState::Running;
        log::info!("Challenge started ({} questions, {:.0}s)", self.queue.len(), self.time_budget);
        self.advance();
    }

    /// Serve the next question, or end the run if none remain.
    pub fn advance(&mut self) {
        if !self.is_running() {
            log::warn!("Challenge is not active");
            return;
        }
        self.pending_advance = None;
        let Some((a, b)) = self.queue.pop_front() else {
            self.end(EndReason::Completed);
            return;
        };
        let equation = multiplication(a, b);
        let question_id = make_question_id(QuizMode::Multiplication, &mut self.rng);
        let policy = strategy(QuizMode::Multiplication).distractor_policy();
        let answers = answer_set(&mut self.rng, equation.result, policy, self.max_attempts);
        log::debug!("{} challenge #{}: {}", question_id, self.served + 1, equation);
        self.current = Some(Question { question_id, mode: QuizMode::Multiplication, equation, answers });
        self.answered = false;
        self.served += 1;
    }

    /// Answer the current question by value. Returns `None` when no question
    /// is awaiting an answer.
    ///
    /// An `Err` only comes from flushing a new best streak. The answer has
    /// still been counted and the next question is still scheduled.
    pub fn answer(&mut self, value: u32, store: &mut impl KeyValueStore) -> Result<Option<ChallengeFeedback>> {
        if !self.is_running() || self.answered {
            return Ok(None);
        }
        let Some(question) = self.current.as_ref() else {
            return Ok(None);
        };
        let correct_value = question.answers.correct;
        self.answered = true;

        if value != correct_value {
            let feedback = ChallengeFeedback {
                is_correct: false,
                selected_value: value,
                correct_value,
                streak: self.streak,
                new_best: false,
            };
            self.end(EndReason::WrongAnswer);
            return Ok(Some(feedback));
        }

        self.streak += 1;
        self.pending_advance = Some(self.reveal_delay);
        let new_best = self.streak > self.best_streak;
        if new_best {
            self.best_streak = self.streak;
            store.set_int(BEST_STREAK_KEY, self.best_streak as i64);
            store.flush()?;
        }
        Ok(Some(ChallengeFeedback {
            is_correct: true,
            selected_value: value,
            correct_value,
            streak: self.streak,
            new_best,
        }))
    }

    /// Answer by option slot.
    pub fn answer_index(&mut self, index: usize, store: &mut impl KeyValueStore) -> Result<Option<ChallengeFeedback>> {
        let value = match self.current.as_ref().and_then(|q| q.answers.options.get(index)) {
            Some(&v) => v,
            None => return Ok(None),
        };
        self.answer(value, store)
    }

    /// Advance the clock by `dt` seconds. Fires the pending next-question
    /// reveal and ends the run when time is up.
    pub fn tick(&mut self, dt: f32) {
        if !self.is_running() {
            return;
        }
        self.time_remaining = (self.time_remaining - dt).max(0.0);
        if self.time_remaining <= 0.0 {
            self.end(EndReason::TimeUp);
            return;
        }
        if let Some(wait) = self.pending_advance.as_mut() {
            *wait -= dt;
            if *wait <= 0.0 {
                self.advance();
            }
        }
    }

    /// Back to `Idle` (try again / return to menu). The best streak is kept.
    pub fn reset(&mut self) {
        self.state = ChallengeState::Idle;
        self.queue.clear();
        self.current = None;
        self.streak = 0;
        self.time_remaining = self.time_budget;
        self.pending_advance = None;
        self.served = 0;
    }

    /// Game-over text for the end panel.
    pub fn end_message(&self) -> Option<String> {
        match self.state {
            ChallengeState::Ended(EndReason::TimeUp) =>
                Some(format!("Time's up! Your streak: {}", self.streak)),
            ChallengeState::Ended(EndReason::WrongAnswer) =>
                Some(format!("Wrong answer! Your streak: {}", self.streak)),
            ChallengeState::Ended(EndReason::Completed) =>
                Some(format!("Congratulations! You completed all {} questions.", QUESTION_COUNT)),
            _ => None,
        }
    }

    /// Remaining time as `MM:SS`.
    pub fn clock(&self) -> String {
        format_clock(self.time_remaining)
    }

    fn end(&mut self, reason: EndReason) {
        self.state = ChallengeState::Ended(reason);
        self.pending_advance = None;
        log::info!(
            "Challenge ended ({:?}) streak={} best={} served={}",
            reason, self.streak, self.best_streak, self.served
        );
    }
}

pub fn format_clock(seconds: f32) -> String {
    let total = seconds.max(0.0).floor() as u32;
    format!("{:02}:{:02}", total / 60, total % 60)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use crate::store::MemoryStore;

    fn sequencer(store: &MemoryStore, seed: u64) -> ChallengeSequencer {
        ChallengeSequencer::new(store, &Settings::default(), Some(seed))
    }

    fn answer_correctly(seq: &mut ChallengeSequencer, store: &mut MemoryStore) -> ChallengeFeedback {
        let correct = seq.current_question().map(|q| q.answers.correct).unwrap();
        seq.answer(correct, store).unwrap().unwrap()
    }

    #[test]
    fn starts_idle_with_full_clock() {
        let store = MemoryStore::new();
        let seq = sequencer(&store, 1);
        assert_eq!(seq.state(), ChallengeState::Idle);
        assert_eq!(seq.clock(), "16:40");
        assert!(seq.current_question().is_none());
    }

    #[test]
    fn serves_all_hundred_pairs_once_then_completes() {
        let mut store = MemoryStore::new();
        let mut seq = sequencer(&store, 2);
        seq.start();
        let mut seen = HashSet::new();
        while seq.is_running() {
            let eq = seq.current_question().unwrap().equation;
            assert!(seen.insert((eq.operand_a, eq.operand_b)), "repeated {eq}");
            answer_correctly(&mut seq, &mut store);
            seq.advance();
        }
        assert_eq!(seen.len(), QUESTION_COUNT);
        assert_eq!(seq.state(), ChallengeState::Ended(EndReason::Completed));
        assert_eq!(seq.streak(), 100);
        assert_eq!(store.get_int(BEST_STREAK_KEY), Some(100));
        assert_eq!(
            seq.end_message().as_deref(),
            Some("Congratulations! You completed all 100 questions.")
        );
    }

    #[test]
    fn wrong_answer_ends_the_run() {
        let mut store = MemoryStore::new();
        let mut seq = sequencer(&store, 3);
        seq.start();
        answer_correctly(&mut seq, &mut store);
        seq.tick(2.0);
        let q = seq.current_question().unwrap().clone();
        let wrong = q.answers.options.iter().copied().find(|&v| v != q.answers.correct).unwrap();
        let fb = seq.answer(wrong, &mut store).unwrap().unwrap();
        assert!(!fb.is_correct);
        assert_eq!(fb.streak, 1);
        assert_eq!(seq.state(), ChallengeState::Ended(EndReason::WrongAnswer));
        assert_eq!(seq.end_message().as_deref(), Some("Wrong answer! Your streak: 1"));
        assert_eq!(seq.answer(q.answers.correct, &mut store).unwrap(), None);
    }

    #[test]
    fn clock_expiry_ends_the_run() {
        let store = MemoryStore::new();
        let mut seq = sequencer(&store, 4);
        seq.start();
        seq.tick(999.5);
        assert!(seq.is_running());
        assert_eq!(seq.clock(), "00:00");
        seq.tick(0.5);
        assert_eq!(seq.state(), ChallengeState::Ended(EndReason::TimeUp));
    }

    #[test]
    fn reveal_delay_gates_the_next_question() {
        let mut store = MemoryStore::new();
        let mut seq = sequencer(&store, 5);
        seq.start();
        let first = seq.current_question().unwrap().question_id.clone();
        answer_correctly(&mut seq, &mut store);
        // answering twice is ignored
        assert_eq!(seq.answer(0, &mut store).unwrap(), None);
        seq.tick(1.0);
        assert_eq!(seq.current_question().unwrap().question_id, first);
        seq.tick(1.0);
        assert_ne!(seq.current_question().unwrap().question_id, first);
        assert_eq!(seq.served(), 2);
    }

    #[test]
    fn best_streak_never_decreases_across_sessions() {
        let mut store = MemoryStore::new();
        {
            let mut seq = sequencer(&store, 6);
            seq.start();
            for _ in 0..4 {
                answer_correctly(&mut seq, &mut store);
                seq.advance();
            }
        }
        assert_eq!(store.get_int(BEST_STREAK_KEY), Some(4));

        let mut seq = sequencer(&store, 7);
        assert_eq!(seq.best_streak(), 4);
        seq.start();
        let fb = answer_correctly(&mut seq, &mut store);
        assert!(!fb.new_best);
        seq.advance();
        let q = seq.current_question().unwrap().clone();
        let wrong = q.answers.options.iter().copied().find(|&v| v != q.answers.correct).unwrap();
        seq.answer(wrong, &mut store).unwrap();
        assert_eq!(seq.best_streak(), 4);
        assert_eq!(store.get_int(BEST_STREAK_KEY), Some(4));
    }

    struct UnwritableStore {
        inner: MemoryStore,
    }

    impl KeyValueStore for UnwritableStore {
        fn get(&self, key: &str) -> Option<&crate::store::StoredValue> {
            self.inner.get(key)
        }
        fn set(&mut self, key: &str, value: crate::store::StoredValue) {
            self.inner.set(key, value);
        }
        fn delete_key(&mut self, key: &str) {
            self.inner.delete_key(key);
        }
        fn flush(&mut self) -> Result<()> {
            Err(std::io::Error::new(std::io::ErrorKind::Other, "disk full").into())
        }
    }

    #[test]
    fn failed_flush_still_moves_on_to_the_next_question() {
        let mut store = UnwritableStore { inner: MemoryStore::new() };
        let mut seq = ChallengeSequencer::new(&store, &Settings::default(), Some(10));
        seq.start();
        let q = seq.current_question().unwrap().clone();
        assert!(seq.answer(q.answers.correct, &mut store).is_err());
        assert_eq!(seq.streak(), 1);
        assert_eq!(seq.best_streak(), 1);
        assert_eq!(store.get_int(BEST_STREAK_KEY), Some(1));
        seq.tick(2.0);
        assert!(seq.is_running());
        let next = seq.current_question().unwrap().clone();
        assert_ne!(next.question_id, q.question_id);
        assert_eq!(seq.served(), 2);
        assert!(seq.answer(next.answers.correct, &mut store).is_err());
        assert_eq!(seq.streak(), 2);
    }

    #[test]
    fn reset_returns_to_idle_and_restart_reshuffles() {
        let mut store = MemoryStore::new();
        let mut seq = sequencer(&store, 8);
        seq.start();
        answer_correctly(&mut seq, &mut store);
        seq.reset();
        assert_eq!(seq.state(), ChallengeState::Idle);
        assert_eq!(seq.streak(), 0);
        seq.start();
        assert!(seq.is_running());
        assert_eq!(seq.remaining_questions(), QUESTION_COUNT - 1);
        assert_eq!(seq.best_streak(), 1);
    }

    #[test]
    fn every_challenge_answer_set_is_well_formed() {
        let mut store = MemoryStore::new();
        let mut seq = sequencer(&store, 9);
        seq.start();
        while seq.is_running() {
            let q = seq.current_question().unwrap().clone();
            assert_eq!(q.answers.options.len(), 4);
            let distinct: HashSet<u32> = q.answers.options.iter().copied().collect();
            assert_eq!(distinct.len(), 4);
            assert_eq!(q.answers.options.iter().filter(|&&v| v == q.equation.result).count(), 1);
            answer_correctly(&mut seq, &mut store);
            seq.advance();
        }
    }

    #[test]
    fn clock_formatting() {
        assert_eq!(format_clock(1000.0), "16:40");
        assert_eq!(format_clock(61.9), "01:01");
        assert_eq!(format_clock(-3.0), "00:00");
    }
}
