//! Practice loop for one mode.
//!
//! Holds the current question, the digit filter and easy-mode flag, and the
//! deferred "show the answer, then move on" continuations. Time only moves
//! through [`PracticeSession::tick`].
//!
//! Continuations are never cancelled: if the caller forces a new question
//! while one is pending, the pending one still fires when it comes due and
//! advances again.

use rand::{rngs::StdRng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::quiz_engine::{
    generate_with,
    models::{DigitFilter, Question, QuizMode},
};
use crate::settings::Settings;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerFeedback {
    pub selected_index: usize,
    pub selected_value: u32,
    pub correct_index: Option<usize>,
    pub correct_value: u32,
    pub is_correct: bool,
}

pub struct PracticeSession {
    mode: QuizMode,
    filter: DigitFilter,
    easy_mode: bool,
    rng: StdRng,
    current: Question,
    /// Input is locked between an answer and the next question.
    locked: bool,
    reveal_delay: f32,
    /// Seconds until each queued advance fires.
    pending: Vec<f32>,
    max_attempts: u32,
    asked: usize,
    correct: usize,
}

impl PracticeSession {
    pub fn new(mode: QuizMode, settings: &Settings, rng_seed: Option<u64>) -> Self {
        let mut rng = match rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None       => StdRng::from_entropy(),
        };
        let filter = DigitFilter::all();
        let easy_mode = settings.easy_mode;
        let current = generate_with(&mut rng, mode, &filter, easy_mode, settings.max_distractor_attempts);
        PracticeSession {
            mode,
            filter,
            easy_mode,
            rng,
            current,
            locked: false,
            reveal_delay: settings.reveal_delay_secs,
            pending: Vec::new(),
            max_attempts: settings.max_distractor_attempts,
            asked: 1,
            correct: 0,
        }
    }

    pub fn mode(&self) -> QuizMode {
        self.mode
    }

    pub fn filter(&self) -> DigitFilter {
        self.filter
    }

    pub fn easy_mode(&self) -> bool {
        self.easy_mode
    }

    pub fn current(&self) -> &Question {
        &self.current
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn pending_reveals(&self) -> usize {
        self.pending.len()
    }

    /// `(correct, asked)` so far.
    pub fn score(&self) -> (usize, usize) {
        (self.correct, self.asked)
    }

    /// Check the option in `index`. Returns `None` while input is locked or
    /// for an out-of-range slot.
    pub fn answer(&mut self, index: usize) -> Option<AnswerFeedback> {
        if self.locked {
            return None;
        }
        let answers = &self.current.answers;
        let selected_value = *answers.options.get(index)?;
        let feedback = AnswerFeedback {
            selected_index: index,
            selected_value,
            correct_index: answers.correct_index(),
            correct_value: answers.correct,
            is_correct: answers.is_correct(selected_value),
        };
        if feedback.is_correct {
            self.correct += 1;
        }
        self.locked = true;
        self.pending.push(self.reveal_delay);
        log::debug!(
            "{} answered {} ({})",
            self.current.question_id,
            selected_value,
            if feedback.is_correct { "correct" } else { "wrong" }
        );
        Some(feedback)
    }

    /// Advance time. Every continuation that comes due picks a new question.
    /// Returns how many fired.
    pub fn tick(&mut self, dt: f32) -> usize {
        for wait in self.pending.iter_mut() {
            *wait -= dt;
        }
        let due = self.pending.iter().filter(|&&w| w <= 0.0).count();
        self.pending.retain(|&w| w > 0.0);
        for _ in 0..due {
            self.next_question();
        }
        due
    }

    /// Replace the current question immediately and unlock input. Does not
    /// touch pending continuations.
    pub fn next_question(&mut self) {
        self.current = generate_with(
            &mut self.rng,
            self.mode,
            &self.filter,
            self.easy_mode,
            self.max_attempts,
        );
        self.locked = false;
        self.asked += 1;
    }

    /// Toggle one table; re-picks if the current equation no longer fits.
    pub fn toggle_digit(&mut self, digit: u32) {
        self.filter.toggle(digit);
        log::debug!("digit filter now {}", self.filter);
        self.refresh_if_needed();
    }

    pub fn select_all_digits(&mut self) {
        self.filter.select_all();
        self.refresh_if_needed();
    }

    pub fn set_easy_mode(&mut self, on: bool) {
        self.easy_mode = on;
        self.refresh_if_needed();
    }

    fn refresh_if_needed(&mut self) {
        if self.locked
            || !self.mode.uses_digit_filter()
            || self.current.equation.fits(&self.filter, self.easy_mode)
        {
            return;
        }
        log::debug!("{} no longer fits the filter; refreshing", self.current.equation);
        self.next_question();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(mode: QuizMode, seed: u64) -> PracticeSession {
        PracticeSession::new(mode, &Settings::default(), Some(seed))
    }

    #[test]
    fn answering_locks_until_the_reveal_fires() {
        let mut s = session(QuizMode::Addition, 1);
        let idx = s.current().answers.correct_index().unwrap();
        let first = s.current().question_id.clone();
        let fb = s.answer(idx).unwrap();
        assert!(fb.is_correct);
        assert!(s.is_locked());
        assert!(s.answer(idx).is_none());
        assert_eq!(s.tick(2.0), 0);
        assert_eq!(s.current().question_id, first);
        assert_eq!(s.tick(1.0), 1);
        assert!(!s.is_locked());
        assert_ne!(s.current().question_id, first);
        assert_eq!(s.score(), (1, 2));
    }

    #[test]
    fn wrong_answer_reports_the_correct_slot() {
        let mut s = session(QuizMode::Division, 2);
        let q = s.current().clone();
        let correct_idx = q.answers.correct_index().unwrap();
        let wrong_idx = (correct_idx + 1) % q.answers.len();
        let fb = s.answer(wrong_idx).unwrap();
        assert!(!fb.is_correct);
        assert_eq!(fb.correct_index, Some(correct_idx));
        assert_eq!(fb.correct_value, q.equation.result);
    }

    #[test]
    fn out_of_range_slot_is_ignored() {
        let mut s = session(QuizMode::Pattern, 3);
        assert!(s.answer(7).is_none());
        assert!(!s.is_locked());
    }

    #[test]
    fn stale_continuation_still_fires_after_a_forced_advance() {
        let mut s = session(QuizMode::Multiplication, 4);
        s.answer(0).unwrap();
        s.next_question();
        let forced = s.current().question_id.clone();
        assert_eq!(s.pending_reveals(), 1);
        assert_eq!(s.tick(3.0), 1);
        assert_ne!(s.current().question_id, forced);
        assert_eq!(s.score().1, 3);
    }

    #[test]
    fn removing_the_current_table_refreshes_the_question() {
        let mut s = session(QuizMode::Multiplication, 5);
        for _ in 0..20 {
            let a = s.current().equation.operand_a;
            let other = (a + 1) % 10;
            // narrow to a single table that excludes the current operand
            s.select_all_digits();
            s.toggle_digit(other);
            assert!(s.filter().contains(other));
            assert_eq!(s.current().equation.operand_a, other, "{}", s.current().equation);
        }
    }

    #[test]
    fn deselecting_the_table_refreshes_even_when_operand_b_matches() {
        let mut refreshed = 0;
        for seed in 0..200u64 {
            let mut s = session(QuizMode::Multiplication, seed);
            let eq = s.current().equation;
            if eq.operand_a == eq.operand_b {
                continue;
            }
            s.toggle_digit(eq.operand_b);
            assert_eq!(s.current().equation.operand_a, eq.operand_b, "seed {seed}: kept {eq}");
            refreshed += 1;
        }
        assert!(refreshed > 100);
    }

    #[test]
    fn subtraction_keeps_a_swapped_question_from_the_selected_table() {
        let mut s = session(QuizMode::Subtraction, 8);
        for _ in 0..30 {
            let eq = s.current().equation;
            s.select_all_digits();
            s.toggle_digit(eq.operand_b);
            let now = s.current().equation;
            assert!(s.filter().contains(now.operand_a) || s.filter().contains(now.operand_b), "{now}");
            s.next_question();
        }
    }

    #[test]
    fn enabling_easy_mode_shrinks_operands() {
        let mut s = session(QuizMode::Addition, 6);
        s.set_easy_mode(true);
        for _ in 0..50 {
            let eq = s.current().equation;
            assert!(eq.operand_a <= 5 && eq.operand_b <= 5, "{eq}");
            s.next_question();
        }
    }

    #[test]
    fn filter_changes_do_not_touch_non_filter_modes() {
        let mut s = session(QuizMode::SquareRoot, 7);
        let id = s.current().question_id.clone();
        s.toggle_digit(3);
        s.set_easy_mode(true);
        assert_eq!(s.current().question_id, id);
    }
}
