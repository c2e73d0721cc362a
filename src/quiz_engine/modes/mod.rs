//! Per-mode strategies.
//!
//! Every mode implements [`QuizStrategy`]: it picks an equation and names the
//! distractor policy for its answers. The generator dispatches to these via
//! [`strategy`].

use rand::RngCore;
use crate::quiz_engine::{
    distractors::DistractorPolicy,
    models::{DigitFilter, Equation, QuizMode},
};

/// Addition, subtraction, multiplication (filter- and easy-mode-driven)
pub mod basic;
/// Exact division from the precomputed dividend/divisor table
pub mod division;
/// Square roots of the 30 perfect squares up to 900
pub mod square_root;
/// Arithmetic sequences with the last term hidden
pub mod pattern;

pub trait QuizStrategy: Sync {
    fn mode(&self) -> QuizMode;

    /// Pick the next equation. Modes that ignore the filter or easy mode
    /// simply don't read them.
    fn pick_equation(
        &self,
        rng: &mut dyn RngCore,
        filter: &DigitFilter,
        easy_mode: bool,
    ) -> Equation;

    fn distractor_policy(&self) -> DistractorPolicy;
}

pub fn strategy(mode: QuizMode) -> &'static dyn QuizStrategy {
    match mode {
        QuizMode::Addition       => &basic::Addition,
        QuizMode::Subtraction    => &basic::Subtraction,
        QuizMode::Multiplication => &basic::Multiplication,
        QuizMode::Division       => &division::Division,
        QuizMode::SquareRoot     => &square_root::SquareRoot,
        QuizMode::Pattern        => &pattern::Pattern,
    }
}
