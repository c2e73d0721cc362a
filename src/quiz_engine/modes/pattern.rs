use rand::{Rng, RngCore};
use crate::quiz_engine::{
    distractors::DistractorPolicy,
    models::{DigitFilter, Equation, Operator, QuizMode},
};
use super::QuizStrategy;

pub struct Pattern;

/// Sequence `start, start+step, start+2*step, ?` with the 4th term as the answer.
pub fn pattern(start: u32, step: u32) -> Equation {
    Equation {
        operand_a: start,
        operand_b: step,
        operator: Operator::Pattern,
        result: start + step * (Equation::PATTERN_LENGTH - 1),
    }
}

impl QuizStrategy for Pattern {
    fn mode(&self) -> QuizMode {
        QuizMode::Pattern
    }

    fn pick_equation(&self, rng: &mut dyn RngCore, _filter: &DigitFilter, _easy_mode: bool) -> Equation {
        let start = rng.gen_range(1..=9);
        let step = rng.gen_range(1..=4);
        pattern(start, step)
    }

    fn distractor_policy(&self) -> DistractorPolicy {
        DistractorPolicy::Nearby { spread: 3, low: 1, high: 40 }
    }
}
