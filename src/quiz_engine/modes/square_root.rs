use rand::{Rng, RngCore};
use crate::quiz_engine::{
    distractors::DistractorPolicy,
    helpers::isqrt,
    models::{DigitFilter, Equation, Operator, QuizMode},
};
use super::QuizStrategy;

/// 1² through 30².
pub const PERFECT_SQUARES: [u32; 30] = [
    1, 4, 9, 16, 25, 36, 49, 64, 81, 100, 121, 144, 169, 196, 225, 256, 289, 324,
    361, 400, 441, 484, 529, 576, 625, 676, 729, 784, 841, 900,
];

pub struct SquareRoot;

impl QuizStrategy for SquareRoot {
    fn mode(&self) -> QuizMode {
        QuizMode::SquareRoot
    }

    fn pick_equation(&self, rng: &mut dyn RngCore, _filter: &DigitFilter, _easy_mode: bool) -> Equation {
        let square = PERFECT_SQUARES[rng.gen_range(0..PERFECT_SQUARES.len())];
        Equation {
            operand_a: square,
            operand_b: 0,
            operator: Operator::Sqrt,
            result: isqrt(square),
        }
    }

    fn distractor_policy(&self) -> DistractorPolicy {
        DistractorPolicy::Nearby { spread: 3, low: 1, high: PERFECT_SQUARES.len() as u32 }
    }
}
