use rand::RngCore;
use crate::quiz_engine::{
    distractors::DistractorPolicy,
    helpers::filtered_operands,
    models::{DigitFilter, Equation, Operator, QuizMode},
};
use super::QuizStrategy;

/// Largest answer in the single-digit addition table (9 + 9).
pub const ADDITION_MAX: u32 = 18;
/// Largest answer in the times tables (9 x 9).
pub const MULTIPLICATION_MAX: u32 = 81;

pub struct Addition;
pub struct Subtraction;
pub struct Multiplication;

pub fn addition(a: u32, b: u32) -> Equation {
    Equation { operand_a: a, operand_b: b, operator: Operator::Add, result: a + b }
}

/// Orders the operands so the result is never negative: `(3, 8)` becomes
/// `8 - 3 = 5`.
pub fn subtraction(a: u32, b: u32) -> Equation {
    let (a, b) = if b > a { (b, a) } else { (a, b) };
    Equation { operand_a: a, operand_b: b, operator: Operator::Sub, result: a - b }
}

pub fn multiplication(a: u32, b: u32) -> Equation {
    Equation { operand_a: a, operand_b: b, operator: Operator::Mul, result: a * b }
}

impl QuizStrategy for Addition {
    fn mode(&self) -> QuizMode {
        QuizMode::Addition
    }

    fn pick_equation(&self, rng: &mut dyn RngCore, filter: &DigitFilter, easy_mode: bool) -> Equation {
        let (a, b) = filtered_operands(rng, filter, easy_mode);
        addition(a, b)
    }

    fn distractor_policy(&self) -> DistractorPolicy {
        DistractorPolicy::Uniform { low: 0, high: ADDITION_MAX }
    }
}

impl QuizStrategy for Subtraction {
    fn mode(&self) -> QuizMode {
        QuizMode::Subtraction
    }

    fn pick_equation(&self, rng: &mut dyn RngCore, filter: &DigitFilter, easy_mode: bool) -> Equation {
        let (a, b) = filtered_operands(rng, filter, easy_mode);
        subtraction(a, b)
    }

    fn distractor_policy(&self) -> DistractorPolicy {
        DistractorPolicy::Nearby { spread: 3, low: 0, high: ADDITION_MAX }
    }
}

impl QuizStrategy for Multiplication {
    fn mode(&self) -> QuizMode {
        QuizMode::Multiplication
    }

    fn pick_equation(&self, rng: &mut dyn RngCore, filter: &DigitFilter, easy_mode: bool) -> Equation {
        let (a, b) = filtered_operands(rng, filter, easy_mode);
        multiplication(a, b)
    }

    fn distractor_policy(&self) -> DistractorPolicy {
        DistractorPolicy::Uniform { low: 0, high: MULTIPLICATION_MAX }
    }
}
