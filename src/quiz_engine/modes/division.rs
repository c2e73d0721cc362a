use std::sync::OnceLock;

use rand::{Rng, RngCore};
use crate::quiz_engine::{
    distractors::DistractorPolicy,
    models::{DigitFilter, Equation, Operator, QuizMode},
};
use super::QuizStrategy;

/// Dividends and divisors both stay within `1..=MAX_OPERAND`.
pub const MAX_OPERAND: u32 = 99;

pub struct Division;

/// Every division with an exact whole quotient, built once.
pub fn valid_equations() -> &'static [Equation] {
    static TABLE: OnceLock<Vec<Equation>> = OnceLock::new();
    TABLE.get_or_init(|| {
        let table: Vec<Equation> = (1..=MAX_OPERAND)
            .flat_map(|divisor| {
                (divisor..=MAX_OPERAND)
                    .step_by(divisor as usize)
                    .filter_map(move |dividend| division(dividend, divisor))
            })
            .collect();
        log::debug!("division table holds {} equations", table.len());
        table
    })
}

pub fn division(dividend: u32, divisor: u32) -> Option<Equation> {
    if divisor == 0 || dividend % divisor != 0 {
        return None;
    }
    Some(Equation {
        operand_a: dividend,
        operand_b: divisor,
        operator: Operator::Div,
        result: dividend / divisor,
    })
}

impl QuizStrategy for Division {
    fn mode(&self) -> QuizMode {
        QuizMode::Division
    }

    fn pick_equation(&self, rng: &mut dyn RngCore, _filter: &DigitFilter, _easy_mode: bool) -> Equation {
        let table = valid_equations();
        table[rng.gen_range(0..table.len())]
    }

    fn distractor_policy(&self) -> DistractorPolicy {
        // The largest quotient is 99 / 1.
        DistractorPolicy::Nearby { spread: 3, low: 0, high: MAX_OPERAND }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn table_contains_only_exact_divisions() {
        let table = valid_equations();
        // sum of floor(99 / d) for d in 1..=99
        assert_eq!(table.len(), 482);
        for eq in table {
            assert!((1..=MAX_OPERAND).contains(&eq.operand_b));
            assert!((1..=MAX_OPERAND).contains(&eq.operand_a));
            assert_eq!(eq.operand_a % eq.operand_b, 0);
            assert_eq!(eq.operator, Operator::Div);
        }
    }

    #[test]
    fn picks_are_exact() {
        let mut rng = StdRng::seed_from_u64(21);
        for _ in 0..300 {
            let eq = Division.pick_equation(&mut rng, &DigitFilter::all(), false);
            assert_eq!(eq.operand_a % eq.operand_b, 0);
            assert!(eq.operand_b >= 1 && eq.operand_a <= 99);
            assert_eq!(eq.result * eq.operand_b, eq.operand_a);
        }
    }

    #[test]
    fn inexact_division_is_rejected() {
        assert!(division(7, 2).is_none());
        assert!(division(7, 0).is_none());
        assert_eq!(division(56, 8).map(|e| e.result), Some(7));
    }
}
