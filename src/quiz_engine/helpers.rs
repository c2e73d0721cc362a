//! Shared builder functions used by every mode.
//!
//! Each mode only decides *which* equation to ask and *how* wrong answers are
//! drawn. Shuffling, answer-set assembly and ID stamping live here so the
//! per-mode files stay focused on arithmetic.

use rand::{Rng, RngCore};
use crate::quiz_engine::{
    distractors::{self, DistractorPolicy},
    models::{AnswerSet, DigitFilter, Equation, QuizMode},
};

/// Number of wrong answers shown next to the correct one.
pub const DISTRACTOR_COUNT: usize = 3;

/// Fisher-Yates shuffle in place.
pub fn shuffle<T, R: Rng + ?Sized>(rng: &mut R, items: &mut [T]) {
    for i in (1..items.len()).rev() {
        let j = rng.gen_range(0..=i);
        items.swap(i, j);
    }
}

/// Correct answer plus distractors, shuffled into presentation order.
pub fn answer_set<R: Rng + ?Sized>(
    rng: &mut R,
    correct: u32,
    policy: DistractorPolicy,
    max_attempts: u32,
) -> AnswerSet {
    let wrong = distractors::generate(rng, correct, DISTRACTOR_COUNT, policy, max_attempts);
    let mut options = Vec::with_capacity(DISTRACTOR_COUNT + 1);
    options.push(correct);
    options.extend(wrong.values);
    shuffle(rng, &mut options);
    log::debug!("answer set for {}: {:?}", correct, options);
    AnswerSet { options, correct }
}

/// Pick `(a, b)` for the filter-driven modes.
///
/// | easy | filter  | a             | b       |
/// |------|---------|---------------|---------|
/// | on   | ALL     | 0..=5         | 0..=5   |
/// | on   | partial | from filter   | 0..=5   |
/// | off  | any     | from filter   | 0..=9   |
pub fn filtered_operands<R: Rng + ?Sized>(
    rng: &mut R,
    filter: &DigitFilter,
    easy_mode: bool,
) -> (u32, u32) {
    if easy_mode && filter.is_all() {
        return (rng.gen_range(0..=5), rng.gen_range(0..=5));
    }
    let digits = filter.digits();
    // DigitFilter is never empty, so the index is always valid.
    let a = digits[rng.gen_range(0..digits.len())];
    let b = if easy_mode { rng.gen_range(0..=5) } else { rng.gen_range(0..=9) };
    (a, b)
}

/// Build a unique question ID from mode + RNG, e.g. `MU-1A2B3C4D`.
pub fn make_question_id(mode: QuizMode, rng: &mut dyn RngCore) -> String {
    format!("{}-{:08X}", mode.id_prefix(), rng.next_u32())
}

/// Integer square root for the perfect-square table.
pub fn isqrt(n: u32) -> u32 {
    let mut root = (n as f64).sqrt() as u32;
    while root * root > n {
        root -= 1;
    }
    while (root + 1) * (root + 1) <= n {
        root += 1;
    }
    root
}

/// Check an equation's arithmetic against its operator.
pub fn is_consistent(eq: &Equation) -> bool {
    use crate::quiz_engine::models::Operator;
    match eq.operator {
        Operator::Add     => eq.operand_a + eq.operand_b == eq.result,
        Operator::Sub     => eq.operand_a >= eq.operand_b && eq.operand_a - eq.operand_b == eq.result,
        Operator::Mul     => eq.operand_a * eq.operand_b == eq.result,
        Operator::Div     => eq.operand_b != 0
            && eq.operand_a % eq.operand_b == 0
            && eq.operand_a / eq.operand_b == eq.result,
        Operator::Sqrt    => eq.result * eq.result == eq.operand_a,
        Operator::Pattern => eq.operand_a + eq.operand_b * (Equation::PATTERN_LENGTH - 1) == eq.result,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn shuffle_is_a_permutation() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut items: Vec<u32> = (0..100).collect();
        shuffle(&mut rng, &mut items);
        let mut sorted = items.clone();
        sorted.sort();
        assert_eq!(sorted, (0..100).collect::<Vec<_>>());
        assert_ne!(items, sorted, "100 items should not survive a shuffle in order");
    }

    #[test]
    fn correct_answer_is_not_always_first() {
        let mut rng = StdRng::seed_from_u64(2);
        let policy = DistractorPolicy::Uniform { low: 0, high: 81 };
        let positions: std::collections::HashSet<usize> = (0..50)
            .filter_map(|_| answer_set(&mut rng, 56, policy, 100).correct_index())
            .collect();
        assert!(positions.len() > 1, "correct answer stuck in one slot: {positions:?}");
    }

    #[test]
    fn easy_mode_with_all_tables_keeps_both_operands_small() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..200 {
            let (a, b) = filtered_operands(&mut rng, &DigitFilter::all(), true);
            assert!(a <= 5 && b <= 5);
        }
    }

    #[test]
    fn partial_filter_drives_first_operand() {
        let mut rng = StdRng::seed_from_u64(4);
        let filter = DigitFilter::from_digits(&[7, 8]);
        for _ in 0..200 {
            let (a, b) = filtered_operands(&mut rng, &filter, false);
            assert!(a == 7 || a == 8);
            assert!(b <= 9);
        }
        for _ in 0..200 {
            let (a, b) = filtered_operands(&mut rng, &filter, true);
            assert!(a == 7 || a == 8);
            assert!(b <= 5);
        }
    }

    #[test]
    fn isqrt_handles_the_square_table() {
        for r in 1..=30u32 {
            assert_eq!(isqrt(r * r), r);
        }
        assert_eq!(isqrt(899), 29);
    }

    #[test]
    fn question_id_has_mode_prefix() {
        let mut rng = StdRng::seed_from_u64(5);
        let id = make_question_id(QuizMode::Multiplication, &mut rng);
        assert!(id.starts_with("MU-"));
        assert_eq!(id.len(), 11);
    }
}
