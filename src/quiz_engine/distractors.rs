//! Wrong-answer generation.
//!
//! Every mode draws its distractors one of two ways: uniformly from a global
//! answer range, or as a small offset from the correct answer. Both run a
//! bounded random search; when the bound is hit the remaining slots are
//! filled by walking outward from the correct answer.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Default bound on random draws per answer set.
pub const MAX_ATTEMPTS: u32 = 100;

/// How candidate wrong answers are drawn for a mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DistractorPolicy {
    /// Uniform over `low..=high`.
    Uniform { low: u32, high: u32 },
    /// `correct + offset` with `offset` in `-spread..=spread`, kept only when
    /// inside `low..=high`.
    Nearby { spread: u32, low: u32, high: u32 },
}

impl DistractorPolicy {
    pub fn bounds(self) -> (u32, u32) {
        match self {
            DistractorPolicy::Uniform { low, high } => (low, high),
            DistractorPolicy::Nearby { low, high, .. } => (low, high),
        }
    }

    fn draw<R: Rng + ?Sized>(self, rng: &mut R, correct: u32) -> Option<u32> {
        match self {
            DistractorPolicy::Uniform { low, high } => Some(rng.gen_range(low..=high)),
            DistractorPolicy::Nearby { spread, low, high } => {
                let spread = spread as i64;
                let candidate = correct as i64 + rng.gen_range(-spread..=spread);
                if candidate < low as i64 || candidate > high as i64 {
                    None
                } else {
                    Some(candidate as u32)
                }
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Distractors {
    pub values: Vec<u32>,
    /// The random search ran out of attempts before filling every slot.
    pub exhausted: bool,
}

/// Produce up to `count` distinct values, none equal to `correct`.
///
/// Out-of-range draws, duplicates and hits on `correct` all count against
/// `max_attempts`. The result is only shorter than `count` when the policy's
/// range holds fewer than `count` values besides `correct`.
pub fn generate<R: Rng + ?Sized>(
    rng: &mut R,
    correct: u32,
    count: usize,
    policy: DistractorPolicy,
    max_attempts: u32,
) -> Distractors {
    let mut values: Vec<u32> = Vec::with_capacity(count);
    let mut attempts = 0u32;

    while values.len() < count && attempts < max_attempts {
        attempts += 1;
        if let Some(candidate) = policy.draw(rng, correct) {
            if candidate != correct && !values.contains(&candidate) {
                values.push(candidate);
            }
        }
    }

    let exhausted = values.len() < count;
    if exhausted {
        log::warn!(
            "distractor search for {} exhausted after {} attempts ({}/{} found); filling nearest",
            correct, attempts, values.len(), count
        );
        fill_nearest(&mut values, correct, count, policy.bounds());
        if values.len() < count {
            log::warn!(
                "range {:?} cannot supply {} distractors for {}; answer set will be short",
                policy.bounds(), count, correct
            );
        }
    }

    Distractors { values, exhausted }
}

/// Walk outward from `correct` (below first, then above) taking unused
/// in-range values until `count` are present.
fn fill_nearest(values: &mut Vec<u32>, correct: u32, count: usize, (low, high): (u32, u32)) {
    let mut distance = 1u32;
    while values.len() < count {
        let below = correct.checked_sub(distance);
        let above = correct.checked_add(distance);
        let below_done = below.map_or(true, |v| v < low);
        let above_done = above.map_or(true, |v| v > high);
        if below_done && above_done {
            return;
        }
        for candidate in [below, above].into_iter().flatten() {
            if (low..=high).contains(&candidate)
                && values.len() < count
                && !values.contains(&candidate)
            {
                values.push(candidate);
            }
        }
        distance += 1;
    }
}
