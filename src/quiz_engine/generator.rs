use rand::{rngs::StdRng, RngCore, SeedableRng};

use crate::quiz_engine::{
    helpers::{answer_set, make_question_id},
    models::{DigitFilter, Question, QuestionRequest, QuizMode},
    modes,
};

/// Core dispatch: seed an RNG and build one question for the requested mode.
pub fn generate_question(request: QuestionRequest) -> Question {
    let mut rng: StdRng = match request.rng_seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None       => StdRng::from_entropy(),
    };
    generate_with(
        &mut rng,
        request.mode,
        &request.filter,
        request.easy_mode,
        request.max_attempts,
    )
}

/// Same as [`generate_question`] but draws from a caller-owned RNG, so a
/// session can produce a reproducible stream of questions from one seed.
pub fn generate_with(
    rng: &mut dyn RngCore,
    mode: QuizMode,
    filter: &DigitFilter,
    easy_mode: bool,
    max_attempts: u32,
) -> Question {
    let question_id = make_question_id(mode, rng);
    let strategy = modes::strategy(mode);
    let equation = strategy.pick_equation(rng, filter, easy_mode);
    log::debug!("{} picked {}", question_id, equation);
    let answers = answer_set(rng, equation.result, strategy.distractor_policy(), max_attempts);
    Question { question_id, mode, equation, answers }
}
