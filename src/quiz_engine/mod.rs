//! Core quiz engine: equation picking, distractors and answer sets.
//!
//! ## Module overview
//!
//! | Module        | Purpose |
//! |---------------|---------|
//! | `models`      | Shared types: modes, operators, digit filter, equations, answer sets |
//! | `distractors` | Bounded search for distinct wrong answers, with nearest-value fill |
//! | `helpers`     | Shuffle, answer-set assembly, operand selection, question IDs |
//! | `generator`   | Single entry point `generate_question()`, dispatches to modes |
//! | `modes`       | One [`modes::QuizStrategy`] per arithmetic mode |

pub mod distractors;
pub mod generator;
pub mod helpers;
pub mod models;
pub mod modes;

// Re-export the public API surface so callers can use
// `quiz_engine::generate_question` without reaching into sub-modules.
pub use distractors::DistractorPolicy;
pub use generator::{generate_question, generate_with};
pub use models::{
    AnswerSet, DigitFilter, Equation, Operator, Question, QuestionRequest, QuizMode,
};
