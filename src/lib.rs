//! # brain_digits
//!
//! Arithmetic drills for young learners: addition, subtraction,
//! multiplication, division, square roots and number patterns, each posed
//! as an equation with four multiple-choice answers. A timed multiplication
//! challenge and a local top-10 leaderboard sit on top.
//!
//! ## How it works
//!
//! 1. Create a [`QuestionRequest`] with a mode and, optionally, a digit
//!    filter, easy mode and an RNG seed.
//! 2. Call [`generate_question`]. The mode's strategy picks an equation,
//!    three distinct distractors are drawn around or near the answer, and
//!    the four options are shuffled.
//! 3. The returned [`Question`] holds the equation and the answer set,
//!    ready for any front end to draw.
//!
//! For a running game use [`PracticeSession`] (one mode, answer checking,
//! delayed reveal) or [`ChallengeSequencer`] (100 shuffled times-table
//! facts against the clock). Persistence goes through [`KeyValueStore`].
//!
//! ## Quick start
//!
//! ```rust
//! use brain_digits::{generate_question, DigitFilter, QuestionRequest, QuizMode};
//!
//! // Minimal: only the mode is required.
//! let q = generate_question(QuestionRequest::new(QuizMode::Multiplication));
//! println!("{}  options: {:?}", q.equation.prompt(), q.answers.options);
//!
//! // Deterministic, restricted to the 7 and 8 tables, easy mode on.
//! let q = generate_question(QuestionRequest {
//!     filter: DigitFilter::from_digits(&[7, 8]),
//!     easy_mode: true,
//!     ..QuestionRequest::new(QuizMode::Addition).seeded(42)
//! });
//! assert_eq!(q.answers.options.len(), 4);
//! assert!(q.answers.options.contains(&q.equation.result));
//! ```

pub mod app;
pub mod challenge;
pub mod error;
pub mod leaderboard;
pub mod quiz_engine;
pub mod session;
pub mod settings;
pub mod store;
pub mod tutorial;

// Convenience re-exports so callers can use `brain_digits::generate_question`
// directly without reaching into `quiz_engine::`.
pub use app::{AppContext, MusicState, Scene};
pub use challenge::{ChallengeFeedback, ChallengeSequencer, ChallengeState, EndReason};
pub use error::{Error, NameError, Result};
pub use leaderboard::{Leaderboard, LeaderboardEntry};
pub use quiz_engine::{
    generate_question, AnswerSet, DigitFilter, DistractorPolicy, Equation, Operator, Question,
    QuestionRequest, QuizMode,
};
pub use session::{AnswerFeedback, PracticeSession};
pub use settings::Settings;
pub use store::{JsonFileStore, KeyValueStore, MemoryStore};
pub use tutorial::{Speaker, Tutorial, TutorialStep};
