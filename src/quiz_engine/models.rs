use std::fmt;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Modes and operators
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QuizMode {
    Addition,
    Subtraction,
    Multiplication,
    Division,
    SquareRoot,
    Pattern,
}

impl QuizMode {
    pub const ALL: [QuizMode; 6] = [
        QuizMode::Addition,
        QuizMode::Subtraction,
        QuizMode::Multiplication,
        QuizMode::Division,
        QuizMode::SquareRoot,
        QuizMode::Pattern,
    ];

    pub fn operator(self) -> Operator {
        match self {
            QuizMode::Addition       => Operator::Add,
            QuizMode::Subtraction    => Operator::Sub,
            QuizMode::Multiplication => Operator::Mul,
            QuizMode::Division       => Operator::Div,
            QuizMode::SquareRoot     => Operator::Sqrt,
            QuizMode::Pattern        => Operator::Pattern,
        }
    }

    /// Two-letter prefix used in question IDs.
    pub fn id_prefix(self) -> &'static str {
        match self {
            QuizMode::Addition       => "AD",
            QuizMode::Subtraction    => "SU",
            QuizMode::Multiplication => "MU",
            QuizMode::Division       => "DI",
            QuizMode::SquareRoot     => "SR",
            QuizMode::Pattern        => "PA",
        }
    }

    /// Whether the digit filter and easy mode influence operand selection.
    pub fn uses_digit_filter(self) -> bool {
        matches!(self, QuizMode::Addition | QuizMode::Subtraction | QuizMode::Multiplication)
    }
}

impl fmt::Display for QuizMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            QuizMode::Addition       => "Addition",
            QuizMode::Subtraction    => "Subtraction",
            QuizMode::Multiplication => "Multiplication",
            QuizMode::Division       => "Division",
            QuizMode::SquareRoot     => "Square Root",
            QuizMode::Pattern        => "Pattern",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operator {
    Add,
    Sub,
    Mul,
    Div,
    Sqrt,
    Pattern,
}

impl Operator {
    pub fn symbol(self) -> &'static str {
        match self {
            Operator::Add     => "+",
            Operator::Sub     => "-",
            Operator::Mul     => "x",
            Operator::Div     => "÷",
            Operator::Sqrt    => "√",
            Operator::Pattern => ",",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

// ---------------------------------------------------------------------------
// Digit filter
// ---------------------------------------------------------------------------

/// The set of "tables" (0..=9) eligible as the primary operand.
///
/// Never empty: any operation that would leave it empty, or that selects
/// every digit one by one, reverts to the full set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DigitFilter {
    mask: u16,
}

impl DigitFilter {
    const FULL: u16 = 0b11_1111_1111;

    pub fn all() -> Self {
        DigitFilter { mask: Self::FULL }
    }

    /// Build from a list of digits. Values above 9 are ignored; an empty
    /// result falls back to the full set.
    pub fn from_digits(digits: &[u32]) -> Self {
        let mask = digits
            .iter()
            .filter(|&&d| d <= 9)
            .fold(0u16, |m, &d| m | (1 << d));
        DigitFilter { mask }.normalized()
    }

    pub fn contains(&self, digit: u32) -> bool {
        digit <= 9 && self.mask & (1 << digit) != 0
    }

    pub fn is_all(&self) -> bool {
        self.mask == Self::FULL
    }

    pub fn len(&self) -> usize {
        self.mask.count_ones() as usize
    }

    pub fn digits(&self) -> Vec<u32> {
        (0..=9).filter(|&d| self.contains(d)).collect()
    }

    pub fn select_all(&mut self) {
        self.mask = Self::FULL;
    }

    /// Toggle one table. Starting from the full set, the first toggle
    /// narrows the filter to just that digit.
    pub fn toggle(&mut self, digit: u32) {
        if digit > 9 {
            return;
        }
        if self.is_all() {
            self.mask = 0;
        }
        self.mask ^= 1 << digit;
        *self = self.normalized();
    }

    fn normalized(self) -> Self {
        if self.mask == 0 || self.mask == Self::FULL {
            DigitFilter::all()
        } else {
            self
        }
    }
}

impl Default for DigitFilter {
    fn default() -> Self {
        DigitFilter::all()
    }
}

impl fmt::Display for DigitFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_all() {
            return write!(f, "ALL");
        }
        let list = self.digits().iter().map(|d| d.to_string()).collect::<Vec<_>>().join(",");
        write!(f, "{}", list)
    }
}

// ---------------------------------------------------------------------------
// Equation / answers
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Equation {
    pub operand_a: u32,
    pub operand_b: u32,
    pub operator: Operator,
    pub result: u32,
}

impl Equation {
    /// Number of terms in a pattern sequence, including the hidden one.
    pub const PATTERN_LENGTH: u32 = 4;

    /// Terms shown before the `?` of a pattern question.
    pub fn pattern_terms(&self) -> Vec<u32> {
        if self.operator != Operator::Pattern {
            return Vec::new();
        }
        (0..Self::PATTERN_LENGTH - 1)
            .map(|i| self.operand_a + self.operand_b * i)
            .collect()
    }

    /// Whether the equation is still valid under a (possibly changed)
    /// filter and easy-mode setting. Only filter-driven operators can fail.
    ///
    /// The table is `operand_a`. Subtraction may have swapped its operands
    /// to stay non-negative, so there the table can sit on either side.
    pub fn fits(&self, filter: &DigitFilter, easy_mode: bool) -> bool {
        let in_table = match self.operator {
            Operator::Add | Operator::Mul => filter.contains(self.operand_a),
            Operator::Sub => filter.contains(self.operand_a) || filter.contains(self.operand_b),
            _ => return true,
        };
        if !in_table {
            return false;
        }
        if easy_mode {
            let (a, b) = (self.operand_a, self.operand_b);
            if filter.is_all() {
                return a <= 5 && b <= 5;
            }
            return a <= 5 || b <= 5;
        }
        true
    }

    /// Text rendering for terminals and logs, e.g. `7 x 8 = ?`.
    pub fn prompt(&self) -> String {
        match self.operator {
            Operator::Sqrt => format!("√{} = ?", self.operand_a),
            Operator::Pattern => {
                let mut terms: Vec<String> =
                    self.pattern_terms().iter().map(|t| t.to_string()).collect();
                terms.push("?".to_string());
                terms.join(", ")
            }
            op => format!("{} {} {} = ?", self.operand_a, op, self.operand_b),
        }
    }
}

impl fmt::Display for Equation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.operator {
            Operator::Sqrt => write!(f, "√{} = {}", self.operand_a, self.result),
            Operator::Pattern => {
                let terms: Vec<String> =
                    self.pattern_terms().iter().map(|t| t.to_string()).collect();
                write!(f, "{}, {}", terms.join(", "), self.result)
            }
            op => write!(f, "{} {} {} = {}", self.operand_a, op, self.operand_b, self.result),
        }
    }
}

/// The multiple-choice options for one equation, in presentation order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerSet {
    pub options: Vec<u32>,
    pub correct: u32,
}

impl AnswerSet {
    pub fn correct_index(&self) -> Option<usize> {
        self.options.iter().position(|&v| v == self.correct)
    }

    pub fn is_correct(&self, value: u32) -> bool {
        value == self.correct
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Request / response
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionRequest {
    pub mode: QuizMode,
    pub filter: DigitFilter,
    pub easy_mode: bool,
    pub rng_seed: Option<u64>,
    pub max_attempts: u32,
}

impl QuestionRequest {
    /// Full filter, easy mode off, entropy seed, default attempt bound.
    pub fn new(mode: QuizMode) -> Self {
        QuestionRequest {
            mode,
            filter: DigitFilter::all(),
            easy_mode: false,
            rng_seed: None,
            max_attempts: crate::quiz_engine::distractors::MAX_ATTEMPTS,
        }
    }

    pub fn seeded(mut self, seed: u64) -> Self {
        self.rng_seed = Some(seed);
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    pub question_id: String,
    pub mode: QuizMode,
    pub equation: Equation,
    pub answers: AnswerSet,
}
