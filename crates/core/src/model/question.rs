use serde::{Deserialize, Serialize};
use std::fmt;

//
// ─── OPERATOR ─────────────────────────────────────────────────────────────────
//

/// Arithmetic operator a question can use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

impl Operator {
    #[must_use]
    pub fn symbol(self) -> char {
        match self {
            Operator::Add => '+',
            Operator::Sub => '-',
            Operator::Mul => '*',
            Operator::Div => '/',
            Operator::Pow => '^',
        }
    }

    /// Computes `a op b` and formats it the way the expected answer is stored.
    ///
    /// Integer results print as plain integers. Division is rounded to two
    /// decimals and always keeps at least one fractional digit (`5.0`, `1.5`, `3.33`).
    /// `b` must be positive for division.
    #[must_use]
    pub fn answer(self, a: i64, b: i64) -> String {
        match self {
            Operator::Add => (a + b).to_string(),
            Operator::Sub => (a - b).to_string(),
            Operator::Mul => (a * b).to_string(),
            Operator::Pow => {
                let exp = u32::try_from(b).unwrap_or(0);
                a.saturating_pow(exp).to_string()
            }
            Operator::Div => format_hundredths(round_div_hundredths(a, b)),
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// `a / b` in hundredths, rounding half to even on exact ties.
fn round_div_hundredths(a: i64, b: i64) -> i64 {
    let scaled = a * 100;
    let quotient = scaled.div_euclid(b);
    let remainder = scaled.rem_euclid(b);
    match (remainder * 2).cmp(&b) {
        std::cmp::Ordering::Greater => quotient + 1,
        std::cmp::Ordering::Less => quotient,
        std::cmp::Ordering::Equal => quotient + (quotient & 1),
    }
}

fn format_hundredths(hundredths: i64) -> String {
    let sign = if hundredths < 0 { "-" } else { "" };
    let abs = hundredths.unsigned_abs();
    let whole = abs / 100;
    let frac = abs % 100;
    if frac % 10 == 0 {
        format!("{sign}{whole}.{}", frac / 10)
    } else {
        format!("{sign}{whole}.{frac:02}")
    }
}

//
// ─── QUESTION ─────────────────────────────────────────────────────────────────
//

/// A generated arithmetic prompt with its expected answer.
///
/// Never persisted in the user store; it only lives in the quiz session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    prompt: String,
    answer: String,
}

impl Question {
    #[must_use]
    pub fn new(prompt: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            answer: answer.into(),
        }
    }

    /// Builds the question `What is {a} {op} {b}?` and computes its answer.
    #[must_use]
    pub fn arithmetic(a: i64, op: Operator, b: i64) -> Self {
        Self::new(format!("What is {a} {op} {b}?"), op.answer(a, b))
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    #[must_use]
    pub fn answer(&self) -> &str {
        &self.answer
    }

    /// Exact string comparison after trimming surrounding whitespace from the submission.
    #[must_use]
    pub fn is_correct(&self, submitted: &str) -> bool {
        submitted.trim() == self.answer
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
