use rand::Rng;
use rand::seq::IndexedRandom;
use std::ops::RangeInclusive;

use crate::model::{Difficulty, GradeTier, Operator, Question};

/// Number of questions generated for one quiz.
pub const QUIZ_LENGTH: usize = 50;

//
// ─── TIER RULES ────────────────────────────────────────────────────────────────
//

/// Operand ranges and operator set a tier draws from.
///
/// # Examples
///
/// ```
/// # use quiz_core::generator::QuestionRules;
/// # use quiz_core::model::GradeTier;
/// let rules = QuestionRules::for_grade(GradeTier::Calculus);
/// assert_eq!(rules.left, 1..=10);
/// assert_eq!(rules.right, 1..=5);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionRules {
    pub left: RangeInclusive<i64>,
    pub right: RangeInclusive<i64>,
    pub operators: &'static [Operator],
}

const ADD_SUB: &[Operator] = &[Operator::Add, Operator::Sub];
const ADD_SUB_MUL: &[Operator] = &[Operator::Add, Operator::Sub, Operator::Mul];
const ALL_BASIC: &[Operator] = &[Operator::Add, Operator::Sub, Operator::Mul, Operator::Div];
const POWER: &[Operator] = &[Operator::Pow];

impl QuestionRules {
    #[must_use]
    pub fn for_grade(grade: GradeTier) -> Self {
        match grade.difficulty() {
            Difficulty::Basic => Self {
                left: 1..=10,
                right: 1..=10,
                operators: ADD_SUB,
            },
            Difficulty::Medium => Self {
                left: 1..=20,
                right: 1..=20,
                operators: ADD_SUB_MUL,
            },
            Difficulty::Division | Difficulty::Advanced => Self {
                left: 10..=50,
                right: 1..=10,
                operators: ALL_BASIC,
            },
            Difficulty::Power => Self {
                left: 1..=10,
                right: 1..=5,
                operators: POWER,
            },
        }
    }
}

//
// ─── GENERATION ────────────────────────────────────────────────────────────────
//

/// Draws one question for `grade`.
pub fn generate_question<R: Rng + ?Sized>(grade: GradeTier, rng: &mut R) -> Question {
    let rules = QuestionRules::for_grade(grade);
    let a = rng.random_range(rules.left.clone());
    let b = rng.random_range(rules.right.clone());
    let op = rules
        .operators
        .choose(rng)
        .copied()
        .unwrap_or(Operator::Add);
    Question::arithmetic(a, op, b)
}

/// Draws `count` independent questions for `grade`.
pub fn generate_batch<R: Rng + ?Sized>(grade: GradeTier, count: usize, rng: &mut R) -> Vec<Question> {
    (0..count).map(|_| generate_question(grade, rng)).collect()
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
