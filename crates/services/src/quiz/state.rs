use quiz_core::model::{GradeTier, Question};
use serde::{Deserialize, Serialize};

/// The question currently shown to the player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionView {
    /// 1-based position in the batch.
    pub number: usize,
    pub total: usize,
    pub prompt: String,
}

/// What the quiz page should show next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizStep {
    Question(QuestionView),
    Finished,
}

/// In-progress quiz, carried in the signed session between requests.
///
/// Steps through a fixed batch sequentially; the question last handed out by
/// [`QuizState::next_step`] is kept as the pending one that `/submit` checks against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizState {
    grade: GradeTier,
    questions: Vec<Question>,
    current: usize,
    score: u32,
    #[serde(default)]
    pending: Option<Question>,
}

impl QuizState {
    #[must_use]
    pub fn new(grade: GradeTier, questions: Vec<Question>) -> Self {
        Self {
            grade,
            questions,
            current: 0,
            score: 0,
            pending: None,
        }
    }

    #[must_use]
    pub fn grade(&self) -> GradeTier {
        self.grade
    }

    /// Number of questions in the batch.
    #[must_use]
    pub fn total(&self) -> usize {
        self.questions.len()
    }

    /// Index of the next unanswered question.
    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    /// Questions already answered (right or wrong).
    #[must_use]
    pub fn answered(&self) -> usize {
        self.current.min(self.questions.len())
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn pending(&self) -> Option<&Question> {
        self.pending.as_ref()
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.current >= self.questions.len()
    }

    /// Returns the next question and remembers it as pending, or `Finished`.
    pub fn next_step(&mut self) -> QuizStep {
        let Some(question) = self.questions.get(self.current) else {
            self.pending = None;
            return QuizStep::Finished;
        };
        self.pending = Some(question.clone());
        QuizStep::Question(QuestionView {
            number: self.current + 1,
            total: self.questions.len(),
            prompt: question.prompt().to_owned(),
        })
    }

    /// Checks `submitted` against the pending question and advances.
    ///
    /// Returns whether the answer matched. With nothing pending the index still advances.
    pub fn answer(&mut self, submitted: &str) -> bool {
        let correct = self
            .pending
            .take()
            .is_some_and(|question| question.is_correct(submitted));
        if correct {
            self.score = self.score.saturating_add(1);
        }
        self.current = self.current.saturating_add(1);
        correct
    }
}
