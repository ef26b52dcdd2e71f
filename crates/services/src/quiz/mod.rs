mod service;
mod state;

// Public API of the quiz subsystem.
pub use crate::error::QuizError;
pub use service::{QuizResult, QuizService, SubmitOutcome};
pub use state::{QuestionView, QuizState, QuizStep};
