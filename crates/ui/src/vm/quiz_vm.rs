use quiz_core::model::GradeTier;
use services::{QuestionView, QuizResult};

/// One choice in the grade picker.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GradeOptionVm {
    pub value: &'static str,
    pub label: &'static str,
}

#[must_use]
pub fn grade_options() -> Vec<GradeOptionVm> {
    GradeTier::ALL
        .into_iter()
        .map(|grade| GradeOptionVm {
            value: grade.as_str(),
            label: grade.label(),
        })
        .collect()
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuizVm {
    pub prompt: String,
    pub number: usize,
    pub total: usize,
}

#[must_use]
pub fn map_question(view: &QuestionView) -> QuizVm {
    QuizVm {
        prompt: view.prompt.clone(),
        number: view.number,
        total: view.total,
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuizResultVm {
    pub score: u32,
    pub total: u32,
    pub grade_label: Option<&'static str>,
}

#[must_use]
pub fn map_result(result: &QuizResult) -> QuizResultVm {
    QuizResultVm {
        score: result.score,
        total: result.total,
        grade_label: result.grade.map(GradeTier::label),
    }
}
