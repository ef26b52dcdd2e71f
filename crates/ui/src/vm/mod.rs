mod dashboard_vm;
mod markdown_vm;
mod progress_vm;
mod quiz_vm;

pub use dashboard_vm::{DashboardVm, map_dashboard};
pub use markdown_vm::{markdown_to_html, sanitize_html};
pub use progress_vm::{ProgressRowVm, ProgressVm, map_progress};
pub use quiz_vm::{GradeOptionVm, QuizResultVm, QuizVm, grade_options, map_question, map_result};

/// State for a page that posts a form back to itself.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FormVm {
    pub error: Option<String>,
}
