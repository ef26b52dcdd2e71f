mod auth;
mod dashboard;
mod faq;
mod layout;
mod progress;
mod quiz;

pub use auth::{LoginView, SignupView};
pub use dashboard::DashboardView;
pub use faq::{FAQ_MARKDOWN, FaqView};
pub use layout::Layout;
pub use progress::ProgressView;
pub use quiz::{ChooseGradeView, QuizView, ResultsView};

#[cfg(test)]
mod view_smoke;
