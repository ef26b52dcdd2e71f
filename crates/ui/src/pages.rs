//! Whole-document renderers used by the HTTP layer.

use dioxus::prelude::*;
use services::{DashboardStats, ProgressReport, QuestionView, QuizResult};

use crate::views::{
    ChooseGradeView, DashboardView, FAQ_MARKDOWN, FaqView, LoginView, ProgressView, QuizView,
    ResultsView, SignupView,
};
use crate::vm::{
    FormVm, grade_options, map_dashboard, map_progress, map_question, map_result, markdown_to_html,
};

fn document(element: Element) -> String {
    format!("<!DOCTYPE html>{}", dioxus_ssr::render_element(element))
}

#[must_use]
pub fn login_page(error: Option<String>) -> String {
    let page = FormVm { error };
    document(rsx! { LoginView { page } })
}

#[must_use]
pub fn signup_page(error: Option<String>) -> String {
    let page = FormVm { error };
    document(rsx! { SignupView { page } })
}

#[must_use]
pub fn dashboard_page(stats: &DashboardStats) -> String {
    let vm = map_dashboard(stats);
    document(rsx! { DashboardView { vm } })
}

#[must_use]
pub fn choose_grade_page(error: Option<String>) -> String {
    let page = FormVm { error };
    let options = grade_options();
    document(rsx! { ChooseGradeView { options, page } })
}

#[must_use]
pub fn quiz_page(question: &QuestionView) -> String {
    let vm = map_question(question);
    document(rsx! { QuizView { vm } })
}

#[must_use]
pub fn results_page(result: &QuizResult) -> String {
    let vm = map_result(result);
    document(rsx! { ResultsView { vm } })
}

#[must_use]
pub fn progress_page(report: &ProgressReport) -> String {
    let vm = map_progress(report);
    document(rsx! { ProgressView { vm } })
}

/// The FAQ is public; the nav bar still reflects whether someone is signed in.
#[must_use]
pub fn faq_page(signed_in: bool) -> String {
    let html = markdown_to_html(FAQ_MARKDOWN);
    document(rsx! { FaqView { html, signed_in } })
}
