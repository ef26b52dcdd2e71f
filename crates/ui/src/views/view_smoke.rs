use quiz_core::model::{Badge, GradeProgress, GradeTier};
use services::{DashboardStats, GradeRow, ProgressReport, QuestionView, QuizResult};

use crate::pages;

#[test]
fn login_page_shows_form_and_error() {
    let html = pages::login_page(Some("Invalid credentials".into()));
    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("Invalid credentials"));
    assert!(html.contains("name=\"username\""));
    assert!(html.contains("name=\"password\""));
    assert!(html.contains("action=\"/login\""));
}

#[test]
fn signup_page_without_error_has_no_error_line() {
    let html = pages::signup_page(None);
    assert!(html.contains("action=\"/signup\""));
    assert!(!html.contains("class=\"error\""));
}

#[test]
fn dashboard_lists_badges_and_streak() {
    let stats = DashboardStats {
        username: "ada".into(),
        score: 40,
        streak: 3,
        badges: vec![Badge::for_grade(GradeTier::Grade6, 1)],
    };
    let html = pages::dashboard_page(&stats);
    assert!(html.contains("ada"));
    assert!(html.contains("40%"));
    assert!(html.contains("3 days"));
    assert!(html.contains("grade6 Badge #1"));
    assert!(html.contains("href=\"/logout\""));
}

#[test]
fn choose_page_offers_every_grade() {
    let html = pages::choose_grade_page(None);
    for grade in GradeTier::ALL {
        assert!(html.contains(&format!("value=\"{}\"", grade.as_str())));
    }
}

#[test]
fn quiz_page_shows_counter_and_prompt() {
    let view = QuestionView {
        number: 3,
        total: 50,
        prompt: "What is 2 + 2?".into(),
    };
    let html = pages::quiz_page(&view);
    assert!(html.contains("Question 3 of 50"));
    assert!(html.contains("What is 2 + 2?"));
    assert!(html.contains("name=\"answer\""));
}

#[test]
fn results_page_shows_score() {
    let html = pages::results_page(&QuizResult {
        grade: Some(GradeTier::Calculus),
        score: 7,
        total: 50,
    });
    assert!(html.contains("Score: 7 / 50"));
    assert!(html.contains("Grade: Calculus"));
}

#[test]
fn progress_page_renders_rows() {
    let report = ProgressReport {
        username: "ada".into(),
        rows: vec![GradeRow {
            grade: GradeTier::Grade2,
            counts: GradeProgress::new(9, 10),
            percent: 90,
        }],
        score: 90,
    };
    let html = pages::progress_page(&report);
    assert!(html.contains("<td>Grade 2</td>"));
    assert!(html.contains("<td>90%</td>"));
}

#[test]
fn faq_page_renders_markdown_headings() {
    let html = pages::faq_page(false);
    assert!(html.contains("What is NumberNinja?"));
    assert!(html.contains("<table>"));
    assert!(html.contains("href=\"/signup\""));
}
