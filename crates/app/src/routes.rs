//! Request handlers. Every page is server-rendered HTML; forms post back and redirect.

use axum::Form;
use axum::extract::State;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum_extra::extract::SignedCookieJar;
use quiz_core::model::Username;
use serde::Deserialize;
use services::{AccountEvent, QuizError, QuizStep};
use tracing::{debug, info};

use crate::error::AppError;
use crate::session::SessionData;
use crate::state::AppState;

type HandlerResult = Result<Response, AppError>;

#[derive(Debug, Deserialize)]
pub struct CredentialsForm {
    #[serde(default)]
    username: String,
    #[serde(default)]
    password: String,
}

#[derive(Debug, Deserialize)]
pub struct GradeForm {
    #[serde(default)]
    grade: String,
}

#[derive(Debug, Deserialize)]
pub struct AnswerForm {
    #[serde(default)]
    answer: String,
}

/// Resolves the session user, or `None` if nobody is signed in or the account is gone.
async fn signed_in(state: &AppState, session: &SessionData) -> Result<Option<Username>, AppError> {
    let Some(name) = session.username.as_deref() else {
        return Ok(None);
    };
    let user = state.services.auth().current_user(name).await?;
    if user.is_none() {
        debug!(username = name, "session refers to a missing user");
    }
    Ok(user.map(|user| user.username().clone()))
}

fn to_login() -> Response {
    Redirect::to("/login").into_response()
}

fn notify(state: &AppState, event: AccountEvent) {
    let notifications = state.services.notifications();
    tokio::spawn(async move {
        notifications.account_event(event).await;
    });
}

// ─── ACCOUNTS ───

pub async fn signup_form(jar: SignedCookieJar) -> Response {
    (SessionData::clear(jar), Html(ui::pages::signup_page(None))).into_response()
}

pub async fn signup(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    Form(form): Form<CredentialsForm>,
) -> HandlerResult {
    match state.services.auth().signup(&form.username, &form.password).await {
        Ok(user) => {
            let session = SessionData::signed_in(user.username().as_str());
            notify(&state, AccountEvent::SignedUp(user.username().clone()));
            Ok((session.store(jar), Redirect::to("/dashboard")).into_response())
        }
        Err(e) => match e.user_message() {
            Some(message) => Ok(Html(ui::pages::signup_page(Some(message))).into_response()),
            None => Err(e.into()),
        },
    }
}

pub async fn login_form() -> Html<String> {
    Html(ui::pages::login_page(None))
}

pub async fn login(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    Form(form): Form<CredentialsForm>,
) -> HandlerResult {
    match state.services.auth().login(&form.username, &form.password).await {
        Ok(user) => {
            let session = SessionData::signed_in(user.username().as_str());
            notify(&state, AccountEvent::LoggedIn(user.username().clone()));
            Ok((session.store(jar), Redirect::to("/dashboard")).into_response())
        }
        Err(e) => match e.user_message() {
            Some(message) => Ok(Html(ui::pages::login_page(Some(message))).into_response()),
            None => Err(e.into()),
        },
    }
}

pub async fn logout(jar: SignedCookieJar) -> Response {
    (SessionData::clear(jar), Redirect::to("/login")).into_response()
}

// ─── PAGES ───

pub async fn dashboard(State(state): State<AppState>, jar: SignedCookieJar) -> HandlerResult {
    let session = SessionData::from_jar(&jar);
    let Some(username) = signed_in(&state, &session).await? else {
        return Ok(to_login());
    };
    let stats = state.services.progress().dashboard(&username).await?;
    Ok(Html(ui::pages::dashboard_page(&stats)).into_response())
}

pub async fn progress(State(state): State<AppState>, jar: SignedCookieJar) -> HandlerResult {
    let session = SessionData::from_jar(&jar);
    let Some(username) = signed_in(&state, &session).await? else {
        return Ok(to_login());
    };
    let report = state.services.progress().report(&username).await?;
    Ok(Html(ui::pages::progress_page(&report)).into_response())
}

pub async fn faq(jar: SignedCookieJar) -> Html<String> {
    let session = SessionData::from_jar(&jar);
    Html(ui::pages::faq_page(session.username.is_some()))
}

pub async fn test_email(State(state): State<AppState>, jar: SignedCookieJar) -> HandlerResult {
    let session = SessionData::from_jar(&jar);
    if signed_in(&state, &session).await?.is_none() {
        return Ok(to_login());
    }
    let text = match state.services.notifications().send_test().await {
        Ok(()) => "Test email sent successfully!".to_owned(),
        Err(e) => format!("Failed to send email: {e}"),
    };
    Ok(text.into_response())
}

// ─── QUIZ ───

pub async fn choose_quiz_form(State(state): State<AppState>, jar: SignedCookieJar) -> HandlerResult {
    let session = SessionData::from_jar(&jar);
    if signed_in(&state, &session).await?.is_none() {
        return Ok(to_login());
    }
    Ok(Html(ui::pages::choose_grade_page(None)).into_response())
}

pub async fn choose_quiz(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    Form(form): Form<GradeForm>,
) -> HandlerResult {
    let mut session = SessionData::from_jar(&jar);
    let Some(username) = signed_in(&state, &session).await? else {
        return Ok(to_login());
    };
    match state.services.quiz().start(&form.grade) {
        Ok(quiz) => {
            info!(%username, grade = %quiz.grade(), "quiz chosen");
            session.quiz = Some(quiz);
            Ok((session.store(jar), Redirect::to("/quiz")).into_response())
        }
        Err(QuizError::Grade(e)) => {
            Ok(Html(ui::pages::choose_grade_page(Some(e.to_string()))).into_response())
        }
        Err(e) => Err(e.into()),
    }
}

pub async fn quiz(State(state): State<AppState>, jar: SignedCookieJar) -> HandlerResult {
    let mut session = SessionData::from_jar(&jar);
    let Some(username) = signed_in(&state, &session).await? else {
        return Ok(to_login());
    };
    let quizzes = state.services.quiz();

    let Some(mut quiz) = session.quiz.take() else {
        let result = quizzes.finish(&username, None).await?;
        return Ok(Html(ui::pages::results_page(&result)).into_response());
    };
    match quiz.next_step() {
        QuizStep::Question(view) => {
            session.quiz = Some(quiz);
            Ok((session.store(jar), Html(ui::pages::quiz_page(&view))).into_response())
        }
        QuizStep::Finished => {
            let result = quizzes.finish(&username, Some(quiz)).await?;
            Ok((session.store(jar), Html(ui::pages::results_page(&result))).into_response())
        }
    }
}

pub async fn submit(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    Form(form): Form<AnswerForm>,
) -> HandlerResult {
    let mut session = SessionData::from_jar(&jar);
    let Some(username) = signed_in(&state, &session).await? else {
        return Ok(to_login());
    };
    let Some(quiz) = session.quiz.as_mut() else {
        return Ok(Redirect::to("/quiz").into_response());
    };
    let outcome = state
        .services
        .quiz()
        .submit(&username, quiz, &form.answer)
        .await?;
    debug!(%username, correct = outcome.correct, "answer checked");
    Ok((session.store(jar), Redirect::to("/quiz")).into_response())
}
