use std::sync::Arc;

use app::session::{SESSION_COOKIE, SessionData, signing_key};
use app::{AppState, router};
use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode, header};
use axum::response::Response;
use axum_extra::extract::SignedCookieJar;
use http_body_util::BodyExt;
use quiz_core::generator::QUIZ_LENGTH;
use quiz_core::time::fixed_clock;
use services::{AppServices, AuthService, NotificationService, Passwords, QuizService};
use storage::repository::Storage;
use tower::ServiceExt;

const SECRET: &str = "test-secret";
const BATCH: usize = 3;

/// `batch` of `None` keeps the production quiz length.
fn app(batch: Option<usize>) -> Router {
    let storage = Storage::in_memory();
    let quiz = QuizService::new(Arc::clone(&storage.users));
    let quiz = match batch {
        Some(size) => quiz.with_batch_size(size),
        None => quiz,
    };
    let services = AppServices::from_storage(&storage, fixed_clock(), NotificationService::disabled())
        .with_auth(
            AuthService::new(fixed_clock(), Arc::clone(&storage.users))
                .with_passwords(Passwords::low_cost()),
        )
        .with_quiz(quiz);
    router(AppState::new(services, SECRET))
}

/// Minimal cookie-keeping client.
struct Client {
    app: Router,
    cookie: Option<String>,
}

impl Client {
    fn new() -> Self {
        Self::with_app(app(Some(BATCH)))
    }

    fn with_app(app: Router) -> Self {
        Self { app, cookie: None }
    }

    async fn get(&mut self, uri: &str) -> Response {
        let request = self.request("GET", uri).body(Body::empty()).unwrap();
        self.send(request).await
    }

    async fn post(&mut self, uri: &str, form: &str) -> Response {
        let request = self
            .request("POST", uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(form.to_owned()))
            .unwrap();
        self.send(request).await
    }

    fn request(&self, method: &str, uri: &str) -> axum::http::request::Builder {
        let builder = Request::builder().method(method).uri(uri);
        match &self.cookie {
            Some(cookie) => builder.header(header::COOKIE, cookie),
            None => builder,
        }
    }

    async fn send(&mut self, request: Request<Body>) -> Response {
        let response = self.app.clone().oneshot(request).await.unwrap();
        for value in response.headers().get_all(header::SET_COOKIE) {
            let pair = value.to_str().unwrap().split(';').next().unwrap().trim();
            if let Some(rest) = pair.strip_prefix(&format!("{SESSION_COOKIE}=")) {
                self.cookie = (!rest.is_empty()).then(|| pair.to_owned());
            }
        }
        response
    }

    fn session(&self) -> SessionData {
        let mut headers = HeaderMap::new();
        if let Some(cookie) = &self.cookie {
            headers.insert(header::COOKIE, cookie.parse().unwrap());
        }
        SessionData::from_jar(&SignedCookieJar::from_headers(&headers, signing_key(SECRET)))
    }
}

async fn body_text(response: Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn location(response: &Response) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .unwrap()
        .to_str()
        .unwrap()
}

#[tokio::test]
async fn protected_pages_redirect_to_login() {
    let mut client = Client::new();
    for uri in ["/", "/dashboard", "/choose_quiz", "/quiz", "/progress", "/test-email"] {
        let response = client.get(uri).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER, "{uri}");
        assert_eq!(location(&response), "/login");
    }
}

#[tokio::test]
async fn signup_logs_in_and_shows_dashboard() {
    let mut client = Client::new();
    let response = client.post("/signup", "username=Ninja&password=pw").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/dashboard");
    assert_eq!(client.session().username.as_deref(), Some("ninja"));

    let response = client.get("/dashboard").await;
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("Welcome back, ninja!"));
    assert!(html.contains("0%"));
}

#[tokio::test]
async fn duplicate_signup_shows_error() {
    let mut client = Client::new();
    client.post("/signup", "username=ninja&password=pw").await;
    client.get("/logout").await;

    let response = client.post("/signup", "username=NINJA&password=other").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("Username already exists"));
    assert_eq!(client.session().username, None);
}

#[tokio::test]
async fn empty_credentials_show_error() {
    let mut client = Client::new();
    let response = client.post("/signup", "username=&password=pw").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("class=\"error\""));
}

#[tokio::test]
async fn login_checks_password_and_starts_streak() {
    let mut client = Client::new();
    client.post("/signup", "username=ninja&password=pw").await;
    client.get("/logout").await;
    assert!(client.cookie.is_none());

    let response = client.post("/login", "username=ninja&password=nope").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("Invalid credentials"));

    let response = client.post("/login", "username=ninja&password=pw").await;
    assert_eq!(location(&response), "/dashboard");
    let html = body_text(client.get("/dashboard").await).await;
    assert!(html.contains("1 day"));
}

#[tokio::test]
async fn visiting_signup_signs_out() {
    let mut client = Client::new();
    client.post("/signup", "username=ninja&password=pw").await;
    client.get("/signup").await;
    assert_eq!(client.session().username, None);
    let response = client.get("/dashboard").await;
    assert_eq!(location(&response), "/login");
}

#[tokio::test]
async fn login_as_another_user_drops_running_quiz() {
    let mut client = Client::new();
    client.post("/signup", "username=other&password=pw").await;
    client.post("/signup", "username=ninja&password=pw").await;
    client.post("/choose_quiz", "grade=grade2").await;
    client.get("/quiz").await;
    assert!(client.session().quiz.is_some());

    let response = client.post("/login", "username=other&password=pw").await;
    assert_eq!(location(&response), "/dashboard");
    let session = client.session();
    assert_eq!(session.username.as_deref(), Some("other"));
    assert!(session.quiz.is_none());

    // a fresh signup starts clean as well
    client.post("/choose_quiz", "grade=grade3").await;
    assert!(client.session().quiz.is_some());
    client.post("/signup", "username=third&password=pw").await;
    assert!(client.session().quiz.is_none());
}

#[tokio::test]
async fn visiting_signup_drops_running_quiz() {
    let mut client = Client::new();
    client.post("/signup", "username=ninja&password=pw").await;
    client.post("/choose_quiz", "grade=grade2").await;
    client.get("/signup").await;
    assert_eq!(client.session(), SessionData::default());
}

#[tokio::test]
async fn tampered_cookie_is_an_empty_session() {
    let mut client = Client::new();
    client.post("/signup", "username=ninja&password=pw").await;
    let cookie = client.cookie.clone().unwrap();
    client.cookie = Some(format!("{cookie}x"));

    let response = client.get("/dashboard").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login");
}

#[tokio::test]
async fn unknown_grade_is_reported_on_choose_page() {
    let mut client = Client::new();
    client.post("/signup", "username=ninja&password=pw").await;
    let response = client.post("/choose_quiz", "grade=grade42").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("unknown grade tier: grade42"));
    assert!(client.session().quiz.is_none());
}

#[tokio::test]
async fn full_quiz_updates_progress_and_clears_quiz() {
    let mut client = Client::new();
    client.post("/signup", "username=ninja&password=pw").await;

    let response = client.post("/choose_quiz", "grade=grade2").await;
    assert_eq!(location(&response), "/quiz");

    for number in 1..=BATCH {
        let html = body_text(client.get("/quiz").await).await;
        assert!(html.contains(&format!("Question {number} of {BATCH}")));
        let session = client.session();
        let pending = session.quiz.as_ref().and_then(|quiz| quiz.pending()).unwrap();
        // first answer right, the rest wrong
        let answer = if number == 1 { pending.answer().to_owned() } else { "nope".into() };
        let response = client.post("/submit", &format!("answer={answer}")).await;
        assert_eq!(location(&response), "/quiz");
    }

    let html = body_text(client.get("/quiz").await).await;
    assert!(html.contains(&format!("Score: 1 / {BATCH}")));
    assert!(html.contains("Grade: Grade 2"));
    let session = client.session();
    assert!(session.quiz.is_none());
    assert_eq!(session.username.as_deref(), Some("ninja"));

    let html = body_text(client.get("/progress").await).await;
    assert!(html.contains("<td>Grade 2</td>"));
    assert!(html.contains("<td>33%</td>"));

    // without a running quiz the results page shows an empty score
    let html = body_text(client.get("/quiz").await).await;
    assert!(html.contains("Score: 0 / 0"));
}

#[tokio::test]
async fn default_length_quiz_runs_to_completion() {
    let mut client = Client::with_app(app(None));
    client.post("/signup", "username=ninja&password=pw").await;
    client.post("/choose_quiz", "grade=grade2").await;

    for number in 1..=QUIZ_LENGTH {
        let html = body_text(client.get("/quiz").await).await;
        assert!(
            html.contains(&format!("Question {number} of {QUIZ_LENGTH}")),
            "question {number}"
        );
        let session = client.session();
        let answer = session
            .quiz
            .as_ref()
            .and_then(|quiz| quiz.pending())
            .unwrap()
            .answer()
            .to_owned();
        let response = client.post("/submit", &format!("answer={answer}")).await;
        assert_eq!(location(&response), "/quiz");
    }

    let html = body_text(client.get("/quiz").await).await;
    assert!(html.contains(&format!("Score: {QUIZ_LENGTH} / {QUIZ_LENGTH}")));
    let session = client.session();
    assert!(session.quiz.is_none());
    assert_eq!(session.username.as_deref(), Some("ninja"));

    let html = body_text(client.get("/progress").await).await;
    assert!(html.contains("<td>100%</td>"));
}

#[tokio::test]
async fn faq_is_public() {
    let mut client = Client::new();
    let response = client.get("/faq").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("What is NumberNinja?"));
}

#[tokio::test]
async fn test_email_reports_disabled_mail() {
    let mut client = Client::new();
    client.post("/signup", "username=ninja&password=pw").await;
    let response = client.get("/test-email").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_text(response).await,
        "Failed to send email: email is not configured"
    );
}
