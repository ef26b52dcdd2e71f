use anyhow::Context;
use axum::Router;
use axum::routing::{get, post};
use services::{AppServices, Clock};
use tokio::net::TcpListener;
use tokio::signal::ctrl_c;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::config::Config;
use crate::routes;
use crate::state::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(routes::dashboard))
        .route("/dashboard", get(routes::dashboard))
        .route("/signup", get(routes::signup_form).post(routes::signup))
        .route("/login", get(routes::login_form).post(routes::login))
        .route("/logout", get(routes::logout))
        .route(
            "/choose_quiz",
            get(routes::choose_quiz_form).post(routes::choose_quiz),
        )
        .route("/quiz", get(routes::quiz))
        .route("/submit", post(routes::submit))
        .route("/progress", get(routes::progress))
        .route("/faq", get(routes::faq))
        .route("/test-email", get(routes::test_email))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

/// Opens the store, binds the port and serves until Ctrl+C or SIGTERM.
///
/// # Errors
///
/// Fails if the store cannot be opened or the port cannot be bound.
pub async fn serve(config: Config) -> anyhow::Result<()> {
    info!("Initializing services...");
    let services = AppServices::build(&config.backend, Clock::default_clock(), config.mail)
        .await
        .context("failed to initialize services")?;
    let app = router(AppState::new(services, &config.secret_key));

    let address = format!("0.0.0.0:{}", config.port);
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("failed to bind {address}"))?;
    info!("Server running on http://{address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, shutting down"),
            Err(e) => {
                warn!(error = %e, "failed to install Ctrl+C handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                warn!(error = %e, "failed to install terminate handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}
