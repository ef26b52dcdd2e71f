#![forbid(unsafe_code)]

pub mod app_services;
pub mod auth_service;
pub mod error;
pub mod notifications;
pub mod password;
pub mod progress_service;
pub mod quiz;

pub use quiz_core::Clock;

pub use app_services::{AppServices, StorageBackend};
pub use auth_service::AuthService;
pub use error::{AppServicesError, AuthError, NotifyError, ProgressError, QuizError};
pub use notifications::{AccountEvent, MailConfig, NotificationService};
pub use password::{PasswordCheck, Passwords};
pub use progress_service::{DashboardStats, GradeRow, ProgressReport, ProgressService};
pub use quiz::{QuestionView, QuizResult, QuizService, QuizState, QuizStep, SubmitOutcome};
