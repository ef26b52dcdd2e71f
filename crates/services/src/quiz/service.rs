use std::sync::Arc;

use quiz_core::generator::{QUIZ_LENGTH, generate_batch};
use quiz_core::model::{Badge, GradeTier, Username};
use rand::Rng;
use storage::repository::UserRepository;
use tracing::info;

use super::state::QuizState;
use crate::error::QuizError;

/// Result of answering the pending question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitOutcome {
    pub correct: bool,
    pub badge: Option<Badge>,
}

/// Final tally shown when a quiz ends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizResult {
    /// `None` when there was no quiz in the session.
    pub grade: Option<GradeTier>,
    pub score: u32,
    pub total: u32,
}

/// Orchestrates quiz start, answering, and folding results into the user store.
#[derive(Clone)]
pub struct QuizService {
    users: Arc<dyn UserRepository>,
    batch_size: usize,
}

impl QuizService {
    #[must_use]
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self {
            users,
            batch_size: QUIZ_LENGTH,
        }
    }

    #[must_use]
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    #[must_use]
    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Start a quiz for the grade named by the choose form.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Grade` for an unknown grade name.
    pub fn start(&self, grade: &str) -> Result<QuizState, QuizError> {
        self.start_with_rng(grade, &mut rand::rng())
    }

    /// Like [`QuizService::start`], drawing questions from `rng`.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Grade` for an unknown grade name.
    pub fn start_with_rng<R: Rng + ?Sized>(
        &self,
        grade: &str,
        rng: &mut R,
    ) -> Result<QuizState, QuizError> {
        let grade: GradeTier = grade.parse()?;
        let questions = generate_batch(grade, self.batch_size, rng);
        info!(%grade, questions = questions.len(), "quiz started");
        Ok(QuizState::new(grade, questions))
    }

    /// Check an answer against the pending question and advance.
    ///
    /// On a correct answer, a badge is awarded and persisted immediately when
    /// the cumulative correct count for the grade reaches a multiple of five.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::UnknownUser` if the player no longer exists, or
    /// `QuizError::Storage` if the badge cannot be saved.
    pub async fn submit(
        &self,
        username: &Username,
        state: &mut QuizState,
        answer: &str,
    ) -> Result<SubmitOutcome, QuizError> {
        let correct = state.answer(answer);
        if !correct {
            return Ok(SubmitOutcome {
                correct,
                badge: None,
            });
        }

        let mut user = self
            .users
            .get_user(username)
            .await?
            .ok_or(QuizError::UnknownUser)?;
        let badge = user
            .award_badge_if_due(state.grade(), state.score())
            .cloned();
        if let Some(badge) = &badge {
            self.users.upsert_user(&user).await?;
            info!(%username, badge = badge.label(), "badge awarded");
        }

        Ok(SubmitOutcome { correct, badge })
    }

    /// Fold the session's quiz into persisted progress.
    ///
    /// A missing quiz is treated as already finished: score 0 and no progress change.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::UnknownUser` if the player no longer exists, or
    /// `QuizError::Storage` if progress cannot be saved.
    pub async fn finish(
        &self,
        username: &Username,
        state: Option<QuizState>,
    ) -> Result<QuizResult, QuizError> {
        let Some(state) = state else {
            return Ok(QuizResult {
                grade: None,
                score: 0,
                total: 0,
            });
        };

        let attempts = u32::try_from(state.answered()).unwrap_or(u32::MAX);
        let mut user = self
            .users
            .get_user(username)
            .await?
            .ok_or(QuizError::UnknownUser)?;
        user.record_quiz(state.grade(), state.score(), attempts);
        self.users.upsert_user(&user).await?;

        info!(
            %username,
            grade = %state.grade(),
            score = state.score(),
            attempts,
            "quiz finished"
        );
        Ok(QuizResult {
            grade: Some(state.grade()),
            score: state.score(),
            total: attempts,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quiz::QuizStep;
    use quiz_core::model::{GradeProgress, User};
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use storage::repository::InMemoryRepository;

    async fn seeded_repo() -> (InMemoryRepository, Username) {
        let repo = InMemoryRepository::new();
        let name = Username::parse("ada").unwrap();
        repo.insert_user(&User::new(name.clone(), "hash".into()))
            .await
            .unwrap();
        (repo, name)
    }

    #[test]
    fn start_rejects_unknown_grade() {
        let service = QuizService::new(Arc::new(InMemoryRepository::new()));
        assert!(matches!(service.start("grade42"), Err(QuizError::Grade(_))));
    }

    #[test]
    fn start_generates_full_batch() {
        let service = QuizService::new(Arc::new(InMemoryRepository::new()));
        let state = service
            .start_with_rng("grade4", &mut StdRng::seed_from_u64(5))
            .unwrap();
        assert_eq!(state.total(), QUIZ_LENGTH);
        assert_eq!(state.grade(), GradeTier::Grade4);
        assert_eq!(state.score(), 0);
    }

    #[tokio::test]
    async fn badge_is_persisted_on_fifth_correct_answer() {
        let (repo, name) = seeded_repo().await;
        let service = QuizService::new(Arc::new(repo.clone())).with_batch_size(6);
        let mut state = service
            .start_with_rng("grade2", &mut StdRng::seed_from_u64(11))
            .unwrap();

        let mut badges = Vec::new();
        while let QuizStep::Question(_) = state.next_step() {
            let answer = state.pending().unwrap().answer().to_owned();
            let outcome = service.submit(&name, &mut state, &answer).await.unwrap();
            assert!(outcome.correct);
            badges.extend(outcome.badge);
        }

        assert_eq!(badges.len(), 1);
        assert_eq!(badges[0].label(), "grade2 Badge #1");
        let stored = repo.get_user(&name).await.unwrap().unwrap();
        assert_eq!(stored.badges().len(), 1);
    }

    #[tokio::test]
    async fn wrong_answers_do_not_touch_the_store() {
        let repo = InMemoryRepository::new();
        let service = QuizService::new(Arc::new(repo)).with_batch_size(2);
        let mut state = service.start("grade1").unwrap();
        let _ = state.next_step();

        // no user exists, but a wrong answer never loads one
        let ghost = Username::parse("ghost").unwrap();
        let outcome = service.submit(&ghost, &mut state, "not a number").await.unwrap();
        assert!(!outcome.correct);
        assert_eq!(state.current_index(), 1);
    }

    #[tokio::test]
    async fn finish_merges_into_progress() {
        let (repo, name) = seeded_repo().await;
        let service = QuizService::new(Arc::new(repo.clone())).with_batch_size(4);
        let mut state = service
            .start_with_rng("calculus", &mut StdRng::seed_from_u64(2))
            .unwrap();

        let mut index = 0;
        while let QuizStep::Question(_) = state.next_step() {
            let answer = if index % 2 == 0 {
                state.pending().unwrap().answer().to_owned()
            } else {
                "wrong".to_owned()
            };
            service.submit(&name, &mut state, &answer).await.unwrap();
            index += 1;
        }

        let result = service.finish(&name, Some(state)).await.unwrap();
        assert_eq!(result.score, 2);
        assert_eq!(result.total, 4);
        assert_eq!(result.grade, Some(GradeTier::Calculus));

        let stored = repo.get_user(&name).await.unwrap().unwrap();
        assert_eq!(stored.progress().get(GradeTier::Calculus), GradeProgress::new(2, 4));
    }

    #[tokio::test]
    async fn finish_without_quiz_is_a_zero_result() {
        let (repo, name) = seeded_repo().await;
        let service = QuizService::new(Arc::new(repo.clone()));

        let result = service.finish(&name, None).await.unwrap();
        assert_eq!(
            result,
            QuizResult {
                grade: None,
                score: 0,
                total: 0
            }
        );
        let stored = repo.get_user(&name).await.unwrap().unwrap();
        assert_eq!(stored.progress().totals(), GradeProgress::default());
    }
}
