use std::sync::Arc;

use chrono::Utc;

use crate::{
    errors::{AppError, AppResult},
    models::{
        domain::{AttemptRecord, Quiz, QuizForDisplay, SubmittedAnswerSet},
        dto::response::{QuizListItemDto, QuizResultsDto},
    },
    repositories::{AttemptLedger, QuizCatalog, RecordOutcome},
    services::grading::{GradingService, UnknownQuestionPolicy},
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ViewOutcome {
    Available(QuizForDisplay),
    /// The caller should be sent to the stored result; questions are not returned.
    AlreadyAttempted,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The authoritative record for the pair. When a concurrent submission
    /// won the race this is the winner's record, not a fresh score.
    Recorded(AttemptRecord),
    AlreadyAttempted,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ResultOutcome {
    Attempted(AttemptRecord),
    NotAttempted,
}

/// The grading engine: gates viewing, scores submissions and records exactly
/// one outcome per (user, quiz).
pub struct AttemptService {
    catalog: Arc<dyn QuizCatalog>,
    ledger: Arc<dyn AttemptLedger>,
    unknown_question_policy: UnknownQuestionPolicy,
}

impl AttemptService {
    pub fn new(
        catalog: Arc<dyn QuizCatalog>,
        ledger: Arc<dyn AttemptLedger>,
        unknown_question_policy: UnknownQuestionPolicy,
    ) -> Self {
        Self {
            catalog,
            ledger,
            unknown_question_policy,
        }
    }

    pub async fn list_quizzes(&self, user_id: &str) -> AppResult<Vec<QuizListItemDto>> {
        let summaries = self.catalog.list_quizzes().await?;
        let attempted = self.ledger.attempted_quiz_ids(user_id).await?;

        Ok(summaries
            .into_iter()
            .map(|summary| {
                let has_attempted = attempted.contains(&summary.quiz.id);
                QuizListItemDto::new(summary, has_attempted)
            })
            .collect())
    }

    pub async fn view_quiz(&self, user_id: &str, quiz_id: &str) -> AppResult<ViewOutcome> {
        log::debug!("User '{}' viewing quiz '{}'", user_id, quiz_id);

        if self.ledger.has_attempted(user_id, quiz_id).await? {
            return Ok(ViewOutcome::AlreadyAttempted);
        }

        let quiz = self.require_quiz(quiz_id).await?;
        let questions = self.catalog.get_questions_for_display(quiz_id).await?;
        if questions.is_empty() {
            return Err(AppError::QuestionSetEmpty(quiz_id.to_string()));
        }

        Ok(ViewOutcome::Available(QuizForDisplay::new(quiz, questions)))
    }

    pub async fn submit_attempt(
        &self,
        user_id: &str,
        quiz_id: &str,
        answers: &SubmittedAnswerSet,
    ) -> AppResult<SubmitOutcome> {
        log::debug!(
            "User '{}' submitting {} answer(s) for quiz '{}'",
            user_id,
            answers.len(),
            quiz_id
        );

        if self.ledger.has_attempted(user_id, quiz_id).await? {
            log::warn!(
                "User '{}' resubmitted quiz '{}', keeping the stored result",
                user_id,
                quiz_id
            );
            return Ok(SubmitOutcome::AlreadyAttempted);
        }

        self.require_quiz(quiz_id).await?;
        let key = self.catalog.get_answer_key(quiz_id).await?;
        if key.is_empty() {
            return Err(AppError::QuestionSetEmpty(quiz_id.to_string()));
        }

        GradingService::enforce_policy(self.unknown_question_policy, &key, answers)?;
        let grade = GradingService::grade(&key, answers);

        let attempt = AttemptRecord::new(user_id, quiz_id, grade.score, grade.total, Utc::now());

        match self.ledger.record_attempt(attempt).await? {
            RecordOutcome::Recorded(record) => {
                log::info!(
                    "Recorded attempt '{}' for user '{}' on quiz '{}': {}/{}",
                    record.id,
                    user_id,
                    quiz_id,
                    record.score,
                    record.total_questions
                );
                Ok(SubmitOutcome::Recorded(record))
            }
            RecordOutcome::Conflict => {
                log::warn!(
                    "Concurrent submission for user '{}' on quiz '{}' was recorded first, discarding local score",
                    user_id,
                    quiz_id
                );
                let winner = self
                    .ledger
                    .get_attempt(user_id, quiz_id)
                    .await?
                    .ok_or_else(|| {
                        log::error!(
                            "Ledger reported a conflict for user '{}' on quiz '{}' but holds no record",
                            user_id,
                            quiz_id
                        );
                        AppError::InternalError("Attempt conflict without a stored record".to_string())
                    })?;
                Ok(SubmitOutcome::Recorded(winner))
            }
        }
    }

    pub async fn get_result(&self, user_id: &str, quiz_id: &str) -> AppResult<ResultOutcome> {
        Ok(match self.ledger.get_attempt(user_id, quiz_id).await? {
            Some(record) => ResultOutcome::Attempted(record),
            None => ResultOutcome::NotAttempted,
        })
    }

    /// Every stored outcome for a quiz, for its author.
    pub async fn quiz_results(&self, quiz_id: &str) -> AppResult<QuizResultsDto> {
        let quiz = self.require_quiz(quiz_id).await?;
        let records = self.ledger.list_for_quiz(quiz_id).await?;
        Ok(QuizResultsDto::new(quiz, records))
    }

    pub async fn readiness(&self) -> AppResult<()> {
        self.ledger.ping().await
    }

    async fn require_quiz(&self, quiz_id: &str) -> AppResult<Quiz> {
        self.catalog
            .find_quiz(quiz_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Quiz with id '{}' not found", quiz_id)))
    }
}
