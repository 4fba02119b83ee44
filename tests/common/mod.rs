#![allow(dead_code)]

use std::{
    collections::{HashMap, HashSet},
    sync::Arc,
};

use async_trait::async_trait;
use chrono::Utc;
use secrecy::SecretString;
use tokio::sync::RwLock;

use examroom_server::{
    config::Config,
    errors::{AppError, AppResult},
    models::domain::{
        AnswerKey, AttemptRecord, DisplayQuestion, OptionLabel, Question, Quiz, QuizSummary,
    },
    repositories::{AttemptLedger, QuizCatalog, RecordOutcome},
    services::UnknownQuestionPolicy,
};

pub const TEST_JWT_SECRET: &str = "integration_test_secret_key_0123456789";

pub fn test_config(policy: UnknownQuestionPolicy) -> Config {
    Config {
        mongo_conn_string: "mongodb://localhost:27017".to_string(),
        mongo_db_name: "examroom-test".to_string(),
        web_server_host: "127.0.0.1".to_string(),
        web_server_port: 8080,
        jwt_secret: SecretString::from(TEST_JWT_SECRET.to_string()),
        jwt_expiration_hours: 1,
        unknown_question_policy: policy,
        app_env: "test".to_string(),
    }
}

pub struct InMemoryQuizCatalog {
    quizzes: Arc<RwLock<HashMap<String, Quiz>>>,
    questions: Arc<RwLock<Vec<Question>>>,
}

impl InMemoryQuizCatalog {
    pub fn new() -> Self {
        Self {
            quizzes: Arc::new(RwLock::new(HashMap::new())),
            questions: Arc::new(RwLock::new(Vec::new())),
        }
    }

    pub async fn insert_quiz(&self, quiz: Quiz) {
        self.quizzes.write().await.insert(quiz.id.clone(), quiz);
    }

    pub async fn insert_question(&self, question: Question) {
        self.questions.write().await.push(question);
    }

    /// Seeds `quiz_id` with questions q1..qN whose correct labels are `labels` in order.
    pub async fn seed_quiz(&self, quiz_id: &str, labels: &[OptionLabel]) -> Quiz {
        let mut quiz = Quiz::new("Ownership", Some("Moves and borrows"), 15, "author-1");
        quiz.id = quiz_id.to_string();
        self.insert_quiz(quiz.clone()).await;

        for (i, label) in labels.iter().enumerate() {
            self.insert_question(make_question(quiz_id, &format!("q{}", i + 1), *label, i as i32))
                .await;
        }

        quiz
    }

    async fn questions_for(&self, quiz_id: &str) -> Vec<Question> {
        let questions = self.questions.read().await;
        let mut items: Vec<_> = questions
            .iter()
            .filter(|q| q.quiz_id == quiz_id)
            .cloned()
            .collect();
        items.sort_by(|a, b| a.order.cmp(&b.order).then_with(|| a.id.cmp(&b.id)));
        items
    }
}

#[async_trait]
impl QuizCatalog for InMemoryQuizCatalog {
    async fn find_quiz(&self, quiz_id: &str) -> AppResult<Option<Quiz>> {
        Ok(self.quizzes.read().await.get(quiz_id).cloned())
    }

    async fn list_quizzes(&self) -> AppResult<Vec<QuizSummary>> {
        let quizzes = self.quizzes.read().await;
        let questions = self.questions.read().await;

        let mut items: Vec<_> = quizzes
            .values()
            .map(|quiz| QuizSummary {
                quiz: quiz.clone(),
                question_count: questions.iter().filter(|q| q.quiz_id == quiz.id).count(),
            })
            .collect();
        items.sort_by(|a, b| a.quiz.id.cmp(&b.quiz.id));
        Ok(items)
    }

    async fn get_questions_for_display(&self, quiz_id: &str) -> AppResult<Vec<DisplayQuestion>> {
        Ok(self
            .questions_for(quiz_id)
            .await
            .iter()
            .map(Question::to_display)
            .collect())
    }

    async fn get_answer_key(&self, quiz_id: &str) -> AppResult<AnswerKey> {
        Ok(Question::answer_key(&self.questions_for(quiz_id).await))
    }
}

/// Ledger keyed by (user_id, quiz_id). The check and the insert happen under
/// one write lock, which stands in for the unique index.
pub struct InMemoryAttemptLedger {
    attempts: Arc<RwLock<HashMap<(String, String), AttemptRecord>>>,
    unavailable: bool,
}

impl InMemoryAttemptLedger {
    pub fn new() -> Self {
        Self {
            attempts: Arc::new(RwLock::new(HashMap::new())),
            unavailable: false,
        }
    }

    /// A ledger whose every call fails like a lost database connection.
    pub fn unavailable() -> Self {
        Self {
            attempts: Arc::new(RwLock::new(HashMap::new())),
            unavailable: true,
        }
    }

    pub async fn len(&self) -> usize {
        self.attempts.read().await.len()
    }

    fn check_available(&self) -> AppResult<()> {
        if self.unavailable {
            return Err(AppError::DatabaseError("ledger unavailable".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl AttemptLedger for InMemoryAttemptLedger {
    async fn has_attempted(&self, user_id: &str, quiz_id: &str) -> AppResult<bool> {
        self.check_available()?;
        let attempts = self.attempts.read().await;
        Ok(attempts.contains_key(&(user_id.to_string(), quiz_id.to_string())))
    }

    async fn record_attempt(&self, attempt: AttemptRecord) -> AppResult<RecordOutcome> {
        self.check_available()?;
        // Let other submitters reach this point before anyone takes the lock.
        tokio::task::yield_now().await;

        let mut attempts = self.attempts.write().await;
        let key = (attempt.user_id.clone(), attempt.quiz_id.clone());
        if attempts.contains_key(&key) {
            return Ok(RecordOutcome::Conflict);
        }

        attempts.insert(key, attempt.clone());
        Ok(RecordOutcome::Recorded(attempt))
    }

    async fn get_attempt(&self, user_id: &str, quiz_id: &str) -> AppResult<Option<AttemptRecord>> {
        self.check_available()?;
        let attempts = self.attempts.read().await;
        Ok(attempts
            .get(&(user_id.to_string(), quiz_id.to_string()))
            .cloned())
    }

    async fn attempted_quiz_ids(&self, user_id: &str) -> AppResult<HashSet<String>> {
        self.check_available()?;
        let attempts = self.attempts.read().await;
        Ok(attempts
            .keys()
            .filter(|(u, _)| u == user_id)
            .map(|(_, q)| q.clone())
            .collect())
    }

    async fn list_for_quiz(&self, quiz_id: &str) -> AppResult<Vec<AttemptRecord>> {
        self.check_available()?;
        let attempts = self.attempts.read().await;
        let mut items: Vec<_> = attempts
            .values()
            .filter(|a| a.quiz_id == quiz_id)
            .cloned()
            .collect();
        items.sort_by(|a, b| b.attempt_date.cmp(&a.attempt_date));
        Ok(items)
    }

    async fn ping(&self) -> AppResult<()> {
        self.check_available()
    }
}

pub fn make_question(quiz_id: &str, id: &str, correct: OptionLabel, order: i32) -> Question {
    Question {
        id: id.to_string(),
        quiz_id: quiz_id.to_string(),
        question_text: format!("Question {}", id),
        option_a: "Box".to_string(),
        option_b: "Rc".to_string(),
        option_c: "Arc".to_string(),
        option_d: "Cell".to_string(),
        correct_option: correct,
        order,
    }
}

pub fn make_attempt(user_id: &str, quiz_id: &str, score: i32, total: i32) -> AttemptRecord {
    AttemptRecord::new(user_id, quiz_id, score, total, Utc::now())
}
