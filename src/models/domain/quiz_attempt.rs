use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The ledger entity: one graded outcome per (user, quiz) pair.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct AttemptRecord {
    pub id: String,
    pub user_id: String,
    pub quiz_id: String,
    pub score: i32,
    pub total_questions: i32,
    pub attempt_date: DateTime<Utc>,
}

impl AttemptRecord {
    pub fn new(
        user_id: &str,
        quiz_id: &str,
        score: i32,
        total_questions: i32,
        attempt_date: DateTime<Utc>,
    ) -> Self {
        AttemptRecord {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            quiz_id: quiz_id.to_string(),
            score,
            total_questions,
            attempt_date,
        }
    }

    /// Derived on every read, never stored.
    pub fn percentage(&self) -> f64 {
        percentage(self.score, self.total_questions)
    }
}

/// `score / total * 100` rounded to two decimals; 0 when there are no questions.
pub fn percentage(score: i32, total: i32) -> f64 {
    if total <= 0 {
        return 0.0;
    }
    let raw = f64::from(score) / f64::from(total) * 100.0;
    (raw * 100.0).round() / 100.0
}
