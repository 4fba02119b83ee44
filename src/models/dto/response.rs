use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::domain::{AttemptRecord, Quiz, QuizSummary};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttemptResultDto {
    pub id: String,
    pub quiz_id: String,
    pub user_id: String,
    pub score: i32,
    pub total_questions: i32,
    pub percentage: f64,
    pub attempt_date: DateTime<Utc>,
}

impl From<AttemptRecord> for AttemptResultDto {
    fn from(record: AttemptRecord) -> Self {
        AttemptResultDto {
            percentage: record.percentage(),
            id: record.id,
            quiz_id: record.quiz_id,
            user_id: record.user_id,
            score: record.score,
            total_questions: record.total_questions,
            attempt_date: record.attempt_date,
        }
    }
}

/// Entry of the taker's quiz listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuizListItemDto {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub duration_minutes: i32,
    pub questions_count: usize,
    pub created_by: String,
    pub has_attempted: bool,
}

impl QuizListItemDto {
    pub fn new(summary: QuizSummary, has_attempted: bool) -> Self {
        QuizListItemDto {
            id: summary.quiz.id,
            title: summary.quiz.title,
            description: summary.quiz.description,
            duration_minutes: summary.quiz.duration_minutes,
            questions_count: summary.question_count,
            created_by: summary.quiz.created_by,
            has_attempted,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuizResultsDto {
    pub quiz_id: String,
    pub title: String,
    pub results: Vec<AttemptResultDto>,
}

impl QuizResultsDto {
    pub fn new(quiz: Quiz, records: Vec<AttemptRecord>) -> Self {
        QuizResultsDto {
            quiz_id: quiz.id,
            title: quiz.title,
            results: records.into_iter().map(AttemptResultDto::from).collect(),
        }
    }
}

/// Body for the non-error terminal signals (`already_attempted`, `not_attempted`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttemptStatusResponse {
    pub status: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result_url: Option<String>,
}

impl AttemptStatusResponse {
    pub fn already_attempted(result_url: String) -> Self {
        AttemptStatusResponse {
            status: "already_attempted",
            message: "You have already attempted this quiz.".to_string(),
            result_url: Some(result_url),
        }
    }

    pub fn not_attempted() -> Self {
        AttemptStatusResponse {
            status: "not_attempted",
            message: "You have not attempted this quiz yet.".to_string(),
            result_url: None,
        }
    }
}
