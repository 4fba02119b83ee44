use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::domain::quiz_question::DisplayQuestion;

/// A quiz as owned by the catalog. Immutable once questions exist.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Quiz {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub duration_minutes: i32, // time-box, enforced by the client
    pub created_by: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Quiz {
    pub fn new(title: &str, description: Option<&str>, duration_minutes: i32, created_by: &str) -> Self {
        Quiz {
            id: Uuid::new_v4().to_string(),
            title: title.to_string(),
            description: description.map(str::to_string),
            duration_minutes,
            created_by: created_by.to_string(),
            created_at: Some(Utc::now()),
        }
    }
}

/// Catalog listing entry: quiz metadata plus its question count.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct QuizSummary {
    pub quiz: Quiz,
    pub question_count: usize,
}

/// What a taker sees before submitting. Built only from `DisplayQuestion`s,
/// so it has nowhere to carry a correct label.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizForDisplay {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub duration_minutes: i32,
    pub questions: Vec<DisplayQuestion>,
}

impl QuizForDisplay {
    pub fn new(quiz: Quiz, questions: Vec<DisplayQuestion>) -> Self {
        QuizForDisplay {
            id: quiz.id,
            title: quiz.title,
            description: quiz.description,
            duration_minutes: quiz.duration_minutes,
            questions,
        }
    }
}
