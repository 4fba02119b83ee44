use std::collections::HashMap;

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, from_document, Document},
    options::IndexOptions,
    Collection, IndexModel,
};
use serde::Deserialize;

use crate::{
    db::Database,
    errors::{AppError, AppResult},
    models::domain::{AnswerKey, DisplayQuestion, OptionLabel, Question, Quiz, QuizSummary},
};

/// Read access to quiz definitions.
///
/// The display and grading paths are separate methods returning separate
/// types, so the correct labels are never loaded for a view.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuizCatalog: Send + Sync {
    async fn find_quiz(&self, quiz_id: &str) -> AppResult<Option<Quiz>>;
    async fn list_quizzes(&self) -> AppResult<Vec<QuizSummary>>;
    /// Questions in stable display order, without correct labels.
    async fn get_questions_for_display(&self, quiz_id: &str) -> AppResult<Vec<DisplayQuestion>>;
    async fn get_answer_key(&self, quiz_id: &str) -> AppResult<AnswerKey>;
}

#[derive(Debug, Deserialize)]
struct AnswerKeyEntry {
    id: String,
    correct_option: OptionLabel,
}

/// One row of the per-quiz question count aggregation.
#[derive(Debug, Deserialize)]
struct QuestionCount {
    #[serde(rename = "_id")]
    quiz_id: String,
    count: i64,
}

pub struct MongoQuizCatalog {
    quizzes: Collection<Quiz>,
    questions: Collection<Question>,
}

impl MongoQuizCatalog {
    pub fn new(db: &Database) -> Self {
        Self {
            quizzes: db.get_collection("quizzes"),
            questions: db.get_collection("questions"),
        }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        log::info!("Creating indexes for quizzes and questions collections");

        let quiz_id_index = IndexModel::builder()
            .keys(doc! { "id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("id_unique".to_string())
                    .build(),
            )
            .build();

        let question_id_index = IndexModel::builder()
            .keys(doc! { "id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("id_unique".to_string())
                    .build(),
            )
            .build();

        let quiz_order_index = IndexModel::builder()
            .keys(doc! { "quiz_id": 1, "order": 1 })
            .options(
                IndexOptions::builder()
                    .name("quiz_order".to_string())
                    .build(),
            )
            .build();

        self.quizzes.create_index(quiz_id_index).await?;
        self.questions.create_index(question_id_index).await?;
        self.questions.create_index(quiz_order_index).await?;

        log::info!("Successfully created indexes for quizzes and questions collections");
        Ok(())
    }
}

#[async_trait]
impl QuizCatalog for MongoQuizCatalog {
    async fn find_quiz(&self, quiz_id: &str) -> AppResult<Option<Quiz>> {
        let quiz = self.quizzes.find_one(doc! { "id": quiz_id }).await?;
        Ok(quiz)
    }

    async fn list_quizzes(&self) -> AppResult<Vec<QuizSummary>> {
        let quizzes: Vec<Quiz> = self
            .quizzes
            .find(doc! {})
            .sort(doc! { "created_at": -1 })
            .await?
            .try_collect()
            .await?;

        let counts: HashMap<String, usize> = self
            .questions
            .aggregate(vec![doc! {
                "$group": { "_id": "$quiz_id", "count": { "$sum": 1 } }
            }])
            .await?
            .try_collect::<Vec<Document>>()
            .await?
            .into_iter()
            .map(from_document::<QuestionCount>)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| AppError::DatabaseError(format!("Invalid question count: {}", e)))?
            .into_iter()
            .map(|c| (c.quiz_id, usize::try_from(c.count).unwrap_or(0)))
            .collect();

        let summaries = quizzes
            .into_iter()
            .map(|quiz| QuizSummary {
                question_count: counts.get(&quiz.id).copied().unwrap_or(0),
                quiz,
            })
            .collect();

        Ok(summaries)
    }

    async fn get_questions_for_display(&self, quiz_id: &str) -> AppResult<Vec<DisplayQuestion>> {
        let questions = self
            .questions
            .clone_with_type::<DisplayQuestion>()
            .find(doc! { "quiz_id": quiz_id })
            .projection(doc! {
                "_id": 0,
                "id": 1,
                "question_text": 1,
                "option_a": 1,
                "option_b": 1,
                "option_c": 1,
                "option_d": 1,
            })
            .sort(doc! { "order": 1, "id": 1 })
            .await?
            .try_collect()
            .await?;
        Ok(questions)
    }

    async fn get_answer_key(&self, quiz_id: &str) -> AppResult<AnswerKey> {
        let entries: Vec<AnswerKeyEntry> = self
            .questions
            .clone_with_type::<AnswerKeyEntry>()
            .find(doc! { "quiz_id": quiz_id })
            .projection(doc! { "_id": 0, "id": 1, "correct_option": 1 })
            .await?
            .try_collect()
            .await?;

        Ok(entries
            .into_iter()
            .map(|entry| (entry.id, entry.correct_option))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn answer_key_entry_reads_projected_document() {
        let entry: AnswerKeyEntry =
            serde_json::from_str(r#"{ "id": "q1", "correct_option": "C" }"#)
                .expect("projected entry should deserialize");

        assert_eq!(entry.id, "q1");
        assert_eq!(entry.correct_option, OptionLabel::C);
    }

    #[test]
    fn answer_key_entry_accepts_lower_case_label() {
        let entry: AnswerKeyEntry =
            serde_json::from_str(r#"{ "id": "q1", "correct_option": "c" }"#)
                .expect("lower-case label should deserialize");

        assert_eq!(entry.correct_option, OptionLabel::C);
    }

    #[test]
    fn answer_key_entry_reads_bson_document() {
        let document = doc! { "id": "q2", "correct_option": "d" };
        let entry: AnswerKeyEntry =
            mongodb::bson::from_document(document).expect("bson entry should deserialize");

        assert_eq!(entry.correct_option, OptionLabel::D);
    }

    #[test]
    fn question_count_reads_group_output() {
        let row: QuestionCount = from_document(doc! { "_id": "quiz-1", "count": 3_i32 })
            .expect("group row should deserialize");

        assert_eq!(row.quiz_id, "quiz-1");
        assert_eq!(row.count, 3);
    }

    #[test]
    fn catalog_is_usable_as_trait_object() {
        fn assert_object_safe(_: Option<&dyn QuizCatalog>) {}
        assert_object_safe(None);
    }
}
