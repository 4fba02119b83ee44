use std::collections::HashSet;

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::doc,
    error::{ErrorKind, WriteFailure},
    options::IndexOptions,
    Collection, IndexModel,
};

use crate::{db::Database, errors::AppResult, models::domain::AttemptRecord};

const DUPLICATE_KEY_CODE: i32 = 11000;

/// Result of trying to write an attempt.
///
/// `Conflict` means a record for the (user, quiz) pair already exists; it is
/// an expected race outcome, not an error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RecordOutcome {
    Recorded(AttemptRecord),
    Conflict,
}

/// Durable store of graded attempts, at most one per (user, quiz).
///
/// Implementations must enforce uniqueness in storage: `record_attempt`
/// either inserts or returns `Conflict`, atomically.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AttemptLedger: Send + Sync {
    async fn has_attempted(&self, user_id: &str, quiz_id: &str) -> AppResult<bool>;
    async fn record_attempt(&self, attempt: AttemptRecord) -> AppResult<RecordOutcome>;
    async fn get_attempt(&self, user_id: &str, quiz_id: &str) -> AppResult<Option<AttemptRecord>>;
    async fn attempted_quiz_ids(&self, user_id: &str) -> AppResult<HashSet<String>>;
    /// All attempts for one quiz, newest first.
    async fn list_for_quiz(&self, quiz_id: &str) -> AppResult<Vec<AttemptRecord>>;
    async fn ping(&self) -> AppResult<()>;
}

pub struct MongoAttemptLedger {
    db: Database,
    collection: Collection<AttemptRecord>,
}

impl MongoAttemptLedger {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection("quiz_attempts");
        Self {
            db: db.clone(),
            collection,
        }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        log::info!("Creating indexes for quiz_attempts collection");

        let id_index = IndexModel::builder()
            .keys(doc! { "id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("id_unique".to_string())
                    .build(),
            )
            .build();

        // The one-attempt rule lives here.
        let user_quiz_index = IndexModel::builder()
            .keys(doc! { "user_id": 1, "quiz_id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("user_quiz_unique".to_string())
                    .build(),
            )
            .build();

        let quiz_date_index = IndexModel::builder()
            .keys(doc! { "quiz_id": 1, "attempt_date": -1 })
            .options(
                IndexOptions::builder()
                    .name("quiz_attempt_date".to_string())
                    .build(),
            )
            .build();

        self.collection.create_index(id_index).await?;
        self.collection.create_index(user_quiz_index).await?;
        self.collection.create_index(quiz_date_index).await?;

        log::info!("Successfully created indexes for quiz_attempts collection");
        Ok(())
    }
}

fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
    matches!(
        err.kind.as_ref(),
        ErrorKind::Write(WriteFailure::WriteError(write_error))
            if write_error.code == DUPLICATE_KEY_CODE
    )
}

#[async_trait]
impl AttemptLedger for MongoAttemptLedger {
    async fn has_attempted(&self, user_id: &str, quiz_id: &str) -> AppResult<bool> {
        let attempt = self
            .collection
            .find_one(doc! { "user_id": user_id, "quiz_id": quiz_id })
            .await?;
        Ok(attempt.is_some())
    }

    async fn record_attempt(&self, attempt: AttemptRecord) -> AppResult<RecordOutcome> {
        match self.collection.insert_one(&attempt).await {
            Ok(_) => Ok(RecordOutcome::Recorded(attempt)),
            Err(err) if is_duplicate_key(&err) => {
                log::debug!(
                    "Duplicate attempt for user '{}' on quiz '{}' rejected by index",
                    attempt.user_id,
                    attempt.quiz_id
                );
                Ok(RecordOutcome::Conflict)
            }
            Err(err) => Err(err.into()),
        }
    }

    async fn get_attempt(&self, user_id: &str, quiz_id: &str) -> AppResult<Option<AttemptRecord>> {
        let attempt = self
            .collection
            .find_one(doc! { "user_id": user_id, "quiz_id": quiz_id })
            .await?;
        Ok(attempt)
    }

    async fn attempted_quiz_ids(&self, user_id: &str) -> AppResult<HashSet<String>> {
        let quiz_ids = self
            .collection
            .distinct("quiz_id", doc! { "user_id": user_id })
            .await?;

        Ok(quiz_ids
            .into_iter()
            .filter_map(|id| id.as_str().map(str::to_string))
            .collect())
    }

    async fn list_for_quiz(&self, quiz_id: &str) -> AppResult<Vec<AttemptRecord>> {
        let attempts = self
            .collection
            .find(doc! { "quiz_id": quiz_id })
            .sort(doc! { "attempt_date": -1 })
            .await?
            .try_collect()
            .await?;
        Ok(attempts)
    }

    async fn ping(&self) -> AppResult<()> {
        self.db.health_check().await
    }
}
