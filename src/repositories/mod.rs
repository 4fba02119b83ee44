pub mod attempt_ledger;
pub mod quiz_catalog;

pub use attempt_ledger::{AttemptLedger, MongoAttemptLedger, RecordOutcome};
pub use quiz_catalog::{MongoQuizCatalog, QuizCatalog};
