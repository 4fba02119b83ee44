use std::sync::Arc;

use crate::{
    config::Config,
    db::Database,
    errors::AppResult,
    repositories::{AttemptLedger, MongoAttemptLedger, MongoQuizCatalog, QuizCatalog},
    services::AttemptService,
};

#[derive(Clone)]
pub struct AppState {
    pub attempt_service: Arc<AttemptService>,
}

impl AppState {
    pub async fn new(config: Config) -> AppResult<Self> {
        let db = Database::connect(&config).await?;

        let catalog = Arc::new(MongoQuizCatalog::new(&db));
        catalog.ensure_indexes().await?;

        let ledger = Arc::new(MongoAttemptLedger::new(&db));
        ledger.ensure_indexes().await?;

        Ok(Self::from_repositories(&config, catalog, ledger))
    }

    /// Builds the state over any catalog and ledger, used by tests with in-memory stores.
    pub fn from_repositories(
        config: &Config,
        catalog: Arc<dyn QuizCatalog>,
        ledger: Arc<dyn AttemptLedger>,
    ) -> Self {
        log::info!(
            "Grading with unknown question policy {:?}",
            config.unknown_question_policy
        );

        let attempt_service = Arc::new(AttemptService::new(
            catalog,
            ledger,
            config.unknown_question_policy,
        ));

        Self { attempt_service }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_state_is_cloneable() {
        fn assert_clone<T: Clone>() {}
        assert_clone::<AppState>();
    }
}
