use std::collections::HashMap;

use serde::Deserialize;
use validator::Validate;

use crate::{errors::AppResult, models::domain::SubmittedAnswerSet};

pub const MAX_SUBMITTED_ANSWERS: u64 = 500;

/// Body of `POST /api/quizzes/{quiz_id}/attempt`.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct SubmitAnswersRequest {
    /// Question id -> chosen label ("A".."D", either case).
    #[serde(default)]
    #[validate(length(max = MAX_SUBMITTED_ANSWERS))]
    pub answers: HashMap<String, String>,
}

impl SubmitAnswersRequest {
    pub fn into_answer_set(self) -> AppResult<SubmittedAnswerSet> {
        self.validate()?;
        SubmittedAnswerSet::parse(&self.answers)
    }
}
