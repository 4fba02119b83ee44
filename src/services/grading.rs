use std::str::FromStr;

use crate::errors::{AppError, AppResult};
use crate::models::domain::quiz_attempt::percentage;
use crate::models::domain::{AnswerKey, SubmittedAnswerSet};

/// What to do with answers for question ids that are not in the answer key.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum UnknownQuestionPolicy {
    /// Unknown ids never match and are otherwise ignored.
    #[default]
    Ignore,
    /// Any unknown id rejects the whole submission.
    Reject,
}

impl FromStr for UnknownQuestionPolicy {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ignore" | "tolerant" => Ok(UnknownQuestionPolicy::Ignore),
            "reject" | "strict" => Ok(UnknownQuestionPolicy::Reject),
            other => Err(AppError::ValidationError(format!(
                "Unknown question policy '{}'",
                other
            ))),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Grade {
    pub score: i32,
    pub total: i32,
}

impl Grade {
    pub fn percentage(&self) -> f64 {
        percentage(self.score, self.total)
    }
}

pub struct GradingService;

impl GradingService {
    /// Scores a submission: one point per question whose submitted label
    /// equals the correct one. Absent or wrong answers score zero.
    pub fn grade(key: &AnswerKey, answers: &SubmittedAnswerSet) -> Grade {
        let correct = key
            .iter()
            .filter(|(question_id, correct)| answers.answer_for(question_id) == Some(*correct))
            .count();

        Grade {
            score: to_count(correct),
            total: to_count(key.len()),
        }
    }

    /// Submitted question ids that are not part of the key, sorted.
    pub fn unknown_questions(key: &AnswerKey, answers: &SubmittedAnswerSet) -> Vec<String> {
        let mut unknown: Vec<String> = answers
            .question_ids()
            .filter(|id| key.correct_label(id).is_none())
            .map(str::to_string)
            .collect();
        unknown.sort();
        unknown
    }

    pub fn enforce_policy(
        policy: UnknownQuestionPolicy,
        key: &AnswerKey,
        answers: &SubmittedAnswerSet,
    ) -> AppResult<()> {
        if policy == UnknownQuestionPolicy::Ignore {
            return Ok(());
        }

        match Self::unknown_questions(key, answers).into_iter().next() {
            Some(question_id) => Err(AppError::UnknownQuestion(question_id)),
            None => Ok(()),
        }
    }
}

fn to_count(n: usize) -> i32 {
    i32::try_from(n).unwrap_or(i32::MAX)
}
