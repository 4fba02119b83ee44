pub mod attempt_service;
pub mod grading;

pub use attempt_service::{AttemptService, ResultOutcome, SubmitOutcome, ViewOutcome};
pub use grading::{Grade, GradingService, UnknownQuestionPolicy};
