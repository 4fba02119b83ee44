pub mod answer;
pub mod quiz;
pub mod quiz_attempt;
pub mod quiz_question;
pub use answer::{AnswerKey, SubmittedAnswerSet};
pub use quiz::{Quiz, QuizForDisplay, QuizSummary};
pub use quiz_attempt::AttemptRecord;
pub use quiz_question::{DisplayQuestion, OptionLabel, Question};
