#[cfg(test)]
pub mod fixtures {
    use crate::models::domain::{
        AnswerKey, DisplayQuestion, OptionLabel, Question, Quiz, SubmittedAnswerSet,
    };

    /// A quiz with a fixed id, authored by `author-1`.
    pub fn quiz(id: &str) -> Quiz {
        let mut quiz = Quiz::new("Lifetimes", Some("Borrow checker basics"), 10, "author-1");
        quiz.id = id.to_string();
        quiz
    }

    pub fn question(quiz_id: &str, id: &str, correct: OptionLabel, order: i32) -> Question {
        Question {
            id: id.to_string(),
            quiz_id: quiz_id.to_string(),
            question_text: format!("Question {id}"),
            option_a: "one".to_string(),
            option_b: "two".to_string(),
            option_c: "three".to_string(),
            option_d: "four".to_string(),
            correct_option: correct,
            order,
        }
    }

    pub fn display_question(id: &str) -> DisplayQuestion {
        question("unused", id, OptionLabel::A, 0).to_display()
    }

    /// q1 => A, q2 => B, q3 => C
    pub fn three_question_key() -> AnswerKey {
        [
            ("q1".to_string(), OptionLabel::A),
            ("q2".to_string(), OptionLabel::B),
            ("q3".to_string(), OptionLabel::C),
        ]
        .into_iter()
        .collect()
    }

    pub fn answers(pairs: &[(&str, OptionLabel)]) -> SubmittedAnswerSet {
        pairs.iter().map(|(q, l)| (q.to_string(), *l)).collect()
    }
}

#[cfg(test)]
pub mod test_helpers {
    use actix_web::http::StatusCode;

    /// Asserts that a status code represents an error (4xx or 5xx)
    pub fn assert_error_status(status: StatusCode) {
        assert!(
            status.is_client_error() || status.is_server_error(),
            "Expected error status, got: {}",
            status
        );
    }

    /// Asserts that a status code represents success (2xx)
    pub fn assert_success_status(status: StatusCode) {
        assert!(
            status.is_success(),
            "Expected success status, got: {}",
            status
        );
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use crate::models::domain::OptionLabel;

    #[test]
    fn test_fixtures_quiz() {
        let quiz = quiz("quiz-1");
        assert_eq!(quiz.id, "quiz-1");
        assert_eq!(quiz.created_by, "author-1");
    }

    #[test]
    fn test_fixtures_answer_key() {
        let key = three_question_key();
        assert_eq!(key.len(), 3);
        assert_eq!(key.correct_label("q2"), Some(OptionLabel::B));
    }

    #[test]
    fn test_fixtures_display_question_matches_id() {
        assert_eq!(display_question("q9").id, "q9");
    }
}
