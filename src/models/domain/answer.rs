use std::collections::HashMap;

use crate::{
    errors::{AppError, AppResult},
    models::domain::quiz_question::OptionLabel,
};

/// Mapping from question id to its correct label.
///
/// Deliberately not `Serialize`: it is read by grading and nothing else.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AnswerKey(HashMap<String, OptionLabel>);

impl AnswerKey {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn correct_label(&self, question_id: &str) -> Option<OptionLabel> {
        self.0.get(question_id).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, OptionLabel)> {
        self.0.iter().map(|(id, label)| (id.as_str(), *label))
    }
}

impl FromIterator<(String, OptionLabel)> for AnswerKey {
    fn from_iter<I: IntoIterator<Item = (String, OptionLabel)>>(iter: I) -> Self {
        AnswerKey(iter.into_iter().collect())
    }
}

/// A taker's answers keyed by question id. Unanswered questions are absent.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SubmittedAnswerSet(HashMap<String, OptionLabel>);

impl SubmittedAnswerSet {
    /// Converts raw `question_id -> label` pairs, rejecting any label outside A-D.
    ///
    /// When several labels are invalid the smallest question id is reported,
    /// so the same payload always yields the same error.
    pub fn parse(raw: &HashMap<String, String>) -> AppResult<Self> {
        let mut invalid: Option<&String> = None;
        let mut answers = HashMap::with_capacity(raw.len());

        for (question_id, label) in raw {
            match label.parse::<OptionLabel>() {
                Ok(label) => {
                    answers.insert(question_id.clone(), label);
                }
                Err(_) => {
                    if invalid.map_or(true, |current| question_id < current) {
                        invalid = Some(question_id);
                    }
                }
            }
        }

        if let Some(question_id) = invalid {
            return Err(AppError::InvalidAnswerLabel {
                question_id: question_id.clone(),
            });
        }

        Ok(SubmittedAnswerSet(answers))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn answer_for(&self, question_id: &str) -> Option<OptionLabel> {
        self.0.get(question_id).copied()
    }

    pub fn question_ids(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

impl FromIterator<(String, OptionLabel)> for SubmittedAnswerSet {
    fn from_iter<I: IntoIterator<Item = (String, OptionLabel)>>(iter: I) -> Self {
        SubmittedAnswerSet(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(q, a)| (q.to_string(), a.to_string()))
            .collect()
    }

    #[test]
    fn parse_accepts_valid_labels_in_either_case() {
        let answers = SubmittedAnswerSet::parse(&raw(&[("q1", "a"), ("q2", "B")]))
            .expect("valid labels should parse");

        assert_eq!(answers.len(), 2);
        assert_eq!(answers.answer_for("q1"), Some(OptionLabel::A));
        assert_eq!(answers.answer_for("q2"), Some(OptionLabel::B));
        assert_eq!(answers.answer_for("q3"), None);
    }

    #[test]
    fn parse_empty_submission_is_not_an_error() {
        let answers = SubmittedAnswerSet::parse(&HashMap::new()).expect("empty set is valid");
        assert!(answers.is_empty());
    }

    #[test]
    fn parse_reports_smallest_invalid_question_id() {
        let result = SubmittedAnswerSet::parse(&raw(&[("q9", "Z"), ("q1", "A"), ("q3", "E")]));

        match result {
            Err(AppError::InvalidAnswerLabel { question_id }) => assert_eq!(question_id, "q3"),
            other => panic!("expected InvalidAnswerLabel, got {:?}", other),
        }
    }

    #[test]
    fn answer_key_lookup() {
        let key: AnswerKey = [
            ("q1".to_string(), OptionLabel::A),
            ("q2".to_string(), OptionLabel::C),
        ]
        .into_iter()
        .collect();

        assert_eq!(key.len(), 2);
        assert!(key.correct_label("q2").is_some());
        assert!(key.correct_label("q3").is_none());
        assert_eq!(key.correct_label("q2"), Some(OptionLabel::C));
    }
}
