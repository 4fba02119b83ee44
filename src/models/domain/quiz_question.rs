use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::models::domain::answer::AnswerKey;

/// One of the four fixed option labels of a question.
///
/// Serialized upper-case; deserialized through `FromStr`, so documents
/// written with "a".."d" load as well.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(try_from = "String")]
pub enum OptionLabel {
    A,
    B,
    C,
    D,
}

impl OptionLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            OptionLabel::A => "A",
            OptionLabel::B => "B",
            OptionLabel::C => "C",
            OptionLabel::D => "D",
        }
    }
}

impl fmt::Display for OptionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOptionLabelError;

impl fmt::Display for ParseOptionLabelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("expected one of A, B, C, D")
    }
}

impl std::error::Error for ParseOptionLabelError {}

impl FromStr for OptionLabel {
    type Err = ParseOptionLabelError;

    // Accepts either case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "A" | "a" => Ok(OptionLabel::A),
            "B" | "b" => Ok(OptionLabel::B),
            "C" | "c" => Ok(OptionLabel::C),
            "D" | "d" => Ok(OptionLabel::D),
            _ => Err(ParseOptionLabelError),
        }
    }
}

impl TryFrom<String> for OptionLabel {
    type Error = ParseOptionLabelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Full catalog question, including its correct label.
///
/// Never handed to a taker: the display path reads `DisplayQuestion` and the
/// grading path reads an `AnswerKey`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Question {
    pub id: String,
    pub quiz_id: String,
    pub question_text: String,
    pub option_a: String,
    pub option_b: String,
    pub option_c: String,
    pub option_d: String,
    pub correct_option: OptionLabel,
    pub order: i32,
}

impl Question {
    pub fn to_display(&self) -> DisplayQuestion {
        DisplayQuestion {
            id: self.id.clone(),
            question_text: self.question_text.clone(),
            option_a: self.option_a.clone(),
            option_b: self.option_b.clone(),
            option_c: self.option_c.clone(),
            option_d: self.option_d.clone(),
        }
    }

    pub fn answer_key<'a>(questions: impl IntoIterator<Item = &'a Question>) -> AnswerKey {
        questions
            .into_iter()
            .map(|q| (q.id.clone(), q.correct_option))
            .collect()
    }
}

/// Question as shown to a taker. Has no correct-label field.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct DisplayQuestion {
    pub id: String,
    pub question_text: String,
    pub option_a: String,
    pub option_b: String,
    pub option_c: String,
    pub option_d: String,
}
