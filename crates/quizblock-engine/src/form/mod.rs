//! Decoded form submissions from the interactive question builders.

use std::collections::HashMap;

use crate::models::{CorrectAnswer, QuestionRecord};

/// Field names of a submission.
pub mod field {
    pub const ID: &str = "id";
    pub const QUESTION_TEXT: &str = "question_text";
    pub const POINTS: &str = "points";
    pub const DIFFICULTY: &str = "difficulty";
    pub const OPTION_PREFIX: &str = "option";
    pub const CORRECT_ANSWER: &str = "correct_answer";
    pub const ACTION: &str = "action";
}

/// What the submitter wants after storing the question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormAction {
    /// Keep collecting questions.
    #[default]
    Next,
    /// Export everything collected so far.
    Generate,
}

impl FormAction {
    pub fn parse(value: &str) -> Self {
        match value.trim() {
            "generate" => FormAction::Generate,
            _ => FormAction::Next,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FormAction::Next => "next",
            FormAction::Generate => "generate",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FormSubmission {
    pub id: Option<String>,
    pub question_text: String,
    pub points: String,
    pub difficulty: String,
    pub options: Vec<String>,
    /// 1-based; `0` when the submitted value was not a number.
    pub correct_answer: usize,
    pub action: FormAction,
}

impl FormSubmission {
    /// Reads a decoded field mapping. Options are read from `option1`
    /// upwards and stop at the first missing key.
    pub fn from_fields(fields: &HashMap<String, String>) -> Self {
        let get = |key: &str| fields.get(key).cloned().unwrap_or_default();

        let options = (1..)
            .map(|n| format!("{}{n}", field::OPTION_PREFIX))
            .map_while(|key| fields.get(&key).cloned())
            .collect();

        let raw_correct = get(field::CORRECT_ANSWER);
        let correct_answer = raw_correct.trim().parse::<usize>().unwrap_or_else(|_| {
            log::debug!("Unparsable correct answer '{raw_correct}', matching no option");
            0
        });

        Self {
            id: fields.get(field::ID).cloned(),
            question_text: get(field::QUESTION_TEXT),
            points: get(field::POINTS),
            difficulty: get(field::DIFFICULTY),
            options,
            correct_answer,
            action: FormAction::parse(&get(field::ACTION)),
        }
    }

    /// Record for a single, stand-alone submission: the supplied id and the
    /// points exactly as typed.
    pub fn into_record(self) -> QuestionRecord {
        let id = self.id.clone().unwrap_or_default();
        let points = self.points.trim().to_string();
        self.record_with(id, points)
    }

    /// Record with an externally assigned id and already normalised points.
    /// Form records carry no image, hint or feedback.
    pub fn record_with(self, id: String, points: String) -> QuestionRecord {
        QuestionRecord {
            id,
            text: self.question_text,
            options: self.options,
            correct: CorrectAnswer::ByIndex(self.correct_answer),
            points,
            difficulty: self.difficulty,
            image: None,
            hint: None,
            feedback: None,
        }
    }
}
