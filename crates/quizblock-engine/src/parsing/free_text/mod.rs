//! Bullet-list question sheets:
//!
//! ```text
//! What is 2+2?
//! • A) 3
//! • B) 4
//! Correct Answer: B) 4
//! ```
//!
//! Parsing runs in two phases, like the block parser of a markdown engine:
//! every line is classified on its own (`classify`), then a
//! [`QuestionBuilder`] consumes the classified lines (`builder`).

pub mod builder;
pub mod classify;

pub use builder::{BuilderState, QuestionBuilder};
pub use classify::{LineKind, TextLineClassifier};

use crate::models::QuestionRecord;

use super::ParseError;

/// Values stamped on every free-text record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextOptions {
    pub id_prefix: String,
    pub points: String,
    pub difficulty: String,
}

impl Default for TextOptions {
    fn default() -> Self {
        Self {
            id_prefix: "PYTHON".to_string(),
            points: "1".to_string(),
            difficulty: "1".to_string(),
        }
    }
}

/// Parses a whole sheet. The first malformed option or answer line aborts
/// the parse.
pub fn parse_free_text<I, S>(lines: I, options: &TextOptions) -> Result<Vec<QuestionRecord>, ParseError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let classifier = TextLineClassifier;
    let mut builder = QuestionBuilder::new(options.clone());

    for (idx, line) in lines.into_iter().enumerate() {
        let kind = classifier.classify(line.as_ref());
        builder.push(idx + 1, kind)?;
    }

    Ok(builder.finish())
}
