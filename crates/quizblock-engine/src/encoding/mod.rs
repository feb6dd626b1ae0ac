//! # Block Encoding
//!
//! Turns a [`QuestionRecord`] into the rows of one import block:
//!
//! ```text
//! NewQuestion,MC,,
//! ID,<id>,,
//! Title,<text>,,
//! QuestionText,<text>,,
//! Points,<points>,,
//! Difficulty,<difficulty>,,
//! Image,<image>,,          (only when the record has an image field)
//! Option,<100|0>,<option>  (one per option, in order)
//! Hint,<hint>,,            (only when the record has a hint field)
//! Feedback,<feedback>,,    (only when the record has a feedback field)
//! <blank>
//! ```
//!
//! - **`resegment`**: regroups an already-encoded row stream into blocks

pub mod resegment;

use crate::models::QuestionRecord;

pub use resegment::Resegmenter;

/// One output row. An empty row is the block separator.
pub type Row = Vec<String>;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum EncodeError {
    #[error("Question {id} has no options")]
    EmptyOptions { id: String },
}

/// Rows and rejections from encoding a batch of records.
#[derive(Debug, Default)]
pub struct EncodedBatch {
    pub rows: Vec<Row>,
    pub blocks: usize,
    pub rejected: Vec<EncodeError>,
}

pub struct BlockEncoder;

impl BlockEncoder {
    pub const NEW_QUESTION: &'static str = "NewQuestion";
    pub const QUESTION_TYPE: &'static str = "MC";
    pub const CORRECT_WEIGHT: &'static str = "100";
    pub const WRONG_WEIGHT: &'static str = "0";

    /// Encodes one record into a complete block, separator row included.
    pub fn encode(&self, record: &QuestionRecord) -> Result<Vec<Row>, EncodeError> {
        if record.options.is_empty() {
            return Err(EncodeError::EmptyOptions {
                id: record.id.clone(),
            });
        }

        let mut rows = Vec::with_capacity(record.options.len() + 10);
        rows.push(labeled(Self::NEW_QUESTION, Self::QUESTION_TYPE));
        rows.push(labeled("ID", &record.id));
        rows.push(labeled("Title", &record.text));
        rows.push(labeled("QuestionText", &record.text));
        rows.push(labeled("Points", &record.points));
        rows.push(labeled("Difficulty", &record.difficulty));
        if let Some(image) = &record.image {
            rows.push(labeled("Image", image));
        }

        for (position, option) in record.options.iter().enumerate() {
            let weight = if record.correct.matches(position, option) {
                Self::CORRECT_WEIGHT
            } else {
                Self::WRONG_WEIGHT
            };
            rows.push(vec!["Option".to_string(), weight.to_string(), option.clone()]);
        }

        if let Some(hint) = &record.hint {
            rows.push(labeled("Hint", hint));
        }
        if let Some(feedback) = &record.feedback {
            rows.push(labeled("Feedback", feedback));
        }
        rows.push(Row::new());

        Ok(rows)
    }

    /// Encodes records in order. A record without options is logged and
    /// left out; the rest of the batch still encodes.
    pub fn encode_all<I>(&self, records: I) -> EncodedBatch
    where
        I: IntoIterator<Item = QuestionRecord>,
    {
        let mut batch = EncodedBatch::default();
        for record in records {
            match self.encode(&record) {
                Ok(rows) => {
                    batch.rows.extend(rows);
                    batch.blocks += 1;
                }
                Err(e) => {
                    log::warn!("Skipping question: {e}");
                    batch.rejected.push(e);
                }
            }
        }
        batch
    }
}

fn labeled(label: &str, value: &str) -> Row {
    vec![
        label.to_string(),
        value.to_string(),
        String::new(),
        String::new(),
    ]
}

pub fn is_blank(row: &[String]) -> bool {
    row.iter().all(|field| field.is_empty())
}
