//! # Source Parsing
//!
//! Produces [`QuestionRecord`](crate::models::QuestionRecord)s from raw input.
//!
//! - **`delimited`**: CSV rows with a header and nine positional columns
//! - **`free_text`**: bullet-list question sheets, parsed by a line classifier
//!   feeding a two-state builder

pub mod delimited;
pub mod free_text;

pub use delimited::{DelimitedParser, parse_delimited};
pub use free_text::{TextOptions, parse_free_text};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("Row {row}: expected at least {expected} fields, found {found}")]
    MalformedRow {
        row: usize,
        found: usize,
        expected: usize,
    },
    #[error("Line {line}: {reason}")]
    MalformedLine { line: usize, reason: String },
}
