use crate::encoding::Row;
use crate::models::{CorrectAnswer, QuestionRecord, question::sequential_id};

use super::ParseError;

/// Column positions of the source sheet.
mod column {
    pub const TEXT: usize = 1;
    pub const OPTIONS: usize = 2;
    pub const CORRECT: usize = 3;
    pub const POINTS: usize = 4;
    pub const IMAGE: usize = 5;
    pub const HINT: usize = 6;
    pub const FEEDBACK: usize = 7;
    pub const DIFFICULTY: usize = 8;
}

/// Streams records out of source rows.
///
/// The first row is a header and is always discarded. Rows with fewer than
/// [`DelimitedParser::MIN_FIELDS`] fields come out as
/// [`ParseError::MalformedRow`] and do not consume an id.
pub struct DelimitedParser<I> {
    rows: I,
    row_number: usize,
    next_id: usize,
}

impl<I> DelimitedParser<I>
where
    I: Iterator<Item = Row>,
{
    pub const MIN_FIELDS: usize = 9;
    pub const OPTION_SEPARATOR: char = '|';

    pub fn new(rows: I) -> Self {
        Self {
            rows,
            row_number: 0,
            next_id: 1,
        }
    }

    fn record_from(&mut self, fields: &[String]) -> QuestionRecord {
        let field = |i: usize| fields[i].trim().to_string();

        let options = fields[column::OPTIONS]
            .trim()
            .split(Self::OPTION_SEPARATOR)
            .map(|option| option.trim().to_string())
            .collect();

        let id = sequential_id(self.next_id);
        self.next_id += 1;

        QuestionRecord {
            id,
            text: field(column::TEXT),
            options,
            correct: CorrectAnswer::ByText(field(column::CORRECT)),
            points: field(column::POINTS),
            difficulty: field(column::DIFFICULTY),
            image: Some(field(column::IMAGE)),
            hint: Some(field(column::HINT)),
            feedback: Some(field(column::FEEDBACK)),
        }
    }
}

impl<I> Iterator for DelimitedParser<I>
where
    I: Iterator<Item = Row>,
{
    type Item = Result<QuestionRecord, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.row_number == 0 {
            self.rows.next()?;
            self.row_number = 1;
        }

        let fields = self.rows.next()?;
        self.row_number += 1;

        if fields.len() < Self::MIN_FIELDS {
            return Some(Err(ParseError::MalformedRow {
                row: self.row_number,
                found: fields.len(),
                expected: Self::MIN_FIELDS,
            }));
        }

        Some(Ok(self.record_from(&fields)))
    }
}

pub fn parse_delimited<I>(rows: I) -> DelimitedParser<I::IntoIter>
where
    I: IntoIterator<Item = Row>,
{
    DelimitedParser::new(rows.into_iter())
}
