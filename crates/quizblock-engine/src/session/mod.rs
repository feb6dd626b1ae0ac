//! Accumulates form submissions until they are exported together.
//!
//! A [`Session`] owns its records and its id counter. Callers that share a
//! session across threads must serialise access themselves, for instance by
//! holding it behind a `Mutex`; every mutating operation takes `&mut self`.

use crate::form::{FormAction, FormSubmission};
use crate::models::QuestionRecord;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("Validation error: {0}")]
    Validation(String),
}

/// Result of a submission.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Stored under the given id; the session keeps collecting.
    Stored { id: u32 },
    /// Stored under `id`, then every collected record was drained for export.
    Exported { id: u32, records: Vec<QuestionRecord> },
}

#[derive(Debug)]
pub struct Session {
    records: Vec<QuestionRecord>,
    next_id: u32,
}

impl Session {
    pub const MIN_POINTS: f64 = 0.5;
    pub const MAX_POINTS: f64 = 3.0;

    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            next_id: 1,
        }
    }

    /// The id the next appended record will receive.
    pub fn next_id(&self) -> u32 {
        self.next_id
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Validates points, assigns the next id and stores the record.
    ///
    /// A rejected submission leaves the counter untouched.
    pub fn append(&mut self, submission: &FormSubmission) -> Result<u32, SessionError> {
        let points = Self::validate_points(&submission.points)?;

        let id = self.next_id;
        self.next_id += 1;

        let record = submission
            .clone()
            .record_with(id.to_string(), format!("{points:.1}"));
        log::debug!("Stored question {id}: {}", record.text);
        self.records.push(record);

        Ok(id)
    }

    /// Returns every stored record in append order and empties the session.
    /// The id counter keeps running.
    pub fn flush_all(&mut self) -> Vec<QuestionRecord> {
        std::mem::take(&mut self.records)
    }

    /// Appends, then drains the session when the submission asks to generate.
    pub fn submit(&mut self, submission: &FormSubmission) -> Result<SubmitOutcome, SessionError> {
        let id = self.append(submission)?;
        match submission.action {
            FormAction::Next => Ok(SubmitOutcome::Stored { id }),
            FormAction::Generate => Ok(SubmitOutcome::Exported {
                id,
                records: self.flush_all(),
            }),
        }
    }

    fn validate_points(raw: &str) -> Result<f64, SessionError> {
        let points: f64 = raw.trim().parse().map_err(|_| Self::points_error())?;
        if !(Self::MIN_POINTS..=Self::MAX_POINTS).contains(&points) {
            return Err(Self::points_error());
        }
        Ok(points)
    }

    fn points_error() -> SessionError {
        SessionError::Validation(format!(
            "Points must be between {} and {}",
            Self::MIN_POINTS,
            Self::MAX_POINTS
        ))
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
