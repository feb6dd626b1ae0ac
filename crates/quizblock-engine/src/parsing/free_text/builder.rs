use crate::models::{CorrectAnswer, QuestionRecord, question::prefixed_id};
use crate::parsing::ParseError;

use super::{LineKind, TextLineClassifier, TextOptions};

#[derive(Debug, Clone, PartialEq, Eq)]
struct PendingQuestion {
    text: String,
    options: Vec<String>,
    correct: Option<String>,
}

/// Where the builder is between lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuilderState {
    AwaitingQuestion,
    CollectingOptions,
}

/// Builds records from classified lines.
///
/// A question line closes the question in progress and opens a new one.
/// Option lines append to the open question, and a correct-answer line is
/// attached to it. Ids advance only when a question is emitted.
pub struct QuestionBuilder {
    options: TextOptions,
    pending: Option<PendingQuestion>,
    emitted: usize,
    out: Vec<QuestionRecord>,
}

impl QuestionBuilder {
    pub fn new(options: TextOptions) -> Self {
        Self {
            options,
            pending: None,
            emitted: 0,
            out: vec![],
        }
    }

    pub fn state(&self) -> BuilderState {
        match self.pending {
            Some(_) => BuilderState::CollectingOptions,
            None => BuilderState::AwaitingQuestion,
        }
    }

    pub fn push(&mut self, line: usize, kind: LineKind<'_>) -> Result<(), ParseError> {
        match kind {
            LineKind::Blank => Ok(()),
            LineKind::Question(text) => {
                self.flush_question();
                self.pending = Some(PendingQuestion {
                    text: text.to_string(),
                    options: vec![],
                    correct: None,
                });
                Ok(())
            }
            LineKind::Option(rest) => {
                let option = labeled_text(line, rest, "option")?;
                self.open_question(line)?.options.push(option);
                Ok(())
            }
            LineKind::CorrectAnswer(rest) => {
                let correct = labeled_text(line, rest, "correct answer")?;
                let question = self.open_question(line)?;
                if question.correct.is_some() {
                    log::debug!("Line {line}: replacing earlier correct answer");
                }
                question.correct = Some(correct);
                Ok(())
            }
        }
    }

    pub fn finish(mut self) -> Vec<QuestionRecord> {
        // EOF flush
        self.flush_question();
        self.out
    }

    fn open_question(&mut self, line: usize) -> Result<&mut PendingQuestion, ParseError> {
        self.pending
            .as_mut()
            .ok_or_else(|| ParseError::MalformedLine {
                line,
                reason: "answer line before any question".to_string(),
            })
    }

    fn flush_question(&mut self) {
        let Some(question) = self.pending.take() else {
            return;
        };

        self.emitted += 1;
        self.out.push(QuestionRecord {
            id: prefixed_id(&self.options.id_prefix, self.emitted),
            text: question.text,
            options: question.options,
            correct: CorrectAnswer::ByText(question.correct.unwrap_or_default()),
            points: self.options.points.clone(),
            difficulty: self.options.difficulty.clone(),
            image: None,
            hint: None,
            feedback: None,
        });
    }
}

fn labeled_text(line: usize, rest: &str, what: &str) -> Result<String, ParseError> {
    TextLineClassifier::strip_label(rest)
        .map(str::to_string)
        .ok_or_else(|| ParseError::MalformedLine {
            line,
            reason: format!("{what} '{rest}' has no \"{}\" label", TextLineClassifier::LABEL_END),
        })
}
