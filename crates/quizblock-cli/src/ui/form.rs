use std::collections::HashMap;

use quizblock_engine::form::{FormAction, FormSubmission, field};

/// Which builder the form feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    /// One question per export, id typed by the user.
    Single,
    /// Questions accumulate in a session; ids are assigned.
    Session,
}

pub const OPTION_COUNT: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormField {
    pub label: String,
    pub key: String,
    pub value: String,
}

impl FormField {
    fn new(label: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            key: key.into(),
            value: String::new(),
        }
    }
}

/// Editable form contents and focus.
#[derive(Debug, Clone)]
pub struct FormState {
    mode: FormMode,
    fields: Vec<FormField>,
    focus: usize,
}

impl FormState {
    pub fn new(mode: FormMode) -> Self {
        let mut fields = Vec::new();
        if mode == FormMode::Single {
            fields.push(FormField::new("ID", field::ID));
        }
        fields.push(FormField::new("Question", field::QUESTION_TEXT));
        fields.push(FormField::new("Points", field::POINTS));
        fields.push(FormField::new("Difficulty (1-5)", field::DIFFICULTY));
        for n in 1..=OPTION_COUNT {
            fields.push(FormField::new(
                format!("Option {n}"),
                format!("{}{n}", field::OPTION_PREFIX),
            ));
        }
        fields.push(FormField::new(
            format!("Correct answer (1-{OPTION_COUNT})"),
            field::CORRECT_ANSWER,
        ));

        Self {
            mode,
            fields,
            focus: 0,
        }
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    pub fn fields(&self) -> &[FormField] {
        &self.fields
    }

    pub fn focus(&self) -> usize {
        self.focus
    }

    pub fn focus_next(&mut self) {
        self.focus = (self.focus + 1) % self.fields.len();
    }

    pub fn focus_previous(&mut self) {
        self.focus = if self.focus == 0 {
            self.fields.len() - 1
        } else {
            self.focus - 1
        };
    }

    pub fn insert_char(&mut self, c: char) {
        self.fields[self.focus].value.push(c);
    }

    pub fn backspace(&mut self) {
        self.fields[self.focus].value.pop();
    }

    pub fn set(&mut self, key: &str, value: &str) {
        if let Some(f) = self.fields.iter_mut().find(|f| f.key == key) {
            f.value = value.to_string();
        }
    }

    pub fn is_blank(&self) -> bool {
        self.fields.iter().all(|f| f.value.trim().is_empty())
    }

    /// Empties every field and returns focus to the top.
    pub fn clear(&mut self) {
        for f in &mut self.fields {
            f.value.clear();
        }
        self.focus = 0;
    }

    /// The decoded field mapping a form post would deliver.
    pub fn to_fields(&self, action: FormAction) -> HashMap<String, String> {
        let mut fields: HashMap<String, String> = self
            .fields
            .iter()
            .map(|f| (f.key.clone(), f.value.clone()))
            .collect();
        fields.insert(field::ACTION.to_string(), action.as_str().to_string());
        fields
    }

    pub fn submission(&self, action: FormAction) -> FormSubmission {
        FormSubmission::from_fields(&self.to_fields(action))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn type_str(state: &mut FormState, s: &str) {
        for c in s.chars() {
            state.insert_char(c);
        }
    }

    #[test]
    fn session_form_has_no_id_field() {
        let state = FormState::new(FormMode::Session);

        let keys: Vec<&str> = state.fields().iter().map(|f| f.key.as_str()).collect();
        assert_eq!(
            keys,
            vec![
                "question_text",
                "points",
                "difficulty",
                "option1",
                "option2",
                "option3",
                "option4",
                "correct_answer",
            ]
        );
    }

    #[test]
    fn single_form_starts_with_id() {
        let state = FormState::new(FormMode::Single);
        assert_eq!(state.fields()[0].key, "id");
        assert_eq!(state.fields().len(), 9);
    }

    #[test]
    fn focus_wraps_both_ways() {
        let mut state = FormState::new(FormMode::Session);

        state.focus_previous();
        assert_eq!(state.focus(), 7);
        state.focus_next();
        assert_eq!(state.focus(), 0);
    }

    #[test]
    fn typing_edits_focused_field() {
        let mut state = FormState::new(FormMode::Session);
        type_str(&mut state, "Capitol?");
        state.backspace();
        state.backspace();
        state.backspace();
        type_str(&mut state, "al?");
        state.focus_next();
        type_str(&mut state, "2");

        let submission = state.submission(FormAction::Next);

        assert_eq!(submission.question_text, "Capital?");
        assert_eq!(submission.points, "2");
    }

    #[test]
    fn submission_carries_all_options_and_action() {
        let mut state = FormState::new(FormMode::Single);
        state.set("id", "Q-9");
        state.set("option1", "a");
        state.set("option3", "c");
        state.set("correct_answer", "3");

        let submission = state.submission(FormAction::Generate);

        assert_eq!(submission.id, Some("Q-9".to_string()));
        assert_eq!(
            submission.options,
            vec!["a".to_string(), String::new(), "c".to_string(), String::new()]
        );
        assert_eq!(submission.correct_answer, 3);
        assert_eq!(submission.action, FormAction::Generate);
    }

    #[test]
    fn clear_resets_values_and_focus() {
        let mut state = FormState::new(FormMode::Session);
        state.focus_next();
        type_str(&mut state, "1");
        assert!(!state.is_blank());

        state.clear();

        assert!(state.is_blank());
        assert_eq!(state.focus(), 0);
    }
}
