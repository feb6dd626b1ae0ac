/// How the correct option of a question is identified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorrectAnswer {
    /// Every option whose text equals this value is correct.
    ByText(String),
    /// 1-based position into the option list. `0` or out of range matches nothing.
    ByIndex(usize),
}

impl CorrectAnswer {
    /// Whether the option at `position` (0-based) with text `option` is correct.
    pub fn matches(&self, position: usize, option: &str) -> bool {
        match self {
            CorrectAnswer::ByText(text) => option == text,
            CorrectAnswer::ByIndex(index) => *index == position + 1,
        }
    }
}

/// A single multiple choice question, ready to be encoded as a block.
///
/// `image`, `hint` and `feedback` are `None` when the source has no such
/// field at all, which drops the matching rows from the block. An empty
/// string still produces the row.
#[derive(Debug, Clone, PartialEq)]
pub struct QuestionRecord {
    pub id: String,
    pub text: String,
    pub options: Vec<String>,
    pub correct: CorrectAnswer,
    pub points: String,
    pub difficulty: String,
    pub image: Option<String>,
    pub hint: Option<String>,
    pub feedback: Option<String>,
}

impl QuestionRecord {
    /// Indexes of the options that resolve as correct.
    pub fn correct_positions(&self) -> Vec<usize> {
        self.options
            .iter()
            .enumerate()
            .filter(|(i, option)| self.correct.matches(*i, option))
            .map(|(i, _)| i)
            .collect()
    }
}

/// `Q001`, `Q012`, `Q1000`: zero-padded to three digits, never truncated.
pub fn sequential_id(counter: usize) -> String {
    format!("Q{counter:03}")
}

/// `PYTHON-1`, `PYTHON-2`, ...
pub fn prefixed_id(prefix: &str, counter: usize) -> String {
    format!("{prefix}-{counter}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn record(options: &[&str], correct: CorrectAnswer) -> QuestionRecord {
        QuestionRecord {
            id: "Q001".to_string(),
            text: "Pick one".to_string(),
            options: options.iter().map(|s| s.to_string()).collect(),
            correct,
            points: "1".to_string(),
            difficulty: "1".to_string(),
            image: None,
            hint: None,
            feedback: None,
        }
    }

    #[rstest]
    #[case(1, "Q001")]
    #[case(12, "Q012")]
    #[case(999, "Q999")]
    #[case(1000, "Q1000")]
    fn sequential_ids_pad_to_three_digits(#[case] counter: usize, #[case] expected: &str) {
        assert_eq!(sequential_id(counter), expected);
    }

    #[test]
    fn prefixed_ids_are_not_padded() {
        assert_eq!(prefixed_id("PYTHON", 1), "PYTHON-1");
        assert_eq!(prefixed_id("PYTHON", 42), "PYTHON-42");
    }

    #[test]
    fn text_match_is_case_sensitive() {
        let r = record(&["Paris", "paris"], CorrectAnswer::ByText("Paris".to_string()));
        assert_eq!(r.correct_positions(), vec![0]);
    }

    #[test]
    fn duplicate_text_options_all_match() {
        let r = record(&["4", "3", "4"], CorrectAnswer::ByText("4".to_string()));
        assert_eq!(r.correct_positions(), vec![0, 2]);
    }

    #[test]
    fn unmatched_text_has_no_correct_option() {
        let r = record(&["a", "b"], CorrectAnswer::ByText("c".to_string()));
        assert!(r.correct_positions().is_empty());
    }

    #[rstest]
    #[case(1, vec![0])]
    #[case(4, vec![3])]
    #[case(0, vec![])]
    #[case(5, vec![])]
    fn index_match_is_one_based(#[case] index: usize, #[case] expected: Vec<usize>) {
        let r = record(&["a", "b", "c", "d"], CorrectAnswer::ByIndex(index));
        assert_eq!(r.correct_positions(), expected);
    }

    #[test]
    fn index_match_ignores_duplicate_text() {
        let r = record(&["same", "same"], CorrectAnswer::ByIndex(2));
        assert_eq!(r.correct_positions(), vec![1]);
    }
}
