/// Classification of a single trimmed line, independent of its neighbours.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind<'a> {
    Blank,
    /// Text after the bullet marker, label still attached (`A) 3`).
    Option(&'a str),
    /// Text after the `Correct Answer:` prefix, label still attached.
    CorrectAnswer(&'a str),
    Question(&'a str),
}

/// Classifies lines in precedence order: option, correct answer, question.
pub struct TextLineClassifier;

impl TextLineClassifier {
    pub const BULLET: char = '•';
    pub const ASCII_BULLETS: [char; 2] = ['-', '*'];
    pub const CORRECT_PREFIX: &'static str = "Correct Answer:";
    pub const LABEL_END: &'static str = ") ";

    pub fn classify<'a>(&self, line: &'a str) -> LineKind<'a> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return LineKind::Blank;
        }

        if let Some(rest) = Self::strip_bullet(trimmed) {
            return LineKind::Option(rest);
        }

        if let Some(rest) = trimmed.strip_prefix(Self::CORRECT_PREFIX) {
            return LineKind::CorrectAnswer(rest.trim_start());
        }

        LineKind::Question(trimmed)
    }

    /// Text after the first `") "`, e.g. `B) 4` gives `4`.
    pub fn strip_label(rest: &str) -> Option<&str> {
        rest.find(Self::LABEL_END)
            .map(|idx| rest[idx + Self::LABEL_END.len()..].trim())
    }

    fn strip_bullet(trimmed: &str) -> Option<&str> {
        if let Some(rest) = trimmed.strip_prefix(Self::BULLET) {
            return Some(rest.trim_start());
        }

        // ASCII bullets need a following space so "-5 is..." stays a question
        let mut chars = trimmed.chars();
        let first = chars.next()?;
        let rest = chars.as_str();
        if Self::ASCII_BULLETS.contains(&first) && rest.starts_with(char::is_whitespace) {
            return Some(rest.trim_start());
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", LineKind::Blank)]
    #[case("   \t", LineKind::Blank)]
    #[case("• A) 3", LineKind::Option("A) 3"))]
    #[case("  •B) 4  ", LineKind::Option("B) 4"))]
    #[case("- C) five", LineKind::Option("C) five"))]
    #[case("* D) six", LineKind::Option("D) six"))]
    #[case("Correct Answer: B) 4", LineKind::CorrectAnswer("B) 4"))]
    #[case("What is 2+2?", LineKind::Question("What is 2+2?"))]
    #[case("-5 is negative?", LineKind::Question("-5 is negative?"))]
    #[case("correct answer: B) 4", LineKind::Question("correct answer: B) 4"))]
    fn classifies_lines(#[case] line: &str, #[case] expected: LineKind<'static>) {
        assert_eq!(TextLineClassifier.classify(line), expected);
    }

    #[test]
    fn bullet_beats_correct_answer_prefix() {
        assert_eq!(
            TextLineClassifier.classify("• Correct Answer: A) x"),
            LineKind::Option("Correct Answer: A) x")
        );
    }

    #[rstest]
    #[case("A) 3", Some("3"))]
    #[case("B) a) b", Some("a) b"))]
    #[case("B)  spaced  ", Some("spaced"))]
    #[case("no label", None)]
    #[case("A)tight", None)]
    fn strips_label(#[case] rest: &str, #[case] expected: Option<&str>) {
        assert_eq!(TextLineClassifier::strip_label(rest), expected);
    }
}
