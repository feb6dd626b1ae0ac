use super::{BlockEncoder, Row, is_blank};

/// Regroups an encoded row stream into blocks.
///
/// A row whose first field contains the marker opens a new block; the block
/// in progress is emitted followed by a single blank row. Blank rows from
/// the input are dropped so each block ends with exactly one separator.
pub struct Resegmenter {
    marker: String,
    current: Vec<Row>,
    out: Vec<Row>,
}

impl Resegmenter {
    pub fn new(marker: impl Into<String>) -> Self {
        Self {
            marker: marker.into(),
            current: vec![],
            out: vec![],
        }
    }

    pub fn push(&mut self, row: Row) {
        if is_blank(&row) {
            return;
        }
        if self.opens_block(&row) {
            self.flush_block();
        }
        self.current.push(row);
    }

    /// Flushes a trailing partial block and returns all rows.
    pub fn finish(mut self) -> Vec<Row> {
        // EOF flush
        self.flush_block();
        self.out
    }

    fn opens_block(&self, row: &Row) -> bool {
        row.first()
            .is_some_and(|field| field.contains(self.marker.as_str()))
    }

    fn flush_block(&mut self) {
        if self.current.is_empty() {
            return;
        }
        self.out.append(&mut self.current);
        self.out.push(Row::new());
    }
}

impl Default for Resegmenter {
    fn default() -> Self {
        Self::new(BlockEncoder::NEW_QUESTION)
    }
}

/// Convenience: regroup a whole row stream with the given marker.
pub fn resegment<I>(rows: I, marker: &str) -> Vec<Row>
where
    I: IntoIterator<Item = Row>,
{
    let mut resegmenter = Resegmenter::new(marker);
    for row in rows {
        resegmenter.push(row);
    }
    resegmenter.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn row(fields: &[&str]) -> Row {
        fields.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn inserts_missing_separators() {
        let input = vec![
            row(&["NewQuestion", "MC", "", ""]),
            row(&["ID", "Q001", "", ""]),
            row(&["NewQuestion", "MC", "", ""]),
            row(&["ID", "Q002", "", ""]),
        ];

        let out = resegment(input, "NewQuestion");

        assert_eq!(
            out,
            vec![
                row(&["NewQuestion", "MC", "", ""]),
                row(&["ID", "Q001", "", ""]),
                row(&[]),
                row(&["NewQuestion", "MC", "", ""]),
                row(&["ID", "Q002", "", ""]),
                row(&[]),
            ]
        );
    }

    #[test]
    fn collapses_existing_separators() {
        let input = vec![
            row(&["NewQuestion", "MC"]),
            row(&[]),
            row(&["", "", "", ""]),
            row(&["ID", "Q001"]),
            row(&[""]),
        ];

        let out = resegment(input, "NewQuestion");

        assert_eq!(
            out,
            vec![row(&["NewQuestion", "MC"]), row(&["ID", "Q001"]), row(&[])]
        );
    }

    #[test]
    fn marker_is_a_case_sensitive_substring() {
        let mut r = Resegmenter::new("NewQuestion");
        r.push(row(&["NewQuestion", "MC"]));
        r.push(row(&["newquestion", "MC"]));
        r.push(row(&["#NewQuestion#", "MC"]));

        let out = r.finish();
        assert_eq!(
            out,
            vec![
                row(&["NewQuestion", "MC"]),
                row(&["newquestion", "MC"]),
                row(&[]),
                row(&["#NewQuestion#", "MC"]),
                row(&[]),
            ]
        );
    }

    #[test]
    fn rows_before_first_marker_form_their_own_block() {
        let out = resegment(
            vec![row(&["stray"]), row(&["NewQuestion", "MC"])],
            "NewQuestion",
        );

        assert_eq!(
            out,
            vec![
                row(&["stray"]),
                row(&[]),
                row(&["NewQuestion", "MC"]),
                row(&[]),
            ]
        );
    }

    #[test]
    fn empty_input_gives_empty_output() {
        assert!(resegment(Vec::<Row>::new(), "NewQuestion").is_empty());
    }

    #[test]
    fn default_marker_is_new_question() {
        let mut r = Resegmenter::default();
        r.push(row(&["NewQuestion"]));
        r.push(row(&["NewQuestion"]));
        assert_eq!(r.finish().len(), 4);
    }
}
