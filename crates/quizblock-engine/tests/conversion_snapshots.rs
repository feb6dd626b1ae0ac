use std::path::PathBuf;

use quizblock_engine::{
    convert_csv_file, convert_directory, convert_text_file, encoding::resegment::resegment,
    io, parsing::TextOptions, resegment_file,
};
use tempfile::TempDir;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(format!("{}/tests/fixtures/{name}", env!("CARGO_MANIFEST_DIR")))
}

#[test]
fn fixture_delimited_sheet() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("questions_d2l.csv");

    let report = convert_csv_file(&fixture("questions.csv"), &output).unwrap();

    assert_eq!(report.blocks_written, 4);
    assert_eq!(report.skipped.len(), 1);
    assert!(report.skipped[0].contains("Row 4"));

    let rows = io::read_rows(&output).unwrap();
    insta::assert_debug_snapshot!("delimited_sheet", rows);
}

#[test]
fn fixture_free_text_sheet() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("python_quiz_d2l.csv");

    let report =
        convert_text_file(&fixture("python_quiz.txt"), &output, &TextOptions::default()).unwrap();

    assert_eq!(report.blocks_written, 3);
    assert!(report.skipped.is_empty());

    let rows = io::read_rows(&output).unwrap();
    insta::assert_debug_snapshot!("free_text_sheet", rows);
}

#[test]
fn fixture_resegmented_file() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("fixed.csv");

    let blocks = resegment_file(&fixture("unsegmented.csv"), &output, "NewQuestion").unwrap();

    assert_eq!(blocks, 2);
    let text = std::fs::read_to_string(&output).unwrap();
    assert_eq!(
        text,
        "NewQuestion,MC,,\r\nID,Q001,,\r\nOption,100,yes\r\n\r\n\
         NewQuestion,MC,,\r\nID,Q002,,\r\nOption,0,no\r\n\r\n"
    );
}

#[test]
fn written_blocks_are_separated_by_one_blank_line() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("out.csv");

    convert_csv_file(&fixture("questions.csv"), &output).unwrap();

    let text = std::fs::read_to_string(&output).unwrap();
    assert!(text.starts_with("NewQuestion,MC,,\r\nID,Q001,,\r\n"));
    assert!(text.ends_with("Feedback,,,\r\n\r\n"));
    assert!(!text.contains("\r\n\r\n\r\n"));
    assert_eq!(text.matches("\r\n\r\nNewQuestion").count(), 3);
}

#[test]
fn converted_output_resegments_to_itself() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("out.csv");
    convert_csv_file(&fixture("questions.csv"), &output).unwrap();

    let rows = io::read_rows(&output).unwrap();
    let regrouped = resegment(rows.clone(), "NewQuestion");

    assert_eq!(regrouped.iter().filter(|r| r.is_empty()).count(), 4);
    let without_separators: Vec<_> = regrouped.into_iter().filter(|r| !r.is_empty()).collect();
    assert_eq!(without_separators, rows);
}

#[test]
fn directory_batch_continues_past_a_bad_file() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    std::fs::copy(fixture("questions.csv"), input.path().join("a_week1.csv")).unwrap();
    std::fs::write(input.path().join("b_broken.csv"), b"Type\n\xff\xfe,bad\n").unwrap();
    std::fs::copy(fixture("questions.csv"), input.path().join("c_week2.csv")).unwrap();
    std::fs::write(input.path().join("readme.txt"), "not a sheet").unwrap();

    let out_dir = output.path().join("converted");
    let report = convert_directory(input.path(), &out_dir).unwrap();

    assert_eq!(report.converted.len(), 2);
    assert_eq!(report.failed.len(), 1);
    assert!(report.failed[0].0.ends_with("b_broken.csv"));
    assert!(!report.is_success());
    assert!(out_dir.join("a_week1_d2l.csv").exists());
    assert!(out_dir.join("c_week2_d2l.csv").exists());
    assert!(!out_dir.join("b_broken_d2l.csv").exists());
}

#[test]
fn directory_batch_in_place_skips_its_own_outputs() {
    let dir = TempDir::new().unwrap();
    std::fs::copy(fixture("questions.csv"), dir.path().join("week1.csv")).unwrap();

    let first = convert_directory(dir.path(), dir.path()).unwrap();
    let second = convert_directory(dir.path(), dir.path()).unwrap();

    assert_eq!(first.converted.len(), 1);
    assert_eq!(second.converted.len(), 1);
    assert!(second.converted[0].0.ends_with("week1.csv"));
    assert!(second.is_success());
    assert!(dir.path().join("week1_d2l.csv").exists());
    assert!(!dir.path().join("week1_d2l_d2l.csv").exists());
}

#[test]
fn directory_batch_rejects_missing_input() {
    let output = TempDir::new().unwrap();

    let result = convert_directory(&fixture("no_such_dir"), output.path());

    assert!(result.is_err());
}

#[test]
fn malformed_text_line_aborts_the_file() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("bad.txt");
    let output = dir.path().join("bad_d2l.csv");
    std::fs::write(&input, "Q?\n• no label here\n").unwrap();

    let result = convert_text_file(&input, &output, &TextOptions::default());

    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("Line 2"));
    assert!(!output.exists());
}
