//! File-level conversion pipelines: read, parse, encode, write.
//!
//! Malformed rows and records without options are skipped and reported in
//! the [`ConversionReport`]. I/O failures and malformed free-text lines
//! abort the file being converted.

use std::path::{Path, PathBuf};

use crate::encoding::{BlockEncoder, Row, resegment::Resegmenter};
use crate::io::{self, IoError};
use crate::models::QuestionRecord;
use crate::parsing::{ParseError, TextOptions, parse_delimited, parse_free_text};

#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    #[error(transparent)]
    Io(#[from] IoError),
    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Textual status of one converted file.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConversionReport {
    pub blocks_written: usize,
    pub skipped: Vec<String>,
}

impl ConversionReport {
    pub fn summary(&self) -> String {
        if self.skipped.is_empty() {
            format!("{} questions written", self.blocks_written)
        } else {
            format!(
                "{} questions written, {} skipped",
                self.blocks_written,
                self.skipped.len()
            )
        }
    }
}

/// Outcome of converting every CSV file in a directory.
#[derive(Debug, Default)]
pub struct DirectoryReport {
    pub converted: Vec<(PathBuf, ConversionReport)>,
    pub failed: Vec<(PathBuf, ConvertError)>,
}

impl DirectoryReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Encodes records in order into rows, collecting skipped entries.
pub fn encode_records<I>(records: I, report: &mut ConversionReport) -> Vec<Row>
where
    I: IntoIterator<Item = QuestionRecord>,
{
    let batch = BlockEncoder.encode_all(records);
    report.blocks_written += batch.blocks;
    report
        .skipped
        .extend(batch.rejected.iter().map(ToString::to_string));
    batch.rows
}

/// Source rows (header first) to encoded rows.
pub fn convert_rows(rows: Vec<Row>) -> (Vec<Row>, ConversionReport) {
    let mut report = ConversionReport::default();

    let records: Vec<QuestionRecord> = parse_delimited(rows)
        .filter_map(|result| match result {
            Ok(record) => Some(record),
            Err(e) => {
                log::warn!("Skipping row: {e}");
                report.skipped.push(e.to_string());
                None
            }
        })
        .collect();

    let out = encode_records(records, &mut report);
    (out, report)
}

/// Free-text lines to encoded rows.
pub fn convert_lines<I, S>(
    lines: I,
    options: &TextOptions,
) -> Result<(Vec<Row>, ConversionReport), ParseError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let records = parse_free_text(lines, options)?;
    let mut report = ConversionReport::default();
    let out = encode_records(records, &mut report);
    Ok((out, report))
}

pub fn convert_csv_file(input: &Path, output: &Path) -> Result<ConversionReport, ConvertError> {
    let rows = io::read_rows(input)?;
    let (out, report) = convert_rows(rows);
    io::write_rows(output, &out)?;
    log::info!("Wrote {} ({})", output.display(), report.summary());
    Ok(report)
}

pub fn convert_text_file(
    input: &Path,
    output: &Path,
    options: &TextOptions,
) -> Result<ConversionReport, ConvertError> {
    let lines = io::read_lines(input)?;
    let (out, report) = convert_lines(&lines, options)?;
    io::write_rows(output, &out)?;
    log::info!("Wrote {} ({})", output.display(), report.summary());
    Ok(report)
}

/// Regroups an already-encoded file into cleanly separated blocks.
pub fn resegment_file(input: &Path, output: &Path, marker: &str) -> Result<usize, ConvertError> {
    let rows = io::read_rows(input)?;

    let mut resegmenter = Resegmenter::new(marker);
    for row in rows {
        resegmenter.push(row);
    }
    let out = resegmenter.finish();
    let blocks = out.iter().filter(|row| row.is_empty()).count();

    io::write_rows(output, &out)?;
    log::info!("Wrote {} ({blocks} blocks)", output.display());
    Ok(blocks)
}

/// Converts every `*.csv` in `input_dir` to `<stem>_d2l.csv` in `output_dir`.
///
/// A file that fails is recorded and the batch moves on to the next file.
/// Files whose stem already ends in `_d2l` are earlier outputs and are
/// skipped, so `output_dir` may be the same as `input_dir`.
pub fn convert_directory(input_dir: &Path, output_dir: &Path) -> Result<DirectoryReport, IoError> {
    let files = io::scan_csv_files(input_dir)?;
    std::fs::create_dir_all(output_dir)?;

    let mut report = DirectoryReport::default();
    for input in files {
        if is_converted_output(&input) {
            log::debug!("Skipping converted file {}", input.display());
            continue;
        }
        let output = io::converted_path(&input, output_dir);
        match convert_csv_file(&input, &output) {
            Ok(file_report) => report.converted.push((input, file_report)),
            Err(e) => {
                log::warn!("Failed to convert {}: {e}", input.display());
                report.failed.push((input, e));
            }
        }
    }

    Ok(report)
}

fn is_converted_output(path: &Path) -> bool {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .is_some_and(|stem| stem.ends_with(io::CONVERTED_SUFFIX))
}
