use crate::encoding::Row;
use chrono::{DateTime, TimeZone};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("File not found: {0}")]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Invalid directory: {0}")]
    InvalidDirectory(String),
}

/// Suffix appended to the stem of a converted file.
pub const CONVERTED_SUFFIX: &str = "_d2l";

const LINE_END: &[u8] = b"\r\n";

/// Read every row of a CSV file. Rows may have differing field counts.
pub fn read_rows(path: &Path) -> Result<Vec<Row>, IoError> {
    if !path.exists() {
        return Err(IoError::NotFound(path.to_path_buf()));
    }

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)?;

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(str::to_string).collect());
    }
    Ok(rows)
}

/// Read a text file as lines, without line terminators.
pub fn read_lines(path: &Path) -> Result<Vec<String>, IoError> {
    if !path.exists() {
        return Err(IoError::NotFound(path.to_path_buf()));
    }
    let content = fs::read_to_string(path)?;
    Ok(content.lines().map(str::to_string).collect())
}

/// Writes rows as comma-separated lines terminated by CRLF.
///
/// An empty row is written as an empty line rather than the `""` a CSV
/// writer would produce for a zero-field record.
pub struct CsvRowWriter<W: Write> {
    inner: csv::Writer<W>,
}

impl<W: Write> CsvRowWriter<W> {
    pub fn new(writer: W) -> Self {
        let inner = csv::WriterBuilder::new()
            .flexible(true)
            .terminator(csv::Terminator::CRLF)
            .from_writer(writer);
        Self { inner }
    }

    pub fn write_row(&mut self, row: &[String]) -> Result<(), IoError> {
        if row.is_empty() {
            self.inner.flush()?;
            self.inner.get_mut().write_all(LINE_END)?;
        } else {
            self.inner.write_record(row)?;
        }
        Ok(())
    }

    pub fn write_rows<'a, I>(&mut self, rows: I) -> Result<(), IoError>
    where
        I: IntoIterator<Item = &'a Row>,
    {
        for row in rows {
            self.write_row(row)?;
        }
        Ok(())
    }

    pub fn flush(&mut self) -> Result<(), IoError> {
        self.inner.flush()?;
        Ok(())
    }
}

/// Write rows to a CSV file, creating parent directories as needed.
pub fn write_rows(path: &Path, rows: &[Row]) -> Result<(), IoError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }

    let file = fs::File::create(path)?;
    let mut writer = CsvRowWriter::new(file);
    writer.write_rows(rows)?;
    writer.flush()
}

/// Scan a directory (non-recursively) for `*.csv` files, sorted by path.
pub fn scan_csv_files(dir: &Path) -> Result<Vec<PathBuf>, IoError> {
    validate_dir(dir)?;

    let pattern = format!(
        "{}/*.csv",
        glob::Pattern::escape(&dir.to_string_lossy())
    );
    let entries =
        glob::glob(&pattern).map_err(|e| IoError::InvalidDirectory(e.to_string()))?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| IoError::Io(e.into_error()))?;
        if path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

pub fn validate_dir(path: &Path) -> Result<(), IoError> {
    if !path.exists() || !path.is_dir() {
        return Err(IoError::InvalidDirectory(format!(
            "{} does not exist",
            path.display()
        )));
    }

    Ok(())
}

/// `<output_dir>/<stem>_d2l.csv` for a given input file.
pub fn converted_path(input: &Path, output_dir: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "questions".to_string());
    output_dir.join(format!("{stem}{CONVERTED_SUFFIX}.csv"))
}

/// First free export path in `dir` for a timestamp, e.g.
/// `2024_Mar_05_02PM_07.csv`. Exports within the same
/// minute get `_2`, `_3`, ... appended to the stem.
pub fn unique_export_path<Tz>(dir: &Path, at: &DateTime<Tz>) -> PathBuf
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let stem = export_stem(at);
    let first = dir.join(format!("{stem}.csv"));
    if !first.exists() {
        return first;
    }
    (2..)
        .map(|n| dir.join(format!("{stem}_{n}.csv")))
        .find(|path| !path.exists())
        .unwrap_or(first)
}

fn export_stem<Tz>(at: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    at.format("%Y_%b_%d_%I%p_%M").to_string()
}
