//! Batch input parsing.
//!
//! The first line must be exactly `totalIncome,wht,donation`; every following
//! line is one filer. Whitespace around cells is ignored and every row must
//! have three columns.
//!
//! ```csv
//! totalIncome,wht,donation
//! 500000.0,0.0,0.0
//! 600000.0,40000.0,20000.0
//! ```

use std::io::Read;
use std::path::Path;

use tax_core::BatchRecord;
use tax_core::calculations::{ValidationError, validate_batch_record};
use thiserror::Error;

/// The only accepted header, column for column.
pub const BATCH_CSV_HEADER: [&str; 3] = ["totalIncome", "wht", "donation"];

/// Errors raised while reading a batch file. Row numbers are 1-based and
/// exclude the header.
#[derive(Debug, Error)]
pub enum BatchCsvError {
    #[error("invalid CSV header: expected 'totalIncome,wht,donation', found '{0}'")]
    InvalidHeader(String),

    #[error("CSV parse error on row {row}: {message}")]
    CsvParse { row: usize, message: String },

    #[error("row {row}: {source}")]
    Validation {
        row: usize,
        #[source]
        source: ValidationError,
    },

    #[error("failed to read CSV: {0}")]
    Io(#[from] std::io::Error),
}

pub struct BatchCsvLoader;

impl BatchCsvLoader {
    /// Parse every row, stopping at the first bad one.
    pub fn parse<R: Read>(reader: R) -> Result<Vec<BatchRecord>, BatchCsvError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .flexible(false)
            .from_reader(reader);

        let headers = csv_reader.headers().map_err(|e| BatchCsvError::CsvParse {
            row: 0,
            message: e.to_string(),
        })?;
        if headers.iter().ne(BATCH_CSV_HEADER) {
            return Err(BatchCsvError::InvalidHeader(
                headers.iter().collect::<Vec<_>>().join(","),
            ));
        }

        csv_reader
            .deserialize::<BatchRecord>()
            .enumerate()
            .map(|(idx, result)| {
                let row = idx + 1;
                let record = result.map_err(|e| BatchCsvError::CsvParse {
                    row,
                    message: csv_error_message(&e),
                })?;
                validate_batch_record(&record)
                    .map_err(|source| BatchCsvError::Validation { row, source })?;
                Ok(record)
            })
            .collect()
    }

    pub fn parse_str(input: &str) -> Result<Vec<BatchRecord>, BatchCsvError> {
        Self::parse(input.as_bytes())
    }

    pub fn load_from_file(path: &Path) -> Result<Vec<BatchRecord>, BatchCsvError> {
        let file = std::fs::File::open(path)?;
        Self::parse(file)
    }
}

// csv's Display for deserialize errors repeats the position we already report.
fn csv_error_message(err: &csv::Error) -> String {
    match err.kind() {
        csv::ErrorKind::Deserialize { err, .. } => err.to_string(),
        csv::ErrorKind::UnequalLengths {
            expected_len, len, ..
        } => format!("expected {expected_len} columns, found {len}"),
        _ => err.to_string(),
    }
}
