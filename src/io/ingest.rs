//! Observation CSV ingest.
//!
//! Reads a long-format file (`series_id,date,value`) such as the one written
//! by `tight fetch`, so a run can be repeated without hitting the provider.
//!
//! Design goals:
//! - **Strict schema** for required columns (clear errors + exit code 2)
//! - **Row-level validation** (skip bad rows, but report what happened)
//! - **Missing markers** (`.` or empty value) are skipped silently, matching FRED

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::NaiveDate;
use csv::StringRecord;

use crate::domain::RawObservation;
use crate::error::AppError;

const COL_SERIES: &str = "series_id";
const COL_DATE: &str = "date";
const COL_VALUE: &str = "value";

/// A row-level error encountered during ingest.
#[derive(Debug, Clone)]
pub struct RowError {
    pub line: usize,
    pub message: String,
}

/// Ingest output: parsed observations + row errors.
#[derive(Debug, Clone)]
pub struct IngestedObservations {
    pub observations: Vec<RawObservation>,
    pub row_errors: Vec<RowError>,
    pub rows_read: usize,
}

/// Load observations from a CSV file.
pub fn load_observations_csv(path: &Path) -> Result<IngestedObservations, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::config(format!("Failed to open CSV '{}': {e}", path.display())))?;
    read_observations(file)
}

/// Load observations from any CSV reader.
pub fn read_observations<R: Read>(input: R) -> Result<IngestedObservations, AppError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(input);

    let headers = reader
        .headers()
        .map_err(|e| AppError::config(format!("Failed to read CSV headers: {e}")))?
        .clone();
    let header_map = build_header_map(&headers);
    for required in [COL_SERIES, COL_DATE, COL_VALUE] {
        if !header_map.contains_key(required) {
            return Err(AppError::config(format!("Missing required column: `{required}`")));
        }
    }

    let mut observations = Vec::new();
    let mut row_errors = Vec::new();
    let mut rows_read = 0usize;

    for (idx, result) in reader.records().enumerate() {
        // +2: records start after the header, lines are 1-based.
        let line = idx + 2;
        rows_read += 1;

        let record = match result {
            Ok(r) => r,
            Err(e) => {
                row_errors.push(RowError {
                    line,
                    message: format!("CSV parse error: {e}"),
                });
                continue;
            }
        };

        match parse_row(&record, &header_map) {
            Ok(Some(obs)) => observations.push(obs),
            Ok(None) => {}
            Err(message) => row_errors.push(RowError { line, message }),
        }
    }

    for e in &row_errors {
        log::warn!("skipping CSV line {}: {}", e.line, e.message);
    }
    if observations.is_empty() {
        return Err(AppError::data("No valid observations in CSV."));
    }

    Ok(IngestedObservations {
        observations,
        row_errors,
        rows_read,
    })
}

fn build_header_map(headers: &StringRecord) -> HashMap<String, usize> {
    headers
        .iter()
        .enumerate()
        .map(|(idx, name)| (normalize_header_name(name), idx))
        .collect()
}

fn normalize_header_name(name: &str) -> String {
    // Spreadsheet exports sometimes prefix the first header with a BOM.
    let name = name.trim().trim_start_matches('\u{feff}');
    name.to_ascii_lowercase()
}

fn get_field<'a>(record: &'a StringRecord, header_map: &HashMap<String, usize>, name: &str) -> Option<&'a str> {
    header_map
        .get(name)
        .and_then(|&idx| record.get(idx))
        .map(str::trim)
}

fn parse_row(record: &StringRecord, header_map: &HashMap<String, usize>) -> Result<Option<RawObservation>, String> {
    let series_id = get_field(record, header_map, COL_SERIES)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| "Missing `series_id`.".to_string())?;
    let raw_date = get_field(record, header_map, COL_DATE)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| "Missing `date`.".to_string())?;
    let date = NaiveDate::parse_from_str(raw_date, "%Y-%m-%d")
        .map_err(|e| format!("Invalid date '{raw_date}': {e}"))?;

    let raw_value = get_field(record, header_map, COL_VALUE).unwrap_or("");
    if raw_value.is_empty() || raw_value == "." {
        return Ok(None);
    }
    let value: f64 = raw_value
        .parse()
        .map_err(|_| format!("Invalid value '{raw_value}'."))?;
    if !value.is_finite() {
        return Err(format!("Non-finite value '{raw_value}'."));
    }

    Ok(Some(RawObservation {
        series_id: series_id.to_string(),
        date,
        value,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_valid_rows_and_reports_bad_ones() {
        let csv = "\u{feff}Series_ID,date,value\n\
                   UNRATE,2001-01-01,4.2\n\
                   UNRATE,2001-04-01,.\n\
                   UNRATE,2001-07-01,abc\n\
                   PAYEMS,01/10/2001,131000\n\
                   PAYEMS,2001-10-01,131900\n";
        let ingested = read_observations(csv.as_bytes()).unwrap();

        assert_eq!(ingested.rows_read, 5);
        assert_eq!(ingested.observations.len(), 2);
        assert_eq!(ingested.row_errors.len(), 2);
        assert_eq!(ingested.row_errors[0].line, 4);
        assert_eq!(ingested.observations[1].series_id, "PAYEMS");
    }

    #[test]
    fn missing_column_is_a_config_error() {
        let err = read_observations("series_id,date\nUNRATE,2001-01-01\n".as_bytes()).unwrap_err();
        assert_eq!(err.exit_code(), crate::error::EXIT_CONFIG);
    }

    #[test]
    fn no_valid_rows_is_a_data_error() {
        let err = read_observations("series_id,date,value\nUNRATE,2001-01-01,.\n".as_bytes()).unwrap_err();
        assert_eq!(err.exit_code(), crate::error::EXIT_DATA);
    }
}
