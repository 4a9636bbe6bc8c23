use std::io::Read;
use std::path::Path;

use csv::StringRecord;
use thiserror::Error;

use super::model::{Sample, Series};

/// Column holding the timestamp of each row.
pub const TIME_COLUMN: &str = "time";
/// Column holding the measured value of each row.
pub const VALUE_COLUMN: &str = "value";

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("could not read file: {0}")]
    Csv(#[from] csv::Error),

    #[error("CSV must contain 'time' and 'value' columns (missing '{0}')")]
    MissingColumn(&'static str),

    #[error("row {row}, column '{column}': '{text}' is not a number")]
    NotANumber {
        row: usize,
        column: &'static str,
        text: String,
    },
}

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load a `time,value` series from a CSV file on disk.
pub fn load_csv(path: &Path) -> Result<Series, LoadError> {
    let reader = csv::Reader::from_path(path)?;
    read_series(reader)
}

/// Load a series from any CSV source (used by tests and by [`load_csv`]).
pub fn load_csv_from_reader<R: Read>(source: R) -> Result<Series, LoadError> {
    read_series(csv::Reader::from_reader(source))
}

// ---------------------------------------------------------------------------
// CSV parsing
// ---------------------------------------------------------------------------

/// CSV layout: header row with column names, at least `time` and `value`.
/// Every other column is carried through untouched so export can write it back.
/// Blank `time` / `value` cells load as NaN.
fn read_series<R: Read>(mut reader: csv::Reader<R>) -> Result<Series, LoadError> {
    let headers = reader.headers()?.clone();

    let time_index = column_index(&headers, TIME_COLUMN)?;
    let value_index = column_index(&headers, VALUE_COLUMN)?;

    let mut records = Vec::new();
    let mut samples = Vec::new();

    for (row_no, result) in reader.records().enumerate() {
        let record = result?;
        let time = parse_cell(&record, time_index, row_no, TIME_COLUMN)?;
        let value = parse_cell(&record, value_index, row_no, VALUE_COLUMN)?;
        samples.push(Sample { time, value });
        records.push(record);
    }

    Ok(Series {
        headers,
        records,
        samples,
        time_index,
        value_index,
    })
}

fn column_index(headers: &StringRecord, name: &'static str) -> Result<usize, LoadError> {
    headers
        .iter()
        .position(|h| h == name)
        .ok_or(LoadError::MissingColumn(name))
}

fn parse_cell(
    record: &StringRecord,
    index: usize,
    row: usize,
    column: &'static str,
) -> Result<f64, LoadError> {
    let text = record.get(index).unwrap_or("");
    // Blank cells are missing data, not errors.
    if text.trim().is_empty() {
        return Ok(f64::NAN);
    }
    text.trim().parse::<f64>().map_err(|_| LoadError::NotANumber {
        row,
        column,
        text: text.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn loads_time_and_value_with_extra_columns() {
        let csv = "sensor,time,value\nA,0,10\nA,1.5, 20.25\nB,3,-4\n";
        let series = load_csv_from_reader(csv.as_bytes()).unwrap();

        assert_eq!(series.len(), 3);
        assert_eq!(series.time_index, 1);
        assert_eq!(series.value_index, 2);
        assert_eq!(series.samples[1], Sample { time: 1.5, value: 20.25 });
        assert_eq!(series.records[2].get(0), Some("B"));
    }

    #[test]
    fn column_names_are_case_sensitive() {
        let err = load_csv_from_reader("Time,value\n0,1\n".as_bytes()).unwrap_err();
        assert!(matches!(err, LoadError::MissingColumn("time")));

        let err = load_csv_from_reader("time,VALUE\n0,1\n".as_bytes()).unwrap_err();
        assert!(matches!(err, LoadError::MissingColumn("value")));
    }

    #[test]
    fn non_numeric_cell_is_reported_with_its_row() {
        let err = load_csv_from_reader("time,value\n0,1\n1,abc\n".as_bytes()).unwrap_err();
        match err {
            LoadError::NotANumber { row, column, text } => {
                assert_eq!(row, 1);
                assert_eq!(column, "value");
                assert_eq!(text, "abc");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn blank_cells_load_as_nan() {
        let series = load_csv_from_reader("time,value\n0,10\n1,\n ,30\n".as_bytes()).unwrap();

        assert_eq!(series.len(), 3);
        assert!(series.samples[1].value.is_nan());
        assert!(series.samples[2].time.is_nan());
        assert_eq!(series.samples[2].value, 30.0);
        assert_eq!(series.records[1].get(1), Some(""));
    }

    #[test]
    fn ragged_rows_are_rejected() {
        let err = load_csv_from_reader("time,value\n0,1\n1\n".as_bytes()).unwrap_err();
        assert!(matches!(err, LoadError::Csv(_)));
    }

    #[test]
    fn header_only_file_yields_empty_series() {
        let series = load_csv_from_reader("time,value\n".as_bytes()).unwrap();
        assert!(series.is_empty());
    }

    #[test]
    fn loads_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "time,value\n0,10\n1,20").unwrap();

        let series = load_csv(file.path()).unwrap();
        assert_eq!(series.len(), 2);
    }

    #[test]
    fn missing_file_is_a_load_error() {
        let err = load_csv(Path::new("/definitely/not/here.csv")).unwrap_err();
        assert!(matches!(err, LoadError::Csv(_)));
    }
}
