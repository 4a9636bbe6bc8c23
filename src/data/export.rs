use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use csv::StringRecord;

use super::model::Series;
use crate::labeling::labels::LabelSet;

/// Name of the column added (or overwritten) on export.
pub const LABEL_COLUMN: &str = "label";

// ---------------------------------------------------------------------------
// Summary statistics
// ---------------------------------------------------------------------------

/// Mean `value` of labeled vs. unlabeled rows. A mean is NaN when its group is empty.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelStats {
    pub labeled_mean: f64,
    pub unlabeled_mean: f64,
    pub labeled_rows: usize,
    pub unlabeled_rows: usize,
}

// ---------------------------------------------------------------------------
// Label assignment
// ---------------------------------------------------------------------------

/// Label for every row: the last interval (in drawing order) containing its time.
pub fn assign_labels(series: &Series, labels: &LabelSet) -> Vec<Option<String>> {
    series
        .samples
        .iter()
        .map(|s| labels.label_at(s.time).map(str::to_string))
        .collect()
}

/// Compute the labeled / unlabeled means for an assignment.
///
/// Rows with a missing (NaN) value count toward neither group.
pub fn summarize(series: &Series, assignments: &[Option<String>]) -> LabelStats {
    let (mut lab_sum, mut lab_n) = (0.0, 0usize);
    let (mut unl_sum, mut unl_n) = (0.0, 0usize);

    for (sample, label) in series.samples.iter().zip(assignments) {
        if sample.value.is_nan() {
            continue;
        }
        if label.is_some() {
            lab_sum += sample.value;
            lab_n += 1;
        } else {
            unl_sum += sample.value;
            unl_n += 1;
        }
    }

    LabelStats {
        labeled_mean: mean(lab_sum, lab_n),
        unlabeled_mean: mean(unl_sum, unl_n),
        labeled_rows: lab_n,
        unlabeled_rows: unl_n,
    }
}

fn mean(sum: f64, n: usize) -> f64 {
    if n == 0 {
        f64::NAN
    } else {
        sum / n as f64
    }
}

// ---------------------------------------------------------------------------
// CSV writer
// ---------------------------------------------------------------------------

/// Write the original table plus a `label` column.
///
/// If the input already had a `label` column it is replaced in place.
pub fn write_labeled_csv<W: Write>(
    out: W,
    series: &Series,
    assignments: &[Option<String>],
) -> Result<()> {
    let mut writer = csv::Writer::from_writer(out);
    let existing = series.headers.iter().position(|h| h == LABEL_COLUMN);

    let header = with_label(&series.headers, existing, LABEL_COLUMN);
    writer.write_record(&header).context("writing CSV header")?;

    for (row_no, (record, label)) in series.records.iter().zip(assignments).enumerate() {
        let row = with_label(record, existing, label.as_deref().unwrap_or(""));
        writer
            .write_record(&row)
            .with_context(|| format!("writing CSV row {row_no}"))?;
    }

    writer.flush().context("flushing CSV output")?;
    Ok(())
}

fn with_label(record: &StringRecord, existing: Option<usize>, label: &str) -> StringRecord {
    match existing {
        Some(idx) => record
            .iter()
            .enumerate()
            .map(|(i, field)| if i == idx { label } else { field })
            .collect(),
        None => {
            let mut row = record.clone();
            row.push_field(label);
            row
        }
    }
}

/// Label every row, write the result to `path` and return the statistics.
pub fn export_to_path(path: &Path, series: &Series, labels: &LabelSet) -> Result<LabelStats> {
    let assignments = assign_labels(series, labels);
    let file = std::fs::File::create(path)
        .with_context(|| format!("creating {}", path.display()))?;
    write_labeled_csv(file, series, &assignments)?;
    Ok(summarize(series, &assignments))
}
